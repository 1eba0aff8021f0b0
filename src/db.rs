// ==========================================
// Catering Execution Hub - SQLite bootstrap
// ==========================================
// Goals:
// - one place for Connection::open + PRAGMA behavior, so every module
//   sees the same foreign_keys / busy_timeout configuration
// - schema creation is idempotent (CREATE TABLE IF NOT EXISTS)
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the shared PRAGMA configuration to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must be
/// applied to every connection we open.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create all tables used by the hub.
///
/// Two generic imported-document tables share one shape (id, source,
/// data-as-JSON, raw text, insertion time): `alcohol_items` feeds the bottle
/// rule evaluator, `realtime_error_items` feeds the layout comparison tool.
/// Efficiency records are typed rows; employee_metrics holds one fully
/// recomputed row per employee and is never partially patched.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS alcohol_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source TEXT NOT NULL,
            data TEXT NOT NULL,
            raw_text TEXT,
            inserted_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS realtime_error_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source TEXT NOT NULL,
            data TEXT NOT NULL,
            raw_text TEXT,
            inserted_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS efficiency_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            record_id TEXT UNIQUE,
            employee_id TEXT NOT NULL,
            flight_number TEXT,
            spec_id TEXT,
            start_time TEXT,
            end_time TEXT,
            duration_seconds INTEGER NOT NULL DEFAULT 0,
            accuracy_score TEXT NOT NULL,
            items_packed INTEGER NOT NULL DEFAULT 0,
            rework_flag INTEGER NOT NULL DEFAULT 0,
            supervisor_notes TEXT NOT NULL DEFAULT '',
            inserted_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS employee_metrics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id TEXT UNIQUE NOT NULL,
            total_tasks INTEGER NOT NULL,
            total_duration INTEGER NOT NULL,
            total_items INTEGER NOT NULL,
            completed_tasks INTEGER NOT NULL,
            rework_tasks INTEGER NOT NULL,
            minor_errors INTEGER NOT NULL,
            average_time REAL NOT NULL,
            average_time_per_item REAL NOT NULL,
            accuracy_rate REAL NOT NULL,
            rework_rate REAL NOT NULL,
            efficiency_score INTEGER NOT NULL,
            last_updated TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
}
