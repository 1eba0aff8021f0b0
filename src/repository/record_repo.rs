// ==========================================
// ImportedRecordRepository - generic imported-document store
// ==========================================
// One repository type serves both physical tables (alcohol_items,
// realtime_error_items); they share a single shape. Repository does
// data mapping only, no business logic.
// ==========================================

use crate::domain::record::{ImportedRecord, RecordSource};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ImportedRecordRepository {
    conn: Arc<Mutex<Connection>>,
    table: &'static str,
}

impl ImportedRecordRepository {
    /// Store backing the bottle rule evaluator and alcohol imports.
    pub fn alcohol(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            table: "alcohol_items",
        }
    }

    /// Store backing the mock real-time error comparison tool.
    pub fn realtime(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            table: "realtime_error_items",
        }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Writes
    // ==========================================

    /// Insert one record; returns the assigned rowid.
    pub fn insert(
        &self,
        source: RecordSource,
        data: &Value,
        raw_text: Option<&str>,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (source, data, raw_text) VALUES (?1, ?2, ?3)",
                self.table
            ),
            params![source.as_str(), data.to_string(), raw_text],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Delete every record. Used only by re-seeding; not atomic against
    /// concurrent readers (accepted for demo data).
    pub fn clear(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(&format!("DELETE FROM {}", self.table), [])?;
        Ok(rows)
    }

    // ==========================================
    // Reads
    // ==========================================

    /// Most recent records first.
    pub fn list(&self, limit: u32) -> RepositoryResult<Vec<ImportedRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, source, data, raw_text, inserted_at FROM {} ORDER BY id DESC LIMIT ?1",
            self.table
        ))?;
        let rows = stmt
            .query_map(params![limit], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Records of one provenance, oldest first.
    ///
    /// Import sequence is the documented rule priority: the dataset rule
    /// evaluator scans these rows in exactly this order.
    pub fn list_by_source(&self, source: RecordSource) -> RepositoryResult<Vec<ImportedRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, source, data, raw_text, inserted_at FROM {} \
             WHERE source = ?1 ORDER BY id ASC",
            self.table
        ))?;
        let rows = stmt
            .query_map(params![source.as_str()], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Find the record whose `Layout` column equals `Layout_<n>`.
    ///
    /// Full scan over the table; acceptable for the six-row demo dataset.
    pub fn find_by_layout(&self, layout_number: i64) -> RepositoryResult<Option<ImportedRecord>> {
        let wanted = format!("Layout_{}", layout_number);
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, source, data, raw_text, inserted_at FROM {} ORDER BY id ASC",
            self.table
        ))?;
        let rows = stmt.query_map([], row_to_record)?;
        for row in rows {
            let record = row?;
            let layout = record
                .columns()
                .and_then(|cols| cols.get("Layout"))
                .and_then(|v| v.as_str());
            if layout == Some(wanted.as_str()) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

/// Map one row; an unparseable data blob degrades to `Value::String` so the
/// row still lists (the rule evaluator skips non-object data).
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ImportedRecord> {
    let id: i64 = row.get(0)?;
    let source_text: String = row.get(1)?;
    let data_text: String = row.get(2)?;
    let raw_text: Option<String> = row.get(3)?;
    let inserted_at: String = row.get(4)?;

    let source = source_text.parse::<RecordSource>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
    })?;

    let data = serde_json::from_str::<Value>(&data_text)
        .unwrap_or_else(|_| Value::String(data_text));

    Ok(ImportedRecord {
        id,
        source,
        data,
        raw_text,
        inserted_at,
    })
}
