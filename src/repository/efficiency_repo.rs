// ==========================================
// Efficiency repositories - packing records + derived metrics
// ==========================================
// EfficiencyRepository owns the typed efficiency_records table and the
// GROUP BY breakdown queries. EmployeeMetricsRepository persists the
// derived per-employee row, always replaced whole - never patched.
// ==========================================

use crate::domain::efficiency::{
    AccuracyScore, BreakdownRow, DatasetStats, EfficiencyRecord, EmployeeMetrics,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// Dimension of a GROUP BY breakdown over efficiency_records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownDimension {
    Flight,
    Spec,
    Hour,
    Day,
}

impl BreakdownDimension {
    /// SQL expression producing the group key.
    fn key_expr(&self) -> &'static str {
        match self {
            BreakdownDimension::Flight => "flight_number",
            BreakdownDimension::Spec => "spec_id",
            BreakdownDimension::Hour => "strftime('%H', start_time)",
            BreakdownDimension::Day => "date(start_time)",
        }
    }
}

// ==========================================
// EfficiencyRepository
// ==========================================
pub struct EfficiencyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EfficiencyRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Writes
    // ==========================================

    pub fn insert(&self, record: &EfficiencyRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO efficiency_records (
                record_id, employee_id, flight_number, spec_id, start_time, end_time,
                duration_seconds, accuracy_score, items_packed, rework_flag, supervisor_notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                record.record_id,
                record.employee_id,
                record.flight_number,
                record.spec_id,
                record.start_time,
                record.end_time,
                record.duration_seconds,
                record.accuracy_score.as_str(),
                record.items_packed,
                record.rework_flag as i64,
                record.supervisor_notes,
            ],
        )?;
        Ok(())
    }

    /// Delete every record. Used only by dataset re-seeding.
    pub fn clear(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM efficiency_records", [])?;
        Ok(rows)
    }

    // ==========================================
    // Reads
    // ==========================================

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM efficiency_records", [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<EfficiencyRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM efficiency_records ORDER BY id ASC",
            RECORD_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], row_to_efficiency_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// One employee's full record set, oldest first.
    pub fn list_by_employee(&self, employee_id: &str) -> RepositoryResult<Vec<EfficiencyRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM efficiency_records WHERE employee_id = ?1 ORDER BY id ASC",
            RECORD_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![employee_id], row_to_efficiency_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The employee's most recent records, returned oldest first.
    pub fn recent_by_employee(
        &self,
        employee_id: &str,
        limit: u32,
    ) -> RepositoryResult<Vec<EfficiencyRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM efficiency_records WHERE employee_id = ?1 \
             ORDER BY id DESC LIMIT ?2",
            RECORD_COLUMNS
        ))?;
        let mut rows = stmt
            .query_map(params![employee_id, limit], row_to_efficiency_record)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.reverse();
        Ok(rows)
    }

    pub fn distinct_employees(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT employee_id FROM efficiency_records ORDER BY employee_id",
        )?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ==========================================
    // SQL aggregates
    // ==========================================
    // These group by dimensions other than employee; per-employee metrics
    // never take the SQL path (single shared code path in metrics::aggregator
    // prevents presentation drift).

    pub fn breakdown(&self, dimension: BreakdownDimension) -> RepositoryResult<Vec<BreakdownRow>> {
        let conn = self.get_conn()?;
        let key = dimension.key_expr();
        let mut stmt = conn.prepare(&format!(
            "SELECT {key} AS grp, COUNT(*), AVG(duration_seconds), AVG(items_packed), \
             SUM(rework_flag) \
             FROM efficiency_records GROUP BY grp ORDER BY grp",
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(BreakdownRow {
                    key: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    task_count: row.get(1)?,
                    avg_duration: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    avg_items: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                    rework_count: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn stats(&self) -> RepositoryResult<DatasetStats> {
        let conn = self.get_conn()?;
        let stats = conn.query_row(
            r#"
            SELECT
                COUNT(*),
                COUNT(DISTINCT employee_id),
                COUNT(DISTINCT flight_number),
                COUNT(DISTINCT spec_id),
                AVG(duration_seconds),
                AVG(items_packed),
                SUM(rework_flag)
            FROM efficiency_records
            "#,
            [],
            |row| {
                Ok(DatasetStats {
                    total_records: row.get(0)?,
                    total_employees: row.get(1)?,
                    total_flights: row.get(2)?,
                    total_specs: row.get(3)?,
                    avg_duration: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                    avg_items: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
                    rework_count: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
                })
            },
        )?;
        Ok(stats)
    }
}

const RECORD_COLUMNS: &str = "record_id, employee_id, flight_number, spec_id, start_time, \
                              end_time, duration_seconds, accuracy_score, items_packed, \
                              rework_flag, supervisor_notes";

fn row_to_efficiency_record(row: &Row<'_>) -> rusqlite::Result<EfficiencyRecord> {
    let accuracy_text: String = row.get(7)?;
    let accuracy_score = AccuracyScore::parse(&accuracy_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            7,
            rusqlite::types::Type::Text,
            format!("unknown accuracy score: {}", accuracy_text).into(),
        )
    })?;

    Ok(EfficiencyRecord {
        record_id: row.get(0)?,
        employee_id: row.get(1)?,
        flight_number: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        spec_id: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        start_time: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        end_time: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        duration_seconds: row.get(6)?,
        accuracy_score,
        items_packed: row.get(8)?,
        rework_flag: row.get::<_, i64>(9)? != 0,
        supervisor_notes: row.get::<_, Option<String>>(10)?.unwrap_or_default(),
    })
}

// ==========================================
// EmployeeMetricsRepository
// ==========================================
pub struct EmployeeMetricsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeMetricsRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Delete every derived row. Used only when the record table is
    /// re-seeded, so no orphaned employee rows survive.
    pub fn clear(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM employee_metrics", [])?;
        Ok(rows)
    }

    /// Replace the employee's derived row in full.
    pub fn upsert(&self, employee_id: &str, metrics: &EmployeeMetrics) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO employee_metrics (
                employee_id, total_tasks, total_duration, total_items, completed_tasks,
                rework_tasks, minor_errors, average_time, average_time_per_item,
                accuracy_rate, rework_rate, efficiency_score, last_updated
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, datetime('now'))
            "#,
            params![
                employee_id,
                metrics.total_tasks,
                metrics.total_duration,
                metrics.total_items,
                metrics.completed_tasks,
                metrics.rework_tasks,
                metrics.minor_errors,
                metrics.average_time,
                metrics.average_time_per_item,
                metrics.accuracy_rate,
                metrics.rework_rate,
                metrics.efficiency_score,
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, employee_id: &str) -> RepositoryResult<Option<EmployeeMetrics>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM employee_metrics WHERE employee_id = ?1",
            METRICS_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![employee_id], row_to_metrics)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    pub fn list(&self) -> RepositoryResult<Vec<(String, EmployeeMetrics)>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT employee_id, {} FROM employee_metrics ORDER BY employee_id",
            METRICS_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], |row| {
                let employee_id: String = row.get(0)?;
                let metrics = metrics_from_row(row, 1)?;
                Ok((employee_id, metrics))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

const METRICS_COLUMNS: &str = "total_tasks, total_duration, total_items, completed_tasks, \
                               rework_tasks, minor_errors, average_time, average_time_per_item, \
                               accuracy_rate, rework_rate, efficiency_score";

fn row_to_metrics(row: &Row<'_>) -> rusqlite::Result<EmployeeMetrics> {
    metrics_from_row(row, 0)
}

fn metrics_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<EmployeeMetrics> {
    Ok(EmployeeMetrics {
        total_tasks: row.get(offset)?,
        total_duration: row.get(offset + 1)?,
        total_items: row.get(offset + 2)?,
        completed_tasks: row.get(offset + 3)?,
        rework_tasks: row.get(offset + 4)?,
        minor_errors: row.get(offset + 5)?,
        average_time: row.get(offset + 6)?,
        average_time_per_item: row.get(offset + 7)?,
        accuracy_rate: row.get(offset + 8)?,
        rework_rate: row.get(offset + 9)?,
        efficiency_score: row.get(offset + 10)?,
    })
}
