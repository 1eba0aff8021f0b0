// ==========================================
// EfficiencyImporter - typed packing-record ingestion
// ==========================================
// Imports replace the whole table (delete-all + bulk insert), then every
// employee's derived metrics row is recomputed through the shared
// aggregator path. Bad rows are skipped and reported.
// ==========================================

use crate::domain::efficiency::{AccuracyScore, EfficiencyRecord};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{parse_spreadsheet, RawRow};
use crate::metrics::aggregator::compute_metrics;
use crate::repository::efficiency_repo::{EfficiencyRepository, EmployeeMetricsRepository};
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyImportReport {
    pub inserted: usize,
    pub errors: Vec<String>,
    pub employees_recalculated: usize,
}

pub struct EfficiencyImporter {
    records: Arc<EfficiencyRepository>,
    metrics: Arc<EmployeeMetricsRepository>,
}

impl EfficiencyImporter {
    pub fn new(
        records: Arc<EfficiencyRepository>,
        metrics: Arc<EmployeeMetricsRepository>,
    ) -> Self {
        Self { records, metrics }
    }

    /// Re-seed the efficiency table from a spreadsheet.
    ///
    /// Existing rows are cleared first; re-running the same import after a
    /// clear therefore produces identical contents. Not atomic against
    /// concurrent readers (accepted for demo data).
    pub fn import_dataset(&self, path: &Path) -> ImportResult<EfficiencyImportReport> {
        let rows = parse_spreadsheet(path)?;
        let mut report = EfficiencyImportReport::default();

        self.records.clear()?;
        self.metrics.clear()?;

        for (row_number, row) in rows.iter().enumerate() {
            match row_to_record(row) {
                Ok(record) => match self.records.insert(&record) {
                    Ok(()) => report.inserted += 1,
                    Err(e) => report
                        .errors
                        .push(format!("row {}: insert failed: {}", row_number + 2, e)),
                },
                Err(message) => report
                    .errors
                    .push(format!("row {}: {}", row_number + 2, message)),
            }
        }

        report.employees_recalculated =
            refresh_all_metrics(&self.records, &self.metrics)?;

        tracing::info!(
            inserted = report.inserted,
            errors = report.errors.len(),
            employees = report.employees_recalculated,
            "efficiency dataset import finished"
        );
        Ok(report)
    }

    /// Seed the fixed demo records when the table is empty, so the
    /// dashboard has data before any import runs.
    pub fn seed_mock_records_if_empty(&self) -> RepositoryResult<usize> {
        if self.records.count()? > 0 {
            return Ok(0);
        }

        let mock = mock_packing_records();
        for record in &mock {
            self.records.insert(record)?;
        }
        refresh_all_metrics(&self.records, &self.metrics)?;

        tracing::info!(seeded = mock.len(), "efficiency mock records seeded");
        Ok(mock.len())
    }
}

// ==========================================
// Metrics refresh (shared by import and add-record)
// ==========================================

/// Recompute one employee's metrics from their full record set and
/// replace the derived row. Full recomputation, never incremental.
pub fn refresh_employee_metrics(
    records: &EfficiencyRepository,
    metrics: &EmployeeMetricsRepository,
    employee_id: &str,
) -> RepositoryResult<()> {
    let employee_records = records.list_by_employee(employee_id)?;
    metrics.upsert(employee_id, &compute_metrics(&employee_records))
}

/// Recompute every employee; returns how many were refreshed.
pub fn refresh_all_metrics(
    records: &EfficiencyRepository,
    metrics: &EmployeeMetricsRepository,
) -> RepositoryResult<usize> {
    let employees = records.distinct_employees()?;
    for employee_id in &employees {
        refresh_employee_metrics(records, metrics, employee_id)?;
    }
    Ok(employees.len())
}

// ==========================================
// Row conversion
// ==========================================

fn row_to_record(row: &RawRow) -> Result<EfficiencyRecord, String> {
    let record_id = require_string(row, "Record_ID")?;
    let employee_id = require_string(row, "Employee_ID")?;

    let accuracy_text = require_string(row, "Accuracy_Score")?;
    let accuracy_score = AccuracyScore::parse(&accuracy_text)
        .ok_or_else(|| format!("unknown accuracy score: {}", accuracy_text))?;

    Ok(EfficiencyRecord {
        record_id,
        employee_id,
        flight_number: optional_string(row, "Flight_Number"),
        spec_id: optional_string(row, "Spec_ID"),
        start_time: optional_string(row, "Start_Time"),
        end_time: optional_string(row, "End_Time"),
        duration_seconds: integer(row, "Duration_Seconds")?,
        accuracy_score,
        items_packed: integer(row, "Items_Packed")?,
        rework_flag: rework_flag(row.get("Rework_Flag")),
        supervisor_notes: optional_string(row, "Supervisor_Notes"),
    })
}

fn require_string(row: &RawRow, key: &str) -> Result<String, String> {
    let s = optional_string(row, key);
    if s.is_empty() {
        Err(format!("missing {}", key))
    } else {
        Ok(s)
    }
}

fn optional_string(row: &RawRow, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn integer(row: &RawRow, key: &str) -> Result<i64, String> {
    match row.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| format!("{} is not an integer", key)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{} is not an integer: {}", key, s)),
        _ => Err(format!("missing {}", key)),
    }
}

/// Dataset vocabulary: "Yes"/"No"; booleans and 0/1 also accepted.
fn rework_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

// ==========================================
// Demo data
// ==========================================

/// Fixed demo records matching the published sample dataset.
pub fn mock_packing_records() -> Vec<EfficiencyRecord> {
    fn record(
        record_id: &str,
        employee_id: &str,
        flight_number: &str,
        spec_id: &str,
        start_time: &str,
        end_time: &str,
        duration_seconds: i64,
        accuracy_score: AccuracyScore,
        items_packed: i64,
        rework_flag: bool,
        supervisor_notes: &str,
    ) -> EfficiencyRecord {
        EfficiencyRecord {
            record_id: record_id.to_string(),
            employee_id: employee_id.to_string(),
            flight_number: flight_number.to_string(),
            spec_id: spec_id.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            duration_seconds,
            accuracy_score,
            items_packed,
            rework_flag,
            supervisor_notes: supervisor_notes.to_string(),
        }
    }

    vec![
        record(
            "PKG001", "EMP004", "LX721", "SPEC_C01",
            "2025-10-13 07:36:52", "2025-10-13 07:37:35",
            43, AccuracyScore::Pass, 11, false, "",
        ),
        record(
            "PKG002", "EMP018", "LX726", "SPEC_D01",
            "2025-10-13 06:38:40", "2025-10-13 06:38:58",
            18, AccuracyScore::ReworkRequired, 14, true, "Layout confusion",
        ),
        record(
            "PKG003", "EMP008", "LX755", "SPEC_A01",
            "2025-10-13 09:03:15", "2025-10-13 09:03:55",
            40, AccuracyScore::MinorError, 15, false, "",
        ),
        record(
            "PKG004", "EMP012", "LX760", "SPEC_B02",
            "2025-10-13 06:48:59", "2025-10-13 06:49:19",
            20, AccuracyScore::MinorError, 17, false, "Missing one snack item",
        ),
        record(
            "PKG005", "EMP005", "LX733", "SPEC_D03",
            "2025-10-13 08:57:10", "2025-10-13 08:57:58",
            48, AccuracyScore::Pass, 16, false, "Improved speed",
        ),
    ]
}
