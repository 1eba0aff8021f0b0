// ==========================================
// EfficiencyApi - packing dashboard, ranking, training
// ==========================================
// Every per-employee figure flows through metrics::aggregator; adding a
// record triggers a full recomputation of that employee's derived row.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::efficiency::{
    AccuracyScore, BreakdownRow, DatasetStats, EfficiencyRecord, EmployeeMetrics,
    TrainingRecommendation,
};
use crate::importer::efficiency_importer::{
    refresh_employee_metrics, EfficiencyImporter, EfficiencyImportReport,
};
use crate::metrics::aggregator::{
    compute_all_metrics, compute_metrics, group_by_employee, rank_employees, EmployeeRanking,
};
use crate::metrics::training::training_recommendations;
use crate::repository::efficiency_repo::{
    BreakdownDimension, EfficiencyRepository, EmployeeMetricsRepository,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records shown in the per-employee recent list.
const RECENT_RECORDS_LIMIT: u32 = 10;

/// Top performers shown on the dashboard.
const TOP_PERFORMER_COUNT: usize = 3;

/// Training recommendations shown on the dashboard.
const DASHBOARD_RECOMMENDATION_COUNT: usize = 5;

// ==========================================
// DTOs
// ==========================================

/// A new packing record; the record id is assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPackingRecord {
    pub employee_id: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub spec_id: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub duration_seconds: i64,
    pub accuracy_score: AccuracyScore,
    #[serde(default)]
    pub items_packed: i64,
    #[serde(default)]
    pub rework_flag: bool,
    #[serde(default)]
    pub supervisor_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_employees: i64,
    pub total_tasks: i64,
    pub total_rework: i64,
    pub rework_rate: f64,
    pub average_efficiency: f64,
    pub top_performers: Vec<EmployeeRanking>,
    pub training_recommendations: Vec<TrainingRecommendation>,
    pub employee_metrics: BTreeMap<String, EmployeeMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub employee_id: String,
    pub metrics: EmployeeMetrics,
    pub recent_records: Vec<EfficiencyRecord>,
}

// ==========================================
// API
// ==========================================

pub struct EfficiencyApi {
    records: Arc<EfficiencyRepository>,
    metrics: Arc<EmployeeMetricsRepository>,
    importer: EfficiencyImporter,
    default_dataset: PathBuf,
    simulate_cursor: AtomicUsize,
}

impl EfficiencyApi {
    pub fn new(
        records: Arc<EfficiencyRepository>,
        metrics: Arc<EmployeeMetricsRepository>,
        importer: EfficiencyImporter,
        default_dataset: PathBuf,
    ) -> Self {
        Self {
            records,
            metrics,
            importer,
            default_dataset,
            simulate_cursor: AtomicUsize::new(0),
        }
    }

    /// Dashboard rollup across every employee.
    pub fn dashboard(&self) -> ApiResult<DashboardMetrics> {
        let all_records = self.records.list_all()?;
        let grouped = group_by_employee(&all_records);
        let metrics = compute_all_metrics(&all_records);

        let total_employees = metrics.len() as i64;
        let total_tasks = all_records.len() as i64;
        let total_rework = all_records.iter().filter(|r| r.rework_flag).count() as i64;

        let average_efficiency = if total_employees > 0 {
            metrics.values().map(|m| m.efficiency_score as f64).sum::<f64>()
                / total_employees as f64
        } else {
            0.0
        };

        let mut top_performers = rank_employees(&metrics);
        top_performers.truncate(TOP_PERFORMER_COUNT);

        let mut recommendations = training_recommendations(&grouped, &metrics);
        recommendations.truncate(DASHBOARD_RECOMMENDATION_COUNT);

        Ok(DashboardMetrics {
            total_employees,
            total_tasks,
            total_rework,
            rework_rate: if total_tasks > 0 {
                total_rework as f64 / total_tasks as f64
            } else {
                0.0
            },
            average_efficiency,
            top_performers,
            training_recommendations: recommendations,
            employee_metrics: metrics,
        })
    }

    /// All employees ranked by efficiency score.
    pub fn ranking(&self) -> ApiResult<Vec<EmployeeRanking>> {
        let all_records = self.records.list_all()?;
        Ok(rank_employees(&compute_all_metrics(&all_records)))
    }

    /// All training recommendations, priority-sorted.
    pub fn training(&self) -> ApiResult<Vec<TrainingRecommendation>> {
        let all_records = self.records.list_all()?;
        let grouped = group_by_employee(&all_records);
        let metrics = compute_all_metrics(&all_records);
        Ok(training_recommendations(&grouped, &metrics))
    }

    /// Insert a packing record and recompute the employee's metrics.
    pub fn add_record(&self, new_record: NewPackingRecord) -> ApiResult<EfficiencyRecord> {
        if new_record.employee_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("employeeId is required".to_string()));
        }

        let next_number = self.records.count()? + 1;
        let record = EfficiencyRecord {
            record_id: format!("PKG{:03}", next_number),
            employee_id: new_record.employee_id,
            flight_number: new_record.flight_number,
            spec_id: new_record.spec_id,
            start_time: new_record.start_time,
            end_time: new_record.end_time,
            duration_seconds: new_record.duration_seconds,
            accuracy_score: new_record.accuracy_score,
            items_packed: new_record.items_packed,
            rework_flag: new_record.rework_flag,
            supervisor_notes: new_record.supervisor_notes,
        };

        self.records.insert(&record)?;
        refresh_employee_metrics(&self.records, &self.metrics, &record.employee_id)?;
        Ok(record)
    }

    /// One employee's metrics plus their recent records.
    pub fn employee(&self, employee_id: &str) -> ApiResult<EmployeeView> {
        let employee_records = self.records.list_by_employee(employee_id)?;
        if employee_records.is_empty() {
            return Err(ApiError::NotFound("Employee not found".to_string()));
        }

        Ok(EmployeeView {
            employee_id: employee_id.to_string(),
            metrics: compute_metrics(&employee_records),
            recent_records: self
                .records
                .recent_by_employee(employee_id, RECENT_RECORDS_LIMIT)?,
        })
    }

    /// Insert the next canned demo record (deterministic round-robin over
    /// a fixed set; a stand-in for live station feeds).
    pub fn simulate_record(&self) -> ApiResult<EfficiencyRecord> {
        let candidates = simulated_records();
        let index = self.simulate_cursor.fetch_add(1, Ordering::Relaxed) % candidates.len();
        self.add_record(candidates[index].clone())
    }

    /// Re-seed the efficiency table from a dataset spreadsheet.
    pub fn import_dataset(&self, path: Option<&str>) -> ApiResult<EfficiencyImportReport> {
        let path = match path {
            Some(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => {
                if !self.default_dataset.exists() {
                    return Err(ApiError::InvalidInput(
                        "No dataset path provided and default file not found.".to_string(),
                    ));
                }
                self.default_dataset.clone()
            }
        };
        Ok(self.importer.import_dataset(&path)?)
    }

    /// Whole-dataset summary statistics.
    pub fn stats(&self) -> ApiResult<DatasetStats> {
        Ok(self.records.stats()?)
    }

    /// GROUP BY breakdown over the full table.
    pub fn breakdown(&self, dimension: BreakdownDimension) -> ApiResult<Vec<BreakdownRow>> {
        Ok(self.records.breakdown(dimension)?)
    }
}

/// Canned records used by the simulate operation.
fn simulated_records() -> Vec<NewPackingRecord> {
    let now = Utc::now();
    let record = |employee_id: &str,
                  flight_number: &str,
                  spec_id: &str,
                  duration_seconds: i64,
                  accuracy_score: AccuracyScore,
                  items_packed: i64,
                  supervisor_notes: &str| NewPackingRecord {
        employee_id: employee_id.to_string(),
        flight_number: flight_number.to_string(),
        spec_id: spec_id.to_string(),
        start_time: now.to_rfc3339(),
        end_time: (now + Duration::seconds(duration_seconds)).to_rfc3339(),
        duration_seconds,
        accuracy_score,
        items_packed,
        rework_flag: false,
        supervisor_notes: supervisor_notes.to_string(),
    };

    vec![
        record("EMP012", "LX730", "SPEC_C02", 35, AccuracyScore::Pass, 13, "Good performance"),
        record("EMP018", "LX726", "SPEC_D01", 50, AccuracyScore::MinorError, 14, "Layout confusion"),
        record("EMP004", "LX735", "SPEC_B01", 28, AccuracyScore::Pass, 15, "Excellent speed"),
    ]
}
