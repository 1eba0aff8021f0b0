// ==========================================
// Catering Execution Hub - packing efficiency entities
// ==========================================
// EfficiencyRecord rows are immutable imports or manual insertions;
// EmployeeMetrics is derived, never authoritative - always recomputable
// from the employee's full record set.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Accuracy outcome of one packing task
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyScore {
    Pass,
    #[serde(rename = "Minor Error")]
    MinorError,
    #[serde(rename = "Rework Required")]
    ReworkRequired,
}

impl AccuracyScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccuracyScore::Pass => "Pass",
            AccuracyScore::MinorError => "Minor Error",
            AccuracyScore::ReworkRequired => "Rework Required",
        }
    }

    /// Parse the dataset vocabulary; unknown strings are rejected so bad
    /// rows surface in import error lists instead of skewing metrics.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Pass" => Some(AccuracyScore::Pass),
            "Minor Error" => Some(AccuracyScore::MinorError),
            "Rework Required" => Some(AccuracyScore::ReworkRequired),
            _ => None,
        }
    }
}

impl fmt::Display for AccuracyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Packing task record
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyRecord {
    pub record_id: String,
    pub employee_id: String,
    pub flight_number: String,
    pub spec_id: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_seconds: i64,
    pub accuracy_score: AccuracyScore,
    pub items_packed: i64,
    pub rework_flag: bool,
    pub supervisor_notes: String,
}

// ==========================================
// Derived per-employee metrics
// ==========================================
/// Aggregates over one employee's full record set.
///
/// Division-by-zero policy: when `total_tasks` or `total_items` is 0 the
/// dependent averages/rates are 0.0, never NaN or infinity. `total_tasks
/// == 0` is the "no data" signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMetrics {
    pub total_tasks: i64,
    pub total_duration: i64,
    pub total_items: i64,
    pub completed_tasks: i64,
    pub rework_tasks: i64,
    pub minor_errors: i64,
    pub average_time: f64,
    pub average_time_per_item: f64,
    pub accuracy_rate: f64,
    pub rework_rate: f64,
    /// Heuristic 0-100 penalty/bonus score
    pub efficiency_score: i64,
}

// ==========================================
// Training recommendations
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrainingPriority {
    High,
    Medium,
    Low,
}

impl TrainingPriority {
    /// Sort weight, highest priority first.
    pub fn weight(&self) -> u8 {
        match self {
            TrainingPriority::High => 3,
            TrainingPriority::Medium => 2,
            TrainingPriority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecommendation {
    pub employee_id: String,
    pub priority: TrainingPriority,
    pub issue: String,
    pub recommendation: String,
    /// The employee's efficiency score at recommendation time
    pub score: i64,
}

// ==========================================
// Aggregate views over the full table
// ==========================================
/// One row of a GROUP BY breakdown (by flight, spec, hour or day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    /// Group key (flight number, spec id, hour "HH", or date "YYYY-MM-DD")
    pub key: String,
    pub task_count: i64,
    pub avg_duration: f64,
    pub avg_items: f64,
    pub rework_count: i64,
}

/// Whole-dataset summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total_records: i64,
    pub total_employees: i64,
    pub total_flights: i64,
    pub total_specs: i64,
    pub avg_duration: f64,
    pub avg_items: f64,
    pub rework_count: i64,
}
