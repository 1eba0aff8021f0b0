// ==========================================
// Catering Execution Hub - imported record
// ==========================================
// One row of any imported document, stored schema-free: the spreadsheet
// columns are kept as a JSON object so no import loses information.
// Records are immutable once written; only bulk table-clears remove them.
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ==========================================
// Provenance
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Excel,
    Pdf,
    Manual,
    Seeded,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Excel => "excel",
            RecordSource::Pdf => "pdf",
            RecordSource::Manual => "manual",
            RecordSource::Seeded => "seeded",
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excel" => Ok(RecordSource::Excel),
            "pdf" => Ok(RecordSource::Pdf),
            "manual" => Ok(RecordSource::Manual),
            "seeded" => Ok(RecordSource::Seeded),
            other => Err(format!("unknown record source: {}", other)),
        }
    }
}

// ==========================================
// Imported record
// ==========================================
/// A persisted imported row.
///
/// `data` is usually a JSON object whose keys are the spreadsheet column
/// headers, in column order (order is significant: the dataset rule
/// evaluator reads columns left to right). Rows whose stored blob does not
/// parse as JSON surface as `Value::String` and are skipped by the rule
/// evaluator but still listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedRecord {
    pub id: i64,
    pub source: RecordSource,
    pub data: Value,
    pub raw_text: Option<String>,
    pub inserted_at: String,
}

impl ImportedRecord {
    /// The record's columns, when the stored blob is a JSON object.
    pub fn columns(&self) -> Option<&serde_json::Map<String, Value>> {
        self.data.as_object()
    }
}
