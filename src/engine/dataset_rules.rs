// ==========================================
// DatasetRuleEvaluator - dynamic, dataset-driven rules
// ==========================================
// Every imported excel row is a candidate rule. A row matches a bottle
// when every column is satisfied by the corresponding bottle attribute.
// First full match wins; rows are scanned in import order (import
// sequence is the rule priority - a documented invariant, not an
// accident).
// ==========================================

use crate::domain::bottle::Bottle;
use crate::domain::record::RecordSource;
use crate::engine::condition::{
    is_wildcard, matches_option_list, parse_numeric_condition, scalar_string,
};
use crate::engine::header_map::{attribute_string, map_header, BottleField};
use crate::repository::record_repo::ImportedRecordRepository;
use crate::repository::RepositoryResult;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Action and reason supplied by a matching dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub action: String,
    pub reason: String,
}

const DEFAULT_ACTION: &str = "Keep";
const DEFAULT_REASON: &str = "Matched rule from dataset";

pub struct DatasetRuleEvaluator {
    records: Arc<ImportedRecordRepository>,
}

impl DatasetRuleEvaluator {
    pub fn new(records: Arc<ImportedRecordRepository>) -> Self {
        Self { records }
    }

    /// Evaluate the bottle against every imported excel row.
    ///
    /// Returns `Ok(None)` when no row matches; the caller falls back to the
    /// static airline rules. Rows whose stored data is not a JSON object
    /// are skipped.
    pub fn evaluate(&self, bottle: &Bottle) -> RepositoryResult<Option<RuleMatch>> {
        let rows = self.records.list_by_source(RecordSource::Excel)?;

        for record in &rows {
            let columns = match record.columns() {
                Some(cols) => cols,
                None => continue,
            };

            if row_matches(columns, bottle) {
                tracing::debug!(record_id = record.id, "dataset rule matched");
                return Ok(Some(RuleMatch {
                    action: action_from_row(columns)
                        .unwrap_or_else(|| DEFAULT_ACTION.to_string()),
                    reason: reason_from_row(columns)
                        .unwrap_or_else(|| DEFAULT_REASON.to_string()),
                }));
            }
        }

        Ok(None)
    }
}

/// A row matches iff every condition column passes against the bottle.
/// Outcome columns (action/reason) carry the rule's result, not a
/// condition, and are excluded from matching.
fn row_matches(columns: &Map<String, Value>, bottle: &Bottle) -> bool {
    columns
        .iter()
        .all(|(header, value)| is_outcome_column(header) || column_matches(header, value, bottle))
}

/// Headers designated to supply the action or the reason.
fn is_outcome_column(header: &str) -> bool {
    let h = header.to_lowercase();
    const OUTCOME_NEEDLES: [&str; 8] = [
        "action", "decision", "result", "suggest", "outcome", "reason", "comment", "justif",
    ];
    OUTCOME_NEEDLES.iter().any(|needle| h.contains(needle))
}

fn column_matches(header: &str, value: &Value, bottle: &Bottle) -> bool {
    if is_wildcard(value) {
        return true;
    }

    match map_header(header) {
        BottleField::FillLevel => match parse_numeric_condition(&scalar_string(value)) {
            Some(condition) => condition.matches(bottle.fill_level),
            // malformed condition: fails the match, never errors
            None => false,
        },
        BottleField::Unknown => false,
        field => match attribute_string(bottle, field) {
            Some(actual) => matches_option_list(&scalar_string(value), &actual),
            None => false,
        },
    }
}

/// The action column: first header containing "action", "decision" or
/// "result"; then "suggest" or "outcome". Null/empty cells don't count.
fn action_from_row(columns: &Map<String, Value>) -> Option<String> {
    column_value_by_header(columns, &["action", "decision", "result"])
        .or_else(|| column_value_by_header(columns, &["suggest", "outcome"]))
}

/// The reason column: first header containing "reason", "comment" or
/// "justif".
fn reason_from_row(columns: &Map<String, Value>) -> Option<String> {
    column_value_by_header(columns, &["reason", "comment", "justif"])
}

fn column_value_by_header(columns: &Map<String, Value>, needles: &[&str]) -> Option<String> {
    for (header, value) in columns {
        let h = header.to_lowercase();
        if needles.iter().any(|needle| h.contains(needle)) {
            let s = scalar_string(value);
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}
