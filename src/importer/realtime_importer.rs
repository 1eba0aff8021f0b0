// ==========================================
// RealtimeErrorImporter - comparison dataset ingestion
// ==========================================
// Same record shape as the alcohol store; raw_text keeps a
// pipe-joined rendering of the row for display.
// ==========================================

use crate::domain::record::RecordSource;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{parse_spreadsheet, RawRow};
use crate::repository::record_repo::ImportedRecordRepository;
use crate::repository::RepositoryResult;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

pub struct RealtimeErrorImporter {
    records: Arc<ImportedRecordRepository>,
}

impl RealtimeErrorImporter {
    pub fn new(records: Arc<ImportedRecordRepository>) -> Self {
        Self { records }
    }

    /// Import the comparison dataset; returns the number of rows imported.
    ///
    /// Unlike the alcohol import, a missing file fails the whole request
    /// (there is nothing to partially import).
    pub fn import_dataset(&self, path: &Path) -> ImportResult<usize> {
        let rows = parse_spreadsheet(path)?;
        let mut imported = 0;

        for row in rows {
            let raw = joined_row_text(&row);
            self.records
                .insert(RecordSource::Excel, &Value::Object(row), Some(&raw))?;
            imported += 1;
        }

        tracing::info!(imported, "realtime error dataset import finished");
        Ok(imported)
    }

    /// Re-seed the six-layout demo dataset: clear the table, insert six
    /// fixed reference rows (Layout_1..Layout_6).
    ///
    /// Not atomic against concurrent readers; accepted for demo data.
    pub fn seed_demo_layouts(&self) -> RepositoryResult<usize> {
        self.records.clear()?;

        let mut seeded = 0;
        for (layout, barcode, rfid, weight) in DEMO_LAYOUTS {
            let data = json!({
                "Layout": layout,
                "Barcode": barcode,
                "RFID": rfid,
                "Weight": weight,
            });
            let raw = format!("{} | {} | {} | {}", layout, barcode, rfid, weight);
            self.records
                .insert(RecordSource::Seeded, &data, Some(&raw))?;
            seeded += 1;
        }

        tracing::info!(seeded, "realtime demo layouts seeded");
        Ok(seeded)
    }
}

/// Fixed demo reference rows; values are arbitrary but stable so repeated
/// seeds produce identical data.
const DEMO_LAYOUTS: [(&str, &str, &str, &str); 6] = [
    ("Layout_1", "BC40217385", "RF7K2M4A", "3.42 kg"),
    ("Layout_2", "BC91730264", "RFQ8D1XE", "2.18 kg"),
    ("Layout_3", "BC55082917", "RF4X9K2P", "4.71 kg"),
    ("Layout_4", "BC33619408", "RFN6B5TZ", "1.95 kg"),
    ("Layout_5", "BC77254031", "RFJ3W8QC", "5.06 kg"),
    ("Layout_6", "BC18496522", "RFJ0H7VY", "2.84 kg"),
];

/// Pipe-joined rendering of a row's values, nulls as empty strings.
fn joined_row_text(row: &RawRow) -> String {
    row.values()
        .map(|v| match v {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
