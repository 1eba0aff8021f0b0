// ==========================================
// AlcoholImporter - dataset + info-pack ingestion
// ==========================================
// Spreadsheet rows are stored whole (all columns, as ordered JSON) so
// the rule evaluator can treat any column as a condition later. A bad
// row never aborts the batch: it is skipped and reported.
// ==========================================

use crate::domain::record::RecordSource;
use crate::importer::file_parser::parse_spreadsheet;
use crate::importer::info_pack::{filter_alcohol_lines, line_to_record, PdfTextExtractor};
use crate::repository::record_repo::ImportedRecordRepository;
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Outcome of importing one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileImportReport {
    pub inserted: usize,
    pub errors: Vec<String>,
}

/// Combined outcome of one import request (spreadsheet and/or info pack).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub excel: Option<FileImportReport>,
    pub pdf: Option<FileImportReport>,
    pub total_inserted: usize,
    pub errors: Vec<String>,
}

pub struct AlcoholImporter {
    records: Arc<ImportedRecordRepository>,
}

impl AlcoholImporter {
    pub fn new(records: Arc<ImportedRecordRepository>) -> Self {
        Self { records }
    }

    /// Import a spreadsheet and/or an info pack; either may be absent.
    pub fn import(
        &self,
        excel_path: Option<&Path>,
        info_pack_path: Option<&Path>,
        extractor: &dyn PdfTextExtractor,
    ) -> ImportReport {
        let mut report = ImportReport::default();

        if let Some(path) = excel_path {
            let file_report = self.import_spreadsheet(path);
            report.total_inserted += file_report.inserted;
            report.errors.extend(file_report.errors.iter().cloned());
            report.excel = Some(file_report);
        }

        if let Some(path) = info_pack_path {
            let file_report = self.import_info_pack(path, extractor);
            report.total_inserted += file_report.inserted;
            report.errors.extend(file_report.errors.iter().cloned());
            report.pdf = Some(file_report);
        }

        report
    }

    /// Import every spreadsheet row as an `excel`-sourced record.
    pub fn import_spreadsheet(&self, path: &Path) -> FileImportReport {
        let mut report = FileImportReport::default();

        let rows = match parse_spreadsheet(path) {
            Ok(rows) => rows,
            Err(e) => {
                report.errors.push(e.to_string());
                return report;
            }
        };

        for row in rows {
            match self
                .records
                .insert(RecordSource::Excel, &Value::Object(row), None)
            {
                Ok(_) => report.inserted += 1,
                Err(e) => report.errors.push(format!("Row insert error: {}", e)),
            }
        }

        tracing::info!(
            inserted = report.inserted,
            errors = report.errors.len(),
            "alcohol spreadsheet import finished"
        );
        report
    }

    /// Import the alcohol-related info-pack lines as `pdf`-sourced records.
    pub fn import_info_pack(
        &self,
        path: &Path,
        extractor: &dyn PdfTextExtractor,
    ) -> FileImportReport {
        let mut report = FileImportReport::default();

        let text = match extractor.extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                report.errors.push(e.to_string());
                return report;
            }
        };

        for line in filter_alcohol_lines(&text) {
            let (data, raw_text) = line_to_record(&line);
            match self
                .records
                .insert(RecordSource::Pdf, &data, Some(raw_text.as_str()))
            {
                Ok(_) => report.inserted += 1,
                Err(e) => report.errors.push(format!("Info pack line insert error: {}", e)),
            }
        }

        tracing::info!(
            inserted = report.inserted,
            errors = report.errors.len(),
            "info pack import finished"
        );
        report
    }

    /// Persist an arbitrary JSON payload as a `manual`-sourced record.
    pub fn save_manual_input(&self, payload: &Value) -> RepositoryResult<i64> {
        self.records.insert(RecordSource::Manual, payload, None)
    }
}
