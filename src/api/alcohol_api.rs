// ==========================================
// AlcoholApi - imports, listing, dataset catalog
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::record::{ImportedRecord, RecordSource};
use crate::importer::alcohol_importer::{AlcoholImporter, ImportReport};
use crate::importer::catalog::{infer_fields, infer_mappings, FieldMeta, HeaderMappings};
use crate::importer::file_parser::RawRow;
use crate::importer::info_pack::PdfTextExtractor;
use crate::repository::record_repo::ImportedRecordRepository;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rows scanned when deriving catalog views.
const CATALOG_SCAN_LIMIT: usize = 500;

/// Import request body; when a path is absent the default dataset file is
/// used if it exists. (File uploads are handled upstream; this layer only
/// sees paths.)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub excel_path: Option<String>,
    pub pdf_path: Option<String>,
}

pub struct AlcoholApi {
    records: Arc<ImportedRecordRepository>,
    importer: AlcoholImporter,
    extractor: Box<dyn PdfTextExtractor>,
    default_excel: PathBuf,
    default_info_pack: PathBuf,
}

impl AlcoholApi {
    pub fn new(
        records: Arc<ImportedRecordRepository>,
        importer: AlcoholImporter,
        extractor: Box<dyn PdfTextExtractor>,
        default_excel: PathBuf,
        default_info_pack: PathBuf,
    ) -> Self {
        Self {
            records,
            importer,
            extractor,
            default_excel,
            default_info_pack,
        }
    }

    /// Most recently imported records first.
    pub fn list(&self, limit: u32) -> ApiResult<Vec<ImportedRecord>> {
        Ok(self.records.list(limit)?)
    }

    /// Column metadata inferred from the imported excel rows.
    pub fn fields(&self) -> ApiResult<Vec<FieldMeta>> {
        let rows = self.excel_rows()?;
        let refs: Vec<&RawRow> = rows.iter().collect();
        Ok(infer_fields(&refs))
    }

    /// Best-guess header roles and derived lookup tables.
    pub fn mappings(&self) -> ApiResult<HeaderMappings> {
        let rows = self.excel_rows()?;
        let refs: Vec<&RawRow> = rows.iter().collect();
        Ok(infer_mappings(&refs))
    }

    /// Import the dataset spreadsheet and/or info pack.
    ///
    /// Per-row failures are reported inside the returned report; only a
    /// request naming no importable file at all is an error.
    pub fn import(&self, request: &ImportRequest) -> ApiResult<ImportReport> {
        let excel = resolve_path(request.excel_path.as_deref(), &self.default_excel);
        let info_pack = resolve_path(request.pdf_path.as_deref(), &self.default_info_pack);

        if excel.is_none() && info_pack.is_none() {
            return Err(ApiError::InvalidInput(
                "No excel or pdf provided and default files not found.".to_string(),
            ));
        }

        Ok(self.importer.import(
            excel.as_deref(),
            info_pack.as_deref(),
            self.extractor.as_ref(),
        ))
    }

    /// Persist an arbitrary JSON object as a manual record.
    pub fn save_input(&self, payload: &Value) -> ApiResult<()> {
        let is_empty = match payload {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        };
        if is_empty {
            return Err(ApiError::InvalidInput("Empty payload".to_string()));
        }

        self.importer.save_manual_input(payload)?;
        Ok(())
    }

    /// The data objects of up to CATALOG_SCAN_LIMIT excel records,
    /// import order.
    fn excel_rows(&self) -> ApiResult<Vec<RawRow>> {
        let records = self.records.list_by_source(RecordSource::Excel)?;
        Ok(records
            .into_iter()
            .take(CATALOG_SCAN_LIMIT)
            .filter_map(|record| record.data.as_object().cloned())
            .collect())
    }
}

/// An explicitly requested path is trusted as-is; the default is used
/// only when the file actually exists.
fn resolve_path(requested: Option<&str>, default: &Path) -> Option<PathBuf> {
    match requested {
        Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => {
            if default.exists() {
                Some(default.to_path_buf())
            } else {
                None
            }
        }
    }
}
