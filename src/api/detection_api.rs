// ==========================================
// DetectionApi - mock sensor monitor + layout comparison
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::detection::comparator::{compare, OperatorInput};
use crate::detection::monitor::{mock_readings, DetectionDashboard, ErrorMonitor};
use crate::domain::record::ImportedRecord;
use crate::domain::sensor::{Alert, SensorReading};
use crate::importer::realtime_importer::RealtimeErrorImporter;
use crate::repository::record_repo::ImportedRecordRepository;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

// ==========================================
// DTOs
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingOutcome {
    pub alert: Option<Alert>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub layout_number: i64,
    #[serde(flatten)]
    pub input: OperatorInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareOutcome {
    pub layout: String,
    pub issues: Vec<String>,
    /// true when no issues were found (caller displays "OK")
    pub ok: bool,
    /// the reference row the input was compared against
    pub expected: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateOutcome {
    pub processed: usize,
    pub alerts: usize,
}

// ==========================================
// API
// ==========================================

pub struct DetectionApi {
    monitor: Arc<ErrorMonitor>,
    records: Arc<ImportedRecordRepository>,
    importer: RealtimeErrorImporter,
    default_dataset: PathBuf,
}

impl DetectionApi {
    pub fn new(
        monitor: Arc<ErrorMonitor>,
        records: Arc<ImportedRecordRepository>,
        importer: RealtimeErrorImporter,
        default_dataset: PathBuf,
    ) -> Self {
        Self {
            monitor,
            records,
            importer,
            default_dataset,
        }
    }

    // ===== mock sensor monitor =====

    pub fn dashboard(&self) -> ApiResult<DetectionDashboard> {
        Ok(self.monitor.dashboard())
    }

    pub fn process_reading(&self, reading: SensorReading) -> ApiResult<ReadingOutcome> {
        if reading.station_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("stationId is required".to_string()));
        }

        let alert = self.monitor.process_reading(reading);
        let message = if alert.is_some() {
            "Alert generated"
        } else {
            "Reading processed successfully"
        };
        Ok(ReadingOutcome {
            alert,
            message: message.to_string(),
        })
    }

    pub fn alerts(&self, limit: usize) -> ApiResult<Vec<Alert>> {
        Ok(self.monitor.recent_alerts(limit))
    }

    pub fn mock_data(&self) -> ApiResult<Vec<SensorReading>> {
        Ok(mock_readings())
    }

    /// Ingest all mock readings at once.
    pub fn simulate(&self) -> ApiResult<SimulateOutcome> {
        let processed = mock_readings().len();
        let alerts = self.monitor.simulate();
        Ok(SimulateOutcome { processed, alerts })
    }

    // ===== comparison dataset =====

    pub fn import_dataset(&self, path: Option<&str>) -> ApiResult<usize> {
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

    pub fn list(&self, limit: u32) -> ApiResult<Vec<ImportedRecord>> {
        Ok(self.records.list(limit)?)
    }

    pub fn by_layout(&self, layout_number: i64) -> ApiResult<ImportedRecord> {
        self.records
            .find_by_layout(layout_number)?
            .ok_or_else(|| ApiError::NotFound("Layout not found".to_string()))
    }

    /// Compare operator input against the reference row for a layout.
    pub fn compare(&self, request: &CompareRequest) -> ApiResult<CompareOutcome> {
        let record = self.by_layout(request.layout_number)?;
        let reference = record
            .columns()
            .ok_or_else(|| ApiError::InternalError("reference row is not an object".to_string()))?;

        let issues = compare(reference, &request.input);
        Ok(CompareOutcome {
            layout: format!("Layout_{}", request.layout_number),
            ok: issues.is_empty(),
            issues,
            expected: record.data.clone(),
        })
    }

    /// Re-seed the six-layout demo dataset.
    pub fn seed_demo(&self) -> ApiResult<usize> {
        Ok(self.importer.seed_demo_layouts()?)
    }
}
