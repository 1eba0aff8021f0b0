// ==========================================
// Error detection + realtime comparison routes
// ==========================================

use super::common::{HttpResult, LimitQuery};
use crate::api::detection_api::{CompareOutcome, CompareRequest, ReadingOutcome, SimulateOutcome};
use crate::app::state::AppState;
use crate::detection::monitor::DetectionDashboard;
use crate::domain::record::ImportedRecord;
use crate::domain::sensor::{Alert, SensorReading};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_ALERT_LIMIT: u32 = 20;
const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Serialize)]
pub(super) struct RowsResponse {
    rows: Vec<ImportedRecord>,
}

#[derive(Serialize)]
pub(super) struct ImportResponse {
    imported: usize,
}

#[derive(Serialize)]
pub(super) struct SeedResponse {
    seeded: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImportBody {
    path: Option<String>,
}

// ===== mock sensor monitor =====

/// GET /api/error-detection/metrics
pub(super) async fn metrics(
    State(state): State<Arc<AppState>>,
) -> HttpResult<DetectionDashboard> {
    Ok(Json(state.detection_api.dashboard()?))
}

/// POST /api/error-detection/sensor-reading
pub(super) async fn sensor_reading(
    State(state): State<Arc<AppState>>,
    Json(reading): Json<SensorReading>,
) -> HttpResult<ReadingOutcome> {
    Ok(Json(state.detection_api.process_reading(reading)?))
}

/// GET /api/error-detection/alerts
pub(super) async fn alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> HttpResult<Vec<Alert>> {
    let limit = query.limit.unwrap_or(DEFAULT_ALERT_LIMIT) as usize;
    Ok(Json(state.detection_api.alerts(limit)?))
}

/// GET /api/error-detection/mock-data
pub(super) async fn mock_data(
    State(state): State<Arc<AppState>>,
) -> HttpResult<Vec<SensorReading>> {
    Ok(Json(state.detection_api.mock_data()?))
}

/// POST /api/error-detection/simulate
pub(super) async fn simulate(State(state): State<Arc<AppState>>) -> HttpResult<SimulateOutcome> {
    Ok(Json(state.detection_api.simulate()?))
}

// ===== realtime comparison dataset =====

/// POST /api/realtime-error/import
pub(super) async fn import(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ImportBody>>,
) -> HttpResult<ImportResponse> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let imported = state.detection_api.import_dataset(body.path.as_deref())?;
    Ok(Json(ImportResponse { imported }))
}

/// GET /api/realtime-error/list
pub(super) async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> HttpResult<RowsResponse> {
    let rows = state
        .detection_api
        .list(query.limit.unwrap_or(DEFAULT_LIST_LIMIT))?;
    Ok(Json(RowsResponse { rows }))
}

/// GET /api/realtime-error/by-layout/:layout_number
pub(super) async fn by_layout(
    State(state): State<Arc<AppState>>,
    Path(layout_number): Path<i64>,
) -> HttpResult<ImportedRecord> {
    Ok(Json(state.detection_api.by_layout(layout_number)?))
}

/// POST /api/realtime-error/compare
pub(super) async fn compare(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompareRequest>,
) -> HttpResult<CompareOutcome> {
    Ok(Json(state.detection_api.compare(&request)?))
}

/// POST /api/realtime-error/seed
pub(super) async fn seed(State(state): State<Arc<AppState>>) -> HttpResult<SeedResponse> {
    let seeded = state.detection_api.seed_demo()?;
    Ok(Json(SeedResponse { seeded }))
}
