// ==========================================
// Packing efficiency routes
// ==========================================

use super::common::{HttpError, HttpResult};
use crate::api::efficiency_api::{DashboardMetrics, EmployeeView, NewPackingRecord};
use crate::api::error::ApiError;
use crate::app::state::AppState;
use crate::domain::efficiency::{BreakdownRow, DatasetStats, EfficiencyRecord, TrainingRecommendation};
use crate::importer::efficiency_importer::EfficiencyImportReport;
use crate::metrics::aggregator::EmployeeRanking;
use crate::repository::efficiency_repo::BreakdownDimension;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub(super) struct RecordResponse {
    success: bool,
    record: EfficiencyRecord,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImportBody {
    path: Option<String>,
}

/// GET /api/efficiency/metrics
pub(super) async fn metrics(State(state): State<Arc<AppState>>) -> HttpResult<DashboardMetrics> {
    Ok(Json(state.efficiency_api.dashboard()?))
}

/// GET /api/efficiency/ranking
pub(super) async fn ranking(
    State(state): State<Arc<AppState>>,
) -> HttpResult<Vec<EmployeeRanking>> {
    Ok(Json(state.efficiency_api.ranking()?))
}

/// GET /api/efficiency/training-recommendations
pub(super) async fn training_recommendations(
    State(state): State<Arc<AppState>>,
) -> HttpResult<Vec<TrainingRecommendation>> {
    Ok(Json(state.efficiency_api.training()?))
}

/// POST /api/efficiency/packing-record
pub(super) async fn add_record(
    State(state): State<Arc<AppState>>,
    Json(record): Json<NewPackingRecord>,
) -> HttpResult<RecordResponse> {
    let record = state.efficiency_api.add_record(record)?;
    Ok(Json(RecordResponse {
        success: true,
        record,
        message: "Packing record added successfully".to_string(),
    }))
}

/// POST /api/efficiency/simulate-record
pub(super) async fn simulate_record(
    State(state): State<Arc<AppState>>,
) -> HttpResult<RecordResponse> {
    let record = state.efficiency_api.simulate_record()?;
    Ok(Json(RecordResponse {
        success: true,
        record,
        message: "Simulated packing record added".to_string(),
    }))
}

/// GET /api/efficiency/employee/:employee_id
pub(super) async fn employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
) -> HttpResult<EmployeeView> {
    Ok(Json(state.efficiency_api.employee(&employee_id)?))
}

/// POST /api/efficiency/import
pub(super) async fn import(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ImportBody>>,
) -> HttpResult<EfficiencyImportReport> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    Ok(Json(state.efficiency_api.import_dataset(body.path.as_deref())?))
}

/// GET /api/efficiency/stats
pub(super) async fn stats(State(state): State<Arc<AppState>>) -> HttpResult<DatasetStats> {
    Ok(Json(state.efficiency_api.stats()?))
}

/// GET /api/efficiency/breakdown/:dimension
pub(super) async fn breakdown(
    State(state): State<Arc<AppState>>,
    Path(dimension): Path<String>,
) -> HttpResult<Vec<BreakdownRow>> {
    let dimension = match dimension.as_str() {
        "flight" => BreakdownDimension::Flight,
        "spec" => BreakdownDimension::Spec,
        "hour" => BreakdownDimension::Hour,
        "day" => BreakdownDimension::Day,
        other => {
            return Err(HttpError(ApiError::InvalidInput(format!(
                "unknown breakdown dimension: {} (expected flight|spec|hour|day)",
                other
            ))))
        }
    };
    Ok(Json(state.efficiency_api.breakdown(dimension)?))
}
