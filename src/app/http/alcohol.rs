// ==========================================
// Alcohol dataset routes
// ==========================================

use super::common::{HttpResult, LimitQuery};
use crate::api::alcohol_api::ImportRequest;
use crate::app::state::AppState;
use crate::domain::record::ImportedRecord;
use crate::importer::alcohol_importer::ImportReport;
use crate::importer::catalog::{FieldMeta, HeaderMappings};
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Serialize)]
pub(super) struct ListResponse {
    items: Vec<ImportedRecord>,
}

#[derive(Serialize)]
pub(super) struct FieldsResponse {
    fields: Vec<FieldMeta>,
}

/// GET /api/alcohol/list
pub(super) async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> HttpResult<ListResponse> {
    let items = state
        .alcohol_api
        .list(query.limit.unwrap_or(DEFAULT_LIST_LIMIT))?;
    Ok(Json(ListResponse { items }))
}

/// GET /api/alcohol/fields
pub(super) async fn fields(State(state): State<Arc<AppState>>) -> HttpResult<FieldsResponse> {
    Ok(Json(FieldsResponse {
        fields: state.alcohol_api.fields()?,
    }))
}

/// GET /api/alcohol/mappings
pub(super) async fn mappings(State(state): State<Arc<AppState>>) -> HttpResult<HeaderMappings> {
    Ok(Json(state.alcohol_api.mappings()?))
}

/// POST /api/alcohol/import
pub(super) async fn import(
    State(state): State<Arc<AppState>>,
    request: Option<Json<ImportRequest>>,
) -> HttpResult<ImportReport> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    Ok(Json(state.alcohol_api.import(&request)?))
}

/// POST /api/alcohol/save-input
pub(super) async fn save_input(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> HttpResult<serde_json::Value> {
    state.alcohol_api.save_input(&payload)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
