// ==========================================
// Bottle decision routes
// ==========================================

use super::common::HttpResult;
use crate::api::bottle_api::DecisionHistoryView;
use crate::app::state::AppState;
use crate::domain::bottle::Bottle;
use crate::domain::decision::Decision;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// POST /api/bottles/evaluate
pub(super) async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(bottle): Json<Bottle>,
) -> HttpResult<Decision> {
    Ok(Json(state.bottle_api.evaluate(&bottle)?))
}

/// GET /api/bottles/history
pub(super) async fn history(
    State(state): State<Arc<AppState>>,
) -> HttpResult<DecisionHistoryView> {
    Ok(Json(state.bottle_api.history()?))
}
