// ==========================================
// HTTP adapter - axum router + server
// ==========================================
// Thin layer only: every handler parses the request, calls exactly one
// API method, serializes the result. No business logic lives here.
// CORS is permissive (demo tool, local dashboards).
// ==========================================

mod alcohol;
mod bottle;
mod common;
mod detection;
mod efficiency;

use crate::app::state::AppState;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the full route table over a shared AppState.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        // bottle decisions
        .route("/api/bottles/evaluate", post(bottle::evaluate))
        .route("/api/bottles/history", get(bottle::history))
        // alcohol dataset
        .route("/api/alcohol/list", get(alcohol::list))
        .route("/api/alcohol/fields", get(alcohol::fields))
        .route("/api/alcohol/mappings", get(alcohol::mappings))
        .route("/api/alcohol/import", post(alcohol::import))
        .route("/api/alcohol/save-input", post(alcohol::save_input))
        // packing efficiency
        .route("/api/efficiency/metrics", get(efficiency::metrics))
        .route("/api/efficiency/ranking", get(efficiency::ranking))
        .route(
            "/api/efficiency/training-recommendations",
            get(efficiency::training_recommendations),
        )
        .route("/api/efficiency/packing-record", post(efficiency::add_record))
        .route("/api/efficiency/simulate-record", post(efficiency::simulate_record))
        .route("/api/efficiency/employee/:employee_id", get(efficiency::employee))
        .route("/api/efficiency/import", post(efficiency::import))
        .route("/api/efficiency/stats", get(efficiency::stats))
        .route("/api/efficiency/breakdown/:dimension", get(efficiency::breakdown))
        // mock error detection
        .route("/api/error-detection/metrics", get(detection::metrics))
        .route("/api/error-detection/sensor-reading", post(detection::sensor_reading))
        .route("/api/error-detection/alerts", get(detection::alerts))
        .route("/api/error-detection/mock-data", get(detection::mock_data))
        .route("/api/error-detection/simulate", post(detection::simulate))
        // realtime comparison dataset
        .route("/api/realtime-error/import", post(detection::import))
        .route("/api/realtime-error/list", get(detection::list))
        .route("/api/realtime-error/by-layout/:layout_number", get(detection::by_layout))
        .route("/api/realtime-error/compare", post(detection::compare))
        .route("/api/realtime-error/seed", post(detection::seed))
        .fallback(handle_not_found)
        .layer(cors)
        .with_state(state)
}

/// Serve the API until the process exits.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("HTTP API listening on port {}", port);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Catering Execution Hub API running!",
        "version": crate::VERSION,
    }))
}

async fn handle_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}
