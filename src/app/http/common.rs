// ==========================================
// Shared HTTP plumbing: error mapping, query types
// ==========================================

use crate::api::error::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

/// ApiError wrapper carrying the HTTP status mapping.
pub(super) struct HttpError(pub ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        HttpError(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }

        // internal tool: the message is echoed to the caller on purpose
        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub(super) type HttpResult<T> = Result<Json<T>, HttpError>;

/// `?limit=` query parameter with a per-route default.
#[derive(Debug, Deserialize)]
pub(super) struct LimitQuery {
    pub limit: Option<u32>,
}
