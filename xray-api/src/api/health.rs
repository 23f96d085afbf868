//! Health check endpoint

use axum::{routing::get, Json, Router};
use xray_common::api::HealthResponse;

use crate::AppState;

/// GET /health
///
/// Fixed payload; never fails.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("xray-api", env!("CARGO_PKG_VERSION")))
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
