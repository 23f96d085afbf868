//! xray-api library - Portfolio X-Ray Pro HTTP service
//!
//! Upload portfolio files into batches, read placeholder transparency metrics
//! and provenance for a batch, and render a PDF summary report.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use xray_common::config::TomlConfig;

pub mod api;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod provenance;
pub mod report;
pub mod scoring;
pub mod store;

pub use error::{ApiError, ApiResult};
use store::{BatchStore, InMemoryBatchStore};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Uploaded batches
    pub store: Arc<dyn BatchStore>,
    /// Bootstrap configuration (read-only after startup)
    pub config: Arc<TomlConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn BatchStore>, config: TomlConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: TomlConfig) -> Self {
        Self::new(Arc::new(InMemoryBatchStore::new()), config)
    }
}

/// Build application router
///
/// No endpoint requires authentication.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .merge(api::health_routes())
        .route("/build_info", get(api::get_build_info))
        .route("/upload", post(api::upload_files))
        .route("/transparency_score", get(api::get_transparency_score))
        .route("/provenance", get(api::get_provenance))
        .route("/report/pdf", post(api::make_report_pdf))
        .with_state(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the configured front-end origins
///
/// Credentials are allowed for listed origins, with request methods and headers
/// mirrored back. A `*` entry switches to an open policy without credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
