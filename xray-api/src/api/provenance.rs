//! Provenance endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use xray_common::api::ProvenanceResponse;

use crate::provenance;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProvenanceQuery {
    pub batch_id: String,
    pub metric: String,
}

/// GET /provenance?batch_id=...&metric=...
pub async fn get_provenance(
    State(state): State<AppState>,
    Query(query): Query<ProvenanceQuery>,
) -> Json<ProvenanceResponse> {
    let files = state.store.filenames(&query.batch_id);
    Json(provenance::lookup(&query.metric, &files))
}
