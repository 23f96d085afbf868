//! Transparency score endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use xray_common::api::TransparencyScoreResponse;

use crate::scoring;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    pub batch_id: String,
}

/// GET /transparency_score?batch_id=...
///
/// Unknown batches score zero.
pub async fn get_transparency_score(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Json<TransparencyScoreResponse> {
    let files = state.store.filenames(&query.batch_id);
    Json(scoring::transparency_score(&query.batch_id, &files))
}
