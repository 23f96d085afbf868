//! PDF report endpoint

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;
use xray_common::api::ReportRequest;

use crate::error::{ApiError, ApiResult};
use crate::report::{self, ReportData, FIXED_TRANSPARENCY_SCORE, REPORT_FILENAME};
use crate::scoring;
use crate::AppState;

/// POST /report/pdf
///
/// Prints the fixed score of 96 unless `report.use_computed_score` is set.
/// The batch is not required to exist.
pub async fn make_report_pdf(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> ApiResult<Response> {
    let score = if state.config.report.use_computed_score {
        let files = state.store.filenames(&req.batch_id);
        scoring::transparency_score(&req.batch_id, &files).score
    } else {
        FIXED_TRANSPARENCY_SCORE
    };

    info!(batch_id = %req.batch_id, score, "Rendering PDF report");

    let data = ReportData {
        client: Some(req.client),
        advisor: Some(req.advisor),
        batch_id: Some(req.batch_id),
        as_of: req.as_of,
        transparency_score: Some(score),
    };

    let pdf = tokio::task::spawn_blocking(move || report::build_pdf(&data))
        .await
        .map_err(|e| ApiError::Internal(format!("Report task failed: {}", e)))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", REPORT_FILENAME),
            ),
        ],
        pdf,
    )
        .into_response())
}
