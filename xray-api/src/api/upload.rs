//! File upload endpoint

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;
use xray_common::api::UploadResponse;

use crate::error::{ApiError, ApiResult};
use crate::ingest::{ingest_files, UploadedFile};
use crate::AppState;

/// Optional query parameters for uploads
#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    /// Existing (or caller-chosen) batch to add files to; generated when absent
    #[serde(default)]
    pub batch_id: Option<String>,
}

/// POST /upload
///
/// Accepts every multipart part as a file. Parts without a filename are named
/// after their field, or `upload_<n>` when that is empty too.
pub async fn upload_files(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to parse multipart data", e))?
    {
        let name = part_name(field.file_name(), field.name(), files.len() + 1);
        let content = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&format!("Failed to read upload '{}'", name), e))?;

        debug!(file = %name, bytes = content.len(), "Received upload part");
        files.push(UploadedFile::new(name, content));
    }

    let batch_id = query.batch_id.filter(|id| !id.trim().is_empty());
    Ok(Json(ingest_files(state.store.as_ref(), batch_id, files)))
}

/// Keep the body-limit status; every other multipart failure is a bad request
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    let message = format!("{}: {}", context, e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::BadRequest(message)
    }
}

fn part_name(file_name: Option<&str>, field_name: Option<&str>, index: usize) -> String {
    file_name
        .filter(|n| !n.is_empty())
        .or(field_name.filter(|n| !n.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("upload_{}", index))
}
