//! File ingestion into batches
//!
//! Every submitted file is accepted: no format, size or duplicate checks.
//! `warnings` is part of the response contract but nothing produces one yet.

use axum::body::Bytes;
use tracing::info;
use xray_common::api::UploadResponse;

use crate::store::BatchStore;

/// One uploaded file
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Record files into a batch, generating a batch id when none is given
///
/// Accepted filenames echo the input in order, duplicates included; the store
/// keeps only the last content per filename.
pub fn ingest_files(
    store: &dyn BatchStore,
    batch_id: Option<String>,
    files: Vec<UploadedFile>,
) -> UploadResponse {
    let batch_id = batch_id.unwrap_or_else(xray_common::batch_id::generate);

    let total_bytes: usize = files.iter().map(|f| f.content.len()).sum();
    let files_ingested: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
    let warnings = Vec::new();

    store.put_files(
        &batch_id,
        files.into_iter().map(|f| (f.name, f.content)).collect(),
    );

    info!(
        batch_id = %batch_id,
        files = files_ingested.len(),
        bytes = total_bytes,
        "Ingested files"
    );

    UploadResponse {
        batch_id,
        files_ingested,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryBatchStore;

    #[test]
    fn test_accepted_names_match_input_order() {
        let store = InMemoryBatchStore::new();
        let resp = ingest_files(
            &store,
            None,
            vec![
                UploadedFile::new("prices.csv", "p"),
                UploadedFile::new("positions.csv", "q"),
                UploadedFile::new("notes.txt", ""),
            ],
        );

        assert_eq!(resp.files_ingested, vec!["prices.csv", "positions.csv", "notes.txt"]);
        assert!(resp.warnings.is_empty());
        assert!(xray_common::batch_id::is_generated(&resp.batch_id));
    }

    #[test]
    fn test_duplicates_are_listed_and_last_write_wins() {
        let store = InMemoryBatchStore::new();
        let resp = ingest_files(
            &store,
            Some("b_dup".to_string()),
            vec![
                UploadedFile::new("a.csv", "first"),
                UploadedFile::new("a.csv", "second"),
            ],
        );

        assert_eq!(resp.files_ingested, vec!["a.csv", "a.csv"]);
        assert_eq!(store.filenames("b_dup").len(), 1);
        assert_eq!(store.file("b_dup", "a.csv").unwrap(), Bytes::from("second"));
    }

    #[test]
    fn test_reused_batch_id_appends() {
        let store = InMemoryBatchStore::new();
        let first = ingest_files(&store, None, vec![UploadedFile::new("a.csv", "")]);
        let second = ingest_files(
            &store,
            Some(first.batch_id.clone()),
            vec![UploadedFile::new("b.csv", "")],
        );

        assert_eq!(second.batch_id, first.batch_id);
        assert_eq!(store.filenames(&first.batch_id).len(), 2);
    }

    #[test]
    fn test_nonexistent_batch_id_is_created() {
        let store = InMemoryBatchStore::new();
        assert!(!store.contains_batch("custom"));

        let resp = ingest_files(&store, Some("custom".to_string()), Vec::new());

        assert_eq!(resp.batch_id, "custom");
        assert!(resp.files_ingested.is_empty());
        assert!(store.contains_batch("custom"));
    }
}
