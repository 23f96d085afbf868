//! Batch store
//!
//! Uploaded files grouped under a batch identifier. Handlers reach the store
//! through `AppState` as `Arc<dyn BatchStore>`; nothing is kept in module-level
//! state.
//!
//! Lookups never fail: an unknown batch id reads as an empty batch.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use axum::body::Bytes;

/// Filenames present in one batch, sorted
pub type FileSet = BTreeSet<String>;

/// Key-value storage for uploaded batches
pub trait BatchStore: Send + Sync {
    /// Record files into a batch, creating the batch if it does not exist.
    ///
    /// Files replace any existing entry with the same name (last write wins).
    /// The whole call is applied atomically with respect to other writers.
    fn put_files(&self, batch_id: &str, files: Vec<(String, Bytes)>);

    /// Snapshot of the filenames in a batch (empty for unknown batches)
    fn filenames(&self, batch_id: &str) -> FileSet;

    /// Raw content of one file, if present
    fn file(&self, batch_id: &str, filename: &str) -> Option<Bytes>;

    /// Whether the batch has been created by an upload
    fn contains_batch(&self, batch_id: &str) -> bool;
}

/// Files belonging to one batch
#[derive(Debug, Default)]
struct Batch {
    files: HashMap<String, Bytes>,
}

/// Process-lifetime in-memory store
///
/// Uses a std RwLock: critical sections are short map operations with no
/// `.await` inside.
#[derive(Debug, Default)]
pub struct InMemoryBatchStore {
    batches: RwLock<HashMap<String, Batch>>,
}

impl InMemoryBatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches created so far
    pub fn batch_count(&self) -> usize {
        self.batches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl BatchStore for InMemoryBatchStore {
    fn put_files(&self, batch_id: &str, files: Vec<(String, Bytes)>) {
        let mut batches = self
            .batches
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let batch = batches.entry(batch_id.to_string()).or_default();
        for (name, content) in files {
            batch.files.insert(name, content);
        }
    }

    fn filenames(&self, batch_id: &str) -> FileSet {
        let batches = self
            .batches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        batches
            .get(batch_id)
            .map(|batch| batch.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn file(&self, batch_id: &str, filename: &str) -> Option<Bytes> {
        let batches = self
            .batches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        batches
            .get(batch_id)
            .and_then(|batch| batch.files.get(filename))
            .cloned()
    }

    fn contains_batch(&self, batch_id: &str) -> bool {
        self.batches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(batch_id)
    }
}
