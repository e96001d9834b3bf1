use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;

use crate::core::error::MetaResult;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// One published file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Every document produced during one run, keyed by logical path.
///
/// Writing a path twice replaces the earlier document.
#[derive(Debug, Default)]
pub struct ArtifactTree {
    documents: Mutex<BTreeMap<String, Document>>,
}

impl ArtifactTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Document>> {
        // Writers never leave the map half-updated, so a poisoned lock is still usable.
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) {
        let previous = self.lock().insert(
            path.to_string(),
            Document {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        if previous.is_some() {
            debug!("Replaced document {}", path);
        }
    }

    /// Serialize `value` as pretty-printed UTF-8 JSON under `path`.
    pub fn put_json<T: Serialize + ?Sized>(&self, path: &str, value: &T) -> MetaResult<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.put(path, bytes, JSON_CONTENT_TYPE);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hand out the complete path → document mapping, ending the accumulation.
    pub fn into_snapshot(self) -> BTreeMap<String, Document> {
        self.documents
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
