use std::collections::BTreeMap;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use super::tree::Document;
use crate::core::error::{MetaError, MetaResult};

/// Destination of the published document tree.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn put(&self, path: &str, document: &Document) -> MetaResult<()>;
}

/// Upload every document concurrently, at most `concurrency` at a time.
///
/// All uploads are attempted; if any fails the keys that failed are
/// reported together as `MetaError::Publish`.
pub async fn put_many(
    sink: &dyn DocumentSink,
    documents: &BTreeMap<String, Document>,
    concurrency: usize,
) -> MetaResult<()> {
    info!(
        "Publishing {} documents, concurrency={}",
        documents.len(),
        concurrency
    );

    let results: Vec<_> = stream::iter(documents)
        .map(|(path, document)| async move {
            let result = sink.put(path, document).await;
            (path, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut failed: Vec<String> = results
        .into_iter()
        .filter_map(|(path, result)| match result {
            Ok(()) => None,
            Err(e) => {
                warn!("Upload of {} failed: {}", path, e);
                Some(path.clone())
            }
        })
        .collect();

    if failed.is_empty() {
        info!("Done publishing documents");
        return Ok(());
    }

    failed.sort();
    Err(MetaError::Publish { failed })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every upload; paths listed in `reject` fail.
    #[derive(Default)]
    pub struct MemorySink {
        pub stored: Mutex<BTreeMap<String, Document>>,
        pub reject: Vec<String>,
    }

    #[async_trait]
    impl DocumentSink for MemorySink {
        async fn put(&self, path: &str, document: &Document) -> MetaResult<()> {
            if self.reject.iter().any(|p| p == path) {
                return Err(MetaError::Other(format!("rejected {}", path)));
            }
            self.stored
                .lock()
                .unwrap()
                .insert(path.to_string(), document.clone());
            Ok(())
        }
    }
}
