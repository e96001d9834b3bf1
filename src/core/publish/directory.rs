use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha1::{Digest, Sha1};
use tracing::debug;

use super::sink::DocumentSink;
use super::tree::Document;
use crate::core::error::{MetaError, MetaResult};

/// Writes the tree to a local directory, ready to be served statically.
///
/// Logical paths nest (`v3/versions` and `v3/versions/game` both exist), so
/// each document lands in `<root>/<path>/index.json`.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn file_for(&self, path: &str) -> PathBuf {
        let mut file = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            file.push(segment);
        }
        file.join("index.json")
    }

    /// Whether `dest` already holds exactly `bytes`.
    async fn is_unchanged(dest: &Path, bytes: &[u8]) -> bool {
        let Ok(existing) = tokio::fs::read(dest).await else {
            return false;
        };
        sha1_hex(&existing) == sha1_hex(bytes)
    }
}

fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[async_trait]
impl DocumentSink for DirectorySink {
    async fn put(&self, path: &str, document: &Document) -> MetaResult<()> {
        if path.split('/').any(|segment| segment == "..") {
            return Err(MetaError::Other(format!(
                "Refusing to write outside the output directory: {}",
                path
            )));
        }

        let dest = self.file_for(path);

        if Self::is_unchanged(&dest, &document.bytes).await {
            debug!("Unchanged: {}", path);
            return Ok(());
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MetaError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        tokio::fs::write(&dest, &document.bytes)
            .await
            .map_err(|e| MetaError::Io {
                path: dest.clone(),
                source: e,
            })?;

        debug!("Wrote {} -> {:?}", path, dest);
        Ok(())
    }
}
