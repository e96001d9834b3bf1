use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the whole metadata pipeline.
/// Every module returns `Result<T, MetaError>`.
///
/// Every variant is fatal to a run: nothing is retried and nothing is
/// downgraded to a partial publish.
#[derive(Debug, Error)]
pub enum MetaError {
    // ── Source ──────────────────────────────────────────
    #[error("Failed to load {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },

    // ── Normalization ───────────────────────────────────
    #[error("Malformed version string {version:?}: {reason}")]
    Normalization { version: String, reason: String },

    // ── Launcher metadata ───────────────────────────────
    #[error("Launcher metadata for {maven} unavailable at {url}: {reason}")]
    DescriptorFetch {
        maven: String,
        url: String,
        reason: String,
    },

    // ── Publish ─────────────────────────────────────────
    #[error("Failed to publish {} document(s): {}", failed.len(), failed.join(", "))]
    Publish { failed: Vec<String> },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload failed for {url}: HTTP {status}")]
    UploadFailed { url: String, status: u16 },

    // ── XML ─────────────────────────────────────────────
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Configuration ───────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type MetaResult<T> = Result<T, MetaError>;

// ── Serialization for the failure envelope ──────────────
// The invocation contract reports failures as `{"message": "<detail>"}`.
impl serde::Serialize for MetaError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
