// ─── Game Version Manifest ───
// Fetches the Mojang version manifest; only `id` and `type` are relevant.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::core::error::{MetaError, MetaResult};
use crate::core::source::ManifestSource;

pub const MANIFEST_URL: &str = "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Top-level Mojang version manifest.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<ManifestEntry>,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: String,
}

impl ManifestEntry {
    /// Stable game versions are the ones Mojang marks as `release`.
    pub fn is_release(&self) -> bool {
        self.version_type == "release"
    }
}

/// Manifest reached over HTTP.
pub struct MojangManifest {
    client: reqwest::Client,
    url: String,
}

impl MojangManifest {
    pub fn new(url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl ManifestSource for MojangManifest {
    async fn fetch_manifest(&self) -> MetaResult<Vec<ManifestEntry>> {
        info!("Fetching game version manifest...");

        let unavailable = |reason: String| MetaError::SourceUnavailable {
            url: self.url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP {}", response.status().as_u16())));
        }

        let manifest: VersionManifest = response
            .json()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest.versions)
    }
}
