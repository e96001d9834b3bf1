use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::artifact::{Coordinate, MavenArtifact};
use super::metadata::MavenMetadata;
use crate::core::error::{MetaError, MetaResult};
use crate::core::source::{ArtifactSource, DescriptorSource};

/// A Maven-layout repository reached over HTTP.
///
/// Serves both the version listings (`maven-metadata.xml`) and the launcher
/// descriptors stored next to each artifact.
pub struct MavenRepository {
    /// Base URL as configured. Kept verbatim for published library entries.
    pub url: String,
    client: Client,
}

impl MavenRepository {
    pub fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response.text().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl ArtifactSource for MavenRepository {
    async fn list_versions(&self, coordinate: &Coordinate) -> MetaResult<Vec<String>> {
        let url = coordinate.metadata_url(&self.url);
        debug!("Listing versions for {} from {}", coordinate, url);

        let unavailable = |reason: String| MetaError::SourceUnavailable {
            url: url.clone(),
            reason,
        };

        let xml = self.get_text(&url).await.map_err(unavailable)?;
        let metadata = MavenMetadata::parse(&xml).map_err(|e| unavailable(e.to_string()))?;
        let versions = metadata.versions_newest_first();

        debug!("{} lists {} versions", coordinate, versions.len());
        Ok(versions)
    }

    fn repository_url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DescriptorSource for MavenRepository {
    async fn fetch_descriptor(&self, artifact: &MavenArtifact) -> MetaResult<serde_json::Value> {
        let url = artifact.with_packaging("json").url(&self.url);

        let failed = |reason: String| MetaError::DescriptorFetch {
            maven: artifact.maven_id(),
            url: url.clone(),
            reason,
        };

        let raw = self.get_text(&url).await.map_err(failed)?;
        serde_json::from_str(&raw).map_err(|e| failed(e.to_string()))
    }
}
