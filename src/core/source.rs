// ─── Collaborator seams ───
// The pipeline only talks to the outside world through these traits, so a
// run can be driven against the real repository or against in-memory data.

use async_trait::async_trait;

use crate::core::error::MetaResult;
use crate::core::maven::{Coordinate, MavenArtifact};
use crate::core::version::ManifestEntry;

/// Lists the versions published for a coordinate.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Ordered newest first. Fails with `SourceUnavailable`.
    async fn list_versions(&self, coordinate: &Coordinate) -> MetaResult<Vec<String>>;

    /// Repository base the source serves artifacts from. Used for artifact
    /// and library URLs in the published documents.
    fn repository_url(&self) -> &str;
}

/// Fetches the launcher descriptor published next to a loader artifact.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    /// Fails with `DescriptorFetch`.
    async fn fetch_descriptor(&self, artifact: &MavenArtifact) -> MetaResult<serde_json::Value>;
}

/// Upstream game version manifest.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch_manifest(&self) -> MetaResult<Vec<ManifestEntry>>;
}
