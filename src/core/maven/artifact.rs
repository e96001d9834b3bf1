use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a stream of published versions: `groupId:artifactId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
}

impl Coordinate {
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        }
    }

    /// Construct the group path portion (`org/quiltmc`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// Location of the version listing for this coordinate.
    ///
    /// Template:
    /// `<repo>/<group_path>/<artifact_id>/maven-metadata.xml`
    pub fn metadata_url(&self, repo_base: &str) -> String {
        let base = repo_base.trim_end_matches('/');
        format!(
            "{}/{}/{}/maven-metadata.xml",
            base,
            self.group_path(),
            self.artifact_id
        )
    }

    /// Pin this coordinate to a concrete version.
    pub fn artifact(&self, version: &str) -> MavenArtifact {
        MavenArtifact {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: version.to_string(),
            packaging: "jar".to_string(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A single published artifact: a coordinate pinned to one version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// File extension / packaging type. Defaults to `"jar"`.
    pub packaging: String,
}

impl MavenArtifact {
    /// Canonical `group:artifact:version` identity. Packaging is not part of it.
    pub fn maven_id(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// `artifactId-version.packaging`
    pub fn filename(&self) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, self.packaging)
    }

    /// Construct the full URL for this artifact under the given repository base.
    ///
    /// Template:
    /// `<repo>/<group_path>/<artifact_id>/<version>/<filename>`
    pub fn url(&self, repo_base: &str) -> String {
        let base = repo_base.trim_end_matches('/');
        format!(
            "{}/{}/{}/{}/{}",
            base,
            self.group_path(),
            self.artifact_id,
            self.version,
            self.filename()
        )
    }

    /// Return a new artifact with packaging changed (e.g. to `"json"`).
    pub fn with_packaging(&self, packaging: &str) -> Self {
        let mut clone = self.clone();
        clone.packaging = packaging.to_string();
        clone
    }
}

impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.maven_id())
    }
}
