use serde::{Deserialize, Serialize};

use crate::core::error::{MetaError, MetaResult};
use crate::core::http::APP_USER_AGENT;
use crate::core::maven::{Coordinate, QUILT_MAVEN};
use crate::core::version::MANIFEST_URL;

/// Default number of documents uploaded at once during publish.
pub const DEFAULT_UPLOAD_CONCURRENCY: usize = 50;

/// Everything one invocation needs to know about where to read from.
///
/// The artifact names are resolved against `group` to build the four
/// coordinates the collectors fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct MetaConfig {
    pub maven_url: String,
    pub group: String,
    pub mappings_artifact: String,
    pub intermediary_artifact: String,
    pub loader_artifact: String,
    pub installer_artifact: String,
    /// Prefix used in launch profile ids (`<toolchain>-loader-...`).
    pub toolchain: String,
    pub manifest_url: String,
    pub user_agent: String,
    pub upload_concurrency: usize,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            maven_url: format!("{}/", QUILT_MAVEN),
            group: "org.quiltmc".to_string(),
            mappings_artifact: "yarn".to_string(),
            intermediary_artifact: "intermediary".to_string(),
            loader_artifact: "quilt-loader".to_string(),
            installer_artifact: "quilt-installer".to_string(),
            toolchain: "quilt".to_string(),
            manifest_url: MANIFEST_URL.to_string(),
            user_agent: APP_USER_AGENT.to_string(),
            upload_concurrency: DEFAULT_UPLOAD_CONCURRENCY,
        }
    }
}

impl MetaConfig {
    pub fn validate(&self) -> MetaResult<()> {
        let required = [
            ("maven_url", &self.maven_url),
            ("group", &self.group),
            ("mappings_artifact", &self.mappings_artifact),
            ("intermediary_artifact", &self.intermediary_artifact),
            ("loader_artifact", &self.loader_artifact),
            ("installer_artifact", &self.installer_artifact),
            ("toolchain", &self.toolchain),
            ("manifest_url", &self.manifest_url),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(MetaError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.upload_concurrency == 0 {
            return Err(MetaError::Config(
                "upload_concurrency must be at least 1".into(),
            ));
        }

        Ok(())
    }

    pub fn mappings(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.mappings_artifact)
    }

    pub fn intermediary(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.intermediary_artifact)
    }

    pub fn loader(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.loader_artifact)
    }

    pub fn installer(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.installer_artifact)
    }
}
