use serde::Serialize;
use serde_json::Value;

use crate::core::launcher_meta::LauncherMeta;
use crate::core::records::{IntermediaryRecord, LoaderRecord, Side};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileArguments {
    pub game: Vec<String>,
}

/// Version JSON a launcher installs to start the game with a loader.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchProfile {
    pub id: String,
    pub inherits_from: String,
    pub release_time: String,
    pub time: String,
    #[serde(rename = "type")]
    pub profile_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    pub arguments: ProfileArguments,
    /// Descriptor entries are republished verbatim, hence untyped.
    pub libraries: Vec<Value>,
}

/// Inputs for one (side, game, loader) profile.
pub struct ProfileSpec<'a> {
    pub toolchain: &'a str,
    pub side: Side,
    pub game_version: &'a str,
    pub loader: &'a LoaderRecord,
    pub intermediary: &'a IntermediaryRecord,
    pub launcher_meta: &'a LauncherMeta,
    pub repository_url: &'a str,
    pub timestamp: &'a str,
}

impl LaunchProfile {
    pub fn build(spec: &ProfileSpec<'_>) -> Self {
        let meta = spec.launcher_meta;

        let mut libraries: Vec<Value> = meta.common_libraries().to_vec();
        libraries.extend(meta.side_libraries(spec.side).iter().cloned());
        for name in [&spec.intermediary.maven, &spec.loader.maven] {
            libraries.push(library_entry(name, spec.repository_url));
        }

        Self {
            id: format!(
                "{}-loader-{}-{}",
                spec.toolchain, spec.loader.version, spec.game_version
            ),
            inherits_from: spec.game_version.to_string(),
            release_time: spec.timestamp.to_string(),
            time: spec.timestamp.to_string(),
            profile_type: "release".to_string(),
            main_class: meta.main_class(spec.side).map(str::to_string),
            arguments: ProfileArguments::default(),
            libraries,
        }
    }
}

/// Library entry for an artifact of the repository itself.
fn library_entry(maven: &str, repository_url: &str) -> Value {
    serde_json::json!({ "name": maven, "url": repository_url })
}
