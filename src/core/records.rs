// ─── Published Records ───
// Field order is part of the published format: serde emits fields in
// declaration order.

use serde::{Deserialize, Serialize};

/// A game version known to the intermediary stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GameVersionRecord {
    pub version: String,
    pub stable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IntermediaryRecord {
    pub maven: String,
    pub version: String,
}

/// One build of the mappings stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    pub game_version: String,
    pub separator: String,
    pub build: u32,
    pub maven: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LoaderRecord {
    pub separator: String,
    pub build: u32,
    pub maven: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InstallerRecord {
    pub url: String,
    pub maven: String,
    pub version: String,
}

/// Client or server variant of a launch profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Client,
    Server,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Client, Side::Server];

    /// Key used inside launcher descriptors (`libraries.client`, `mainClass.server`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Client => "client",
            Side::Server => "server",
        }
    }

    /// Path segment of the published profile document.
    pub fn profile_kind(&self) -> &'static str {
        match self {
            Side::Client => "profile",
            Side::Server => "server",
        }
    }
}

/// Top-level `v3/versions` document.
#[derive(Debug, Serialize)]
pub struct VersionsIndex<'a> {
    pub game: &'a [GameVersionRecord],
    pub mappings: &'a [MappingRecord],
    pub intermediary: &'a [IntermediaryRecord],
    pub loader: &'a [LoaderRecord],
    pub installer: &'a [InstallerRecord],
}
