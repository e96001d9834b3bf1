use quick_xml::de::from_str;
use serde::Deserialize;

use crate::core::error::MetaResult;

/// Minimal `maven-metadata.xml` model – only the version listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MavenMetadata {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub versioning: Option<MetadataVersioning>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataVersioning {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub versions: Option<MetadataVersions>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MetadataVersions {
    #[serde(default, rename = "version")]
    pub items: Vec<String>,
}

impl MavenMetadata {
    pub fn parse(xml: &str) -> MetaResult<Self> {
        Ok(from_str(xml)?)
    }

    /// Listed versions, newest first.
    ///
    /// Repositories append new versions at the end of the listing, so the
    /// document order is reversed. Repeated entries keep their first slot.
    pub fn versions_newest_first(&self) -> Vec<String> {
        let listed = self
            .versioning
            .as_ref()
            .and_then(|v| v.versions.as_ref())
            .map(|v| v.items.as_slice())
            .unwrap_or_default();

        let mut unique: Vec<String> = Vec::with_capacity(listed.len());
        for version in listed {
            let version = version.trim();
            if !version.is_empty() && !unique.iter().any(|v| v == version) {
                unique.push(version.to_string());
            }
        }

        unique.reverse();
        unique
    }
}
