use std::collections::HashSet;

use async_trait::async_trait;
use tracing::info;

use super::{distinct, group_by, CollectContext, Collector};
use crate::core::error::MetaResult;
use crate::core::maven::Coordinate;
use crate::core::records::{GameVersionRecord, IntermediaryRecord};
use crate::core::version::ManifestEntry;

/// Publishes the intermediary stream and the game versions derived from it.
///
/// The intermediary listing decides which game versions exist; the upstream
/// manifest only contributes ordering and the `stable` flag.
pub struct IntermediaryCollector {
    coordinate: Coordinate,
}

impl IntermediaryCollector {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

/// Manifest entries that have an intermediary, in manifest order.
pub fn game_versions(manifest: &[ManifestEntry], intermediary: &[String]) -> Vec<GameVersionRecord> {
    let known: HashSet<&str> = intermediary.iter().map(String::as_str).collect();

    let records: Vec<GameVersionRecord> = manifest
        .iter()
        .filter(|entry| known.contains(entry.id.as_str()))
        .map(|entry| GameVersionRecord {
            version: entry.id.clone(),
            stable: entry.is_release(),
        })
        .collect();

    distinct(&records)
}

#[async_trait]
impl Collector for IntermediaryCollector {
    type Output = ();

    async fn collect(&self, ctx: CollectContext<'_>) -> MetaResult<()> {
        let (versions, manifest) = tokio::try_join!(
            ctx.artifacts.list_versions(&self.coordinate),
            ctx.manifest.fetch_manifest(),
        )?;

        let records: Vec<IntermediaryRecord> = versions
            .iter()
            .map(|raw| IntermediaryRecord {
                maven: self.coordinate.artifact(raw).maven_id(),
                version: raw.clone(),
            })
            .collect();
        let records = distinct(&records);
        let game_intermediary = distinct(&versions);

        let tree = &ctx.run.tree;
        tree.put_json("v3/versions/game/intermediary", &game_intermediary)?;
        tree.put_json("v3/versions/intermediary", &records)?;
        for (version, entries) in group_by(&records, |r| r.version.as_str()) {
            tree.put_json(&format!("v3/versions/intermediary/{}", version), &entries)?;
        }

        let games = game_versions(&manifest, &versions);
        tree.put_json("v3/versions/game", &games)?;

        info!(
            "Collected {} intermediary versions, {} game versions",
            records.len(),
            games.len()
        );

        ctx.run.results.set_intermediary(records)?;
        ctx.run.results.set_game(games)
    }
}
