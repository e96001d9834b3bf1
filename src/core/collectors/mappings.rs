use async_trait::async_trait;
use tracing::info;

use super::{distinct, group_by, CollectContext, Collector};
use crate::core::error::MetaResult;
use crate::core::maven::Coordinate;
use crate::core::records::MappingRecord;
use crate::core::version::normalize::{base_version, NormalizedVersion};

/// Publishes the distinct game versions the mappings stream covers
/// (`v3/versions/game/yarn`).
pub struct MappingVersionsCollector {
    coordinate: Coordinate,
}

impl MappingVersionsCollector {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Collector for MappingVersionsCollector {
    type Output = ();

    async fn collect(&self, ctx: CollectContext<'_>) -> MetaResult<()> {
        let versions = ctx.artifacts.list_versions(&self.coordinate).await?;

        let game_versions = versions
            .iter()
            .map(|raw| base_version(raw).map(str::to_string))
            .collect::<MetaResult<Vec<_>>>()?;
        let game_versions = distinct(&game_versions);

        info!(
            "{} mapping builds cover {} game versions",
            versions.len(),
            game_versions.len()
        );
        ctx.run.tree.put_json("v3/versions/game/yarn", &game_versions)
    }
}

/// Publishes every mappings build, flat and grouped by game version.
pub struct MappingsCollector {
    coordinate: Coordinate,
}

impl MappingsCollector {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    fn record(&self, raw: &str) -> MetaResult<MappingRecord> {
        let normalized = NormalizedVersion::parse(raw)?;
        Ok(MappingRecord {
            game_version: normalized.base,
            separator: normalized.separator.to_string(),
            build: normalized.build,
            maven: self.coordinate.artifact(raw).maven_id(),
            version: normalized.raw,
        })
    }
}

#[async_trait]
impl Collector for MappingsCollector {
    type Output = ();

    async fn collect(&self, ctx: CollectContext<'_>) -> MetaResult<()> {
        let versions = ctx.artifacts.list_versions(&self.coordinate).await?;

        let records = versions
            .iter()
            .map(|raw| self.record(raw))
            .collect::<MetaResult<Vec<_>>>()?;
        let records = distinct(&records);

        let tree = &ctx.run.tree;
        tree.put_json("v3/versions/yarn", &records)?;
        for (game_version, builds) in group_by(&records, |r| r.game_version.as_str()) {
            tree.put_json(&format!("v3/versions/yarn/{}", game_version), &builds)?;
        }

        info!("Collected {} mapping builds", records.len());
        ctx.run.results.set_mappings(records)
    }
}
