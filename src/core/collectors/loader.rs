use async_trait::async_trait;
use tracing::info;

use super::{distinct, CollectContext, Collector};
use crate::core::error::MetaResult;
use crate::core::maven::{Coordinate, MavenArtifact};
use crate::core::records::LoaderRecord;
use crate::core::version::normalize::{build_number, release_version, separator};

/// Completed loader collection.
///
/// Holding one is proof the loader listing finished; the launcher metadata
/// fan-out can only be started from it.
#[derive(Debug, Clone)]
pub struct LoaderStage {
    pub artifacts: Vec<MavenArtifact>,
}

/// Publishes the loader stream (`v3/versions/loader`).
pub struct LoaderCollector {
    coordinate: Coordinate,
}

impl LoaderCollector {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    fn record(&self, artifact: &MavenArtifact) -> MetaResult<LoaderRecord> {
        let raw = artifact.version.as_str();
        Ok(LoaderRecord {
            separator: separator(raw).to_string(),
            build: build_number(raw)?,
            maven: artifact.maven_id(),
            version: release_version(raw).to_string(),
        })
    }
}

#[async_trait]
impl Collector for LoaderCollector {
    type Output = LoaderStage;

    async fn collect(&self, ctx: CollectContext<'_>) -> MetaResult<LoaderStage> {
        let versions = ctx.artifacts.list_versions(&self.coordinate).await?;

        let artifacts: Vec<MavenArtifact> = versions
            .iter()
            .map(|raw| self.coordinate.artifact(raw))
            .collect();
        let artifacts = distinct(&artifacts);

        let records = artifacts
            .iter()
            .map(|artifact| self.record(artifact))
            .collect::<MetaResult<Vec<_>>>()?;
        let records = distinct(&records);

        ctx.run.tree.put_json("v3/versions/loader", &records)?;

        info!("Collected {} loader versions", records.len());
        ctx.run.results.set_loader(records)?;

        Ok(LoaderStage { artifacts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::RunContext;
    use crate::core::source::testing::{FakeManifest, FakeRepository};

    #[tokio::test]
    async fn loader_versions_keep_prerelease_suffix() {
        let repo = FakeRepository::default()
            .with_versions("quilt-loader", &["0.17.1+build.4", "0.17.0-beta.3", "0.16.0"]);
        let manifest = FakeManifest(vec![]);
        let run = RunContext::new();
        let ctx = CollectContext {
            artifacts: &repo,
            manifest: &manifest,
            run: &run,
        };

        let stage = LoaderCollector::new(Coordinate::new("org.quiltmc", "quilt-loader"))
            .collect(ctx)
            .await
            .unwrap();

        let records = run.results.loader().unwrap();
        let versions: Vec<_> = records.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["0.17.1", "0.17.0-beta.3", "0.16.0"]);
        assert_eq!(records[0].separator, "+build.");
        assert_eq!(records[0].build, 4);
        assert_eq!(records[1].separator, ".");
        assert_eq!(records[1].build, 3);
        assert_eq!(records[2].maven, "org.quiltmc:quilt-loader:0.16.0");

        assert_eq!(stage.artifacts.len(), 3);
        assert_eq!(stage.artifacts[0].version, "0.17.1+build.4");
    }
}
