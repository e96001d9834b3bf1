use async_trait::async_trait;
use tracing::info;

use super::{distinct, CollectContext, Collector};
use crate::core::error::MetaResult;
use crate::core::maven::Coordinate;
use crate::core::records::InstallerRecord;

/// Publishes the installer stream (`v3/versions/installer`).
///
/// Installer versions are published as-is, without normalization.
pub struct InstallerCollector {
    coordinate: Coordinate,
}

impl InstallerCollector {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Collector for InstallerCollector {
    type Output = ();

    async fn collect(&self, ctx: CollectContext<'_>) -> MetaResult<()> {
        let versions = ctx.artifacts.list_versions(&self.coordinate).await?;
        let repository = ctx.artifacts.repository_url();

        let records: Vec<InstallerRecord> = versions
            .iter()
            .map(|raw| {
                let artifact = self.coordinate.artifact(raw);
                InstallerRecord {
                    url: artifact.url(repository),
                    maven: artifact.maven_id(),
                    version: raw.clone(),
                }
            })
            .collect();
        let records = distinct(&records);

        ctx.run.tree.put_json("v3/versions/installer", &records)?;

        info!("Collected {} installer versions", records.len());
        ctx.run.results.set_installer(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::RunContext;
    use crate::core::source::testing::{FakeManifest, FakeRepository};

    #[tokio::test]
    async fn installer_records_point_at_jars() {
        let repo = FakeRepository::default().with_versions("quilt-installer", &["0.4.1", "0.4.0"]);
        let manifest = FakeManifest(vec![]);
        let run = RunContext::new();
        let ctx = CollectContext {
            artifacts: &repo,
            manifest: &manifest,
            run: &run,
        };

        InstallerCollector::new(Coordinate::new("org.quiltmc", "quilt-installer"))
            .collect(ctx)
            .await
            .unwrap();

        let records = run.results.installer().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].version, "0.4.1");
        assert_eq!(records[0].maven, "org.quiltmc:quilt-installer:0.4.1");
        assert_eq!(
            records[0].url,
            "https://maven.example/release/org/quiltmc/quilt-installer/0.4.1/quilt-installer-0.4.1.jar"
        );
    }
}
