mod descriptor;

pub use descriptor::LauncherMeta;

use std::collections::HashMap;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::core::collectors::LoaderStage;
use crate::core::error::{MetaError, MetaResult};
use crate::core::source::DescriptorSource;

/// Launcher descriptors keyed by the loader artifact's `group:artifact:version`.
pub type LauncherMetaTable = HashMap<String, LauncherMeta>;

/// Fetch the descriptor of every loader artifact, one request per artifact,
/// all in flight at once.
///
/// The first failure aborts the whole fan-out: every published loader must
/// come with launcher metadata.
pub async fn fetch_all(
    source: &dyn DescriptorSource,
    stage: &LoaderStage,
    repository_url: &str,
) -> MetaResult<LauncherMetaTable> {
    info!(
        "Fetching launcher metadata for {} loader versions",
        stage.artifacts.len()
    );

    let table: LauncherMetaTable = stream::iter(&stage.artifacts)
        .map(|artifact| async move {
            let maven = artifact.maven_id();
            let value = source.fetch_descriptor(artifact).await?;
            let meta = LauncherMeta::from_value(value).map_err(|reason| {
                MetaError::DescriptorFetch {
                    maven: maven.clone(),
                    url: artifact.with_packaging("json").url(repository_url),
                    reason,
                }
            })?;
            debug!("Loaded launcher metadata for {}", maven);
            Ok::<_, MetaError>((maven, meta))
        })
        .buffer_unordered(stage.artifacts.len().max(1))
        .try_collect()
        .await?;

    info!("Loaded {} launcher descriptors", table.len());
    Ok(table)
}
