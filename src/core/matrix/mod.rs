// ─── Matrix Joiner ───
// Cross-joins every game version with every loader version. There is no
// compatibility filtering: each combination is produced.
//
//   v3/versions/loader/<game>                       all loaders for a game
//   v3/versions/loader/<game>/<loader>              one combination
//   v3/versions/loader/<game>/<loader>/profile/json client launch profile
//   v3/versions/loader/<game>/<loader>/server/json  server launch profile

mod profile;

pub use profile::{LaunchProfile, ProfileArguments, ProfileSpec};

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::core::error::MetaResult;
use crate::core::launcher_meta::{LauncherMeta, LauncherMetaTable};
use crate::core::publish::ArtifactTree;
use crate::core::records::{GameVersionRecord, IntermediaryRecord, LoaderRecord, Side};

/// One (game version, loader version) combination.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeLoaderGameRecord<'a> {
    pub loader: &'a LoaderRecord,
    pub intermediary: &'a IntermediaryRecord,
    pub launcher_meta: &'a LauncherMeta,
}

/// Completed outputs the joiner reads.
pub struct MatrixInputs<'a> {
    pub game: &'a [GameVersionRecord],
    pub intermediary: &'a [IntermediaryRecord],
    pub loader: &'a [LoaderRecord],
    pub launcher_meta: &'a LauncherMetaTable,
    pub toolchain: &'a str,
    pub repository_url: &'a str,
    /// Invocation time, shared by every profile's `time` and `releaseTime`.
    pub timestamp: &'a str,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatrixSummary {
    pub combinations: usize,
    pub profiles: usize,
}

struct Combination<'a> {
    game_version: &'a str,
    record: CompositeLoaderGameRecord<'a>,
}

impl<'a> MatrixInputs<'a> {
    /// Every buildable combination, grouped by game version in game order,
    /// loaders in loader order.
    ///
    /// A combination missing its intermediary or launcher descriptor is
    /// dropped.
    fn combinations(&self) -> Vec<(&'a str, Vec<Combination<'a>>)> {
        let mut intermediaries: HashMap<&str, &IntermediaryRecord> = HashMap::new();
        for record in self.intermediary {
            intermediaries.entry(record.version.as_str()).or_insert(record);
        }

        self.game
            .iter()
            .map(|game| {
                let game_version = game.version.as_str();
                let Some(&intermediary) = intermediaries.get(game_version) else {
                    warn!("No intermediary for game version {}, skipping", game_version);
                    return (game_version, Vec::new());
                };

                let combos = self
                    .loader
                    .iter()
                    .filter_map(|loader| {
                        let Some(launcher_meta) = self.launcher_meta.get(&loader.maven) else {
                            warn!("No launcher metadata for {}, skipping", loader.maven);
                            return None;
                        };
                        Some(Combination {
                            game_version,
                            record: CompositeLoaderGameRecord {
                                loader,
                                intermediary,
                                launcher_meta,
                            },
                        })
                    })
                    .collect();

                (game_version, combos)
            })
            .collect()
    }
}

/// Publish the per-game loader index and every launch profile.
pub fn join(inputs: &MatrixInputs<'_>, tree: &ArtifactTree) -> MetaResult<MatrixSummary> {
    info!(
        "Joining {} game versions with {} loader versions",
        inputs.game.len(),
        inputs.loader.len()
    );

    let matrix = inputs.combinations();
    let mut summary = MatrixSummary::default();

    for (game_version, combos) in &matrix {
        let records: Vec<&CompositeLoaderGameRecord<'_>> =
            combos.iter().map(|c| &c.record).collect();

        for record in &records {
            tree.put_json(
                &format!("v3/versions/loader/{}/{}", game_version, record.loader.version),
                record,
            )?;
        }
        tree.put_json(&format!("v3/versions/loader/{}", game_version), &records)?;
        summary.combinations += records.len();
    }

    for side in Side::ALL {
        for combo in matrix.iter().flat_map(|(_, combos)| combos) {
            let record = &combo.record;
            let profile = LaunchProfile::build(&ProfileSpec {
                toolchain: inputs.toolchain,
                side,
                game_version: combo.game_version,
                loader: record.loader,
                intermediary: record.intermediary,
                launcher_meta: record.launcher_meta,
                repository_url: inputs.repository_url,
                timestamp: inputs.timestamp,
            });

            tree.put_json(
                &format!(
                    "v3/versions/loader/{}/{}/{}/json",
                    combo.game_version,
                    record.loader.version,
                    side.profile_kind()
                ),
                &profile,
            )?;
            summary.profiles += 1;
        }
    }

    info!(
        "Built {} loader combinations and {} launch profiles",
        summary.combinations, summary.profiles
    );
    Ok(summary)
}
