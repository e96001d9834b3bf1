use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::core::error::{MetaError, MetaResult};
use crate::core::publish::{ArtifactTree, Document};
use crate::core::records::{
    GameVersionRecord, InstallerRecord, IntermediaryRecord, LoaderRecord, MappingRecord,
    VersionsIndex,
};

/// Per-category results of one run.
///
/// Each entry is filled exactly once, by the collector that owns it, and is
/// only read after the collectors have joined.
#[derive(Debug, Default)]
pub struct ResultsTable {
    game: OnceLock<Vec<GameVersionRecord>>,
    mappings: OnceLock<Vec<MappingRecord>>,
    intermediary: OnceLock<Vec<IntermediaryRecord>>,
    loader: OnceLock<Vec<LoaderRecord>>,
    installer: OnceLock<Vec<InstallerRecord>>,
}

fn fill<T>(slot: &OnceLock<Vec<T>>, name: &str, records: Vec<T>) -> MetaResult<()> {
    slot.set(records)
        .map_err(|_| MetaError::Other(format!("results entry {:?} written twice", name)))
}

fn read<'a, T>(slot: &'a OnceLock<Vec<T>>, name: &str) -> MetaResult<&'a [T]> {
    slot.get()
        .map(Vec::as_slice)
        .ok_or_else(|| MetaError::Other(format!("results entry {:?} was never produced", name)))
}

impl ResultsTable {
    pub fn set_game(&self, records: Vec<GameVersionRecord>) -> MetaResult<()> {
        fill(&self.game, "game", records)
    }

    pub fn set_mappings(&self, records: Vec<MappingRecord>) -> MetaResult<()> {
        fill(&self.mappings, "mappings", records)
    }

    pub fn set_intermediary(&self, records: Vec<IntermediaryRecord>) -> MetaResult<()> {
        fill(&self.intermediary, "intermediary", records)
    }

    pub fn set_loader(&self, records: Vec<LoaderRecord>) -> MetaResult<()> {
        fill(&self.loader, "loader", records)
    }

    pub fn set_installer(&self, records: Vec<InstallerRecord>) -> MetaResult<()> {
        fill(&self.installer, "installer", records)
    }

    pub fn game(&self) -> MetaResult<&[GameVersionRecord]> {
        read(&self.game, "game")
    }

    pub fn mappings(&self) -> MetaResult<&[MappingRecord]> {
        read(&self.mappings, "mappings")
    }

    pub fn intermediary(&self) -> MetaResult<&[IntermediaryRecord]> {
        read(&self.intermediary, "intermediary")
    }

    pub fn loader(&self) -> MetaResult<&[LoaderRecord]> {
        read(&self.loader, "loader")
    }

    pub fn installer(&self) -> MetaResult<&[InstallerRecord]> {
        read(&self.installer, "installer")
    }

    pub fn versions_index(&self) -> MetaResult<VersionsIndex<'_>> {
        Ok(VersionsIndex {
            game: self.game()?,
            mappings: self.mappings()?,
            intermediary: self.intermediary()?,
            loader: self.loader()?,
            installer: self.installer()?,
        })
    }
}

/// State scoped to one invocation. Dropped on abort, so nothing from a
/// failed run can be published.
#[derive(Debug, Default)]
pub struct RunContext {
    pub tree: ArtifactTree,
    pub results: ResultsTable,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_documents(self) -> BTreeMap<String, Document> {
        self.tree.into_snapshot()
    }
}
