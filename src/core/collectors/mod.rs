pub mod installer;
pub mod intermediary;
pub mod loader;
pub mod mappings;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use async_trait::async_trait;

use crate::core::error::MetaResult;
use crate::core::pipeline::RunContext;
use crate::core::source::{ArtifactSource, ManifestSource};

pub use installer::InstallerCollector;
pub use intermediary::IntermediaryCollector;
pub use loader::{LoaderCollector, LoaderStage};
pub use mappings::{MappingVersionsCollector, MappingsCollector};

/// Everything a collector may touch.
///
/// Collectors register documents in the tree and fill their own results
/// entry; they never read another collector's entry.
#[derive(Clone, Copy)]
pub struct CollectContext<'a> {
    pub artifacts: &'a dyn ArtifactSource,
    pub manifest: &'a dyn ManifestSource,
    pub run: &'a RunContext,
}

/// Fetches and shapes one category of versions.
#[async_trait]
pub trait Collector: Send + Sync {
    type Output: Send;

    async fn collect(&self, ctx: CollectContext<'_>) -> MetaResult<Self::Output>;
}

/// Drop repeated records, keeping the first occurrence in source order.
pub fn distinct<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().filter(|item| seen.insert(*item)).cloned().collect()
}

/// Group records by `key`, keeping first-seen key order and source order
/// within each group.
pub fn group_by<'a, T, F>(items: &'a [T], key: F) -> Vec<(&'a str, Vec<&'a T>)>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&T>)> = Vec::new();

    for item in items {
        let k = key(item);
        match slots.get(k) {
            Some(&idx) => groups[idx].1.push(item),
            None => {
                slots.insert(k, groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}
