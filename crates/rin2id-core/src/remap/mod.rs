//! Identifier remapping.
//!
//! Runs in two strictly separate passes: [`build_id_map`] reads the
//! top-level records and collects `xref => alternate id`, then
//! [`rewrite_ids`] walks the whole tree and applies the finished map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::RemapConfig;
use crate::tree::RecordTree;

mod index;
mod rewrite;


pub use index::{build_id_map, IdMap};
pub use rewrite::{rewrite_ids, RewriteStats};

/// Outcome of one remap run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapReport {
    pub alternate_tag: String,
    pub records: usize,
    /// Sorted copy of the identifier map that was applied.
    pub mappings: BTreeMap<String, String>,
    pub stats: RewriteStats,
}

impl RemapReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Replace the xref of every top-level record that has an alternate id, and
/// every pointer to it.
pub fn remap_ids(tree: &mut RecordTree, config: &RemapConfig) -> RemapReport {
    let map = build_id_map(tree, &config.alternate_tag);
    log::debug!(
        "built id map with {} entries from {} top-level records",
        map.len(),
        tree.children(tree.root()).len()
    );

    let stats = rewrite_ids(tree, &map);
    log::debug!(
        "remapped {} xrefs and {} pointers using {} ids",
        stats.xrefs_rewritten,
        stats.pointers_rewritten,
        map.len()
    );

    RemapReport {
        alternate_tag: config.alternate_tag.clone(),
        records: tree.len(),
        mappings: map
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        stats,
    }
}
