use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{NodeId, Record};
use crate::tree::RecordTree;

/// Old identifier => new identifier, both bare (no `@` delimiters).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMap {
    entries: HashMap<String, String>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping, replacing any earlier one for the same old identifier.
    /// Returns the replaced target. Empty keys are ignored.
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) -> Option<String> {
        let old = old.into();
        if old.is_empty() {
            return None;
        }
        self.entries.insert(old, new.into())
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.entries.get(old).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Collect `xref => alternate value` for every top-level record that has a
/// non-empty `alternate_tag` child. Only direct children are searched, and the
/// first matching child wins. A repeated xref keeps the last record's value.
pub fn build_id_map(tree: &RecordTree, alternate_tag: &str) -> IdMap {
    let mut map = IdMap::new();

    for (id, record) in tree.top_level() {
        let Some(old) = record.xref.as_deref().filter(|x| !x.is_empty()) else {
            continue;
        };

        let new = find_alternate(tree, id, alternate_tag);
        if new.is_empty() {
            continue;
        }

        if let Some(previous) = map.insert(old, new) {
            log::debug!("duplicate xref @{}@: {} replaced by {}", old, previous, new);
        }
    }

    map
}

/// Value of the first direct child tagged `tag`, empty when there is none.
fn find_alternate<'a>(tree: &'a RecordTree, parent: NodeId, tag: &str) -> &'a str {
    tree.children(parent)
        .iter()
        .filter_map(|&child| tree.record(child))
        .find(|r: &&Record| r.tag == tag)
        .map(Record::value_str)
        .unwrap_or("")
}
