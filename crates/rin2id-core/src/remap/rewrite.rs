use serde::{Deserialize, Serialize};

use crate::model::{wrap_xref, Record};
use crate::tree::RecordTree;

use super::index::IdMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    pub visited: usize,
    pub xrefs_rewritten: usize,
    pub pointers_rewritten: usize,
}

/// Apply `map` to every record of the tree, children before parents.
///
/// A mapped xref is replaced in place. A pointer value whose target is mapped
/// is replaced and the record loses any xref it had. Both checks are made
/// against the record as it was before this visit, so when both match the
/// pointer rewrite is the one that sticks.
pub fn rewrite_ids(tree: &mut RecordTree, map: &IdMap) -> RewriteStats {
    let mut stats = RewriteStats::default();

    for id in tree.post_order() {
        let Some(record) = tree.record(id) else {
            continue;
        };
        stats.visited += 1;

        let mut replacement: Option<Record> = None;

        if let Some(new) = record.xref.as_deref().and_then(|x| map.get(x)) {
            replacement = Some(Record {
                xref: Some(new.to_string()),
                ..record.clone()
            });
            stats.xrefs_rewritten += 1;
        }

        if let Some(new) = record.pointer().and_then(|p| map.get(p)) {
            replacement = Some(Record {
                xref: None,
                value: Some(wrap_xref(new)),
                ..record.clone()
            });
            stats.pointers_rewritten += 1;
        }

        if let Some(replacement) = replacement {
            tree.replace(id, replacement);
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    fn single_map(old: &str, new: &str) -> IdMap {
        let mut map = IdMap::new();
        map.insert(old, new);
        map
    }

    #[test]
    fn test_rewrites_xref_and_keeps_fields() {
        let mut tree = RecordTree::new();
        let indi = tree.append(
            NodeId::ROOT,
            Record::new(0, "INDI").with_xref("I1").with_value("extra"),
        );

        let stats = rewrite_ids(&mut tree, &single_map("I1", "100"));
        let rec = tree.record(indi).unwrap();
        assert_eq!(rec.xref.as_deref(), Some("100"));
        assert_eq!(rec.tag, "INDI");
        assert_eq!(rec.value.as_deref(), Some("extra"));
        assert_eq!(rec.level, 0);
        assert_eq!(stats.xrefs_rewritten, 1);
        assert_eq!(stats.pointers_rewritten, 0);
    }

    #[test]
    fn test_rewrites_nested_pointer() {
        let mut tree = RecordTree::new();
        let fam = tree.append(NodeId::ROOT, Record::new(0, "FAM").with_xref("F1"));
        let chil = tree.append(fam, Record::new(1, "CHIL").with_value("@I1@"));
        let sour = tree.append(chil, Record::new(2, "SOUR").with_value("@I1@"));

        let stats = rewrite_ids(&mut tree, &single_map("I1", "100"));
        assert_eq!(tree.record(chil).unwrap().value.as_deref(), Some("@100@"));
        assert_eq!(tree.record(sour).unwrap().value.as_deref(), Some("@100@"));
        assert_eq!(tree.record(fam).unwrap().xref.as_deref(), Some("F1"));
        assert_eq!(stats.pointers_rewritten, 2);
        assert_eq!(stats.visited, 3);
    }

    #[test]
    fn test_unmapped_records_are_identical() {
        let mut tree = RecordTree::new();
        let a = tree.append(NodeId::ROOT, Record::new(0, "INDI").with_xref("I2"));
        let b = tree.append(a, Record::new(1, "FAMS").with_value("@F9@"));
        let c = tree.append(a, Record::new(1, "NAME").with_value("Jane /Roe/"));
        let before = tree.clone();

        let stats = rewrite_ids(&mut tree, &single_map("I1", "100"));
        for id in [a, b, c] {
            assert_eq!(tree.record(id), before.record(id));
        }
        assert_eq!(stats.xrefs_rewritten + stats.pointers_rewritten, 0);
    }

    #[test]
    fn test_pointer_branch_clears_xref() {
        let mut tree = RecordTree::new();
        let odd = tree.append(
            NodeId::ROOT,
            Record::new(0, "NOTE").with_xref("I1").with_value("@I1@"),
        );

        let stats = rewrite_ids(&mut tree, &single_map("I1", "100"));
        let rec = tree.record(odd).unwrap();
        assert_eq!(rec.xref, None);
        assert_eq!(rec.value.as_deref(), Some("@100@"));
        assert_eq!(stats.xrefs_rewritten, 1);
        assert_eq!(stats.pointers_rewritten, 1);
    }

    #[test]
    fn test_escape_value_is_not_rewritten() {
        let mut tree = RecordTree::new();
        let date = tree.append(NodeId::ROOT, Record::new(0, "DATE").with_value("@#DJULIAN@"));

        rewrite_ids(&mut tree, &single_map("#DJULIAN", "x"));
        assert_eq!(tree.record(date).unwrap().value.as_deref(), Some("@#DJULIAN@"));
    }
}
