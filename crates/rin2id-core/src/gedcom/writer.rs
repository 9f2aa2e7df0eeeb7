use crate::model::{wrap_xref, Record};
use crate::tree::RecordTree;

use super::LineEnding;

/// Render the whole tree in document order. Long values are never split
/// into `CONC` continuation lines.
pub(crate) fn render_tree(tree: &RecordTree, line_ending: LineEnding) -> String {
    let mut out = String::new();
    for id in tree.pre_order() {
        if let Some(record) = tree.record(id) {
            render_record(record, &mut out);
            out.push_str(line_ending.as_str());
        }
    }
    out
}

pub(crate) fn render_record(record: &Record, out: &mut String) {
    out.push_str(&record.level.to_string());
    if let Some(xref) = record.xref.as_deref().filter(|x| !x.is_empty()) {
        out.push(' ');
        out.push_str(&wrap_xref(xref));
    }
    out.push(' ');
    out.push_str(&record.tag);
    if let Some(value) = record.value.as_deref().filter(|v| !v.is_empty()) {
        out.push(' ');
        out.push_str(value);
    }
}
