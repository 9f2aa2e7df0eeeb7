//! Arena-backed record tree.
//!
//! Every node lives in one `Vec` and is addressed by a [`NodeId`]. The node at
//! [`NodeId::ROOT`] is synthetic and carries no record; level-0 records hang off it.

use crate::model::{NodeId, Record};

#[derive(Debug, Clone)]
struct Node {
    record: Option<Record>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct RecordTree {
    nodes: Vec<Node>,
}

impl RecordTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                record: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Append `record` as the last child of `parent`.
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn append(&mut self, parent: NodeId, record: Record) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            record: Some(record),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn record(&self, id: NodeId) -> Option<&Record> {
        self.nodes.get(id.0).and_then(|n| n.record.as_ref())
    }

    /// Replace the record stored at `id`, returning the old one.
    ///
    /// Structure is untouched. The root has no record and cannot be replaced.
    pub fn replace(&mut self, id: NodeId, record: Record) -> Option<Record> {
        let node = self.nodes.get_mut(id.0)?;
        let old = node.record.as_mut()?;
        Some(std::mem::replace(old, record))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Level-0 records in document order.
    pub fn top_level(&self) -> impl Iterator<Item = (NodeId, &Record)> + '_ {
        self.children(NodeId::ROOT)
            .iter()
            .filter_map(|&id| self.record(id).map(|r| (id, r)))
    }

    /// Number of records, not counting the synthetic root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All nodes, children before their parent, siblings in document order.
    /// The root is yielded last.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        // (node, next child index to visit)
        let mut stack: Vec<(NodeId, usize)> = vec![(NodeId::ROOT, 0)];

        while let Some((id, next)) = stack.pop() {
            let children = &self.nodes[id.0].children;
            if next < children.len() {
                stack.push((id, next + 1));
                stack.push((children[next], 0));
            } else {
                out.push(id);
            }
        }
        out
    }

    /// All records in document order (pre-order, root excluded).
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.children(NodeId::ROOT).iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}

impl Default for RecordTree {
    fn default() -> Self {
        Self::new()
    }
}
