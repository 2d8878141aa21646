//! The current selection.

use crate::id::NodeId;

/// An ordered set of selected nodes.
///
/// Order matters: copy and paste reproduce clones in selection order, and
/// the first element is the primary node that anchors a drag. The UI layer
/// owns what gets selected when; operations only read it, except where an
/// operation's contract says it replaces the selection (paste) or prunes
/// deleted nodes from it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    /// The selected nodes, in selection order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The first selected node, if any.
    pub fn primary(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// True if the node is selected.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of selected nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Replace the selection. Duplicates are dropped, keeping first
    /// occurrence order.
    pub fn set(&mut self, nodes: Vec<NodeId>) {
        self.nodes.clear();
        for id in nodes {
            if !self.nodes.contains(&id) {
                self.nodes.push(id);
            }
        }
    }

    /// Add a node to the end of the selection if not already present.
    pub fn add(&mut self, id: NodeId) {
        if !self.nodes.contains(&id) {
            self.nodes.push(id);
        }
    }

    /// Remove a node from the selection if present.
    pub fn remove(&mut self, id: NodeId) {
        self.nodes.retain(|n| *n != id);
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn ordering_and_dedup() {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = sm.insert(());
        let b = sm.insert(());
        let mut sel = Selection::default();
        sel.set(vec![b, a, b]);
        assert_eq!(sel.nodes(), &[b, a]);
        assert_eq!(sel.primary(), Some(b));
        sel.add(a);
        assert_eq!(sel.len(), 2);
        sel.remove(b);
        assert_eq!(sel.primary(), Some(a));
        sel.clear();
        assert!(sel.is_empty());
    }
}
