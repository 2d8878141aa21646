//! Copy and paste.

use std::collections::HashMap;

use super::Operation;
use crate::{
    dim::{Axis, Dim},
    error::Result,
    id::NodeId,
    session::Session,
};

/// Record nodes into the session clipboard.
///
/// Copy changes no designed state, so it runs outside history: there is
/// nothing to undo, and pressing copy twice should not eat an undo step.
/// The set is pruned to outermost roots, since cloning a subtree clones
/// its descendants anyway.
pub struct CopyOp {
    /// Outermost nodes to record.
    set: Vec<NodeId>,
    /// Set at construction if there is nothing copyable.
    impossible: bool,
}

impl CopyOp {
    /// Construct a copy of the given nodes, or of the selection when
    /// `nodes` is `None`.
    pub fn new(sess: &Session, nodes: Option<&[NodeId]>) -> Self {
        let candidates: Vec<NodeId> = match nodes {
            Some(n) => n.to_vec(),
            None => sess.selection().nodes().to_vec(),
        };
        let mut set: Vec<NodeId> = Vec::new();
        for id in &candidates {
            let nested = candidates
                .iter()
                .any(|o| o != id && sess.tree().is_ancestor(*o, *id));
            if !nested && !set.contains(id) {
                set.push(*id);
            }
        }
        let root = sess.tree().root_id();
        let impossible = set.is_empty()
            || set.contains(&root)
            || set.iter().any(|id| !sess.tree().is_attached_to_root(*id));
        CopyOp { set, impossible }
    }
}

impl Operation for CopyOp {
    fn describe(&self) -> &str {
        "copy"
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn supports_undo(&self) -> bool {
        false
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        sess.set_clipboard(self.set.clone());
        Ok(true)
    }

    fn revert(&mut self, _sess: &mut Session) -> Result<()> {
        Ok(())
    }
}

/// Clone the clipboard contents into a destination container.
///
/// Each copied subtree is rebuilt top-down through the factory: a fresh
/// widget of the same kind with the original's saved state replayed into
/// it, under a deduplicated name, with the original's placement. A
/// second pass rewrites sibling references: a reference to a node that
/// was itself copied is redirected to that node's clone, so a cloned
/// cluster hangs together, while a reference to an uncopied node is left
/// pointing at the original.
///
/// The clones become the new selection. Undo detaches the clone roots
/// but keeps them, so redo re-links the same nodes.
pub struct PasteOp {
    /// Resolved destination container.
    dest: NodeId,
    /// Clipboard contents captured at construction.
    sources: Vec<NodeId>,
    /// Clone subtree roots, created on first apply.
    created: Vec<NodeId>,
    /// Index each clone root holds under the destination.
    indices: Vec<usize>,
    /// Selection to restore on undo.
    prior_selection: Vec<NodeId>,
    /// Set at construction if there is nothing to paste.
    impossible: bool,
}

impl PasteOp {
    /// Construct a paste into a container. Fails immediately if the
    /// container cannot take children.
    pub fn new(sess: &Session, container: NodeId) -> Result<Self> {
        let dest = sess.resolve_drop_parent(container)?;
        let sources: Vec<NodeId> = sess
            .clipboard()
            .iter()
            .copied()
            .filter(|id| sess.tree().contains(*id))
            .collect();
        let impossible = sources.is_empty();
        Ok(PasteOp {
            dest,
            sources,
            created: Vec::new(),
            indices: Vec::new(),
            prior_selection: Vec::new(),
            impossible,
        })
    }

    /// The clone subtree roots, once applied.
    pub fn created(&self) -> &[NodeId] {
        &self.created
    }

    /// Clone every source subtree under the destination, returning the
    /// original-to-clone id map for reference rewriting.
    fn clone_sources(&mut self, sess: &mut Session) -> Result<HashMap<NodeId, NodeId>> {
        let mut clone_map: HashMap<NodeId, NodeId> = HashMap::new();
        let sources = self.sources.clone();
        for src_root in sources {
            for orig_id in sess.tree().descendants(src_root) {
                let (kind, state, name, placement) = {
                    let node = sess.tree().try_node(orig_id)?;
                    (
                        node.widget().kind().to_string(),
                        node.widget().save(),
                        node.name().clone(),
                        node.placement(),
                    )
                };
                let mut widget = sess.factory().create(&kind)?;
                widget.load(&state)?;
                let clone = sess.create_node(widget, &name, placement);
                let orig_parent = sess.tree().try_node(orig_id)?.parent();
                match orig_parent.and_then(|p| clone_map.get(&p)).copied() {
                    Some(parent_clone) => sess.tree_mut().attach(parent_clone, clone)?,
                    None => {
                        let at = sess
                            .tree()
                            .node(self.dest)
                            .map_or(0, |n| n.children().len());
                        sess.tree_mut().attach_at(self.dest, at, clone)?;
                        self.created.push(clone);
                        self.indices.push(at);
                    }
                }
                clone_map.insert(orig_id, clone);
            }
        }
        Ok(clone_map)
    }

    /// Redirect sibling references between clones onto the clone side.
    fn remap_references(
        sess: &mut Session,
        clone_map: &HashMap<NodeId, NodeId>,
    ) -> Result<()> {
        for clone in clone_map.values() {
            for axis in Axis::ALL {
                let Some(node) = sess.tree().node(*clone) else {
                    continue;
                };
                if let Dim::Sibling {
                    target,
                    side,
                    offset,
                } = node.placement().axis(axis)
                    && let Some(mapped) = clone_map.get(&target)
                {
                    let dim = Dim::Sibling {
                        target: *mapped,
                        side,
                        offset,
                    };
                    sess.tree_mut().set_axis(*clone, axis, dim)?;
                }
            }
        }
        Ok(())
    }
}

impl Operation for PasteOp {
    fn describe(&self) -> &str {
        "paste"
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        self.prior_selection = sess.selection().nodes().to_vec();
        if self.created.is_empty() {
            let clone_map = self.clone_sources(sess)?;
            Self::remap_references(sess, &clone_map)?;
        } else {
            for (i, clone) in self.created.iter().enumerate() {
                let attached = sess
                    .tree()
                    .node(*clone)
                    .is_some_and(|n| n.parent().is_some());
                if !attached {
                    sess.tree_mut().attach_at(self.dest, self.indices[i], *clone)?;
                }
            }
        }
        sess.selection_mut().set(self.created.clone());
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        for clone in self.created.iter().rev() {
            sess.tree_mut().detach(*clone)?;
        }
        sess.selection_mut().set(self.prior_selection.clone());
        Ok(())
    }
}
