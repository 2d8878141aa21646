//! Dependency-guarded delete.

use std::collections::HashSet;

use super::Operation;
use crate::{error::Result, id::NodeId, session::Session};

/// One detached subtree and where it came from.
struct Removed {
    /// Root of the detached subtree.
    node: NodeId,
    /// Parent it was detached from.
    parent: NodeId,
    /// Index it held among its siblings.
    index: usize,
}

/// Delete one or more subtrees.
///
/// The targets are pruned to outermost roots, then guarded: if any node
/// outside the doomed set positions itself relative to a node inside it,
/// the whole delete is impossible. Deleting a dependency together with
/// every node that depends on it is allowed, which is how a multi-select
/// delete of a chain works.
///
/// Deletion detaches; the subtrees stay alive in the arena with every
/// position reference intact, so undo is pure re-linking and references
/// between survivors and the restored nodes resolve again untouched.
pub struct DeleteOp {
    /// Outermost delete targets, in the order given.
    targets: Vec<NodeId>,
    /// Detach records from the most recent apply.
    removed: Vec<Removed>,
    /// Nodes outside the doomed set that depend on it.
    dependants: Vec<NodeId>,
    /// Selection to restore on undo.
    prior_selection: Vec<NodeId>,
    /// Set at construction if the delete cannot run.
    impossible: bool,
}

impl DeleteOp {
    /// Construct a delete of the given targets.
    pub fn new(sess: &Session, targets: &[NodeId]) -> Result<Self> {
        for t in targets {
            sess.node(*t)?;
        }
        let mut pruned: Vec<NodeId> = Vec::new();
        for t in targets {
            let nested = targets
                .iter()
                .any(|o| o != t && sess.tree().is_ancestor(*o, *t));
            if !nested && !pruned.contains(t) {
                pruned.push(*t);
            }
        }

        let root = sess.tree().root_id();
        let mut impossible = pruned.is_empty() || pruned.contains(&root);

        let mut doomed: HashSet<NodeId> = HashSet::new();
        for t in &pruned {
            doomed.extend(sess.tree().descendants(*t));
        }
        let mut dependants: Vec<NodeId> = Vec::new();
        for id in sess.tree().walk() {
            if doomed.contains(&id) {
                continue;
            }
            let Some(node) = sess.tree().node(id) else {
                continue;
            };
            if node
                .placement()
                .sibling_targets()
                .any(|t| doomed.contains(&t))
            {
                dependants.push(id);
            }
        }
        impossible |= !dependants.is_empty();

        Ok(DeleteOp {
            targets: pruned,
            removed: Vec::new(),
            dependants,
            prior_selection: Vec::new(),
            impossible,
        })
    }

    /// The nodes whose position references block this delete. Empty when
    /// the delete is allowed; the UI uses this to say why it refused.
    pub fn dependants(&self) -> &[NodeId] {
        &self.dependants
    }
}

impl Operation for DeleteOp {
    fn describe(&self) -> &str {
        "delete"
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        self.prior_selection = sess.selection().nodes().to_vec();
        self.removed.clear();
        for t in &self.targets {
            if let Some((parent, index)) = sess.tree_mut().detach(*t)? {
                self.removed.push(Removed {
                    node: *t,
                    parent,
                    index,
                });
            }
        }
        let mut doomed: HashSet<NodeId> = HashSet::new();
        for r in &self.removed {
            doomed.extend(sess.tree().descendants(r.node));
        }
        let keep: Vec<NodeId> = sess
            .selection()
            .nodes()
            .iter()
            .copied()
            .filter(|n| !doomed.contains(n))
            .collect();
        sess.selection_mut().set(keep);
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        // Reverse replay: each record's index is correct once the
        // removals after it are already unwound.
        for r in self.removed.iter().rev() {
            sess.tree_mut().attach_at(r.parent, r.index, r.node)?;
        }
        sess.selection_mut().set(self.prior_selection.clone());
        Ok(())
    }
}
