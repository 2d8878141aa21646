//! Drag with live preview and cross-container moves.

use trellis_geom::{Point, Rect};

use super::Operation;
use crate::{
    dim::Dim,
    error::Result,
    id::NodeId,
    session::Session,
    widget::PropValue,
};

/// What one dragged node looked like at grab time.
struct Grabbed {
    /// The dragged node.
    node: NodeId,
    /// Parent at grab time.
    parent: NodeId,
    /// Index among siblings at grab time.
    index: usize,
    /// Left reference at grab time.
    left: Dim,
    /// Top reference at grab time.
    top: Dim,
    /// Live bounds at grab time.
    bounds: Rect,
}

/// Drag one or more nodes, with live preview, and commit the move as a
/// single undoable step.
///
/// The drag set is the grabbed node, widened to the whole selection when
/// the grabbed node is selected, minus any node nested inside another
/// dragged node (it travels with its ancestor anyway). While the gesture
/// runs, [`update`](DragOp::update) moves only live bounds; placements
/// are untouched until the operation is applied, so a cancelled drag
/// leaves no trace in history.
///
/// Only absolute axes move. A node whose left is a percentage keeps that
/// percentage and only its absolute top follows the pointer.
///
/// On commit, each node dropped into a new container keeps its screen
/// position: the absolute axes are shifted by the difference between the
/// old and new containers' client origins before the pointer delta is
/// added.
pub struct DragOp {
    /// The dragged nodes, outermost only.
    grabbed: Vec<Grabbed>,
    /// Pointer position at grab, screen space.
    origin: Point,
    /// Latest pointer position, screen space.
    pointer: Point,
    /// Resolved drop container, when the drag left the original parent.
    target: Option<NodeId>,
    /// Set at construction if the drag cannot run.
    impossible: bool,
}

impl DragOp {
    /// Start a drag at `pointer` (screen space) grabbing `primary`.
    pub fn new(sess: &Session, primary: NodeId, pointer: Point) -> Result<Self> {
        sess.node(primary)?;
        let candidates: Vec<NodeId> = if sess.selection().contains(primary) {
            sess.selection().nodes().to_vec()
        } else {
            vec![primary]
        };
        let root = sess.tree().root_id();
        let mut impossible = candidates.contains(&root);
        let mut grabbed = Vec::new();
        for id in &candidates {
            let Some(node) = sess.tree().node(*id) else {
                continue;
            };
            let nested = candidates
                .iter()
                .any(|c| c != id && sess.tree().is_ancestor(*c, *id));
            if nested {
                continue;
            }
            let Some(parent) = node.parent() else {
                impossible = true;
                continue;
            };
            let index = sess.tree().child_index(parent, *id).unwrap_or(0);
            grabbed.push(Grabbed {
                node: *id,
                parent,
                index,
                left: node.placement().left,
                top: node.placement().top,
                bounds: node.bounds(),
            });
        }
        impossible |= grabbed.is_empty();
        Ok(DragOp {
            grabbed,
            origin: pointer,
            pointer,
            target: None,
            impossible,
        })
    }

    /// Track the pointer, previewing the move in live bounds only.
    pub fn update(&mut self, sess: &mut Session, pointer: Point) {
        self.pointer = pointer;
        let delta = pointer - self.origin;
        for g in &self.grabbed {
            if let Some(node) = sess.tree_mut().node_mut(g.node) {
                if g.left.is_abs() {
                    node.bounds.tl.x = g.bounds.tl.x + delta.x;
                }
                if g.top.is_abs() {
                    node.bounds.tl.y = g.bounds.tl.y + delta.y;
                }
            }
            sess.taint(g.node);
            sess.taint(g.parent);
        }
    }

    /// Offer a container under the pointer as the drop target. An
    /// unsuitable candidate, one that is not a container or sits inside
    /// the dragged subtrees, is rejected and the previous target kept.
    pub fn set_drop_target(&mut self, sess: &Session, candidate: NodeId) {
        let inside_drag = |id: NodeId| {
            self.grabbed
                .iter()
                .any(|g| g.node == id || sess.tree().is_ancestor(g.node, id))
        };
        if inside_drag(candidate) {
            return;
        }
        let Ok(resolved) = sess.resolve_drop_parent(candidate) else {
            return;
        };
        if inside_drag(resolved) {
            return;
        }
        self.target = Some(resolved);
    }

    /// The currently accepted drop container, if any.
    pub fn drop_target(&self) -> Option<NodeId> {
        self.target
    }

    /// Abandon the gesture, restoring the preview bounds. The document's
    /// designed state was never touched, so there is nothing to undo.
    pub fn cancel(self, sess: &mut Session) {
        for g in &self.grabbed {
            if let Some(node) = sess.tree_mut().node_mut(g.node) {
                node.bounds = g.bounds;
            }
            sess.taint(g.node);
            sess.taint(g.parent);
        }
    }

    /// Indices into `grabbed` ordered by original sibling index, so
    /// re-attachment reconstructs every children list exactly.
    fn restore_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.grabbed.len()).collect();
        order.sort_by_key(|i| self.grabbed[*i].index);
        order
    }
}

impl Operation for DragOp {
    fn describe(&self) -> &str {
        "drag"
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        let delta = self.pointer - self.origin;
        for g in &self.grabbed {
            let target = self.target.unwrap_or(g.parent);
            let shift = sess.tree().client_origin(g.parent)? - sess.tree().client_origin(target)?;
            if target != g.parent {
                sess.tree_mut().detach(g.node)?;
                sess.tree_mut().attach(target, g.node)?;
            }
            if let Some(x) = g.left.abs() {
                let dim = Dim::Abs(x + shift.x + delta.x);
                sess.set_prop_value(g.node, "left", PropValue::Dim(dim))?;
            }
            if let Some(y) = g.top.abs() {
                let dim = Dim::Abs(y + shift.y + delta.y);
                sess.set_prop_value(g.node, "top", PropValue::Dim(dim))?;
            }
        }
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        for i in self.restore_order() {
            let g = &self.grabbed[i];
            if sess.tree().node(g.node).and_then(|n| n.parent()) != Some(g.parent) {
                sess.tree_mut().detach(g.node)?;
                sess.tree_mut().attach_at(g.parent, g.index, g.node)?;
            }
            sess.set_prop_value(g.node, "left", PropValue::Dim(g.left))?;
            sess.set_prop_value(g.node, "top", PropValue::Dim(g.top))?;
            if let Some(node) = sess.tree_mut().node_mut(g.node) {
                node.bounds = g.bounds;
            }
            sess.taint(g.node);
        }
        Ok(())
    }
}
