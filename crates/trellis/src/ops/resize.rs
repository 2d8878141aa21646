//! Resize with live preview.

use trellis_geom::{Point, Rect};

use super::Operation;
use crate::{
    dim::Dim,
    error::Result,
    id::NodeId,
    session::Session,
    widget::PropValue,
};

/// Resize a node by dragging its bottom-right corner, committed as a
/// single undoable step.
///
/// An axis participates only when both its offset and its extent are
/// absolute: a percent-wide node cannot have its width dragged, and
/// without an absolute left there is no offset to measure the new width
/// from. The new extent is the dragged-to cell measured from the offset,
/// inclusive, floored at one cell.
pub struct ResizeOp {
    /// The node being resized.
    node: NodeId,
    /// Parent at grab time.
    parent: NodeId,
    /// Left offset, when the horizontal axis participates.
    origin_left: Option<i32>,
    /// Top offset, when the vertical axis participates.
    origin_top: Option<i32>,
    /// Width reference before the resize.
    old_width: Dim,
    /// Height reference before the resize.
    old_height: Dim,
    /// Live bounds at grab time.
    old_bounds: Rect,
    /// Latest pointer position, screen space.
    pointer: Point,
    /// Set at construction if the resize cannot run.
    impossible: bool,
}

impl ResizeOp {
    /// Start a resize at `pointer` (screen space) on `node`.
    pub fn new(sess: &Session, node: NodeId, pointer: Point) -> Result<Self> {
        let n = sess.node(node)?;
        let placement = n.placement();
        let origin_left = (placement.left.is_abs() && placement.width.is_abs())
            .then(|| placement.left.abs())
            .flatten();
        let origin_top = (placement.top.is_abs() && placement.height.is_abs())
            .then(|| placement.top.abs())
            .flatten();
        let parent = n.parent().unwrap_or_default();
        let impossible = node == sess.tree().root_id()
            || n.parent().is_none()
            || (origin_left.is_none() && origin_top.is_none());
        Ok(ResizeOp {
            node,
            parent,
            origin_left,
            origin_top,
            old_width: placement.width,
            old_height: placement.height,
            old_bounds: n.bounds(),
            pointer,
            impossible,
        })
    }

    /// The new extents the current pointer implies, in cells.
    fn extents(&self, sess: &Session) -> Result<(Option<i32>, Option<i32>)> {
        let origin = sess.tree().client_origin(self.parent)?;
        let rel = self.pointer - origin;
        let w = self.origin_left.map(|left| (rel.x + 1 - left).max(1));
        let h = self.origin_top.map(|top| (rel.y + 1 - top).max(1));
        Ok((w, h))
    }

    /// Track the pointer, previewing the new size in live bounds only.
    pub fn update(&mut self, sess: &mut Session, pointer: Point) -> Result<()> {
        if self.impossible {
            return Ok(());
        }
        self.pointer = pointer;
        let (w, h) = self.extents(sess)?;
        if let Some(node) = sess.tree_mut().node_mut(self.node) {
            if let Some(w) = w {
                node.bounds.w = w as u32;
            }
            if let Some(h) = h {
                node.bounds.h = h as u32;
            }
        }
        sess.taint(self.node);
        sess.taint(self.parent);
        Ok(())
    }

    /// Abandon the gesture, restoring the preview bounds.
    pub fn cancel(self, sess: &mut Session) {
        if let Some(node) = sess.tree_mut().node_mut(self.node) {
            node.bounds = self.old_bounds;
        }
        sess.taint(self.node);
        sess.taint(self.parent);
    }
}

impl Operation for ResizeOp {
    fn describe(&self) -> &str {
        "resize"
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        let (w, h) = self.extents(sess)?;
        if let Some(w) = w {
            sess.set_prop_value(self.node, "width", PropValue::Dim(Dim::Abs(w)))?;
        }
        if let Some(h) = h {
            sess.set_prop_value(self.node, "height", PropValue::Dim(Dim::Abs(h)))?;
        }
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        sess.set_prop_value(self.node, "width", PropValue::Dim(self.old_width))?;
        sess.set_prop_value(self.node, "height", PropValue::Dim(self.old_height))?;
        if let Some(node) = sess.tree_mut().node_mut(self.node) {
            node.bounds = self.old_bounds;
        }
        sess.taint(self.node);
        Ok(())
    }
}
