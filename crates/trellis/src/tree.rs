//! The design tree: a slotmap arena of nodes plus the structural rules
//! that keep it a tree.
//!
//! Nodes live in the arena whether or not they are attached. Detaching
//! keeps the node body intact, which is what undo relies on: an operation
//! records ids and indices, and re-linking the same ids restores the
//! exact prior structure, including every position reference that names
//! those ids.

use std::collections::HashSet;

use slotmap::SlotMap;

use trellis_geom::{Point, Rect};

use crate::{
    dim::{Axis, Dim, Placement},
    error::{Error, Result},
    id::NodeId,
    name::FieldName,
    node::Node,
    widget::Widget,
};

/// The node arena and root for one document.
pub struct DesignTree {
    /// Node storage arena.
    nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    root: NodeId,
}

impl DesignTree {
    /// Create a tree with the given root widget. The root occupies
    /// `bounds` in screen space.
    pub fn new(widget: Box<dyn Widget>, name: FieldName, bounds: Rect) -> Self {
        let mut nodes = SlotMap::with_key();
        let placement = Placement::abs(bounds.tl.x, bounds.tl.y, bounds.w, bounds.h);
        let mut node = Node::new(widget, name, placement);
        node.bounds = bounds;
        let root = nodes.insert(node);
        DesignTree { nodes, root }
    }

    /// The root node's id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// True if the id refers to a live node, attached or not.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn try_node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    pub(crate) fn try_node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// True if `name` is claimed by any node in the arena, attached or
    /// not. Detached nodes keep their claim so an undone delete cannot
    /// come back to a name collision.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.nodes.values().any(|n| n.name == name)
    }

    /// Create a detached node. The requested name is deduplicated against
    /// every name in the arena, and any absolute axes are realized into
    /// the node's live bounds.
    pub(crate) fn create(
        &mut self,
        widget: Box<dyn Widget>,
        requested: &FieldName,
        placement: Placement,
    ) -> NodeId {
        let name = requested.unique_in(|n| self.is_name_taken(n));
        let id = self.nodes.insert(Node::new(widget, name, placement));
        self.realize(id);
        id
    }

    /// Return true if `ancestor` appears in the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Return true if `id` is attached to the root.
    pub fn is_attached_to_root(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// The index of `child` in `parent`'s children list.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes
            .get(parent)
            .and_then(|n| n.children.iter().position(|id| *id == child))
    }

    /// Attach a detached child at the end of a parent's children.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let at = self.nodes.get(parent).map_or(0, |n| n.children.len());
        self.attach_at(parent, at, child)
    }

    /// Attach a detached child at an index in a parent's children. The
    /// index is clamped to the current list length.
    pub(crate) fn attach_at(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child));
        }
        if self.nodes.get(child).and_then(|n| n.parent).is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        if !self.nodes[parent].widget.is_container() {
            return Err(Error::NotAContainer(parent));
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            let at = index.min(node.children.len());
            node.children.insert(at, child);
        }
        self.taint(parent);
        Ok(())
    }

    /// Detach a child from its parent, returning the parent and the index
    /// the child held. Detaching an already detached node is a no-op that
    /// returns `None`. The root cannot be detached.
    pub(crate) fn detach(&mut self, child: NodeId) -> Result<Option<(NodeId, usize)>> {
        if child == self.root {
            return Err(Error::Invalid("cannot detach root".into()));
        }
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child));
        }
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return Ok(None);
        };
        let index = self.child_index(parent, child);
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        self.taint(parent);
        Ok(index.map(|i| (parent, i)))
    }

    /// Replace the children list for a parent. Children dropped from the
    /// list are detached; children new to the list may come in detached
    /// or attached elsewhere.
    pub(crate) fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.nodes[parent].widget.is_container() {
            return Err(Error::NotAContainer(parent));
        }

        let mut seen = HashSet::with_capacity(children.len());
        for child in &children {
            if !seen.insert(*child) {
                return Err(Error::DuplicateChild {
                    parent,
                    child: *child,
                });
            }
        }

        for child in &children {
            if !self.nodes.contains_key(*child) {
                return Err(Error::NodeNotFound(*child));
            }
            if *child == parent || self.is_ancestor(*child, parent) {
                return Err(Error::WouldCreateCycle {
                    parent,
                    child: *child,
                });
            }
        }

        for child in &children {
            let old_parent = self.nodes.get(*child).and_then(|n| n.parent);
            if let Some(old_parent) = old_parent
                && old_parent != parent
            {
                if let Some(node) = self.nodes.get_mut(old_parent) {
                    node.children.retain(|id| *id != *child);
                }
                if let Some(node) = self.nodes.get_mut(*child) {
                    node.parent = None;
                }
                self.taint(old_parent);
            }
        }

        let old_children = self.nodes[parent].children.clone();
        for child in old_children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
            }
        }
        for child in &children {
            if let Some(node) = self.nodes.get_mut(*child) {
                node.parent = Some(parent);
            }
        }
        self.nodes[parent].children = children;
        self.taint(parent);
        Ok(())
    }

    /// Collect a subtree in pre-order, including the root of the walk.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Every node reachable from the document root, in pre-order.
    pub fn walk(&self) -> Vec<NodeId> {
        self.descendants(self.root)
    }

    /// The outer origin of a node in screen coordinates.
    ///
    /// A node's live bounds are expressed in its parent's client area, so
    /// the screen position is the fold of ancestor origins and client
    /// insets down to the node. For a detached node this is just its own
    /// bounds origin.
    pub fn screen_origin(&self, id: NodeId) -> Result<Point> {
        let mut node = self.try_node(id)?;
        let mut origin = node.bounds.tl;
        while let Some(pid) = node.parent {
            node = self.try_node(pid)?;
            origin = origin + node.bounds.tl + node.widget.client_inset();
        }
        Ok(origin)
    }

    /// The origin of a node's client area in screen coordinates.
    pub fn client_origin(&self, id: NodeId) -> Result<Point> {
        let inset = self.try_node(id)?.widget.client_inset();
        Ok(self.screen_origin(id)? + inset)
    }

    /// Copy any absolute placement axes into the node's live bounds.
    /// Non-absolute axes leave the current bounds untouched for the
    /// rendering layer to resolve.
    pub(crate) fn realize(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            if let Some(v) = node.placement.left.abs() {
                node.bounds.tl.x = v;
            }
            if let Some(v) = node.placement.top.abs() {
                node.bounds.tl.y = v;
            }
            if let Some(v) = node.placement.width.abs() {
                node.bounds.w = v.max(1) as u32;
            }
            if let Some(v) = node.placement.height.abs() {
                node.bounds.h = v.max(1) as u32;
            }
            node.tainted = true;
        }
    }

    /// Replace the position reference for one axis, returning the old
    /// reference. A reference naming the node it positions is rejected.
    pub(crate) fn set_axis(&mut self, id: NodeId, axis: Axis, dim: Dim) -> Result<Dim> {
        if dim.sibling_target() == Some(id) {
            return Err(Error::SelfReference(id));
        }
        let node = self.try_node_mut(id)?;
        let old = node.placement.axis(axis);
        *node.placement.axis_mut(axis) = dim;
        self.realize(id);
        Ok(old)
    }

    /// Mark a node as needing redraw.
    pub(crate) fn taint(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.tainted = true;
        }
    }

    /// Clear a node's redraw mark. Called by the rendering layer after it
    /// repaints the node.
    pub fn clear_taint(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.tainted = false;
        }
    }
}
