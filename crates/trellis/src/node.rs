//! Nodes: the arena-resident wrapper around a widget instance.

use std::fmt;

use trellis_geom::Rect;

use crate::{dim::Placement, id::NodeId, name::FieldName, widget::Widget};

/// A node in the design tree.
///
/// A node owns its widget and the design-time data the widget itself does
/// not know about: the field name, the per-axis position references and
/// the live preview bounds. Structure is held as ids so operations can
/// detach and re-link nodes without touching the node bodies.
pub struct Node {
    /// The widget instance this node wraps.
    pub(crate) widget: Box<dyn Widget>,
    /// Unique field name.
    pub(crate) name: FieldName,
    /// Parent node, if attached.
    pub(crate) parent: Option<NodeId>,
    /// Child nodes, in order.
    pub(crate) children: Vec<NodeId>,
    /// Designed geometry, one position reference per axis.
    pub(crate) placement: Placement,
    /// Live bounds in parent client coordinates.
    pub(crate) bounds: Rect,
    /// Redraw flag.
    pub(crate) tainted: bool,
}

impl Node {
    /// A detached node with no parent and zero bounds.
    pub(crate) fn new(widget: Box<dyn Widget>, name: FieldName, placement: Placement) -> Self {
        Node {
            widget,
            name,
            parent: None,
            children: Vec::new(),
            placement,
            bounds: Rect::zero(),
            tainted: true,
        }
    }

    /// The node's field name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// The node's parent, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's children, in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The node's designed geometry.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// The node's live bounds, in parent client coordinates.
    ///
    /// These track the designed geometry except mid-gesture, when a drag
    /// or resize previews here without touching the placement.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The widget instance.
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    pub(crate) fn widget_mut(&mut self) -> &mut dyn Widget {
        self.widget.as_mut()
    }

    /// True if the node needs a redraw.
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.widget.kind())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("placement", &self.placement)
            .field("bounds", &self.bounds)
            .finish()
    }
}
