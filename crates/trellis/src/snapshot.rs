//! Whole-design save and restore.
//!
//! A snapshot is the serializable shape of a design: one record per
//! attached node carrying its name, widget kind, full widget state and
//! placement. Sibling references are stored by node name, which is
//! stable across save and restore where arena ids are not. Restoring
//! rebuilds a fresh session through a widget factory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use trellis_geom::Rect;

use crate::{
    dim::{Axis, Dim, Placement, Side},
    error::{Error, Result},
    factory::WidgetFactory,
    id::NodeId,
    name::FieldName,
    session::Session,
    tree::DesignTree,
};

/// One position reference in saved form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavedDim {
    /// A fixed offset or extent in cells.
    Abs(i32),
    /// A percentage of the parent's client extent, plus a cell adjustment.
    Percent {
        /// Percentage of the parent's client extent, 0 to 100.
        pct: u32,
        /// Cell adjustment applied after the percentage.
        adjust: i32,
    },
    /// Fill to the parent's far edge, leaving a margin.
    Fill {
        /// Cells left free at the far edge.
        margin: i32,
    },
    /// An offset from an edge of a sibling node, addressed by name.
    Sibling {
        /// Field name of the sibling the axis is anchored to.
        target: String,
        /// Which of the sibling's edges to anchor to.
        side: Side,
        /// Cell offset from that edge.
        offset: i32,
    },
}

/// Saved geometry for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlacement {
    /// Reference for the left edge.
    pub left: SavedDim,
    /// Reference for the top edge.
    pub top: SavedDim,
    /// Reference for the width.
    pub width: SavedDim,
    /// Reference for the height.
    pub height: SavedDim,
}

impl SavedPlacement {
    /// The saved reference for one axis.
    fn axis(&self, axis: Axis) -> &SavedDim {
        match axis {
            Axis::Left => &self.left,
            Axis::Top => &self.top,
            Axis::Width => &self.width,
            Axis::Height => &self.height,
        }
    }
}

/// One node in saved form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedNode {
    /// Field name, unique across the design.
    pub name: String,
    /// Widget kind, resolved through the factory on restore.
    pub kind: String,
    /// Full widget state, as the widget saved it.
    pub state: Value,
    /// Saved geometry.
    pub placement: SavedPlacement,
    /// Child nodes in order.
    pub children: Vec<SavedNode>,
}

/// A complete saved design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The root node record.
    pub root: SavedNode,
}

impl Snapshot {
    /// Capture the document attached under the session's root. Detached
    /// nodes held only by undo history are not part of the document and
    /// are not saved.
    pub fn capture(sess: &Session) -> Result<Snapshot> {
        let tree = sess.tree();
        Ok(Snapshot {
            root: save_node(tree, tree.root_id())?,
        })
    }

    /// Rebuild a session from this snapshot through a widget factory.
    ///
    /// Node names must be unique and every sibling reference must name a
    /// node present in the snapshot.
    pub fn restore(&self, factory: Box<dyn WidgetFactory>) -> Result<Session> {
        let mut widget = factory.create(&self.root.kind)?;
        if !widget.is_container() {
            return Err(Error::Invalid(format!(
                "root widget {} is not a container",
                self.root.kind
            )));
        }
        widget.load(&self.root.state)?;
        let root_name = FieldName::try_from(self.root.name.as_str())?;
        let mut tree = DesignTree::new(widget, root_name, initial_rect(&self.root.placement));
        let root_id = tree.root_id();

        let mut names: HashMap<String, NodeId> = HashMap::new();
        names.insert(self.root.name.clone(), root_id);
        let mut fixups: Vec<(NodeId, Axis, String, Side, i32)> = Vec::new();

        let mut pending = Vec::new();
        let placement = build_placement(&self.root.placement, &mut pending);
        for axis in Axis::ALL {
            tree.set_axis(root_id, axis, placement.axis(axis))?;
        }
        for (axis, target, side, offset) in pending {
            fixups.push((root_id, axis, target, side, offset));
        }

        // Pre-order build, so every parent exists before its children
        // attach and sibling order is preserved by plain appends.
        let mut stack: Vec<(&SavedNode, NodeId)> = self
            .root
            .children
            .iter()
            .rev()
            .map(|c| (c, root_id))
            .collect();
        while let Some((saved, parent)) = stack.pop() {
            if names.contains_key(&saved.name) {
                return Err(Error::Invalid(format!(
                    "duplicate node name {}",
                    saved.name
                )));
            }
            let name = FieldName::try_from(saved.name.as_str())?;
            let mut widget = factory.create(&saved.kind)?;
            widget.load(&saved.state)?;
            let mut pending = Vec::new();
            let placement = build_placement(&saved.placement, &mut pending);
            let id = tree.create(widget, &name, placement);
            tree.attach(parent, id)?;
            names.insert(saved.name.clone(), id);
            for (axis, target, side, offset) in pending {
                fixups.push((id, axis, target, side, offset));
            }
            for child in saved.children.iter().rev() {
                stack.push((child, id));
            }
        }

        for (id, axis, target, side, offset) in fixups {
            let Some(tid) = names.get(&target).copied() else {
                return Err(Error::Invalid(format!("unknown sibling target {target}")));
            };
            tree.set_axis(
                id,
                axis,
                Dim::Sibling {
                    target: tid,
                    side,
                    offset,
                },
            )?;
        }

        Ok(Session::from_tree(tree, factory))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Internal(e.to_string()))
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Snapshot> {
        serde_json::from_str(json).map_err(|e| Error::Invalid(e.to_string()))
    }
}

/// Recursively save one attached node and its subtree.
fn save_node(tree: &DesignTree, id: NodeId) -> Result<SavedNode> {
    let node = tree.try_node(id)?;
    let placement = node.placement();
    Ok(SavedNode {
        name: node.name().to_string(),
        kind: node.widget().kind().to_string(),
        state: node.widget().save(),
        placement: SavedPlacement {
            left: save_dim(tree, placement.left)?,
            top: save_dim(tree, placement.top)?,
            width: save_dim(tree, placement.width)?,
            height: save_dim(tree, placement.height)?,
        },
        children: node
            .children()
            .iter()
            .map(|c| save_node(tree, *c))
            .collect::<Result<_>>()?,
    })
}

/// Save one axis, converting a sibling reference to the target's name.
fn save_dim(tree: &DesignTree, dim: Dim) -> Result<SavedDim> {
    Ok(match dim {
        Dim::Abs(v) => SavedDim::Abs(v),
        Dim::Percent { pct, adjust } => SavedDim::Percent { pct, adjust },
        Dim::Fill { margin } => SavedDim::Fill { margin },
        Dim::Sibling {
            target,
            side,
            offset,
        } => SavedDim::Sibling {
            target: tree.try_node(target)?.name().to_string(),
            side,
            offset,
        },
    })
}

/// Convert saved geometry into a live placement. Sibling axes hold a
/// placeholder and are recorded in `pending` for a second pass once the
/// whole tree exists and names can be resolved.
fn build_placement(
    saved: &SavedPlacement,
    pending: &mut Vec<(Axis, String, Side, i32)>,
) -> Placement {
    let mut placement = Placement::abs(0, 0, 1, 1);
    for axis in Axis::ALL {
        *placement.axis_mut(axis) = match saved.axis(axis) {
            SavedDim::Abs(v) => Dim::Abs(*v),
            SavedDim::Percent { pct, adjust } => Dim::Percent {
                pct: *pct,
                adjust: *adjust,
            },
            SavedDim::Fill { margin } => Dim::Fill { margin: *margin },
            SavedDim::Sibling {
                target,
                side,
                offset,
            } => {
                pending.push((axis, target.clone(), *side, *offset));
                Dim::Abs(0)
            }
        };
    }
    placement
}

/// A starting screen rectangle for a restored root. Absolute axes are
/// honored directly; anything else falls back to a conventional terminal
/// size for the rendering layer to overwrite.
fn initial_rect(p: &SavedPlacement) -> Rect {
    let abs = |d: &SavedDim, fallback: i32| match d {
        SavedDim::Abs(v) => *v,
        _ => fallback,
    };
    Rect::new(
        abs(&p.left, 0),
        abs(&p.top, 0),
        abs(&p.width, 80).max(1) as u32,
        abs(&p.height, 24).max(1) as u32,
    )
}
