//! Position references.
//!
//! Each node axis is positioned by a [`Dim`]: an absolute cell offset, a
//! percentage of the parent's client area, a fill to the parent's far
//! edge, or an offset from a sibling's edge. Only absolute axes are
//! realized into live bounds here; the other forms are resolved by the
//! rendering layer at draw time.

use crate::id::NodeId;

/// One of the four geometry axes of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal offset within the parent's client area.
    Left,
    /// Vertical offset within the parent's client area.
    Top,
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

impl Axis {
    /// All four axes, in property-table order.
    pub const ALL: [Axis; 4] = [Axis::Left, Axis::Top, Axis::Width, Axis::Height];

    /// The axis name as used in the designable property table.
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Left => "left",
            Axis::Top => "top",
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }

}

/// An edge of a sibling node that a [`Dim::Sibling`] reference anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    /// The sibling's left edge.
    Left,
    /// The sibling's top edge.
    Top,
    /// The sibling's right edge.
    Right,
    /// The sibling's bottom edge.
    Bottom,
}

/// A position reference for a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
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
    /// An offset from an edge of a sibling node.
    Sibling {
        /// The sibling the axis is anchored to.
        target: NodeId,
        /// Which of the sibling's edges to anchor to.
        side: Side,
        /// Cell offset from that edge.
        offset: i32,
    },
}

impl Dim {
    /// True if this is an absolute reference.
    pub fn is_abs(&self) -> bool {
        matches!(self, Dim::Abs(_))
    }

    /// The absolute value, if this is an absolute reference.
    pub fn abs(&self) -> Option<i32> {
        match self {
            Dim::Abs(v) => Some(*v),
            _ => None,
        }
    }

    /// The sibling this reference depends on, if any.
    pub fn sibling_target(&self) -> Option<NodeId> {
        match self {
            Dim::Sibling { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// The designed geometry of a node: one position reference per axis.
///
/// This is the undo-visible record. The live preview bounds a node shows
/// during a drag or resize live elsewhere and never enter history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Reference for the left edge.
    pub left: Dim,
    /// Reference for the top edge.
    pub top: Dim,
    /// Reference for the width.
    pub width: Dim,
    /// Reference for the height.
    pub height: Dim,
}

impl Placement {
    /// A fully absolute placement.
    pub fn abs(x: i32, y: i32, w: u32, h: u32) -> Self {
        Placement {
            left: Dim::Abs(x),
            top: Dim::Abs(y),
            width: Dim::Abs(w as i32),
            height: Dim::Abs(h as i32),
        }
    }

    /// The reference for a given axis.
    pub fn axis(&self, axis: Axis) -> Dim {
        match axis {
            Axis::Left => self.left,
            Axis::Top => self.top,
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    /// Mutable access to the reference for a given axis.
    pub fn axis_mut(&mut self, axis: Axis) -> &mut Dim {
        match axis {
            Axis::Left => &mut self.left,
            Axis::Top => &mut self.top,
            Axis::Width => &mut self.width,
            Axis::Height => &mut self.height,
        }
    }

    /// Every sibling this placement depends on, in axis order.
    pub fn sibling_targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        Axis::ALL
            .iter()
            .filter_map(|a| self.axis(*a).sibling_target())
    }

    /// True if any axis depends on the given node.
    pub fn depends_on(&self, node: NodeId) -> bool {
        self.sibling_targets().any(|t| t == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn axis_access() {
        let mut p = Placement::abs(1, 2, 3, 4);
        assert_eq!(p.axis(Axis::Left), Dim::Abs(1));
        assert_eq!(p.axis(Axis::Height), Dim::Abs(4));
        *p.axis_mut(Axis::Top) = Dim::Fill { margin: 0 };
        assert_eq!(p.top, Dim::Fill { margin: 0 });
    }

    #[test]
    fn dependency_scan() {
        let ids = ids(2);
        let mut p = Placement::abs(0, 0, 5, 5);
        assert!(!p.depends_on(ids[0]));
        p.left = Dim::Sibling {
            target: ids[0],
            side: Side::Right,
            offset: 1,
        };
        assert!(p.depends_on(ids[0]));
        assert!(!p.depends_on(ids[1]));
        assert_eq!(p.sibling_targets().collect::<Vec<_>>(), vec![ids[0]]);
    }
}
