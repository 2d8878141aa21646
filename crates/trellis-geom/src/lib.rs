//! Signed cell-geometry primitives used across trellis.
//!
//! The designer works in terminal cells. Origins are signed because a widget
//! dragged partway out of its container legitimately has a negative offset;
//! extents are unsigned and never zero for realized widgets.

#![warn(missing_docs)]

/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use point::Point;
pub use rect::Rect;
