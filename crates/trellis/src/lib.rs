//! Trellis: a transactional layout-design core for terminal UIs.
//!
//! Trellis models a form under design as a tree of named nodes, each
//! wrapping a widget instance and carrying one position reference per
//! geometry axis. Every change to the document is an operation: a
//! reversible value run through a single history, which is what gives
//! the designer exact undo and redo, dependency-safe deletes, and
//! clipboard clones that keep their internal layout references.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Designer`] - A session under edit plus its operation history
//! - [`Session`] - One document: the node tree, selection and clipboard
//! - [`ops`] - The operation vocabulary: insert, drag, resize, delete,
//!   property writes, element collections, copy and paste
//!
//! # Module Organization
//!
//! - [`widgets`] - Built-in widget implementations
//! - [`snapshot`] - Save and restore across the persistence boundary

#![warn(missing_docs)]

// Internal modules - re-export specific items below
mod designer;
mod dim;
mod dump;
mod factory;
mod id;
mod name;
mod node;
mod prompt;
mod selection;
mod session;
mod tree;
mod widget;

// Public modules
pub mod error;
pub mod ops;
pub mod snapshot;
pub mod widgets;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export the core document types
pub use designer::Designer;
pub use dim::{Axis, Dim, Placement, Side};
pub use error::{Error, Result};
pub use id::NodeId;
pub use name::{FieldName, unique_name};
pub use node::Node;
pub use selection::Selection;
pub use session::Session;
pub use snapshot::Snapshot;
pub use tree::DesignTree;
// Re-export the widget seam
pub use factory::{Catalog, WidgetFactory, print_palette};
pub use prompt::{NullPrompt, Prompt};
pub use widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget};
// Re-export debug helpers
pub use dump::dump;

// Geometry comes from the companion crate
pub use trellis_geom::{Point, Rect};
