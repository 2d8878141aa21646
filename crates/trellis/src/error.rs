//! Error types for the designer core.

use thiserror::Error;

use crate::id::NodeId;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by tree mutation, operation construction and the
/// save/load boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("node not found: {0:?}")]
    /// The node id is not present in the arena.
    NodeNotFound(NodeId),

    #[error("node {0:?} is already attached")]
    /// Attach was called on a node that already has a parent.
    AlreadyAttached(NodeId),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// The attach would make a node its own ancestor.
    WouldCreateCycle {
        /// The prospective parent.
        parent: NodeId,
        /// The node being attached.
        child: NodeId,
    },

    #[error("duplicate child {child:?} under {parent:?}")]
    /// The same node appeared twice in a replacement children list.
    DuplicateChild {
        /// The parent whose children were being replaced.
        parent: NodeId,
        /// The repeated child.
        child: NodeId,
    },

    #[error("node {0:?} is not a container")]
    /// The node's widget cannot hold children.
    NotAContainer(NodeId),

    #[error("node {node:?} is not a {expected}")]
    /// An operation was constructed against the wrong widget kind.
    WrongWidget {
        /// The offending node.
        node: NodeId,
        /// The widget kind the operation expected.
        expected: &'static str,
    },

    #[error("unknown widget kind: {0}")]
    /// The factory does not recognise the widget kind.
    UnknownKind(String),

    #[error("unknown property: {0}")]
    /// The widget has no designable property with this name.
    UnknownProp(String),

    #[error("wrong value type for property: {0}")]
    /// The supplied value does not match the property's declared type.
    PropType(String),

    #[error("node {0:?} may not position itself relative to itself")]
    /// A position reference named the node it belongs to.
    SelfReference(NodeId),

    #[error("invalid: {0}")]
    /// Invalid input.
    Invalid(String),

    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}
