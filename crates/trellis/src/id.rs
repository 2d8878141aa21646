//! Node identifiers.

use slotmap::new_key_type;

new_key_type! {
    /// Stable identifier for a node in the design tree arena.
    ///
    /// Ids stay valid across detach and re-attach, which is what lets
    /// operations record them in mementos and re-link the same nodes on
    /// undo and redo. An id only dies when its node is dropped from the
    /// arena outright.
    pub struct NodeId;
}
