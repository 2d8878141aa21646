//! Designable property writes.

use super::Operation;
use crate::{
    error::{Error, Result},
    id::NodeId,
    session::Session,
    widget::PropValue,
};

/// Set one designable property on one node.
///
/// Covers both widget-owned values and the four geometry axes, which
/// appear in the property table as `left`, `top`, `width` and `height`
/// holding position references. Validation is front-loaded: an unknown
/// property, a mistyped value, a dangling sibling target or a reference
/// from a node to itself all fail at construction, while a write of the
/// value already in place is merely impossible and stays out of history.
pub struct SetProp {
    /// The node being written.
    node: NodeId,
    /// Property name.
    name: String,
    /// Value to write.
    value: PropValue,
    /// Value before the write.
    old: PropValue,
    /// History label.
    label: String,
    /// True when the write would change nothing.
    impossible: bool,
}

impl SetProp {
    /// Construct a property write, validating it against current state.
    pub fn new(sess: &Session, node: NodeId, name: &str, value: PropValue) -> Result<Self> {
        let specs = sess.prop_specs(node)?;
        let spec = specs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::UnknownProp(name.to_string()))?;
        if value.kind() != spec.kind {
            return Err(Error::PropType(name.to_string()));
        }
        if let PropValue::Dim(dim) = &value
            && let Some(target) = dim.sibling_target()
        {
            if target == node {
                return Err(Error::SelfReference(node));
            }
            // A detached target counts as dangling: it is not part of the
            // document and would not survive a save.
            if !sess.tree().is_attached_to_root(target) {
                return Err(Error::NodeNotFound(target));
            }
        }
        let old = sess.prop(node, name)?;
        let impossible = old == value;
        Ok(SetProp {
            node,
            name: name.to_string(),
            value,
            old,
            label: format!("set {name}"),
            impossible,
        })
    }
}

impl Operation for SetProp {
    fn describe(&self) -> &str {
        &self.label
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        sess.set_prop_value(self.node, &self.name, self.value.clone())?;
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        sess.set_prop_value(self.node, &self.name, self.old.clone())?;
        Ok(())
    }
}
