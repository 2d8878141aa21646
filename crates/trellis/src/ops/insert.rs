//! Widget insertion.

use trellis_geom::Point;

use super::Operation;
use crate::{
    dim::Placement,
    error::{Error, Result},
    id::NodeId,
    name::FieldName,
    session::Session,
};

/// Create a fresh widget node and attach it under a container.
///
/// The container is resolved through pane redirection at construction,
/// so inserting "into" a tab control inserts into its active page. The
/// field name comes from the constructor or a prompt at apply time, and
/// is deduplicated against every name in the document. Undo detaches the
/// node but keeps it alive, so redo re-attaches the identical node at
/// the same index.
pub struct AddWidget {
    /// Resolved parent container.
    parent: NodeId,
    /// Widget kind to create.
    kind: String,
    /// Position in the parent's client area.
    at: Point,
    /// Field name supplied at construction, if any.
    requested: Option<String>,
    /// History label.
    label: String,
    /// The node created on first apply.
    created: Option<NodeId>,
    /// Index the node holds among its siblings.
    index: usize,
    /// Selection to restore on undo.
    prior_selection: Vec<NodeId>,
}

impl AddWidget {
    /// Construct an insert. Fails immediately if the container cannot
    /// take children or the kind is unknown to the session's factory.
    pub fn new(
        sess: &Session,
        container: NodeId,
        kind: &str,
        at: Point,
        name: Option<&str>,
    ) -> Result<Self> {
        let parent = sess.resolve_drop_parent(container)?;
        if !sess.factory().kinds().contains(&kind) {
            return Err(Error::UnknownKind(kind.to_string()));
        }
        Ok(AddWidget {
            parent,
            kind: kind.to_string(),
            at,
            requested: name.map(str::to_string),
            label: format!("add {kind}"),
            created: None,
            index: 0,
            prior_selection: Vec::new(),
        })
    }

    /// The node this insert created, once applied.
    pub fn created(&self) -> Option<NodeId> {
        self.created
    }
}

impl Operation for AddWidget {
    fn describe(&self) -> &str {
        &self.label
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        let id = match self.created {
            Some(id) => {
                let attached = sess.tree().node(id).is_some_and(|n| n.parent().is_some());
                if !attached {
                    sess.tree_mut().attach_at(self.parent, self.index, id)?;
                }
                id
            }
            None => {
                let requested = match &self.requested {
                    Some(n) => n.clone(),
                    None => match sess.ask("Field name", &self.kind) {
                        Some(n) => n,
                        None => return Ok(false),
                    },
                };
                let widget = sess.factory().create(&self.kind)?;
                let (w, h) = widget.preferred_size();
                let placement = Placement::abs(self.at.x, self.at.y, w, h);
                let id = sess.create_node(widget, &FieldName::convert(&requested), placement);
                self.index = sess
                    .tree()
                    .node(self.parent)
                    .map_or(0, |n| n.children().len());
                sess.tree_mut().attach_at(self.parent, self.index, id)?;
                self.created = Some(id);
                id
            }
        };
        self.prior_selection = sess.selection().nodes().to_vec();
        sess.selection_mut().set(vec![id]);
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        let Some(id) = self.created else {
            return Ok(());
        };
        if let Some((_, index)) = sess.tree_mut().detach(id)? {
            self.index = index;
        }
        sess.selection_mut().set(self.prior_selection.clone());
        Ok(())
    }
}
