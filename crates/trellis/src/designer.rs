//! The designer: one session under edit plus its operation history.

use trellis_geom::Rect;

use crate::{
    error::Result,
    factory::WidgetFactory,
    ops::{Operation, OperationManager},
    session::Session,
    snapshot::Snapshot,
};

/// The top-level editing surface. Owns a [`Session`] and routes every
/// document change through an [`OperationManager`], so callers get undo
/// and redo without touching either stack directly.
pub struct Designer {
    /// The document and its editing state.
    session: Session,
    /// Undo and redo stacks.
    history: OperationManager,
}

impl Designer {
    /// Start a new design: a fresh root window named `main` filling
    /// `screen`, with empty history.
    pub fn new(factory: Box<dyn WidgetFactory>, screen: Rect) -> Result<Self> {
        let session = Session::new(factory, "window", "main", screen)?;
        Ok(Designer {
            session,
            history: OperationManager::new(),
        })
    }

    /// Take over an existing session, with empty history.
    pub fn open(session: Session) -> Self {
        Designer {
            session,
            history: OperationManager::new(),
        }
    }

    /// Restore a saved design, with empty history.
    pub fn from_snapshot(snap: &Snapshot, factory: Box<dyn WidgetFactory>) -> Result<Self> {
        Ok(Designer::open(snap.restore(factory)?))
    }

    /// The session under edit.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access, for the parts history deliberately
    /// ignores: selection, the prompt source and view state.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run an operation through the history. Returns whether it ran.
    pub fn apply(&mut self, op: impl Operation + 'static) -> Result<bool> {
        self.history.apply(Box::new(op), &mut self.session)
    }

    /// Undo the most recent operation. Returns false on an empty stack.
    pub fn undo(&mut self) -> Result<bool> {
        self.history.undo(&mut self.session)
    }

    /// Redo the most recently undone operation. Returns false on an
    /// empty stack.
    pub fn redo(&mut self) -> Result<bool> {
        self.history.redo(&mut self.session)
    }

    /// The operation history.
    pub fn history(&self) -> &OperationManager {
        &self.history
    }

    /// Drop all recorded history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Save the current document.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::capture(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{factory::Catalog, ops::AddWidget, widget::PropValue};
    use trellis_geom::{Point, Rect};

    #[test]
    fn designer_routes_edits_through_history() -> Result<()> {
        let mut d = Designer::new(Box::new(Catalog), Rect::new(0, 0, 80, 24))?;
        let root = d.session().tree().root_id();
        let op = AddWidget::new(d.session(), root, "label", Point { x: 2, y: 3 }, Some("hello"))?;
        assert!(d.apply(op)?);
        assert_eq!(d.history().undo_depth(), 1);
        assert!(d.undo()?);
        assert!(d.redo()?);
        assert_eq!(d.session().tree().walk().len(), 2);
        // Clearing history keeps the document and drops both stacks.
        d.clear_history();
        assert!(!d.history().can_undo());
        assert_eq!(d.session().tree().walk().len(), 2);
        Ok(())
    }

    #[test]
    fn snapshot_reopens_with_fresh_history() -> Result<()> {
        let mut d = Designer::new(Box::new(Catalog), Rect::new(0, 0, 80, 24))?;
        let root = d.session().tree().root_id();
        let op = AddWidget::new(d.session(), root, "button", Point { x: 1, y: 1 }, Some("ok"))?;
        d.apply(op)?;
        let snap = d.snapshot()?;
        let reopened = Designer::from_snapshot(&snap, Box::new(Catalog))?;
        assert!(!reopened.history().can_undo());
        assert_eq!(reopened.session().tree().walk().len(), 2);
        let id = reopened.session().tree().walk()[1];
        assert_eq!(
            reopened.session().prop(id, "text")?,
            PropValue::Str("ok".into())
        );
        Ok(())
    }
}
