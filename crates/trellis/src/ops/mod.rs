//! Transactional operations and the undo history.
//!
//! Every mutation of the document is an [`Operation`]: a value that
//! captures its inputs up front, applies itself to a session, and can
//! revert itself exactly. The [`OperationManager`] owns the undo and
//! redo stacks and is the only place operations are run from, which is
//! what keeps history and document state in step.

/// Copy and paste.
pub mod clipboard;
/// The generic element-collection operations.
pub mod collection;
/// Dependency-guarded delete.
pub mod delete;
/// Drag with live preview and cross-container moves.
pub mod drag;
/// Widget insertion.
pub mod insert;
/// Designable property writes.
pub mod props;
/// Resize with live preview.
pub mod resize;

pub use clipboard::{CopyOp, PasteOp};
pub use collection::{AddElement, CollectionSpec, MoveElement, RemoveElement, RenameElement};
pub use delete::DeleteOp;
pub use drag::DragOp;
pub use insert::AddWidget;
pub use props::SetProp;
pub use resize::ResizeOp;

use crate::{error::Result, session::Session};

/// A reversible edit to a design session.
///
/// Lifecycle: construct (capturing targets and validating types), then
/// `apply` once through the manager. `apply` may return `Ok(false)` to
/// report a clean refusal, like a cancelled name prompt, in which case
/// nothing entered history. After a successful apply, `revert` and
/// `reapply` move the edit off and back on, always from the matching
/// document state, since the manager only ever unwinds in stack order.
///
/// Implementations must be robust to the document having regrown
/// equivalent state: re-applying an add whose element is already present,
/// or reverting a remove whose element is already back, is a no-op rather
/// than a duplicate.
pub trait Operation: Send {
    /// Short human-readable description, used for history display and
    /// logging.
    fn describe(&self) -> &str;

    /// True if the operation can be seen, from current state, to have no
    /// effect or an illegal one. Impossible operations are skipped
    /// without entering history.
    fn is_impossible(&self) -> bool {
        false
    }

    /// False for operations that run but stay out of history, like copy.
    fn supports_undo(&self) -> bool {
        true
    }

    /// Perform the edit. `Ok(false)` means the operation declined to run
    /// and the document is unchanged.
    fn apply(&mut self, sess: &mut Session) -> Result<bool>;

    /// Exactly reverse a successful `apply`.
    fn revert(&mut self, sess: &mut Session) -> Result<()>;

    /// Redo after a revert. Defaults to `apply`, which is correct for
    /// any operation whose apply is deterministic once constructed.
    fn reapply(&mut self, sess: &mut Session) -> Result<()> {
        self.apply(sess).map(|_| ())
    }
}

/// The undo and redo stacks for one session.
#[derive(Default)]
pub struct OperationManager {
    /// Applied operations, most recent last.
    undo: Vec<Box<dyn Operation>>,
    /// Undone operations, most recently undone last.
    redo: Vec<Box<dyn Operation>>,
}

impl OperationManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an operation against a session. Returns whether it ran.
    ///
    /// A successful, undoable run is pushed onto the undo stack and
    /// clears the redo stack. Impossible and cancelled operations leave
    /// both stacks untouched.
    pub fn apply(&mut self, mut op: Box<dyn Operation>, sess: &mut Session) -> Result<bool> {
        if op.is_impossible() {
            tracing::debug!("skipping impossible operation: {}", op.describe());
            return Ok(false);
        }
        if !op.apply(sess)? {
            tracing::debug!("operation declined to run: {}", op.describe());
            return Ok(false);
        }
        tracing::debug!("applied: {}", op.describe());
        if op.supports_undo() {
            self.redo.clear();
            self.undo.push(op);
        }
        Ok(true)
    }

    /// Undo the most recent operation. Returns false on an empty stack.
    pub fn undo(&mut self, sess: &mut Session) -> Result<bool> {
        let Some(mut op) = self.undo.pop() else {
            return Ok(false);
        };
        match op.revert(sess) {
            Ok(()) => {
                tracing::debug!("undone: {}", op.describe());
                self.redo.push(op);
                Ok(true)
            }
            Err(e) => {
                // Keep the stack shape stable even though the revert
                // failed; the caller decides what to do with the error.
                self.undo.push(op);
                Err(e)
            }
        }
    }

    /// Redo the most recently undone operation. Returns false on an
    /// empty stack.
    pub fn redo(&mut self, sess: &mut Session) -> Result<bool> {
        let Some(mut op) = self.redo.pop() else {
            return Ok(false);
        };
        match op.reapply(sess) {
            Ok(()) => {
                tracing::debug!("redone: {}", op.describe());
                self.undo.push(op);
                Ok(true)
            }
            Err(e) => {
                self.redo.push(op);
                Err(e)
            }
        }
    }

    /// True if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// True if there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of operations available to undo.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of operations available to redo.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Description of the operation undo would revert.
    pub fn undo_peek(&self) -> Option<&str> {
        self.undo.last().map(|op| op.describe())
    }

    /// Description of the operation redo would re-run.
    pub fn redo_peek(&self) -> Option<&str> {
        self.redo.last().map(|op| op.describe())
    }

    /// Drop both stacks. Used when a new document is opened.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

/// Several operations applied and undone as one history entry.
///
/// If any member declines or fails partway through an apply, the members
/// already applied are reverted so the batch is all-or-nothing.
pub struct BatchOp {
    /// History label for the whole batch.
    label: String,
    /// Member operations, applied in order.
    ops: Vec<Box<dyn Operation>>,
}

impl BatchOp {
    /// Construct a batch with a history label.
    pub fn new(label: impl Into<String>, ops: Vec<Box<dyn Operation>>) -> Self {
        BatchOp {
            label: label.into(),
            ops,
        }
    }

    fn rollback(&mut self, sess: &mut Session, applied: usize) {
        for op in self.ops[..applied].iter_mut().rev() {
            if let Err(e) = op.revert(sess) {
                tracing::warn!("batch rollback failed for {}: {}", op.describe(), e);
            }
        }
    }
}

impl Operation for BatchOp {
    fn describe(&self) -> &str {
        &self.label
    }

    fn is_impossible(&self) -> bool {
        self.ops.is_empty() || self.ops.iter().any(|op| op.is_impossible())
    }

    fn supports_undo(&self) -> bool {
        self.ops.iter().all(|op| op.supports_undo())
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        for i in 0..self.ops.len() {
            match self.ops[i].apply(sess) {
                Ok(true) => {}
                Ok(false) => {
                    self.rollback(sess, i);
                    return Ok(false);
                }
                Err(e) => {
                    self.rollback(sess, i);
                    return Err(e);
                }
            }
        }
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        for op in self.ops.iter_mut().rev() {
            op.revert(sess)?;
        }
        Ok(())
    }

    fn reapply(&mut self, sess: &mut Session) -> Result<()> {
        for op in self.ops.iter_mut() {
            op.reapply(sess)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{error::Error, factory::Catalog, session::Session};
    use trellis_geom::Rect;

    fn session() -> Session {
        Session::new(Box::new(Catalog), "window", "main", Rect::new(0, 0, 80, 24)).unwrap()
    }

    /// An operation that counts its calls in a shared balance: apply and
    /// reapply add, revert subtracts.
    struct Probe {
        balance: Arc<AtomicUsize>,
        impossible: bool,
        declines: bool,
        undoable: bool,
    }

    impl Probe {
        fn new(balance: &Arc<AtomicUsize>) -> Self {
            Probe {
                balance: balance.clone(),
                impossible: false,
                declines: false,
                undoable: true,
            }
        }
    }

    impl Operation for Probe {
        fn describe(&self) -> &str {
            "probe"
        }

        fn is_impossible(&self) -> bool {
            self.impossible
        }

        fn supports_undo(&self) -> bool {
            self.undoable
        }

        fn apply(&mut self, _sess: &mut Session) -> Result<bool> {
            if self.declines {
                return Ok(false);
            }
            self.balance.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        fn revert(&mut self, _sess: &mut Session) -> Result<()> {
            self.balance.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn apply_undo_redo_move_between_stacks() -> Result<()> {
        let mut sess = session();
        let mut mgr = OperationManager::new();
        let balance = Arc::new(AtomicUsize::new(0));

        assert!(mgr.apply(Box::new(Probe::new(&balance)), &mut sess)?);
        assert_eq!(balance.load(Ordering::SeqCst), 1);
        assert_eq!((mgr.undo_depth(), mgr.redo_depth()), (1, 0));
        assert_eq!(mgr.undo_peek(), Some("probe"));

        assert!(mgr.undo(&mut sess)?);
        assert_eq!(balance.load(Ordering::SeqCst), 0);
        assert_eq!((mgr.undo_depth(), mgr.redo_depth()), (0, 1));

        assert!(mgr.redo(&mut sess)?);
        assert_eq!(balance.load(Ordering::SeqCst), 1);
        assert_eq!((mgr.undo_depth(), mgr.redo_depth()), (1, 0));
        Ok(())
    }

    #[test]
    fn over_undo_and_over_redo_are_noops() -> Result<()> {
        let mut sess = session();
        let mut mgr = OperationManager::new();
        assert!(!mgr.undo(&mut sess)?);
        assert!(!mgr.redo(&mut sess)?);
        let balance = Arc::new(AtomicUsize::new(0));
        mgr.apply(Box::new(Probe::new(&balance)), &mut sess)?;
        mgr.undo(&mut sess)?;
        assert!(!mgr.undo(&mut sess)?);
        assert_eq!(balance.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[test]
    fn new_apply_clears_redo() -> Result<()> {
        let mut sess = session();
        let mut mgr = OperationManager::new();
        let balance = Arc::new(AtomicUsize::new(0));
        mgr.apply(Box::new(Probe::new(&balance)), &mut sess)?;
        mgr.undo(&mut sess)?;
        assert!(mgr.can_redo());
        mgr.apply(Box::new(Probe::new(&balance)), &mut sess)?;
        assert!(!mgr.can_redo());
        Ok(())
    }

    #[test]
    fn impossible_and_declined_stay_out_of_history() -> Result<()> {
        let mut sess = session();
        let mut mgr = OperationManager::new();
        let balance = Arc::new(AtomicUsize::new(0));

        let mut op = Probe::new(&balance);
        op.impossible = true;
        assert!(!mgr.apply(Box::new(op), &mut sess)?);

        let mut op = Probe::new(&balance);
        op.declines = true;
        assert!(!mgr.apply(Box::new(op), &mut sess)?);

        assert!(!mgr.can_undo());
        assert_eq!(balance.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[test]
    fn non_undoable_runs_without_entering_history() -> Result<()> {
        let mut sess = session();
        let mut mgr = OperationManager::new();
        let balance = Arc::new(AtomicUsize::new(0));
        let mut op = Probe::new(&balance);
        op.undoable = false;
        assert!(mgr.apply(Box::new(op), &mut sess)?);
        assert_eq!(balance.load(Ordering::SeqCst), 1);
        assert!(!mgr.can_undo());
        Ok(())
    }

    #[test]
    fn batch_applies_and_reverts_as_one() -> Result<()> {
        let mut sess = session();
        let mut mgr = OperationManager::new();
        let balance = Arc::new(AtomicUsize::new(0));
        let batch = BatchOp::new(
            "two probes",
            vec![
                Box::new(Probe::new(&balance)),
                Box::new(Probe::new(&balance)),
            ],
        );
        assert!(mgr.apply(Box::new(batch), &mut sess)?);
        assert_eq!(balance.load(Ordering::SeqCst), 2);
        assert_eq!(mgr.undo_depth(), 1);
        mgr.undo(&mut sess)?;
        assert_eq!(balance.load(Ordering::SeqCst), 0);
        mgr.redo(&mut sess)?;
        assert_eq!(balance.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[test]
    fn batch_rolls_back_on_decline() -> Result<()> {
        let mut sess = session();
        let mut mgr = OperationManager::new();
        let balance = Arc::new(AtomicUsize::new(0));
        let mut declining = Probe::new(&balance);
        declining.declines = true;
        let batch = BatchOp::new(
            "partial",
            vec![Box::new(Probe::new(&balance)), Box::new(declining)],
        );
        assert!(!mgr.apply(Box::new(batch), &mut sess)?);
        assert_eq!(balance.load(Ordering::SeqCst), 0, "first probe rolled back");
        assert!(!mgr.can_undo());
        Ok(())
    }

    #[test]
    fn failed_revert_keeps_stack_shape() {
        struct Explosive;
        impl Operation for Explosive {
            fn describe(&self) -> &str {
                "explosive"
            }
            fn apply(&mut self, _sess: &mut Session) -> Result<bool> {
                Ok(true)
            }
            fn revert(&mut self, _sess: &mut Session) -> Result<()> {
                Err(Error::Internal("boom".into()))
            }
        }
        let mut sess = session();
        let mut mgr = OperationManager::new();
        mgr.apply(Box::new(Explosive), &mut sess).unwrap();
        assert!(mgr.undo(&mut sess).is_err());
        assert_eq!(mgr.undo_depth(), 1);
    }
}
