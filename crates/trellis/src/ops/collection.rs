//! The generic element-collection operations.
//!
//! Menus, menu items, tabs, table columns and radio options are all
//! ordered collections of named elements hanging off an owning node. One
//! engine covers editing all of them: a [`CollectionSpec`] bundles the
//! closures that read and write a particular collection, and the four
//! operations here are generic over the element type. Where the elements
//! are plain data (menus, columns, options) the closures edit widget
//! state; where they are nodes (tabs) the closures edit the owner's
//! children, and element identity is the node id, so undo re-links the
//! same subtree instead of fabricating a copy.

use super::Operation;
use crate::{
    error::Result,
    id::NodeId,
    name::unique_name,
    session::Session,
};

/// Reads the collection's elements.
type GetFn<E> = Box<dyn Fn(&Session) -> Result<Vec<E>> + Send>;
/// Replaces the collection's elements.
type SetFn<E> = Box<dyn Fn(&mut Session, Vec<E>) -> Result<()> + Send>;
/// Maps an element to its display name.
type DisplayFn<E> = Box<dyn Fn(&Session, &E) -> String + Send>;
/// Creates a new element with a display name.
type MakeFn<E> = Box<dyn Fn(&mut Session, &str) -> Result<E> + Send>;
/// Returns an element renamed to the given display name.
type RelabelFn<E> = Box<dyn Fn(&mut Session, &E, &str) -> Result<E> + Send>;

/// One editable collection: an owner node plus the closures that access
/// its elements. Widgets with collections provide constructors for these,
/// like [`MenuBar::menu_collection`](crate::widgets::MenuBar::menu_collection).
pub struct CollectionSpec<E> {
    /// The node the collection belongs to.
    owner: NodeId,
    /// What one element is called, for descriptions and prompts.
    what: &'static str,
    /// Removing below this many elements is impossible.
    min_len: usize,
    /// Reads the elements.
    get: GetFn<E>,
    /// Replaces the elements.
    set: SetFn<E>,
    /// Maps an element to its display name.
    display: DisplayFn<E>,
    /// Creates a new element.
    make: MakeFn<E>,
    /// Renames an element.
    relabel: RelabelFn<E>,
}

impl<E> CollectionSpec<E> {
    /// Bundle the closures for one collection.
    pub fn new(
        owner: NodeId,
        what: &'static str,
        get: impl Fn(&Session) -> Result<Vec<E>> + Send + 'static,
        set: impl Fn(&mut Session, Vec<E>) -> Result<()> + Send + 'static,
        display: impl Fn(&Session, &E) -> String + Send + 'static,
        make: impl Fn(&mut Session, &str) -> Result<E> + Send + 'static,
        relabel: impl Fn(&mut Session, &E, &str) -> Result<E> + Send + 'static,
    ) -> Self {
        CollectionSpec {
            owner,
            what,
            min_len: 0,
            get: Box::new(get),
            set: Box::new(set),
            display: Box::new(display),
            make: Box::new(make),
            relabel: Box::new(relabel),
        }
    }

    /// Forbid removing elements below a floor.
    pub fn keep_at_least(mut self, n: usize) -> Self {
        self.min_len = n;
        self
    }

    /// The node the collection belongs to.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// What one element is called.
    pub fn what(&self) -> &'static str {
        self.what
    }

    fn elements(&self, sess: &Session) -> Result<Vec<E>> {
        (self.get)(sess)
    }

    fn store(&self, sess: &mut Session, elements: Vec<E>) -> Result<()> {
        (self.set)(sess, elements)?;
        sess.taint(self.owner);
        Ok(())
    }

    fn label(&self, sess: &Session, element: &E) -> String {
        (self.display)(sess, element)
    }

    fn create(&self, sess: &mut Session, name: &str) -> Result<E> {
        (self.make)(sess, name)
    }

    fn rename(&self, sess: &mut Session, element: &E, name: &str) -> Result<E> {
        (self.relabel)(sess, element, name)
    }

    /// Current display names, in element order.
    pub fn labels(&self, sess: &Session) -> Result<Vec<String>> {
        Ok(self
            .elements(sess)?
            .iter()
            .map(|e| self.label(sess, e))
            .collect())
    }
}

/// Append a new element to a collection.
///
/// The element's name comes from the constructor or, failing that, from
/// a prompt at apply time; either way it is deduplicated against the
/// collection's current display names. The created element is kept so a
/// redo re-inserts the identical element rather than making a second one.
pub struct AddElement<E> {
    /// The collection being edited.
    spec: CollectionSpec<E>,
    /// Name supplied at construction, if any.
    requested: Option<String>,
    /// History label.
    label: String,
    /// The element created on first apply.
    added: Option<E>,
    /// Set at construction if the edit cannot run.
    impossible: bool,
}

impl<E: Clone + PartialEq + Send + 'static> AddElement<E> {
    /// Construct against the current session state. `name` may be left
    /// `None` to prompt when the operation runs.
    pub fn new(sess: &Session, spec: CollectionSpec<E>, name: Option<&str>) -> Self {
        let impossible = !sess.tree().contains(spec.owner());
        let label = format!("add {}", spec.what());
        AddElement {
            spec,
            requested: name.map(str::to_string),
            label,
            added: None,
            impossible,
        }
    }
}

impl<E: Clone + PartialEq + Send + 'static> Operation for AddElement<E> {
    fn describe(&self) -> &str {
        &self.label
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        let mut elements = self.spec.elements(sess)?;
        let element = match &self.added {
            Some(e) => e.clone(),
            None => {
                let requested = match &self.requested {
                    Some(n) => n.clone(),
                    None => {
                        let title = format!("New {} name", self.spec.what());
                        match sess.ask(&title, self.spec.what()) {
                            Some(n) => n,
                            None => return Ok(false),
                        }
                    }
                };
                let taken: Vec<String> = elements
                    .iter()
                    .map(|e| self.spec.label(sess, e))
                    .collect();
                let name = unique_name(&requested, |n| taken.iter().any(|t| t == n));
                let element = self.spec.create(sess, &name)?;
                self.added = Some(element.clone());
                element
            }
        };
        if !elements.contains(&element) {
            elements.push(element);
            self.spec.store(sess, elements)?;
        }
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        let Some(added) = &self.added else {
            return Ok(());
        };
        let mut elements = self.spec.elements(sess)?;
        if let Some(pos) = elements.iter().position(|e| e == added) {
            elements.remove(pos);
            self.spec.store(sess, elements)?;
        }
        Ok(())
    }
}

/// Remove the element at an index from a collection.
pub struct RemoveElement<E> {
    /// The collection being edited.
    spec: CollectionSpec<E>,
    /// History label.
    label: String,
    /// Index the element held when last removed, for re-insertion.
    index: usize,
    /// The element, captured at construction.
    element: Option<E>,
    /// Set at construction if the edit cannot run.
    impossible: bool,
}

impl<E: Clone + PartialEq + Send + 'static> RemoveElement<E> {
    /// Construct against the current session state.
    pub fn new(sess: &Session, spec: CollectionSpec<E>, index: usize) -> Result<Self> {
        let elements = spec.elements(sess)?;
        let element = elements.get(index).cloned();
        let impossible = element.is_none() || elements.len() <= spec.min_len;
        let label = format!("remove {}", spec.what());
        Ok(RemoveElement {
            spec,
            label,
            index,
            element,
            impossible,
        })
    }
}

impl<E: Clone + PartialEq + Send + 'static> Operation for RemoveElement<E> {
    fn describe(&self) -> &str {
        &self.label
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        let Some(element) = &self.element else {
            return Ok(false);
        };
        let mut elements = self.spec.elements(sess)?;
        if let Some(pos) = elements.iter().position(|e| e == element) {
            self.index = pos;
            elements.remove(pos);
            self.spec.store(sess, elements)?;
        }
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        let Some(element) = &self.element else {
            return Ok(());
        };
        let mut elements = self.spec.elements(sess)?;
        if !elements.contains(element) {
            let at = self.index.min(elements.len());
            elements.insert(at, element.clone());
            self.spec.store(sess, elements)?;
        }
        Ok(())
    }
}

/// Shift the element at an index by a signed adjustment, clamped to the
/// collection's ends.
pub struct MoveElement<E> {
    /// The collection being edited.
    spec: CollectionSpec<E>,
    /// History label.
    label: String,
    /// Index the element held at construction.
    from: usize,
    /// Destination index after clamping.
    to: usize,
    /// The element, captured at construction.
    element: Option<E>,
    /// Set at construction if the move cannot change anything.
    impossible: bool,
}

impl<E: Clone + PartialEq + Send + 'static> MoveElement<E> {
    /// Construct against the current session state. A move that clamps
    /// back to the starting index is impossible: pressing "up" on the
    /// first element changes nothing, so nothing should enter history.
    pub fn new(
        sess: &Session,
        spec: CollectionSpec<E>,
        index: usize,
        adjustment: i32,
    ) -> Result<Self> {
        let elements = spec.elements(sess)?;
        let element = elements.get(index).cloned();
        let to = if elements.is_empty() {
            0
        } else {
            (index as i64 + i64::from(adjustment)).clamp(0, elements.len() as i64 - 1) as usize
        };
        let impossible = element.is_none() || to == index;
        let label = format!("move {}", spec.what());
        Ok(MoveElement {
            spec,
            label,
            from: index,
            to,
            element,
            impossible,
        })
    }
}

impl<E: Clone + PartialEq + Send + 'static> Operation for MoveElement<E> {
    fn describe(&self) -> &str {
        &self.label
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        let Some(element) = &self.element else {
            return Ok(false);
        };
        let mut elements = self.spec.elements(sess)?;
        let Some(pos) = elements.iter().position(|e| e == element) else {
            return Ok(false);
        };
        elements.remove(pos);
        let at = self.to.min(elements.len());
        elements.insert(at, element.clone());
        self.spec.store(sess, elements)?;
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        let Some(element) = &self.element else {
            return Ok(());
        };
        let mut elements = self.spec.elements(sess)?;
        if let Some(pos) = elements.iter().position(|e| e == element) {
            elements.remove(pos);
            let at = self.from.min(elements.len());
            elements.insert(at, element.clone());
            self.spec.store(sess, elements)?;
        }
        Ok(())
    }
}

/// Rename the element at an index.
///
/// The new name is deduplicated against the other elements' names, never
/// against the element's own current name, so renaming something to
/// itself is stable. Redo re-applies the name resolved on first apply.
pub struct RenameElement<E> {
    /// The collection being edited.
    spec: CollectionSpec<E>,
    /// History label.
    label: String,
    /// The element as it looked at construction.
    element: Option<E>,
    /// Display name before the rename.
    old_name: String,
    /// New name, from the constructor or resolved at first apply.
    new_name: Option<String>,
    /// The element value after renaming, for locating it on undo.
    renamed: Option<E>,
    /// Set at construction if the edit cannot run.
    impossible: bool,
}

impl<E: Clone + PartialEq + Send + 'static> RenameElement<E> {
    /// Construct against the current session state. `name` may be left
    /// `None` to prompt when the operation runs.
    pub fn new(
        sess: &Session,
        spec: CollectionSpec<E>,
        index: usize,
        name: Option<&str>,
    ) -> Result<Self> {
        let elements = spec.elements(sess)?;
        let element = elements.get(index).cloned();
        let old_name = element
            .as_ref()
            .map(|e| spec.label(sess, e))
            .unwrap_or_default();
        let impossible = element.is_none();
        let label = format!("rename {}", spec.what());
        Ok(RenameElement {
            spec,
            label,
            element,
            old_name,
            new_name: name.map(str::to_string),
            renamed: None,
            impossible,
        })
    }
}

impl<E: Clone + PartialEq + Send + 'static> Operation for RenameElement<E> {
    fn describe(&self) -> &str {
        &self.label
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn apply(&mut self, sess: &mut Session) -> Result<bool> {
        let Some(element) = self.element.clone() else {
            return Ok(false);
        };
        let name = match &self.new_name {
            Some(n) => n.clone(),
            None => {
                let title = format!("Rename {}", self.spec.what());
                match sess.ask(&title, &self.old_name) {
                    Some(n) => n,
                    None => return Ok(false),
                }
            }
        };
        let mut elements = self.spec.elements(sess)?;
        let Some(pos) = elements.iter().position(|e| *e == element) else {
            return Ok(false);
        };
        let taken: Vec<String> = elements
            .iter()
            .filter(|e| **e != element)
            .map(|e| self.spec.label(sess, e))
            .collect();
        let name = unique_name(&name, |n| taken.iter().any(|t| t == n));
        let renamed = self.spec.rename(sess, &element, &name)?;
        elements[pos] = renamed.clone();
        self.spec.store(sess, elements)?;
        self.new_name = Some(name);
        self.renamed = Some(renamed);
        Ok(true)
    }

    fn revert(&mut self, sess: &mut Session) -> Result<()> {
        let Some(renamed) = self.renamed.clone() else {
            return Ok(());
        };
        let mut elements = self.spec.elements(sess)?;
        let Some(pos) = elements.iter().position(|e| *e == renamed) else {
            return Ok(());
        };
        let restored = self.spec.rename(sess, &renamed, &self.old_name)?;
        elements[pos] = restored;
        self.spec.store(sess, elements)?;
        Ok(())
    }
}
