//! The design session: one document plus its editing state.

use trellis_geom::Rect;

use crate::{
    dim::{Axis, Placement},
    error::{Error, Result},
    factory::WidgetFactory,
    id::NodeId,
    name::FieldName,
    node::Node,
    prompt::{NullPrompt, Prompt},
    selection::Selection,
    tree::DesignTree,
    widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget},
    widgets::TabControl,
};

/// A design document and the state that travels with it: the node tree,
/// the selection, the clipboard and the prompt source.
///
/// Everything here is read-open but mutation-closed: reads are public
/// while structural and property mutation happen inside operations, so
/// the undo history never misses a change. The exceptions are the bits
/// the history deliberately ignores: selection, clipboard replacement via
/// copy, and view state like the active tab.
pub struct Session {
    /// The document's node tree.
    tree: DesignTree,
    /// Currently selected nodes.
    selection: Selection,
    /// Nodes captured by the last copy.
    clipboard: Vec<NodeId>,
    /// Source of user-supplied names.
    prompt: Box<dyn Prompt>,
    /// Widget construction by kind.
    factory: Box<dyn WidgetFactory>,
}

impl Session {
    /// Create a session whose root is a fresh widget of `root_kind`
    /// occupying `screen`.
    pub fn new(
        factory: Box<dyn WidgetFactory>,
        root_kind: &str,
        root_name: &str,
        screen: Rect,
    ) -> Result<Self> {
        let widget = factory.create(root_kind)?;
        if !widget.is_container() {
            return Err(Error::Invalid(format!(
                "root widget {root_kind} is not a container"
            )));
        }
        let tree = DesignTree::new(widget, FieldName::convert(root_name), screen);
        Ok(Session {
            tree,
            selection: Selection::default(),
            clipboard: Vec::new(),
            prompt: Box::new(NullPrompt),
            factory,
        })
    }

    /// Wrap an already-built tree, as produced by snapshot restore.
    pub(crate) fn from_tree(tree: DesignTree, factory: Box<dyn WidgetFactory>) -> Self {
        Session {
            tree,
            selection: Selection::default(),
            clipboard: Vec::new(),
            prompt: Box::new(NullPrompt),
            factory,
        }
    }

    /// The document tree.
    pub fn tree(&self) -> &DesignTree {
        &self.tree
    }

    /// Mutable tree access, for operations only.
    pub(crate) fn tree_mut(&mut self) -> &mut DesignTree {
        &mut self.tree
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable selection access. Selecting is a UI concern and is not
    /// undoable.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// The nodes captured by the last copy.
    pub fn clipboard(&self) -> &[NodeId] {
        &self.clipboard
    }

    /// Replace the clipboard contents.
    pub(crate) fn set_clipboard(&mut self, nodes: Vec<NodeId>) {
        self.clipboard = nodes;
    }

    /// Replace the prompt source.
    pub fn set_prompt(&mut self, prompt: Box<dyn Prompt>) {
        self.prompt = prompt;
    }

    /// Ask the prompt source for a name. `None` is a cancel.
    pub(crate) fn ask(&mut self, title: &str, initial: &str) -> Option<String> {
        self.prompt.ask(title, initial)
    }

    /// The widget factory.
    pub fn factory(&self) -> &dyn WidgetFactory {
        self.factory.as_ref()
    }

    /// Downcast the widget at `id` to a concrete type.
    pub(crate) fn widget_as<W: KnownWidget>(&self, id: NodeId) -> Result<&W> {
        self.tree
            .try_node(id)?
            .widget()
            .as_any()
            .downcast_ref::<W>()
            .ok_or(Error::WrongWidget {
                node: id,
                expected: W::KIND,
            })
    }

    /// Mutably downcast the widget at `id` to a concrete type.
    pub(crate) fn widget_as_mut<W: KnownWidget>(&mut self, id: NodeId) -> Result<&mut W> {
        self.tree
            .try_node_mut(id)?
            .widget_mut()
            .as_any_mut()
            .downcast_mut::<W>()
            .ok_or(Error::WrongWidget {
                node: id,
                expected: W::KIND,
            })
    }

    /// Create a detached node ready for attach.
    pub(crate) fn create_node(
        &mut self,
        widget: Box<dyn Widget>,
        name: &FieldName,
        placement: Placement,
    ) -> NodeId {
        self.tree.create(widget, name, placement)
    }

    /// Mark a node's rendered state stale.
    pub(crate) fn taint(&mut self, id: NodeId) {
        self.tree.taint(id);
    }

    /// Resolve where an insert or drop into `container` actually lands.
    /// Pane widgets redirect into a child: dropping onto a tab control
    /// lands in its active page.
    pub fn resolve_drop_parent(&self, container: NodeId) -> Result<NodeId> {
        let node = self.tree.try_node(container)?;
        if let Some(pane) = node.widget().drop_pane() {
            let Some(child) = node.children().get(pane).copied() else {
                return Err(Error::Invalid(format!(
                    "{} has no pane to drop into",
                    node.name()
                )));
            };
            return self.resolve_drop_parent(child);
        }
        if !node.widget().is_container() {
            return Err(Error::NotAContainer(container));
        }
        Ok(container)
    }

    /// Switch the active page of the tab control at `id`. View state, not
    /// design state: this does not enter the undo history.
    pub fn activate_tab(&mut self, id: NodeId, index: usize) -> Result<()> {
        let pages = self.tree.try_node(id)?.children().len();
        if index >= pages {
            return Err(Error::Invalid(format!("no tab at index {index}")));
        }
        self.widget_as_mut::<TabControl>(id)?.set_active(index);
        self.taint(id);
        Ok(())
    }

    /// The full designable property table for a node: the four geometry
    /// axes followed by the widget's own properties.
    pub fn prop_specs(&self, id: NodeId) -> Result<Vec<PropSpec>> {
        let node = self.tree.try_node(id)?;
        let mut specs: Vec<PropSpec> = Axis::ALL
            .iter()
            .map(|a| PropSpec::new(a.name(), PropKind::Dim))
            .collect();
        specs.extend(node.widget().props());
        Ok(specs)
    }

    /// Read a designable property.
    pub fn prop(&self, id: NodeId, name: &str) -> Result<PropValue> {
        let node = self.tree.try_node(id)?;
        if let Some(axis) = axis_of(name) {
            return Ok(PropValue::Dim(node.placement().axis(axis)));
        }
        node.widget()
            .get_prop(name)
            .ok_or_else(|| Error::UnknownProp(name.to_string()))
    }

    /// Write a designable property, returning the previous value. This is
    /// the single mutation path for properties: the set-property operation
    /// and the drag and resize commits all come through here.
    pub(crate) fn set_prop_value(
        &mut self,
        id: NodeId,
        name: &str,
        value: PropValue,
    ) -> Result<PropValue> {
        if let Some(axis) = axis_of(name) {
            let dim = value
                .as_dim()
                .ok_or_else(|| Error::PropType(name.to_string()))?;
            let old = self.tree.set_axis(id, axis, dim)?;
            return Ok(PropValue::Dim(old));
        }
        let old = self.prop(id, name)?;
        self.tree.try_node_mut(id)?.widget_mut().set_prop(name, value)?;
        self.taint(id);
        Ok(old)
    }

    /// Convenience lookup that errors on a dangling id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.tree.try_node(id)
    }
}

/// Map a property name to a geometry axis, if it is one.
fn axis_of(name: &str) -> Option<Axis> {
    Axis::ALL.iter().copied().find(|a| a.name() == name)
}
