//! Tab control and tab page widgets.
//!
//! Unlike menus, tabs are real child nodes: each page is a container with
//! its own subtree, so the page collection is backed by the owner's
//! children list rather than widget data. Reordering tabs reorders
//! children; removing a tab detaches the page subtree intact so undo can
//! re-link it.

use std::any::Any;

use serde_json::{Value, json};

use trellis_geom::Point;

use crate::{
    dim::{Dim, Placement},
    error::Result,
    id::NodeId,
    name::FieldName,
    ops::collection::CollectionSpec,
    session::Session,
    widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget},
};

use super::set_str_prop;

/// A tab control. Its children are [`TabPage`] nodes, one per tab, shown
/// one at a time behind a strip of tab titles.
#[derive(Default)]
pub struct TabControl {
    /// Index of the page currently shown.
    active: usize,
}

impl KnownWidget for TabControl {
    const KIND: &'static str = "tab_control";
}

impl TabControl {
    /// Construct a tab control with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the page currently shown.
    pub fn active(&self) -> usize {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: usize) {
        self.active = active;
    }

    /// The page collection of the tab control at `owner`, for use with
    /// the generic collection operations. A control with pages keeps at
    /// least one, so drops and inserts always have a pane to land in.
    pub fn page_collection(sess: &Session, owner: NodeId) -> Result<CollectionSpec<NodeId>> {
        sess.widget_as::<TabControl>(owner)?;
        Ok(CollectionSpec::new(
            owner,
            "tab",
            move |sess: &Session| Ok(sess.tree().try_node(owner)?.children().to_vec()),
            move |sess: &mut Session, pages: Vec<NodeId>| {
                let active = sess.widget_as::<TabControl>(owner)?.active;
                let clamped = active.min(pages.len().saturating_sub(1));
                sess.tree_mut().set_children(owner, pages)?;
                sess.widget_as_mut::<TabControl>(owner)?.active = clamped;
                Ok(())
            },
            |sess, page: &NodeId| {
                sess.tree()
                    .node(*page)
                    .and_then(|n| n.widget().as_any().downcast_ref::<TabPage>())
                    .map(|p| p.title.clone())
                    .unwrap_or_default()
            },
            |sess: &mut Session, title| {
                Ok(sess.create_node(
                    Box::new(TabPage::new(title)),
                    &FieldName::convert(title),
                    page_placement(),
                ))
            },
            |sess: &mut Session, page: &NodeId, title| {
                sess.widget_as_mut::<TabPage>(*page)?.title = title.to_string();
                sess.taint(*page);
                Ok(*page)
            },
        )
        .keep_at_least(1))
    }
}

/// The placement every new page starts with: fill the control's client
/// area.
fn page_placement() -> Placement {
    Placement {
        left: Dim::Abs(0),
        top: Dim::Abs(0),
        width: Dim::Fill { margin: 0 },
        height: Dim::Fill { margin: 0 },
    }
}

impl Widget for TabControl {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn is_container(&self) -> bool {
        true
    }

    fn client_inset(&self) -> Point {
        // Frame plus the tab title strip.
        Point::new(1, 2)
    }

    fn drop_pane(&self) -> Option<usize> {
        Some(self.active)
    }

    fn preferred_size(&self) -> (u32, u32) {
        (30, 10)
    }

    fn save(&self) -> Value {
        json!({ "active": self.active })
    }

    fn load(&mut self, state: &Value) -> Result<()> {
        if let Some(a) = state.get("active").and_then(Value::as_u64) {
            self.active = a as usize;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One page of a [`TabControl`].
pub struct TabPage {
    /// Title shown in the tab strip.
    title: String,
}

impl KnownWidget for TabPage {
    const KIND: &'static str = "tab_page";
}

impl TabPage {
    /// Construct a page with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// The title shown in the tab strip.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Widget for TabPage {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn is_container(&self) -> bool {
        true
    }

    fn props(&self) -> Vec<PropSpec> {
        vec![PropSpec::new("title", PropKind::Str)]
    }

    fn get_prop(&self, name: &str) -> Option<PropValue> {
        match name {
            "title" => Some(self.title.clone().into()),
            _ => None,
        }
    }

    fn set_prop(&mut self, name: &str, value: PropValue) -> Result<()> {
        set_str_prop(name, "title", &mut self.title, value)
    }

    fn save(&self) -> Value {
        json!({ "title": self.title })
    }

    fn load(&mut self, state: &Value) -> Result<()> {
        if let Some(t) = state.get("title").and_then(Value::as_str) {
            self.title = t.to_string();
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
