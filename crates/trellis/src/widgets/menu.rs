//! Menu bar widget and its menu model.
//!
//! Menus and menu items are element collections, not child nodes: they
//! have no independent geometry, so they live as plain data inside the
//! widget and are edited through the generic collection operations.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Error, Result},
    id::NodeId,
    ops::collection::CollectionSpec,
    session::Session,
    widget::{KnownWidget, Widget},
};

/// One entry in a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Displayed label.
    label: String,
}

impl MenuItem {
    /// Construct an item with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// The item label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// One top-level menu: a label plus its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Displayed label.
    label: String,
    /// The menu's items, in display order.
    items: Vec<MenuItem>,
}

impl Menu {
    /// Construct an empty menu with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
        }
    }

    /// The menu label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The menu's items, in display order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

/// A horizontal menu bar.
#[derive(Default)]
pub struct MenuBar {
    /// Top-level menus, in display order.
    menus: Vec<Menu>,
}

impl KnownWidget for MenuBar {
    const KIND: &'static str = "menu_bar";
}

impl MenuBar {
    /// Construct an empty menu bar.
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level menus, in display order.
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// The top-level menu collection of the menu bar at `owner`, for use
    /// with the generic collection operations.
    pub fn menu_collection(sess: &Session, owner: NodeId) -> Result<CollectionSpec<Menu>> {
        sess.widget_as::<MenuBar>(owner)?;
        Ok(CollectionSpec::new(
            owner,
            "menu",
            move |sess: &Session| Ok(sess.widget_as::<MenuBar>(owner)?.menus.clone()),
            move |sess: &mut Session, menus| {
                sess.widget_as_mut::<MenuBar>(owner)?.menus = menus;
                sess.taint(owner);
                Ok(())
            },
            |_, menu: &Menu| menu.label.clone(),
            |_, label| Ok(Menu::new(label)),
            |_, menu: &Menu, label| {
                let mut renamed = menu.clone();
                renamed.label = label.to_string();
                Ok(renamed)
            },
        ))
    }

    /// The item collection of one menu of the menu bar at `owner`. The
    /// menu is addressed by index into the bar's current menus.
    pub fn item_collection(
        sess: &Session,
        owner: NodeId,
        menu: usize,
    ) -> Result<CollectionSpec<MenuItem>> {
        let bar = sess.widget_as::<MenuBar>(owner)?;
        if menu >= bar.menus.len() {
            return Err(Error::Invalid(format!("no menu at index {menu}")));
        }
        let missing = move || Error::Invalid(format!("no menu at index {menu}"));
        Ok(CollectionSpec::new(
            owner,
            "menu item",
            move |sess: &Session| {
                let bar = sess.widget_as::<MenuBar>(owner)?;
                Ok(bar.menus.get(menu).ok_or_else(missing)?.items.clone())
            },
            move |sess: &mut Session, items| {
                let bar = sess.widget_as_mut::<MenuBar>(owner)?;
                bar.menus.get_mut(menu).ok_or_else(missing)?.items = items;
                sess.taint(owner);
                Ok(())
            },
            |_, item: &MenuItem| item.label.clone(),
            |_, label| Ok(MenuItem::new(label)),
            |_, item: &MenuItem, label| {
                let mut renamed = item.clone();
                renamed.label = label.to_string();
                Ok(renamed)
            },
        ))
    }
}

impl Widget for MenuBar {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn preferred_size(&self) -> (u32, u32) {
        (20, 1)
    }

    fn save(&self) -> Value {
        serde_json::to_value(&self.menus).unwrap_or(Value::Null)
    }

    fn load(&mut self, state: &Value) -> Result<()> {
        if state.is_null() {
            return Ok(());
        }
        self.menus = serde_json::from_value(state.clone())
            .map_err(|e| Error::Invalid(format!("menu bar state: {e}")))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
