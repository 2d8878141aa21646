//! Top-level window widget.

use std::any::Any;

use serde_json::{Value, json};

use trellis_geom::Point;

use crate::{
    error::Result,
    widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget},
};

use super::set_str_prop;

/// A framed top-level window. The root of every document is one of these.
pub struct Window {
    /// Title drawn in the top border.
    title: String,
}

impl KnownWidget for Window {
    const KIND: &'static str = "window";
}

impl Window {
    /// Construct a window with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// The window title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Widget for Window {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn is_container(&self) -> bool {
        true
    }

    fn client_inset(&self) -> Point {
        Point::new(1, 1)
    }

    fn preferred_size(&self) -> (u32, u32) {
        (40, 12)
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
