//! Push button widget.

use std::any::Any;

use serde_json::{Value, json};

use crate::{
    error::Result,
    widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget},
};

use super::set_str_prop;

/// A push button. Design-time it is just a labelled box; the generated
/// code wires the click handler.
pub struct Button {
    /// Button caption.
    text: String,
}

impl KnownWidget for Button {
    const KIND: &'static str = "button";
}

impl Button {
    /// Construct a button with a caption.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The button caption.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Button {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn preferred_size(&self) -> (u32, u32) {
        // Caption plus the bracket decorations either side.
        (self.text.chars().count() as u32 + 4, 1)
    }

    fn props(&self) -> Vec<PropSpec> {
        vec![PropSpec::new("text", PropKind::Str)]
    }

    fn get_prop(&self, name: &str) -> Option<PropValue> {
        match name {
            "text" => Some(self.text.clone().into()),
            _ => None,
        }
    }

    fn set_prop(&mut self, name: &str, value: PropValue) -> Result<()> {
        set_str_prop(name, "text", &mut self.text, value)
    }

    fn save(&self) -> Value {
        json!({ "text": self.text })
    }

    fn load(&mut self, state: &Value) -> Result<()> {
        if let Some(t) = state.get("text").and_then(Value::as_str) {
            self.text = t.to_string();
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
