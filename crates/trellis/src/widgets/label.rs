//! Static text widget.

use std::any::Any;

use serde_json::{Value, json};

use crate::{
    error::Result,
    widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget},
};

use super::set_str_prop;

/// A single line of static text.
pub struct Label {
    /// Displayed text.
    text: String,
}

impl KnownWidget for Label {
    const KIND: &'static str = "label";
}

impl Label {
    /// Construct a label with its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn preferred_size(&self) -> (u32, u32) {
        (self.text.chars().count().max(4) as u32, 1)
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
