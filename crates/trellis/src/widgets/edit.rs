//! Single-line text entry widget.

use std::any::Any;

use serde_json::{Value, json};

use crate::{
    error::{Error, Result},
    widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget},
};

/// A single-line text entry field.
#[derive(Default)]
pub struct TextField {
    /// Current contents.
    text: String,
    /// Mask the contents when rendering.
    secret: bool,
}

impl KnownWidget for TextField {
    const KIND: &'static str = "text_field";
}

impl TextField {
    /// Construct an empty text field.
    pub fn new() -> Self {
        Self::default()
    }

    /// The field contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if contents render masked.
    pub fn is_secret(&self) -> bool {
        self.secret
    }
}

impl Widget for TextField {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn preferred_size(&self) -> (u32, u32) {
        (12, 1)
    }

    fn props(&self) -> Vec<PropSpec> {
        vec![
            PropSpec::new("text", PropKind::Str),
            PropSpec::new("secret", PropKind::Bool),
        ]
    }

    fn get_prop(&self, name: &str) -> Option<PropValue> {
        match name {
            "text" => Some(self.text.clone().into()),
            "secret" => Some(self.secret.into()),
            _ => None,
        }
    }

    fn set_prop(&mut self, name: &str, value: PropValue) -> Result<()> {
        match name {
            "text" => {
                self.text = value
                    .as_str()
                    .ok_or_else(|| Error::PropType("text".into()))?
                    .to_string();
                Ok(())
            }
            "secret" => {
                self.secret = value
                    .as_bool()
                    .ok_or_else(|| Error::PropType("secret".into()))?;
                Ok(())
            }
            _ => Err(Error::UnknownProp(name.to_string())),
        }
    }

    fn save(&self) -> Value {
        json!({ "text": self.text, "secret": self.secret })
    }

    fn load(&mut self, state: &Value) -> Result<()> {
        if let Some(t) = state.get("text").and_then(Value::as_str) {
            self.text = t.to_string();
        }
        if let Some(s) = state.get("secret").and_then(Value::as_bool) {
            self.secret = s;
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
