//! Radio button group widget.

use std::any::Any;

use serde_json::{Value, json};

use crate::{
    error::{Error, Result},
    id::NodeId,
    ops::collection::CollectionSpec,
    session::Session,
    widget::{KnownWidget, PropKind, PropSpec, PropValue, Widget},
};

/// A group of mutually exclusive options.
#[derive(Default)]
pub struct RadioGroup {
    /// Option labels, in display order.
    options: Vec<String>,
    /// Index of the selected option.
    selected: usize,
}

impl KnownWidget for RadioGroup {
    const KIND: &'static str = "radio_group";
}

impl RadioGroup {
    /// Construct a group with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// The option labels, in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the selected option.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The option collection of the radio group at `owner`, for use with
    /// the generic collection operations. Here the elements are their own
    /// display names.
    pub fn option_collection(sess: &Session, owner: NodeId) -> Result<CollectionSpec<String>> {
        sess.widget_as::<RadioGroup>(owner)?;
        Ok(CollectionSpec::new(
            owner,
            "option",
            move |sess: &Session| Ok(sess.widget_as::<RadioGroup>(owner)?.options.clone()),
            move |sess: &mut Session, options: Vec<String>| {
                let group = sess.widget_as_mut::<RadioGroup>(owner)?;
                group.selected = group.selected.min(options.len().saturating_sub(1));
                group.options = options;
                sess.taint(owner);
                Ok(())
            },
            |_, opt: &String| opt.clone(),
            |_, label| Ok(label.to_string()),
            |_, _: &String, label| Ok(label.to_string()),
        ))
    }
}

impl Widget for RadioGroup {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn preferred_size(&self) -> (u32, u32) {
        (12, 4)
    }

    fn props(&self) -> Vec<PropSpec> {
        vec![PropSpec::new("selected", PropKind::Int)]
    }

    fn get_prop(&self, name: &str) -> Option<PropValue> {
        match name {
            "selected" => Some((self.selected as i64).into()),
            _ => None,
        }
    }

    fn set_prop(&mut self, name: &str, value: PropValue) -> Result<()> {
        match name {
            "selected" => {
                let v = value
                    .as_int()
                    .ok_or_else(|| Error::PropType("selected".into()))?;
                if v < 0 || v as usize >= self.options.len().max(1) {
                    return Err(Error::Invalid(format!("no option at index {v}")));
                }
                self.selected = v as usize;
                Ok(())
            }
            _ => Err(Error::UnknownProp(name.to_string())),
        }
    }

    fn save(&self) -> Value {
        json!({ "options": self.options, "selected": self.selected })
    }

    fn load(&mut self, state: &Value) -> Result<()> {
        if let Some(opts) = state.get("options").and_then(Value::as_array) {
            self.options = opts
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
        if let Some(s) = state.get("selected").and_then(Value::as_u64) {
            self.selected = (s as usize).min(self.options.len().saturating_sub(1));
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
