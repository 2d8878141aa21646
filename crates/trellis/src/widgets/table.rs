//! Table widget and its column model.

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

/// One column of a table: a header plus a display width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text.
    title: String,
    /// Display width in cells.
    width: u32,
}

impl Column {
    /// Construct a column with a header and the default width.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 8,
        }
    }

    /// The header text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The display width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }
}

/// A table. Design-time only the column set matters; rows are runtime
/// data the generated code supplies.
#[derive(Default)]
pub struct Table {
    /// Columns, in display order.
    columns: Vec<Column>,
}

impl KnownWidget for Table {
    const KIND: &'static str = "table";
}

impl Table {
    /// Construct a table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// The columns, in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column collection of the table at `owner`, for use with the
    /// generic collection operations.
    pub fn column_collection(sess: &Session, owner: NodeId) -> Result<CollectionSpec<Column>> {
        sess.widget_as::<Table>(owner)?;
        Ok(CollectionSpec::new(
            owner,
            "column",
            move |sess: &Session| Ok(sess.widget_as::<Table>(owner)?.columns.clone()),
            move |sess: &mut Session, columns| {
                sess.widget_as_mut::<Table>(owner)?.columns = columns;
                sess.taint(owner);
                Ok(())
            },
            |_, col: &Column| col.title.clone(),
            |_, title| Ok(Column::new(title)),
            |_, col: &Column, title| {
                let mut renamed = col.clone();
                renamed.title = title.to_string();
                Ok(renamed)
            },
        ))
    }
}

impl Widget for Table {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn preferred_size(&self) -> (u32, u32) {
        (20, 6)
    }

    fn save(&self) -> Value {
        serde_json::to_value(&self.columns).unwrap_or(Value::Null)
    }

    fn load(&mut self, state: &Value) -> Result<()> {
        if state.is_null() {
            return Ok(());
        }
        self.columns = serde_json::from_value(state.clone())
            .map_err(|e| Error::Invalid(format!("table state: {e}")))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
