//! Widget construction by kind name.

use std::io::Write;

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use crate::{
    error::{Error, Result},
    widget::{KnownWidget, Widget},
    widgets::{
        Button, Label, MenuBar, Panel, RadioGroup, TabControl, TabPage, Table as TableWidget,
        TextField, Window,
    },
};

/// Produces widget instances from kind strings.
///
/// Insertion and paste both go through this: an insert creates a fresh
/// instance, and paste clones a widget by creating a fresh instance of
/// the same kind and replaying the original's saved state into it.
pub trait WidgetFactory: Send {
    /// Create a fresh instance of the given kind, in its default state.
    fn create(&self, kind: &str) -> Result<Box<dyn Widget>>;

    /// Every kind this factory can create.
    fn kinds(&self) -> Vec<&'static str>;
}

/// The built-in widget catalog.
#[derive(Debug, Default)]
pub struct Catalog;

impl WidgetFactory for Catalog {
    fn create(&self, kind: &str) -> Result<Box<dyn Widget>> {
        Ok(match kind {
            Window::KIND => Box::new(Window::new("")),
            Panel::KIND => Box::new(Panel::new()),
            Label::KIND => Box::new(Label::new("label")),
            Button::KIND => Box::new(Button::new("ok")),
            TextField::KIND => Box::new(TextField::new()),
            TabControl::KIND => Box::new(TabControl::new()),
            TabPage::KIND => Box::new(TabPage::new("tab")),
            MenuBar::KIND => Box::new(MenuBar::new()),
            TableWidget::KIND => Box::new(TableWidget::new()),
            RadioGroup::KIND => Box::new(RadioGroup::new()),
            _ => return Err(Error::UnknownKind(kind.to_string())),
        })
    }

    fn kinds(&self) -> Vec<&'static str> {
        vec![
            Window::KIND,
            Panel::KIND,
            Label::KIND,
            Button::KIND,
            TextField::KIND,
            TabControl::KIND,
            TabPage::KIND,
            MenuBar::KIND,
            TableWidget::KIND,
            RadioGroup::KIND,
        ]
    }
}

/// Print the palette of available widget kinds as a table: kind,
/// container flag, and the scalar designable properties.
pub fn print_palette(factory: &dyn WidgetFactory, w: &mut dyn Write) -> Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(UTF8_FULL);
    for kind in factory.kinds() {
        let widget = factory.create(kind)?;
        let props = widget
            .props()
            .iter()
            .map(|p| format!("{}: {}", p.name, p.kind.name()))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            comfy_table::Cell::new(kind).fg(comfy_table::Color::Green),
            comfy_table::Cell::new(if widget.is_container() { "container" } else { "" }),
            comfy_table::Cell::new(props),
        ]);
    }
    writeln!(w, "{table}").map_err(|x| Error::Internal(x.to_string()))
}
