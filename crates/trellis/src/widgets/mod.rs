//! Built-in designable widgets.

/// Push button widget.
pub mod button;
/// Single-line text entry widget.
pub mod edit;
/// Static text widget.
pub mod label;
/// Menu bar widget and its menu model.
pub mod menu;
/// Plain framed container widget.
pub mod panel;
/// Radio button group widget.
pub mod radio;
/// Tab control and tab page widgets.
pub mod tabs;
/// Table widget and its column model.
pub mod table;
/// Top-level window widget.
pub mod window;

use crate::{
    error::{Error, Result},
    widget::PropValue,
};

/// Shared setter for a string property named `expect`.
pub(crate) fn set_str_prop(
    name: &str,
    expect: &'static str,
    slot: &mut String,
    value: PropValue,
) -> Result<()> {
    if name != expect {
        return Err(Error::UnknownProp(name.to_string()));
    }
    match value.as_str() {
        Some(s) => {
            *slot = s.to_string();
            Ok(())
        }
        None => Err(Error::PropType(expect.to_string())),
    }
}

pub use button::Button;
pub use edit::TextField;
pub use label::Label;
pub use menu::{Menu, MenuBar, MenuItem};
pub use panel::Panel;
pub use radio::RadioGroup;
pub use table::{Column, Table};
pub use tabs::{TabControl, TabPage};
pub use window::Window;
