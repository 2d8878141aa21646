//! The widget trait and the designable property model.

use std::any::Any;

use serde_json::Value;

use trellis_geom::Point;

use crate::{
    dim::Dim,
    error::{Error, Result},
};

/// The type of a designable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    /// A string value.
    Str,
    /// An integer value.
    Int,
    /// A boolean value.
    Bool,
    /// A position reference for one axis.
    Dim,
}

impl PropKind {
    /// The kind name used in error messages and the palette listing.
    pub fn name(&self) -> &'static str {
        match self {
            PropKind::Str => "str",
            PropKind::Int => "int",
            PropKind::Bool => "bool",
            PropKind::Dim => "dim",
        }
    }
}

/// A designable property's name and type, as listed by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropSpec {
    /// Property name.
    pub name: &'static str,
    /// Property type.
    pub kind: PropKind,
}

impl PropSpec {
    /// Construct a spec.
    pub const fn new(name: &'static str, kind: PropKind) -> Self {
        PropSpec { name, kind }
    }
}

/// A designable property value.
///
/// The `Dim` case carries the position references for the four geometry
/// axes through the same property path as widget-owned values, which is
/// what lets a single set-property operation cover both.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
    /// A position reference for one axis.
    Dim(Dim),
}

impl PropValue {
    /// The kind of this value.
    pub fn kind(&self) -> PropKind {
        match self {
            PropValue::Str(_) => PropKind::Str,
            PropValue::Int(_) => PropKind::Int,
            PropValue::Bool(_) => PropKind::Bool,
            PropValue::Dim(_) => PropKind::Dim,
        }
    }

    /// The string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The position reference, if this is one.
    pub fn as_dim(&self) -> Option<Dim> {
        match self {
            PropValue::Dim(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Str(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<Dim> for PropValue {
    fn from(v: Dim) -> Self {
        PropValue::Dim(v)
    }
}

/// A widget type with a statically known kind string.
///
/// This is what typed downcasts key on: code that needs a concrete
/// widget, like the per-kind element collections, names the type and
/// gets a `WrongWidget` error carrying the expected kind on mismatch.
pub trait KnownWidget: Widget + Sized {
    /// The factory kind string for this widget type.
    const KIND: &'static str;
}

/// A designable widget.
///
/// Implementations describe a widget instance being laid out: its kind,
/// whether it can hold child nodes, its scalar designable properties, and
/// how its full state round-trips through the save boundary. Widgets hold
/// no tree structure themselves. Parent and child links live in the node
/// arena, so a widget only ever describes its own box.
pub trait Widget: Any + Send {
    /// The widget kind, as registered with the factory.
    fn kind(&self) -> &'static str;

    /// True if child nodes may be attached under this widget.
    fn is_container(&self) -> bool {
        false
    }

    /// Offset from this widget's outer origin to its client-area origin.
    ///
    /// Children are positioned in client coordinates, so a framed widget
    /// reports `(1, 1)` and drags across containers use the difference of
    /// client origins to keep nodes visually stationary.
    fn client_inset(&self) -> Point {
        Point::zero()
    }

    /// For widgets whose children are panes, the index of the child that
    /// drops and inserts should be redirected into.
    fn drop_pane(&self) -> Option<usize> {
        None
    }

    /// The size a freshly inserted instance starts with.
    fn preferred_size(&self) -> (u32, u32) {
        (10, 1)
    }

    /// The scalar designable properties this widget exposes.
    fn props(&self) -> Vec<PropSpec> {
        Vec::new()
    }

    /// Read a scalar designable property.
    fn get_prop(&self, name: &str) -> Option<PropValue> {
        let _ = name;
        None
    }

    /// Write a scalar designable property.
    fn set_prop(&mut self, name: &str, value: PropValue) -> Result<()> {
        let _ = value;
        Err(Error::UnknownProp(name.to_string()))
    }

    /// Serialize the widget's full designable state, including any
    /// element collections the scalar property table does not cover.
    fn save(&self) -> Value {
        Value::Null
    }

    /// Restore state produced by [`Widget::save`]. Unknown or missing
    /// fields are ignored so documents stay loadable across versions.
    fn load(&mut self, state: &Value) -> Result<()> {
        let _ = state;
        Ok(())
    }

    /// The widget as `Any`, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The widget as mutable `Any`, for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
