//! Plain framed container widget.

use std::any::Any;

use trellis_geom::Point;

use crate::widget::{KnownWidget, Widget};

/// A bordered container with no behavior of its own. Used to group other
/// widgets and to give sibling references a shared coordinate space.
#[derive(Default)]
pub struct Panel;

impl KnownWidget for Panel {
    const KIND: &'static str = "panel";
}

impl Panel {
    /// Construct a panel.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Panel {
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
        (20, 8)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
