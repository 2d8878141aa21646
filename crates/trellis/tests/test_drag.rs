//! Integration tests for drag: live preview, commit, cross-container
//! moves and undo.

#[cfg(test)]
mod tests {
    use trellis::{
        Catalog, Designer, Dim, NodeId, Point, Rect,
        error::Result,
        ops::{AddWidget, DragOp, Operation},
    };

    /// A window root holding two panels, with one label inside the first.
    ///
    /// With the window at the origin and both widgets at their preferred
    /// sizes, the first panel's client area starts at screen (4, 4) and
    /// the second's at (42, 4); the label sits at screen (7, 8).
    struct Fixture {
        d: Designer,
        panel_a: NodeId,
        panel_b: NodeId,
        label: NodeId,
    }

    fn fixture() -> Result<Fixture> {
        let mut d = Designer::new(Box::new(Catalog), Rect::new(0, 0, 80, 24))?;
        let root = d.session().tree().root_id();
        let op = AddWidget::new(d.session(), root, "panel", Point::new(2, 2), Some("pa"))?;
        d.apply(op)?;
        let panel_a = d.session().selection().nodes()[0];
        let op = AddWidget::new(d.session(), root, "panel", Point::new(40, 2), Some("pb"))?;
        d.apply(op)?;
        let panel_b = d.session().selection().nodes()[0];
        let op = AddWidget::new(d.session(), panel_a, "label", Point::new(3, 4), Some("tag"))?;
        d.apply(op)?;
        let label = d.session().selection().nodes()[0];
        Ok(Fixture {
            d,
            panel_a,
            panel_b,
            label,
        })
    }

    #[test]
    fn drag_moves_within_parent() -> Result<()> {
        let mut f = fixture()?;
        let before = f.d.session().tree().screen_origin(f.label)?;
        assert_eq!(before, Point::new(7, 8));

        let mut op = DragOp::new(f.d.session(), f.label, Point::new(8, 9))?;
        op.update(f.d.session_mut(), Point::new(12, 11));
        assert!(f.d.apply(op)?);

        let placement = f.d.session().node(f.label)?.placement();
        assert_eq!(placement.left, Dim::Abs(7));
        assert_eq!(placement.top, Dim::Abs(6));
        assert_eq!(
            f.d.session().tree().screen_origin(f.label)?,
            Point::new(11, 10)
        );

        assert!(f.d.undo()?);
        let placement = f.d.session().node(f.label)?.placement();
        assert_eq!(placement.left, Dim::Abs(3));
        assert_eq!(placement.top, Dim::Abs(4));
        assert_eq!(f.d.session().tree().screen_origin(f.label)?, before);
        Ok(())
    }

    #[test]
    fn preview_touches_bounds_only() -> Result<()> {
        let mut f = fixture()?;
        let depth = f.d.history().undo_depth();

        let mut op = DragOp::new(f.d.session(), f.label, Point::new(8, 9))?;
        op.update(f.d.session_mut(), Point::new(18, 15));

        // Mid-gesture: bounds follow the pointer, the placement does not.
        let node = f.d.session().node(f.label)?;
        assert_eq!(node.bounds().tl, Point::new(13, 10));
        assert_eq!(node.placement().left, Dim::Abs(3));

        op.cancel(f.d.session_mut());
        let node = f.d.session().node(f.label)?;
        assert_eq!(node.bounds().tl, Point::new(3, 4));
        assert_eq!(f.d.history().undo_depth(), depth);
        Ok(())
    }

    #[test]
    fn reparenting_keeps_screen_position_plus_delta() -> Result<()> {
        let mut f = fixture()?;
        let before = f.d.session().tree().screen_origin(f.label)?;

        let mut op = DragOp::new(f.d.session(), f.label, Point::new(8, 9))?;
        op.update(f.d.session_mut(), Point::new(50, 12));
        op.set_drop_target(f.d.session(), f.panel_b);
        assert_eq!(op.drop_target(), Some(f.panel_b));
        assert!(f.d.apply(op)?);

        assert_eq!(f.d.session().node(f.label)?.parent(), Some(f.panel_b));
        // The move is expressed in the new parent's coordinates, but on
        // screen the node lands exactly where the pointer carried it.
        assert_eq!(
            f.d.session().tree().screen_origin(f.label)?,
            before + (Point::new(50, 12) - Point::new(8, 9))
        );
        let placement = f.d.session().node(f.label)?.placement();
        assert_eq!(placement.left, Dim::Abs(7));
        assert_eq!(placement.top, Dim::Abs(7));

        assert!(f.d.undo()?);
        assert_eq!(f.d.session().node(f.label)?.parent(), Some(f.panel_a));
        assert_eq!(f.d.session().tree().screen_origin(f.label)?, before);
        let placement = f.d.session().node(f.label)?.placement();
        assert_eq!(placement.left, Dim::Abs(3));
        assert_eq!(placement.top, Dim::Abs(4));
        Ok(())
    }

    #[test]
    fn drop_target_inside_drag_set_is_rejected() -> Result<()> {
        let mut f = fixture()?;
        let mut op = DragOp::new(f.d.session(), f.panel_a, Point::new(5, 5))?;
        op.set_drop_target(f.d.session(), f.panel_a);
        assert_eq!(op.drop_target(), None);
        op.set_drop_target(f.d.session(), f.label);
        assert_eq!(op.drop_target(), None);
        op.set_drop_target(f.d.session(), f.panel_b);
        assert_eq!(op.drop_target(), Some(f.panel_b));
        Ok(())
    }

    #[test]
    fn selection_drags_outermost_nodes_only() -> Result<()> {
        let mut f = fixture()?;
        f.d.session_mut()
            .selection_mut()
            .set(vec![f.panel_a, f.label]);

        let mut op = DragOp::new(f.d.session(), f.panel_a, Point::new(5, 5))?;
        op.update(f.d.session_mut(), Point::new(9, 8));
        assert!(f.d.apply(op)?);

        // The panel moved; the label kept its placement and travelled
        // with its parent.
        let panel = f.d.session().node(f.panel_a)?.placement();
        assert_eq!(panel.left, Dim::Abs(6));
        assert_eq!(panel.top, Dim::Abs(5));
        let label = f.d.session().node(f.label)?.placement();
        assert_eq!(label.left, Dim::Abs(3));
        assert_eq!(label.top, Dim::Abs(4));
        assert_eq!(
            f.d.session().tree().screen_origin(f.label)?,
            Point::new(11, 11)
        );
        Ok(())
    }

    #[test]
    fn dragging_the_root_is_impossible() -> Result<()> {
        let mut f = fixture()?;
        let root = f.d.session().tree().root_id();
        let op = DragOp::new(f.d.session(), root, Point::new(1, 1))?;
        assert!(op.is_impossible());
        assert!(!f.d.apply(op)?);
        Ok(())
    }
}
