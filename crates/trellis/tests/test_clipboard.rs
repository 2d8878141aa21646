//! Integration tests for copy and paste: subtree cloning, name
//! deduplication and sibling-reference remapping.

#[cfg(test)]
mod tests {
    use trellis::{
        Catalog, Designer, Dim, NodeId, Point, PropValue, Rect, Side, Snapshot,
        error::Result,
        ops::{AddElement, AddWidget, CopyOp, DeleteOp, Operation, PasteOp, SetProp},
        widgets::TabControl,
    };

    /// A window root holding a panel with two labels inside, plus an
    /// empty second panel.
    struct Fixture {
        d: Designer,
        panel: NodeId,
        a: NodeId,
        b: NodeId,
        other: NodeId,
    }

    fn fixture() -> Result<Fixture> {
        let mut d = Designer::new(Box::new(Catalog), Rect::new(0, 0, 80, 24))?;
        let root = d.session().tree().root_id();
        let op = AddWidget::new(d.session(), root, "panel", Point::new(2, 2), Some("pa"))?;
        d.apply(op)?;
        let panel = d.session().selection().nodes()[0];
        let op = AddWidget::new(d.session(), panel, "label", Point::new(1, 1), Some("a"))?;
        d.apply(op)?;
        let a = d.session().selection().nodes()[0];
        let op = AddWidget::new(d.session(), panel, "label", Point::new(1, 3), Some("b"))?;
        d.apply(op)?;
        let b = d.session().selection().nodes()[0];
        let op = AddWidget::new(d.session(), root, "panel", Point::new(40, 2), Some("pb"))?;
        d.apply(op)?;
        let other = d.session().selection().nodes()[0];
        Ok(Fixture {
            d,
            panel,
            a,
            b,
            other,
        })
    }

    /// Anchor `node`'s left edge to `target`'s right edge.
    fn anchor(d: &mut Designer, node: NodeId, target: NodeId) -> Result<()> {
        let dim = Dim::Sibling {
            target,
            side: Side::Right,
            offset: 1,
        };
        let op = SetProp::new(d.session(), node, "left", PropValue::Dim(dim))?;
        assert!(d.apply(op)?);
        Ok(())
    }

    #[test]
    fn paste_clones_the_subtree_under_fresh_names() -> Result<()> {
        let mut f = fixture()?;
        let root = f.d.session().tree().root_id();

        assert!(f.d.apply(CopyOp::new(f.d.session(), Some(&[f.panel])))?);
        assert!(f.d.apply(PasteOp::new(f.d.session(), root)?)?);

        let clones = f.d.session().selection().nodes().to_vec();
        assert_eq!(clones.len(), 1);
        let clone = clones[0];
        assert_ne!(clone, f.panel);
        assert_eq!(f.d.session().node(clone)?.name().as_str(), "pa2");
        assert_eq!(f.d.session().node(clone)?.parent(), Some(root));

        let kids = f.d.session().node(clone)?.children().to_vec();
        assert_eq!(kids.len(), 2);
        assert_eq!(f.d.session().node(kids[0])?.name().as_str(), "a2");
        assert_eq!(f.d.session().node(kids[1])?.name().as_str(), "b2");
        assert_eq!(
            f.d.session().prop(kids[0], "text")?,
            f.d.session().prop(f.a, "text")?
        );
        Ok(())
    }

    #[test]
    fn references_inside_the_copied_set_remap_to_clones() -> Result<()> {
        let mut f = fixture()?;
        anchor(&mut f.d, f.b, f.a)?;
        f.d.session_mut().selection_mut().set(vec![f.a, f.b]);

        assert!(f.d.apply(CopyOp::new(f.d.session(), None))?);
        assert!(f.d.apply(PasteOp::new(f.d.session(), f.other)?)?);

        let clones = f.d.session().selection().nodes().to_vec();
        assert_eq!(clones.len(), 2);
        let (a2, b2) = (clones[0], clones[1]);
        assert_eq!(f.d.session().node(b2)?.parent(), Some(f.other));
        assert_eq!(
            f.d.session().node(b2)?.placement().left,
            Dim::Sibling {
                target: a2,
                side: Side::Right,
                offset: 1,
            }
        );
        Ok(())
    }

    #[test]
    fn references_leaving_the_copied_set_are_preserved() -> Result<()> {
        let mut f = fixture()?;
        anchor(&mut f.d, f.b, f.a)?;

        assert!(f.d.apply(CopyOp::new(f.d.session(), Some(&[f.b])))?);
        assert!(f.d.apply(PasteOp::new(f.d.session(), f.panel)?)?);

        let clone = f.d.session().selection().nodes()[0];
        assert_eq!(
            f.d.session().node(clone)?.placement().left,
            Dim::Sibling {
                target: f.a,
                side: Side::Right,
                offset: 1,
            }
        );
        Ok(())
    }

    #[test]
    fn copy_runs_outside_history() -> Result<()> {
        let mut f = fixture()?;
        let depth = f.d.history().undo_depth();
        assert!(f.d.apply(CopyOp::new(f.d.session(), Some(&[f.a])))?);
        assert_eq!(f.d.session().clipboard(), &[f.a]);
        assert_eq!(f.d.history().undo_depth(), depth);
        Ok(())
    }

    #[test]
    fn nested_selection_clones_once() -> Result<()> {
        let mut f = fixture()?;
        f.d.session_mut().selection_mut().set(vec![f.panel, f.a]);
        assert!(f.d.apply(CopyOp::new(f.d.session(), None))?);
        assert_eq!(f.d.session().clipboard(), &[f.panel]);

        let root = f.d.session().tree().root_id();
        assert!(f.d.apply(PasteOp::new(f.d.session(), root)?)?);
        assert_eq!(f.d.session().selection().len(), 1);
        Ok(())
    }

    #[test]
    fn paste_undo_redo_round_trips() -> Result<()> {
        let mut f = fixture()?;
        let before = Snapshot::capture(f.d.session())?;

        assert!(f.d.apply(CopyOp::new(f.d.session(), Some(&[f.panel])))?);
        assert!(f.d.apply(PasteOp::new(f.d.session(), f.other)?)?);
        let pasted = f.d.session().selection().nodes().to_vec();
        let after = Snapshot::capture(f.d.session())?;
        assert_ne!(before, after);

        assert!(f.d.undo()?);
        assert_eq!(Snapshot::capture(f.d.session())?, before);

        // Redo re-links the identical clones.
        assert!(f.d.redo()?);
        assert_eq!(Snapshot::capture(f.d.session())?, after);
        assert_eq!(f.d.session().selection().nodes(), pasted.as_slice());
        Ok(())
    }

    #[test]
    fn paste_with_an_empty_clipboard_is_impossible() -> Result<()> {
        let mut f = fixture()?;
        let root = f.d.session().tree().root_id();
        let op = PasteOp::new(f.d.session(), root)?;
        assert!(op.is_impossible());
        assert!(!f.d.apply(op)?);
        Ok(())
    }

    #[test]
    fn paste_into_a_tab_control_lands_in_the_active_page() -> Result<()> {
        let mut f = fixture()?;
        let root = f.d.session().tree().root_id();
        let op =
            AddWidget::new(f.d.session(), root, "tab_control", Point::new(10, 12), Some("tabs"))?;
        f.d.apply(op)?;
        let tabs = f.d.session().selection().nodes()[0];
        let spec = TabControl::page_collection(f.d.session(), tabs)?;
        assert!(f.d.apply(AddElement::new(f.d.session(), spec, Some("general")))?);
        let page = f.d.session().node(tabs)?.children()[0];

        assert!(f.d.apply(CopyOp::new(f.d.session(), Some(&[f.a])))?);
        assert!(f.d.apply(PasteOp::new(f.d.session(), tabs)?)?);
        let clone = f.d.session().selection().nodes()[0];
        assert_eq!(f.d.session().node(clone)?.parent(), Some(page));
        Ok(())
    }

    #[test]
    fn paste_survives_deletion_of_the_original() -> Result<()> {
        let mut f = fixture()?;
        assert!(f.d.apply(CopyOp::new(f.d.session(), Some(&[f.b])))?);
        assert!(f.d.apply(DeleteOp::new(f.d.session(), &[f.b])?)?);

        assert!(f.d.apply(PasteOp::new(f.d.session(), f.panel)?)?);
        let clone = f.d.session().selection().nodes()[0];
        assert_eq!(
            f.d.session().prop(clone, "text")?,
            PropValue::Str("label".into())
        );
        assert_eq!(f.d.session().node(clone)?.parent(), Some(f.panel));
        Ok(())
    }
}
