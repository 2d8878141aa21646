//! Integration tests for delete: dependency guards, subtree removal and
//! exact restoration on undo.

#[cfg(test)]
mod tests {
    use trellis::{
        Catalog, Designer, Dim, NodeId, Point, PropValue, Rect, Side,
        error::Result,
        ops::{AddWidget, DeleteOp, Operation, SetProp},
    };

    /// A window root holding a panel with two labels inside, plus one
    /// label directly under the root.
    struct Fixture {
        d: Designer,
        panel: NodeId,
        a: NodeId,
        b: NodeId,
        outside: NodeId,
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
        let op = AddWidget::new(d.session(), root, "label", Point::new(50, 1), Some("c"))?;
        d.apply(op)?;
        let outside = d.session().selection().nodes()[0];
        Ok(Fixture {
            d,
            panel,
            a,
            b,
            outside,
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
    fn delete_restores_sibling_order_and_selection() -> Result<()> {
        let mut f = fixture()?;
        f.d.session_mut().selection_mut().set(vec![f.a]);

        let op = DeleteOp::new(f.d.session(), &[f.a])?;
        assert!(f.d.apply(op)?);
        assert_eq!(f.d.session().node(f.panel)?.children(), &[f.b]);
        assert!(f.d.session().selection().is_empty());

        assert!(f.d.undo()?);
        assert_eq!(f.d.session().node(f.panel)?.children(), &[f.a, f.b]);
        assert_eq!(f.d.session().selection().nodes(), &[f.a]);
        Ok(())
    }

    #[test]
    fn deleting_a_container_takes_its_subtree() -> Result<()> {
        let mut f = fixture()?;
        let total = f.d.session().tree().walk().len();

        let op = DeleteOp::new(f.d.session(), &[f.panel])?;
        assert!(f.d.apply(op)?);
        assert_eq!(f.d.session().tree().walk().len(), total - 3);

        assert!(f.d.undo()?);
        assert_eq!(f.d.session().tree().walk().len(), total);
        assert_eq!(f.d.session().node(f.panel)?.children(), &[f.a, f.b]);
        Ok(())
    }

    #[test]
    fn dependency_blocks_delete() -> Result<()> {
        let mut f = fixture()?;
        anchor(&mut f.d, f.b, f.a)?;

        let op = DeleteOp::new(f.d.session(), &[f.a])?;
        assert!(op.is_impossible());
        assert_eq!(op.dependants(), &[f.b]);
        assert!(!f.d.apply(op)?);
        assert!(f.d.session().tree().contains(f.a));
        Ok(())
    }

    #[test]
    fn deleting_dependant_and_target_together_is_allowed() -> Result<()> {
        let mut f = fixture()?;
        anchor(&mut f.d, f.b, f.a)?;

        let op = DeleteOp::new(f.d.session(), &[f.a, f.b])?;
        assert!(!op.is_impossible());
        assert!(f.d.apply(op)?);
        assert!(f.d.session().node(f.panel)?.children().is_empty());

        // Undo re-links both, reference intact.
        assert!(f.d.undo()?);
        assert_eq!(f.d.session().node(f.panel)?.children(), &[f.a, f.b]);
        assert_eq!(
            f.d.session().node(f.b)?.placement().left,
            Dim::Sibling {
                target: f.a,
                side: Side::Right,
                offset: 1,
            }
        );
        Ok(())
    }

    #[test]
    fn reference_into_a_doomed_subtree_blocks_delete() -> Result<()> {
        let mut f = fixture()?;
        // A node outside the panel anchored to a label inside it.
        anchor(&mut f.d, f.outside, f.a)?;

        let op = DeleteOp::new(f.d.session(), &[f.panel])?;
        assert!(op.is_impossible());
        assert_eq!(op.dependants(), &[f.outside]);
        assert!(!f.d.apply(op)?);
        Ok(())
    }

    #[test]
    fn reference_within_a_doomed_subtree_does_not_block() -> Result<()> {
        let mut f = fixture()?;
        anchor(&mut f.d, f.b, f.a)?;

        let op = DeleteOp::new(f.d.session(), &[f.panel])?;
        assert!(!op.is_impossible());
        assert!(f.d.apply(op)?);
        Ok(())
    }

    #[test]
    fn nested_targets_collapse_to_the_outermost() -> Result<()> {
        let mut f = fixture()?;
        let total = f.d.session().tree().walk().len();

        let op = DeleteOp::new(f.d.session(), &[f.panel, f.a, f.b])?;
        assert!(f.d.apply(op)?);
        assert_eq!(f.d.session().tree().walk().len(), total - 3);

        // One undo brings the whole set back.
        assert!(f.d.undo()?);
        assert_eq!(f.d.session().tree().walk().len(), total);
        Ok(())
    }

    #[test]
    fn deleting_the_root_is_impossible() -> Result<()> {
        let mut f = fixture()?;
        let root = f.d.session().tree().root_id();
        let op = DeleteOp::new(f.d.session(), &[root])?;
        assert!(op.is_impossible());
        assert!(!f.d.apply(op)?);
        Ok(())
    }

    #[test]
    fn delete_in_the_middle_restores_the_exact_index() -> Result<()> {
        let mut f = fixture()?;
        // Third label under the panel, then delete the middle one.
        let op = AddWidget::new(f.d.session(), f.panel, "label", Point::new(1, 5), Some("m"))?;
        f.d.apply(op)?;
        let m = f.d.session().selection().nodes()[0];
        assert_eq!(f.d.session().node(f.panel)?.children(), &[f.a, f.b, m]);

        let op = DeleteOp::new(f.d.session(), &[f.b])?;
        assert!(f.d.apply(op)?);
        assert_eq!(f.d.session().node(f.panel)?.children(), &[f.a, m]);

        assert!(f.d.undo()?);
        assert_eq!(f.d.session().node(f.panel)?.children(), &[f.a, f.b, m]);
        Ok(())
    }
}
