//! Integration tests for the element-collection operations across every
//! collection kind: menus, menu items, tab pages, table columns and
//! radio options.

#[cfg(test)]
mod tests {
    use trellis::{
        Catalog, Designer, NodeId, Point, Prompt, Rect,
        error::Result,
        ops::{AddElement, AddWidget, MoveElement, RemoveElement, RenameElement},
        widgets::{MenuBar, RadioGroup, TabControl, Table},
    };

    /// A prompt that hands out one scripted reply, then cancels.
    struct OneShot(Option<String>);

    impl Prompt for OneShot {
        fn ask(&mut self, _title: &str, _initial: &str) -> Option<String> {
            self.0.take()
        }
    }

    fn designer() -> Result<Designer> {
        Designer::new(Box::new(Catalog), Rect::new(0, 0, 80, 24))
    }

    /// Add a widget under the root and return its node id.
    fn add(d: &mut Designer, kind: &str, name: &str) -> Result<NodeId> {
        let root = d.session().tree().root_id();
        let op = AddWidget::new(d.session(), root, kind, Point::new(1, 1), Some(name))?;
        assert!(d.apply(op)?);
        Ok(d.session().selection().nodes()[0])
    }

    #[test]
    fn menus_and_their_items() -> Result<()> {
        let mut d = designer()?;
        let bar = add(&mut d, "menu_bar", "bar")?;

        for name in ["file", "edit"] {
            let spec = MenuBar::menu_collection(d.session(), bar)?;
            assert!(d.apply(AddElement::new(d.session(), spec, Some(name)))?);
        }
        let spec = MenuBar::menu_collection(d.session(), bar)?;
        assert_eq!(spec.labels(d.session())?, ["file", "edit"]);

        // Items live inside one menu and are edited through the same engine.
        for item in ["open", "save"] {
            let spec = MenuBar::item_collection(d.session(), bar, 0)?;
            assert!(d.apply(AddElement::new(d.session(), spec, Some(item)))?);
        }
        let spec = MenuBar::item_collection(d.session(), bar, 0)?;
        assert_eq!(spec.labels(d.session())?, ["open", "save"]);

        // Moving a menu carries its items with it.
        let spec = MenuBar::menu_collection(d.session(), bar)?;
        assert!(d.apply(MoveElement::new(d.session(), spec, 0, 1)?)?);
        let spec = MenuBar::menu_collection(d.session(), bar)?;
        assert_eq!(spec.labels(d.session())?, ["edit", "file"]);
        let spec = MenuBar::item_collection(d.session(), bar, 1)?;
        assert_eq!(spec.labels(d.session())?, ["open", "save"]);

        // Unwind the whole session.
        while d.undo()? {}
        let spec = MenuBar::menu_collection(d.session(), bar)?;
        assert!(spec.labels(d.session())?.is_empty());
        Ok(())
    }

    #[test]
    fn renaming_dedupes_within_the_collection() -> Result<()> {
        let mut d = designer()?;
        let table = add(&mut d, "table", "grid")?;

        for name in ["name", "age"] {
            let spec = Table::column_collection(d.session(), table)?;
            assert!(d.apply(AddElement::new(d.session(), spec, Some(name)))?);
        }

        let spec = Table::column_collection(d.session(), table)?;
        assert!(d.apply(RenameElement::new(d.session(), spec, 1, Some("name"))?)?);
        let spec = Table::column_collection(d.session(), table)?;
        assert_eq!(spec.labels(d.session())?, ["name", "name2"]);

        assert!(d.undo()?);
        let spec = Table::column_collection(d.session(), table)?;
        assert_eq!(spec.labels(d.session())?, ["name", "age"]);
        Ok(())
    }

    #[test]
    fn tab_pages_are_real_nodes() -> Result<()> {
        let mut d = designer()?;
        let tabs = add(&mut d, "tab_control", "tabs")?;

        for name in ["general", "advanced"] {
            let spec = TabControl::page_collection(d.session(), tabs)?;
            assert!(d.apply(AddElement::new(d.session(), spec, Some(name)))?);
        }
        let pages = d.session().node(tabs)?.children().to_vec();
        assert_eq!(pages.len(), 2);
        assert_eq!(d.session().node(pages[0])?.name().as_str(), "general");

        // Inserting into the control lands in the active page.
        let op = AddWidget::new(d.session(), tabs, "label", Point::new(2, 2), Some("first"))?;
        assert!(d.apply(op)?);
        let first = d.session().selection().nodes()[0];
        assert_eq!(d.session().node(first)?.parent(), Some(pages[0]));

        d.session_mut().activate_tab(tabs, 1)?;
        let op = AddWidget::new(d.session(), tabs, "label", Point::new(2, 2), Some("second"))?;
        assert!(d.apply(op)?);
        let second = d.session().selection().nodes()[0];
        assert_eq!(d.session().node(second)?.parent(), Some(pages[1]));

        // Reordering pages reorders children; the widgets travel along.
        let spec = TabControl::page_collection(d.session(), tabs)?;
        assert!(d.apply(MoveElement::new(d.session(), spec, 0, 1)?)?);
        let reordered = d.session().node(tabs)?.children().to_vec();
        assert_eq!(reordered, vec![pages[1], pages[0]]);
        assert_eq!(d.session().node(first)?.parent(), Some(pages[0]));

        // Removing a page detaches the node; undo re-links the same one.
        let spec = TabControl::page_collection(d.session(), tabs)?;
        assert!(d.apply(RemoveElement::new(d.session(), spec, 1)?)?);
        assert_eq!(d.session().node(tabs)?.children(), &[pages[1]]);
        assert!(d.undo()?);
        assert_eq!(d.session().node(tabs)?.children(), &[pages[1], pages[0]]);
        assert_eq!(d.session().node(first)?.parent(), Some(pages[0]));
        Ok(())
    }

    #[test]
    fn last_tab_page_cannot_be_removed() -> Result<()> {
        let mut d = designer()?;
        let tabs = add(&mut d, "tab_control", "tabs")?;
        let spec = TabControl::page_collection(d.session(), tabs)?;
        assert!(d.apply(AddElement::new(d.session(), spec, Some("only")))?);

        let spec = TabControl::page_collection(d.session(), tabs)?;
        let op = RemoveElement::new(d.session(), spec, 0)?;
        assert!(!d.apply(op)?);
        assert_eq!(d.session().node(tabs)?.children().len(), 1);
        Ok(())
    }

    #[test]
    fn prompted_add_and_cancelled_add() -> Result<()> {
        let mut d = designer()?;
        let group = add(&mut d, "radio_group", "choices")?;
        let depth = d.history().undo_depth();

        // A scripted reply names the element.
        d.session_mut()
            .set_prompt(Box::new(OneShot(Some("fish".into()))));
        let spec = RadioGroup::option_collection(d.session(), group)?;
        assert!(d.apply(AddElement::new(d.session(), spec, None))?);
        let spec = RadioGroup::option_collection(d.session(), group)?;
        assert_eq!(spec.labels(d.session())?, ["fish"]);

        // A cancelled prompt declines the operation and leaves no history.
        let spec = RadioGroup::option_collection(d.session(), group)?;
        assert!(!d.apply(AddElement::new(d.session(), spec, None))?);
        assert_eq!(d.history().undo_depth(), depth + 1);
        let spec = RadioGroup::option_collection(d.session(), group)?;
        assert_eq!(spec.labels(d.session())?, ["fish"]);
        Ok(())
    }
}
