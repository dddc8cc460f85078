#[cfg(test)]
mod tests {
    use hexwrench::editor::{Editor, Pane, Selection};
    use hexwrench::inspector::{Endian, Inspector, InspectorKind};
    use hexwrench::search;

    #[test]
    fn test_jump_then_search_forward() {
        let mut ed = Editor::new(b"..PK..PK..".to_vec(), true);
        ed.resize(80, 4);
        assert_eq!(search::jump(&mut ed, "x2"), Ok(2));
        assert_eq!(ed.position(), 2);

        // Search starts after the cursor, so the hit under it is skipped.
        assert_eq!(search::search(&mut ed, "PK", Pane::Ascii), Ok(6));
        assert_eq!(ed.selection(), Some(Selection::new(6, 7)));
        assert!(search::search(&mut ed, "50 4b", Pane::Hex).is_err());

        search::jump(&mut ed, "0").unwrap();
        assert_eq!(ed.selection(), None);
        assert_eq!(search::search(&mut ed, "504b", Pane::Hex), Ok(2));
        assert_eq!(ed.pane(), Pane::Hex);
    }

    #[test]
    fn test_jump_rejects_bad_targets() {
        let mut ed = Editor::new(vec![0; 16], true);
        assert!(search::jump(&mut ed, "16").is_err());
        assert!(search::jump(&mut ed, "0x10").is_err());
        assert!(search::jump(&mut ed, "ten").is_err());
        assert_eq!(search::jump(&mut ed, "0xf"), Ok(15));
    }

    #[test]
    fn test_inspector_over_selection() {
        let mut ed = Editor::new(vec![0x12, 0x34, 0x56, 0x78, 0x9A], true);
        let mut inspector = Inspector::new(
            Endian::Big,
            &[InspectorKind::U8, InspectorKind::U16, InspectorKind::U32],
        );
        inspector.refresh(&ed);
        let values: Vec<_> = inspector.rows().iter().map(|r| r.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                Some("18".to_string()),
                Some("4660".to_string()),
                Some("305419896".to_string())
            ]
        );

        ed.select_range(1, 2).unwrap();
        inspector.toggle_endian();
        inspector.refresh(&ed);
        let values: Vec<_> = inspector.rows().iter().map(|r| r.value.clone()).collect();
        assert_eq!(
            values,
            vec![Some("52".to_string()), Some("22068".to_string()), None]
        );
    }
}
