#[cfg(test)]
mod tests {
    use hexwrench::config::SystemConfig;
    use hexwrench::editor::{Editor, Pane, Selection};
    use hexwrench::state::AppState;
    use hexwrench::strings::{MatchKind, ScanOptions, ScanStatus, StringEncoding, StringsList};

    #[test]
    fn test_mixed_encodings() {
        let mut data = Vec::new();
        data.extend_from_slice(b"\x01\x02ascii text\x00");
        data.extend_from_slice(b"w\x00i\x00d\x00e\x00!\x00");
        data.extend_from_slice(b"\xff\xfeab\xff");
        let editor = Editor::new(data, true);

        let mut list = StringsList::new(ScanOptions::default());
        assert_eq!(list.run_to_end(editor.buffer()).unwrap(), 2);
        let found = list.matches();
        assert_eq!(found[0].kind, MatchKind::Ascii);
        assert_eq!((found[0].start, found[0].end), (2, 12));
        assert_eq!(found[1].kind, MatchKind::Unicode);
        assert_eq!(found[1].start, 13);
        assert_eq!(found[1].display_string(), "\"wide!\"");

        list.set_options(ScanOptions {
            min_length: 2,
            encoding: StringEncoding::Ascii,
        });
        assert!(list.is_dirty(editor.buffer()));
        list.run_to_end(editor.buffer()).unwrap();
        assert!(list.matches().iter().all(|m| m.kind == MatchKind::Ascii));
        assert!(list.matches().iter().any(|m| m.text == "ab"));
    }

    #[test]
    fn test_incremental_scan_through_app_state() {
        let mut state = AppState::new(SystemConfig::default());
        let data: Vec<u8> = (0..50).flat_map(|_| b"string\x00".to_vec()).collect();
        state.editor_mut().set_data(data);
        state.process_notifications(true);

        let mut steps = 0;
        let count = loop {
            steps += 1;
            match state.strings.step(7) {
                ScanStatus::Running { done, total } => assert!(done <= total),
                ScanStatus::Finished { count } => break count,
                ScanStatus::Idle => panic!("scan not running"),
            }
        };
        assert_eq!(count, 50);
        assert!(steps > 1);

        state.strings.selected = 3;
        let AppState {
            strings, document, ..
        } = &mut state;
        strings.show_in_editor(&mut document.editor).unwrap();
        assert_eq!(state.editor().selection(), Some(Selection::new(21, 26)));
        assert_eq!(state.editor().pane(), Pane::Ascii);
    }
}
