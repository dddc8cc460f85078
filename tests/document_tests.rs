#[cfg(test)]
mod tests {
    use hexwrench::document::{self, Document};
    use hexwrench::editor::Intent;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hexwrench_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_save_load_round_trip_binary() {
        let path = temp_path("round_trip.bin");
        let data: Vec<u8> = (0..=255u8).chain([0x00, 0x80, 0xFF, b'\n', b'\r']).collect();

        document::save(&path, &data).unwrap();
        assert_eq!(document::load(&path).unwrap(), data);

        let mut doc = Document::open(&path, true).unwrap();
        assert_eq!(doc.editor.data(), data.as_slice());
        assert!(!doc.is_dirty());
        doc.save().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), data);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_dirty_tracking() {
        let path = temp_path("dirty.bin");
        document::save(&path, b"hello").unwrap();

        let mut doc = Document::open(&path, true).unwrap();
        assert_eq!(doc.display_name(), path.file_name().unwrap().to_string_lossy());
        assert_eq!(doc.editor.position(), 0);
        assert!(!doc.is_dirty());

        doc.editor.dispatch(Intent::Delete).unwrap();
        assert!(doc.is_dirty());
        doc.save().unwrap();
        assert!(!doc.is_dirty());
        assert_eq!(std::fs::read(&path).unwrap(), b"ello");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_leaves_document_alone() {
        let mut doc = Document::new_empty(true);
        doc.editor.set_data(b"keep".to_vec());
        assert!(doc.load(&temp_path("does_not_exist.bin")).is_err());
        assert_eq!(doc.editor.data(), b"keep");
        assert_eq!(doc.display_name(), "[untitled]");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::new_empty(false);
        assert!(doc.save().is_err());
    }
}
