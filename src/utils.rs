use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::fs;
use std::path::{Path, PathBuf};

/// Lists a directory for the file dialogs: directories first, then files,
/// each group sorted by name. Hidden entries are skipped.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if !hidden {
                files.push(path);
            }
        }
    }

    files.sort_by(|a, b| {
        let a_is_dir = a.is_dir();
        let b_is_dir = b.is_dir();
        if a_is_dir && !b_is_dir {
            std::cmp::Ordering::Less
        } else if !a_is_dir && b_is_dir {
            std::cmp::Ordering::Greater
        } else {
            a.file_name().cmp(&b.file_name())
        }
    });

    files
}

/// The glyph shown for a byte in the ascii pane, if it has one.
pub fn printable_ascii(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E => Some(byte as char),
        _ => None,
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A rectangle of fixed size centered in `r`, shrunk to fit.
pub fn centered_fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_ascii() {
        assert_eq!(printable_ascii(b'A'), Some('A'));
        assert_eq!(printable_ascii(b' '), Some(' '));
        assert_eq!(printable_ascii(b'~'), Some('~'));
        assert_eq!(printable_ascii(0x00), None);
        assert_eq!(printable_ascii(0x7F), None);
        assert_eq!(printable_ascii(0xC1), None);
    }

    #[test]
    fn test_centered_fixed_rect_fits() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_fixed_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_fixed_rect(50, 50, area), area);
    }

    #[test]
    fn test_list_files_dirs_first() {
        let dir = std::env::temp_dir().join(format!("hexwrench_list_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("zdir")).unwrap();
        fs::write(dir.join("a.bin"), b"x").unwrap();
        fs::write(dir.join(".hidden"), b"x").unwrap();

        let files = list_files(&dir);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["zdir", "a.bin"]);

        let _ = fs::remove_dir_all(&dir);
    }
}
