//! String extraction and the strings list model.
//!
//! Scanning runs over a snapshot of the buffer and is consumed in bounded
//! slices so the event loop stays responsive. A scan can be abandoned at
//! any point without side effects.

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::editor::{ByteBuffer, Editor, Pane};
use crate::error::{EditorError, EditorResult};

pub const DEFAULT_MIN_LENGTH: usize = 5;
const MAX_MIN_LENGTH: usize = 1024;
/// Bytes searched per iterator step.
const SCAN_WINDOW: usize = 16 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StringEncoding {
    Ascii,
    Unicode,
    #[default]
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Ascii,
    Unicode,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Ascii => write!(f, "ascii"),
            MatchKind::Unicode => write!(f, "unicode"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub min_length: usize,
    pub encoding: StringEncoding,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            encoding: StringEncoding::Both,
        }
    }
}

/// One string found in the buffer. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub kind: MatchKind,
    pub text: String,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Text for display: the interleaved nulls of UTF-16 strings removed,
    /// control characters escaped.
    pub fn display_string(&self) -> String {
        let text: String = match self.kind {
            MatchKind::Ascii => self.text.clone(),
            MatchKind::Unicode => self.text.chars().filter(|&c| c != '\0').collect(),
        };
        format!("{text:?}")
    }
}

/// One step of a scan: a string, or a window that held none. `Scanned`
/// carries the offset searched up to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem {
    Found(Match),
    Scanned(usize),
}

pub trait StringScanner {
    /// Starts a lazy scan over `data`. Each item covers a bounded amount of
    /// input.
    fn scan(&self, data: Arc<[u8]>, options: &ScanOptions) -> EditorResult<Box<dyn Iterator<Item = ScanItem>>>;
}

/// Finds runs of printable ASCII (plus tab) and their UTF-16LE form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScanner;

impl DefaultScanner {
    fn pattern(options: &ScanOptions) -> EditorResult<Regex> {
        let n = options.min_length.clamp(1, MAX_MIN_LENGTH);
        let unicode = format!(r"((?:[\x20-\x7e\t]\x00){{{n},}})");
        let ascii = format!(r"([\x20-\x7e\t]{{{n},}})");
        let pattern = match options.encoding {
            StringEncoding::Ascii => format!("(?-u){ascii}"),
            StringEncoding::Unicode => format!("(?-u){unicode}"),
            // Leftmost-first: the unicode reading wins when both qualify.
            StringEncoding::Both => format!("(?-u){unicode}|{ascii}"),
        };
        Regex::new(&pattern).map_err(|e| EditorError::InvalidInput(e.to_string()))
    }
}

impl StringScanner for DefaultScanner {
    fn scan(&self, data: Arc<[u8]>, options: &ScanOptions) -> EditorResult<Box<dyn Iterator<Item = ScanItem>>> {
        let regex = Self::pattern(options)?;
        let unicode_group = match options.encoding {
            StringEncoding::Ascii => None,
            _ => Some(1),
        };
        Ok(Box::new(ScanIter {
            data,
            regex,
            unicode_group,
            overlap: options.min_length.clamp(1, MAX_MIN_LENGTH) * 2,
            pos: 0,
        }))
    }
}

struct ScanIter {
    data: Arc<[u8]>,
    regex: Regex,
    unicode_group: Option<usize>,
    /// Longest run that can fall short of a match at a window edge.
    overlap: usize,
    pos: usize,
}

impl ScanIter {
    fn kind(&self, caps: &regex::bytes::Captures<'_>) -> MatchKind {
        match self.unicode_group {
            Some(group) if caps.get(group).is_some() => MatchKind::Unicode,
            _ => MatchKind::Ascii,
        }
    }
}

impl Iterator for ScanIter {
    type Item = ScanItem;

    fn next(&mut self) -> Option<ScanItem> {
        let len = self.data.len();
        if self.pos >= len {
            return None;
        }
        let end = (self.pos + SCAN_WINDOW).min(len);
        let hit = self
            .regex
            .captures(&self.data[self.pos..end])
            .and_then(|caps| {
                let whole = caps.get(0)?;
                Some((self.pos + whole.start(), self.pos + whole.end(), self.kind(&caps)))
            });

        let Some((start, mut stop, mut kind)) = hit else {
            // A run cut by the window edge is shorter than the overlap, so
            // the next window picks it up whole.
            self.pos = if end == len { len } else { end - self.overlap };
            return Some(ScanItem::Scanned(end));
        };

        // A match touching the edge (or one byte short of it, for a UTF-16
        // pair split in half) may continue past the window.
        if end < len
            && end - stop < 2
            && let Some(caps) = self.regex.captures_at(&self.data, start)
            && let Some(whole) = caps.get(0)
        {
            stop = whole.end();
            kind = self.kind(&caps);
        }

        self.pos = stop;
        Some(ScanItem::Found(Match {
            start,
            end: stop,
            kind,
            text: String::from_utf8_lossy(&self.data[start..stop]).into_owned(),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Idle,
    Running { done: usize, total: usize },
    Finished { count: usize },
}

struct ActiveScan {
    iter: Box<dyn Iterator<Item = ScanItem>>,
    found: Vec<Match>,
    done: usize,
    total: usize,
    generation: u64,
}

/// The strings view model. Rescans only when the buffer generation moved
/// since the last completed scan.
pub struct StringsList {
    scanner: Box<dyn StringScanner>,
    options: ScanOptions,
    matches: Vec<Match>,
    scanned_generation: Option<u64>,
    active: Option<ActiveScan>,
    /// Generation whose scan was aborted; not rescanned until it moves.
    aborted_generation: Option<u64>,
    pub selected: usize,
}

impl StringsList {
    pub fn new(options: ScanOptions) -> Self {
        Self::with_scanner(options, Box::new(DefaultScanner))
    }

    pub fn with_scanner(options: ScanOptions, scanner: Box<dyn StringScanner>) -> Self {
        Self {
            scanner,
            options,
            matches: Vec::new(),
            scanned_generation: None,
            active: None,
            aborted_generation: None,
            selected: 0,
        }
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Changing the options invalidates the current list.
    pub fn set_options(&mut self, options: ScanOptions) {
        if options != self.options {
            self.options = options;
            self.scanned_generation = None;
            self.active = None;
        }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn is_dirty(&self, buffer: &ByteBuffer) -> bool {
        self.scanned_generation != Some(buffer.generation())
    }

    pub fn is_scanning(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a scan if the list is stale and none is running.
    /// Returns whether a new scan was started.
    pub fn refresh(&mut self, buffer: &ByteBuffer) -> EditorResult<bool> {
        if let Some(active) = &self.active {
            if active.generation == buffer.generation() {
                return Ok(false);
            }
            log::debug!("Restarting strings scan, buffer changed mid-scan");
        } else if !self.is_dirty(buffer) || self.aborted_generation == Some(buffer.generation()) {
            return Ok(false);
        }
        self.aborted_generation = None;
        let iter = self.scanner.scan(buffer.snapshot(), &self.options)?;
        log::debug!(
            "Strings scan started: {} bytes, min length {}, {:?}",
            buffer.len(),
            self.options.min_length,
            self.options.encoding
        );
        self.active = Some(ActiveScan {
            iter,
            found: Vec::new(),
            done: 0,
            total: buffer.len(),
            generation: buffer.generation(),
        });
        Ok(true)
    }

    /// Pulls up to `budget` items (strings or empty windows) from the
    /// running scan.
    pub fn step(&mut self, budget: usize) -> ScanStatus {
        let Some(active) = self.active.as_mut() else {
            return ScanStatus::Idle;
        };
        for _ in 0..budget.max(1) {
            match active.iter.next() {
                Some(ScanItem::Found(m)) => {
                    active.done = active.done.max(m.end);
                    active.found.push(m);
                }
                Some(ScanItem::Scanned(offset)) => {
                    active.done = active.done.max(offset);
                }
                None => {
                    let Some(active) = self.active.take() else {
                        return ScanStatus::Idle;
                    };
                    let count = active.found.len();
                    log::info!("Strings scan finished: {count} strings");
                    self.matches = active.found;
                    self.scanned_generation = Some(active.generation);
                    self.selected = self.selected.min(count.saturating_sub(1));
                    return ScanStatus::Finished { count };
                }
            }
        }
        ScanStatus::Running {
            done: active.done,
            total: active.total,
        }
    }

    /// Drains the whole scan at once.
    pub fn run_to_end(&mut self, buffer: &ByteBuffer) -> EditorResult<usize> {
        self.refresh(buffer)?;
        loop {
            match self.step(usize::MAX) {
                ScanStatus::Running { .. } => continue,
                ScanStatus::Finished { count } => return Ok(count),
                ScanStatus::Idle => return Ok(self.matches.len()),
            }
        }
    }

    /// Abandons the running scan. The list keeps its previous content and
    /// stays dirty.
    pub fn cancel(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        log::info!("Strings scan aborted at {}/{}", active.done, active.total);
        self.aborted_generation = Some(active.generation);
        true
    }

    /// Allows an aborted scan to run again for the same buffer content.
    pub fn retry(&mut self) {
        self.aborted_generation = None;
    }

    pub fn progress(&self) -> Option<(usize, usize)> {
        self.active.as_ref().map(|a| (a.done, a.total))
    }

    pub fn selected_match(&self) -> Option<&Match> {
        self.matches.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.matches.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Selects the string in the editor's ascii pane.
    pub fn show_in_editor(&self, editor: &mut Editor) -> EditorResult<()> {
        let Some(m) = self.selected_match() else {
            return Ok(());
        };
        if m.is_empty() {
            return Ok(());
        }
        editor.select_range(m.start, m.end - 1)?;
        editor.set_pane(Pane::Ascii);
        editor.scroll_to_index(m.start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(data: &[u8], options: ScanOptions) -> Vec<Match> {
        DefaultScanner
            .scan(Arc::from(data), &options)
            .unwrap()
            .filter_map(|item| match item {
                ScanItem::Found(m) => Some(m),
                ScanItem::Scanned(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_ascii_runs_respect_min_length() {
        let data = b"\x00\x01hello\x00hi\x00world!\xff";
        let found = scan(data, ScanOptions::default());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, 2);
        assert_eq!(found[0].end, 7);
        assert_eq!(found[0].text, "hello");
        assert_eq!(found[1].text, "world!");
        assert!(found.iter().all(|m| m.kind == MatchKind::Ascii));
    }

    #[test]
    fn test_both_prefers_unicode() {
        let data = b"\xffh\x00e\x00l\x00l\x00o\x00\xff";
        let found = scan(data, ScanOptions::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, MatchKind::Unicode);
        assert_eq!(found[0].start, 1);
        assert_eq!(found[0].end, 11);
        assert_eq!(found[0].display_string(), "\"hello\"");
    }

    #[test]
    fn test_ascii_only_ignores_utf16() {
        let data = b"h\x00e\x00l\x00l\x00o\x00";
        let options = ScanOptions {
            encoding: StringEncoding::Ascii,
            ..ScanOptions::default()
        };
        assert!(scan(data, options).is_empty());
    }

    #[test]
    fn test_tab_counts_and_is_escaped() {
        let data = b"ab\tcd";
        let found = scan(data, ScanOptions::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_string(), "\"ab\\tcd\"");
    }

    #[test]
    fn test_strings_across_window_edges() {
        let mut data = vec![0xffu8; SCAN_WINDOW * 3];
        // Ascii run straddling the first edge.
        data[SCAN_WINDOW - 6..SCAN_WINDOW + 4].copy_from_slice(b"abcdefghij");
        // The next window starts where that run ends; this UTF-16 run has
        // its last pair split by that window's edge.
        let at = SCAN_WINDOW + 4 + SCAN_WINDOW - 11;
        data[at..at + 12].copy_from_slice(b"u\x00v\x00w\x00x\x00y\x00z\x00");
        let found = scan(&data, ScanOptions::default());
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].start, found[0].end), (SCAN_WINDOW - 6, SCAN_WINDOW + 4));
        assert_eq!(found[0].text, "abcdefghij");
        assert_eq!((found[1].start, found[1].end), (at, at + 12));
        assert_eq!(found[1].kind, MatchKind::Unicode);
    }

    #[test]
    fn test_step_is_bounded_without_strings() {
        let mut data = vec![0xffu8; SCAN_WINDOW * 64];
        data.extend_from_slice(b"hello");
        let total = data.len();
        let buffer = ByteBuffer::new(data);
        let mut list = StringsList::new(ScanOptions::default());
        list.refresh(&buffer).unwrap();

        assert_eq!(list.step(1), ScanStatus::Running { done: SCAN_WINDOW, total });
        match list.step(4) {
            ScanStatus::Running { done, .. } => assert!(done < total),
            other => panic!("unexpected status {other:?}"),
        }
        assert_eq!(list.run_to_end(&buffer).unwrap(), 1);
        assert_eq!(list.matches()[0].start, SCAN_WINDOW * 64);
    }

    #[test]
    fn test_list_scans_in_slices_and_tracks_dirty() {
        let mut buffer = ByteBuffer::new(b"alpha\x00bravo\x00charlie\x00".to_vec());
        let mut list = StringsList::new(ScanOptions::default());
        assert!(list.is_dirty(&buffer));
        assert!(list.refresh(&buffer).unwrap());

        assert_eq!(list.step(1), ScanStatus::Running { done: 5, total: 20 });
        assert_eq!(list.progress(), Some((5, 20)));
        assert_eq!(list.step(10), ScanStatus::Finished { count: 3 });
        assert_eq!(list.matches().len(), 3);
        assert!(!list.is_dirty(&buffer));
        assert!(!list.refresh(&buffer).unwrap());

        buffer
            .replace(crate::editor::Target::Point(0), b"x", crate::editor::EditMode::Overwrite)
            .unwrap();
        assert!(list.is_dirty(&buffer));
    }

    #[test]
    fn test_cancel_keeps_previous_list_dirty() {
        let buffer = ByteBuffer::new(b"alpha\x00bravo\x00".to_vec());
        let mut list = StringsList::new(ScanOptions::default());
        list.refresh(&buffer).unwrap();
        list.step(1);
        assert!(list.cancel());
        assert!(list.matches().is_empty());
        assert!(list.is_dirty(&buffer));
        assert_eq!(list.step(1), ScanStatus::Idle);

        assert!(!list.refresh(&buffer).unwrap());
        list.retry();
        assert!(list.refresh(&buffer).unwrap());
    }

    #[test]
    fn test_show_in_editor_selects_ascii_range() {
        let mut editor = Editor::new(b"\x00\x00hello\x00".to_vec(), true);
        let mut list = StringsList::new(ScanOptions::default());
        assert_eq!(list.run_to_end(editor.buffer()).unwrap(), 1);
        list.show_in_editor(&mut editor).unwrap();
        let sel = editor.selection().unwrap();
        assert_eq!((sel.first, sel.last), (2, 6));
        assert_eq!(editor.pane(), Pane::Ascii);
    }
}
