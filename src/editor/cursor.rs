use crate::error::{EditorError, EditorResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pane {
    #[default]
    Hex,
    Ascii,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::Hex => Pane::Ascii,
            Pane::Ascii => Pane::Hex,
        }
    }
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pane::Hex => write!(f, "HEX"),
            Pane::Ascii => write!(f, "ASCII"),
        }
    }
}

/// Inclusive byte range, always `first <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub first: usize,
    pub last: usize,
}

// A selection always covers at least one byte.
#[allow(clippy::len_without_is_empty)]
impl Selection {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.first..=self.last).contains(&index)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.first, self.last)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Index in `[0, size]`; `size` is the virtual end-of-buffer position.
    pub position: usize,
    pub pane: Pane,
    pub insert_mode: bool,
    /// High nibble typed in the hex pane, waiting for its low half.
    pub pending_nibble: Option<u8>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: 0,
            pane: Pane::Hex,
            insert_mode: true,
            pending_nibble: None,
        }
    }
}

/// Cursor, anchor and selection of one document.
#[derive(Debug, Clone, Default)]
pub struct CursorModel {
    cursor: Cursor,
    anchor: Option<usize>,
    selection: Option<Selection>,
}

impl CursorModel {
    pub fn new(insert_mode: bool) -> Self {
        Self {
            cursor: Cursor {
                insert_mode,
                ..Cursor::default()
            },
            anchor: None,
            selection: None,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn position(&self) -> usize {
        self.cursor.position
    }

    pub fn pane(&self) -> Pane {
        self.cursor.pane
    }

    pub fn insert_mode(&self) -> bool {
        self.cursor.insert_mode
    }

    pub fn set_insert_mode(&mut self, insert_mode: bool) {
        self.cursor.insert_mode = insert_mode;
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn pending_nibble(&self) -> Option<u8> {
        self.cursor.pending_nibble
    }

    pub fn set_pending_nibble(&mut self, nibble: Option<u8>) {
        self.cursor.pending_nibble = nibble.map(|n| n & 0x0F);
    }

    pub fn set_pane(&mut self, pane: Pane) {
        if self.cursor.pane != pane {
            self.cursor.pending_nibble = None;
        }
        self.cursor.pane = pane;
    }

    pub fn switch_pane(&mut self) {
        self.set_pane(self.cursor.pane.other());
    }

    /// Places the cursor without touching the selection.
    pub fn set_position(&mut self, position: usize, size: usize) {
        self.cursor.position = position.min(size);
    }

    /// Places the cursor and makes it the anchor of the next extension.
    pub fn place(&mut self, position: usize, size: usize) {
        self.clear_selection();
        self.cursor.pending_nibble = None;
        self.cursor.position = position.min(size);
        self.anchor = Some(self.cursor.position);
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
        self.selection = None;
    }

    /// Moves the cursor to `index + delta`.
    ///
    /// Without `expand` and with a live selection, a non-zero delta
    /// collapses the selection to the edge in the direction of travel.
    /// Returns the new position, or `None` when the target is outside
    /// `[0, size]` (nothing changes in that case).
    pub fn move_to(&mut self, index: usize, delta: isize, expand: bool, size: usize) -> Option<usize> {
        if let Some(sel) = self.selection
            && !expand
            && delta != 0
        {
            let pos = if delta < 0 {
                sel.first.saturating_add_signed(delta)
            } else {
                sel.last.saturating_add_signed(delta).min(size)
            };
            self.clear_selection();
            self.cursor.pending_nibble = None;
            self.cursor.position = pos;
            return Some(pos);
        }

        let target = index.checked_add_signed(delta).filter(|&t| t <= size)?;
        self.cursor.pending_nibble = None;
        if expand {
            let anchor = *self.anchor.get_or_insert(self.cursor.position);
            self.cursor.position = target;
            self.selection = clamp_selection(anchor, target, size);
        } else {
            self.clear_selection();
            self.cursor.position = target;
        }
        Some(target)
    }

    /// Grows or shrinks the selection between the anchor and `index`.
    pub fn expand_selection(&mut self, index: usize, size: usize) {
        let anchor = *self.anchor.get_or_insert(self.cursor.position);
        self.selection = clamp_selection(anchor, index, size);
    }

    /// Replaces the selection with `[first, last]`; cursor and anchor go
    /// to `first`.
    pub fn select_range(&mut self, first: usize, last: usize, size: usize) -> EditorResult<()> {
        if first > last || last >= size {
            return Err(EditorError::InvalidRange { first, last, size });
        }
        self.clear_selection();
        self.cursor.pending_nibble = None;
        self.cursor.position = first;
        self.anchor = Some(first);
        self.selection = Some(Selection { first, last });
        Ok(())
    }

    /// Re-establishes the invariants after the buffer shrank or grew.
    pub fn clamp_to(&mut self, size: usize) {
        self.cursor.position = self.cursor.position.min(size);
        if let Some(anchor) = self.anchor {
            self.anchor = Some(anchor.min(size));
        }
        if let Some(sel) = self.selection {
            self.selection = clamp_selection(sel.first, sel.last, size);
        }
    }
}

/// Builds a selection between two cursor positions, dropping the virtual
/// end position so that `last < size` always holds.
fn clamp_selection(a: usize, b: usize, size: usize) -> Option<Selection> {
    if size == 0 {
        return None;
    }
    let sel = Selection::new(a, b);
    if sel.first >= size {
        return None;
    }
    Some(Selection {
        first: sel.first,
        last: sel.last.min(size - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_inclusive_and_normalized() {
        let sel = Selection::new(7, 3);
        assert_eq!((sel.first, sel.last), (3, 7));
        assert_eq!(sel.len(), 5);
        assert_eq!(Selection::new(4, 4).len(), 1);
        assert!(sel.contains(7) && !sel.contains(8));
    }

    #[test]
    fn test_move_plain() {
        let mut m = CursorModel::new(true);
        assert_eq!(m.move_to(0, 1, false, 10), Some(1));
        assert_eq!(m.move_to(1, 9, false, 10), Some(10));
        assert_eq!(m.move_to(10, 1, false, 10), None);
        assert_eq!(m.position(), 10);
        assert_eq!(m.move_to(0, -1, false, 10), None);
        assert_eq!(m.position(), 10);
    }

    #[test]
    fn test_move_zero_delta_lands_and_clears() {
        let mut m = CursorModel::new(true);
        m.select_range(2, 5, 10).unwrap();
        for index in 0..=10 {
            m.select_range(2, 5, 10).unwrap();
            assert_eq!(m.move_to(index, 0, false, 10), Some(index));
            assert_eq!(m.position(), index);
            assert!(m.selection().is_none());
        }
    }

    #[test]
    fn test_shift_extend_both_directions() {
        let mut m = CursorModel::new(true);
        m.place(5, 20);
        m.move_to(5, 1, true, 20);
        m.move_to(6, 1, true, 20);
        assert_eq!(m.selection(), Some(Selection { first: 5, last: 7 }));
        m.move_to(7, -4, true, 20);
        assert_eq!(m.selection(), Some(Selection { first: 3, last: 5 }));
        assert_eq!(m.anchor(), Some(5));
    }

    #[test]
    fn test_extend_without_anchor_uses_cursor() {
        let mut m = CursorModel::new(true);
        m.move_to(0, 4, false, 20);
        m.move_to(4, 2, true, 20);
        assert_eq!(m.selection(), Some(Selection { first: 4, last: 6 }));
    }

    #[test]
    fn test_extend_to_end_excludes_virtual_position() {
        let mut m = CursorModel::new(true);
        m.place(8, 10);
        m.move_to(8, 2, true, 10);
        assert_eq!(m.position(), 10);
        assert_eq!(m.selection(), Some(Selection { first: 8, last: 9 }));
    }

    #[test]
    fn test_collapse_to_edge() {
        let mut m = CursorModel::new(true);
        m.select_range(4, 8, 20).unwrap();
        assert_eq!(m.move_to(m.position(), -1, false, 20), Some(3));
        assert!(m.selection().is_none());

        m.select_range(4, 8, 20).unwrap();
        assert_eq!(m.move_to(m.position(), 1, false, 20), Some(9));

        m.select_range(0, 2, 20).unwrap();
        assert_eq!(m.move_to(m.position(), -16, false, 20), Some(0));

        m.select_range(10, 19, 20).unwrap();
        assert_eq!(m.move_to(m.position(), 16, false, 20), Some(20));
    }

    #[test]
    fn test_expand_selection_normalizes() {
        let mut m = CursorModel::new(true);
        m.place(6, 20);
        m.expand_selection(2, 20);
        assert_eq!(m.selection(), Some(Selection { first: 2, last: 6 }));
        m.expand_selection(9, 20);
        assert_eq!(m.selection(), Some(Selection { first: 6, last: 9 }));
    }

    #[test]
    fn test_select_range_validates() {
        let mut m = CursorModel::new(true);
        assert!(m.select_range(0, 10, 10).is_err());
        assert!(m.select_range(5, 4, 10).is_err());
        assert!(m.select_range(0, 9, 10).is_ok());
        assert_eq!(m.position(), 0);
    }

    #[test]
    fn test_pane_switch_resets_nibble() {
        let mut m = CursorModel::new(true);
        m.set_pending_nibble(Some(0x4));
        m.switch_pane();
        assert_eq!(m.pane(), Pane::Ascii);
        assert_eq!(m.pending_nibble(), None);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut m = CursorModel::new(true);
        m.select_range(3, 9, 10).unwrap();
        m.set_position(10, 10);
        m.clamp_to(5);
        assert_eq!(m.position(), 5);
        assert_eq!(m.selection(), Some(Selection { first: 3, last: 4 }));
        m.clamp_to(0);
        assert_eq!(m.position(), 0);
        assert!(m.selection().is_none());
    }
}
