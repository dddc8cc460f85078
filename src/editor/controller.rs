use super::buffer::{ByteBuffer, EditMode, Target};
use super::clipboard::{Clipboard, MemoryClipboard};
use super::cursor::{CursorModel, Pane, Selection};
use super::geometry::{FontMetrics, Geometry, Viewport};
use super::notify::{Notification, Notifications};
use crate::error::{EditorError, EditorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    RowStart,
    RowEnd,
    BufferStart,
    BufferEnd,
}

/// Toolkit-independent input intents understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move { motion: Motion, extend: bool },
    TypeChar(char),
    Backspace,
    Delete,
    SwitchPane,
    SelectAll,
    ClearSelection,
    Copy,
    Cut,
    Paste,
    ToggleInsertMode,
    PointerDown { x: u32, y: u32, extend: bool },
    PointerDrag { x: u32, y: u32 },
    PointerUp { x: u32, y: u32 },
    Scroll(isize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    Ignored,
    Handled,
}

/// One open document's editing engine: buffer, cursor model, layout and
/// the notifications raised while applying intents.
pub struct Editor {
    buffer: ByteBuffer,
    cursor: CursorModel,
    metrics: FontMetrics,
    geometry: Geometry,
    viewport: Viewport,
    notifications: Notifications,
    clipboard: Box<dyn Clipboard>,
    dragging: bool,
    /// The pending nibble already sits in a provisional byte at the cursor.
    nibble_in_buffer: bool,
}

impl Editor {
    pub fn new(data: Vec<u8>, insert_mode: bool) -> Self {
        Self::with_clipboard(data, insert_mode, Box::new(MemoryClipboard::default()))
    }

    pub fn with_clipboard(data: Vec<u8>, insert_mode: bool, clipboard: Box<dyn Clipboard>) -> Self {
        let metrics = FontMetrics::default();
        let geometry = Geometry::recompute(80, metrics, data.len());
        Self {
            buffer: ByteBuffer::new(data),
            cursor: CursorModel::new(insert_mode),
            metrics,
            geometry,
            viewport: Viewport {
                first_row: 0,
                height: 24,
            },
            notifications: Notifications::default(),
            clipboard,
            dragging: false,
            nibble_in_buffer: false,
        }
    }

    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    pub fn data(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn cursor(&self) -> &CursorModel {
        &self.cursor
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn pane(&self) -> Pane {
        self.cursor.pane()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.cursor.selection()
    }

    pub fn insert_mode(&self) -> bool {
        self.cursor.insert_mode()
    }

    pub fn set_insert_mode(&mut self, insert_mode: bool) {
        self.cursor.set_insert_mode(insert_mode);
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Lays the dump out for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.geometry.viewport_width != width {
            self.geometry = Geometry::recompute(width, self.metrics, self.buffer.len());
        }
        self.viewport.height = height;
        self.scroll_to_index(self.cursor.position());
    }

    pub fn set_metrics(&mut self, metrics: FontMetrics) {
        self.metrics = metrics;
        self.geometry = Geometry::recompute(self.geometry.viewport_width, metrics, self.buffer.len());
        self.viewport.clamp(&self.geometry);
    }

    /// Replaces the whole content, resetting cursor and selection.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.buffer.set_data(data);
        self.cursor.place(0, self.buffer.len());
        self.viewport.first_row = 0;
        self.after_data_change();
        self.notifications.cursor_moved();
    }

    pub fn scroll_to_index(&mut self, index: usize) {
        let row = self.geometry.row_of(index);
        self.viewport.scroll_to_row(row, &self.geometry);
    }

    pub fn set_pane(&mut self, pane: Pane) {
        self.cursor.set_pane(pane);
    }

    pub fn clear_selection(&mut self) {
        if self.cursor.selection().is_some() {
            self.cursor.clear_selection();
            self.notifications.cursor_moved();
        }
    }

    /// Moves the cursor to `index + delta`, optionally extending the
    /// selection. See [`CursorModel::move_to`].
    pub fn move_to(&mut self, index: usize, delta: isize, expand: bool) -> Option<usize> {
        let moved = self.cursor.move_to(index, delta, expand, self.buffer.len())?;
        self.scroll_to_index(moved);
        self.notifications.cursor_moved();
        Some(moved)
    }

    pub fn select_range(&mut self, first: usize, last: usize) -> EditorResult<()> {
        self.cursor.select_range(first, last, self.buffer.len())?;
        self.scroll_to_index(first);
        self.notifications.cursor_moved();
        Ok(())
    }

    pub fn expand_selection(&mut self, index: usize) {
        self.cursor.expand_selection(index, self.buffer.len());
        self.notifications.cursor_moved();
    }

    /// Writes `bytes` at `index`, or over the whole selection when one is
    /// active (the index is ignored then). Point edits honour the insert
    /// flag unless `force_overwrite` is set; an empty `bytes` deletes.
    ///
    /// Returns the index where the change was applied.
    pub fn set_value(
        &mut self,
        index: Option<usize>,
        bytes: &[u8],
        force_overwrite: bool,
    ) -> EditorResult<usize> {
        let size = self.buffer.len();
        let (target, mode) = match (self.cursor.selection(), index) {
            (Some(sel), _) => (Target::Range(sel.first..=sel.last), EditMode::Overwrite),
            (None, Some(at)) => {
                if at > size {
                    return Err(EditorError::OutOfRange { index: at, size });
                }
                let overwrite = !self.cursor.insert_mode() || bytes.is_empty() || force_overwrite;
                // Nothing to overwrite past the last byte: writing there appends.
                if overwrite && !(at == size && !bytes.is_empty()) {
                    (Target::Point(at), EditMode::Overwrite)
                } else {
                    (Target::Point(at), EditMode::Insert)
                }
            }
            (None, None) => {
                return Err(EditorError::InvalidInput(
                    "no selection or index to edit".to_string(),
                ));
            }
        };

        let at = self.buffer.replace(target, bytes, mode)?;
        self.cursor.clear_selection();
        self.after_data_change();
        Ok(at)
    }

    fn after_data_change(&mut self) {
        let size = self.buffer.len();
        if self.geometry.data_size != size {
            self.geometry = Geometry::recompute(self.geometry.viewport_width, self.metrics, size);
        }
        self.cursor.clamp_to(size);
        self.viewport.clamp(&self.geometry);
        self.notifications.data_changed();
    }

    pub fn dispatch(&mut self, intent: Intent) -> EditorResult<EditResult> {
        let handled = match intent {
            Intent::Move { motion, extend } => self.apply_motion(motion, extend),
            Intent::TypeChar(c) => return self.type_char(c),
            Intent::Backspace => return self.backspace(),
            Intent::Delete => return self.delete(),
            Intent::SwitchPane => {
                self.cursor.switch_pane();
                true
            }
            Intent::SelectAll => self.select_all(),
            Intent::ClearSelection => {
                let had = self.selection().is_some();
                self.clear_selection();
                had
            }
            Intent::Copy => self.copy(),
            Intent::Cut => self.cut(),
            Intent::Paste => self.paste(),
            Intent::ToggleInsertMode => {
                let mode = !self.cursor.insert_mode();
                self.cursor.set_insert_mode(mode);
                true
            }
            Intent::PointerDown { x, y, extend } => self.pointer_down(x, y, extend),
            Intent::PointerDrag { x, y } => self.pointer_drag(x, y),
            Intent::PointerUp { x, y } => self.pointer_up(x, y),
            Intent::Scroll(rows) => {
                self.viewport.scroll_by(rows, &self.geometry);
                true
            }
        };
        Ok(if handled {
            EditResult::Handled
        } else {
            EditResult::Ignored
        })
    }

    fn apply_motion(&mut self, motion: Motion, extend: bool) -> bool {
        let pos = self.cursor.position();
        let size = self.buffer.len();
        let columns = self.geometry.columns as isize;
        let delta = match motion {
            Motion::Left => -1,
            Motion::Right => 1,
            Motion::Up => -columns,
            Motion::Down => columns,
            _ => {
                let page = (self.viewport.visible_rows(&self.geometry) * self.geometry.columns) as isize;
                let row_start = self.geometry.row_start(self.geometry.row_of(pos));
                let target = match motion {
                    Motion::PageUp => pos.saturating_add_signed(-page),
                    Motion::PageDown => pos.saturating_add_signed(page).min(size),
                    Motion::RowStart => row_start,
                    Motion::RowEnd => (row_start + self.geometry.columns - 1).min(size),
                    Motion::BufferStart => 0,
                    _ => size,
                };
                return if extend {
                    self.move_to(pos, target as isize - pos as isize, true).is_some()
                } else {
                    self.move_to(target, 0, false).is_some()
                };
            }
        };
        self.move_to(pos, delta, extend).is_some()
    }

    fn type_char(&mut self, c: char) -> EditorResult<EditResult> {
        match self.cursor.pane() {
            Pane::Ascii => self.type_ascii(c),
            Pane::Hex => self.type_hex(c),
        }
    }

    fn type_ascii(&mut self, c: char) -> EditorResult<EditResult> {
        if !(c.is_ascii_graphic() || c == ' ') {
            return Ok(EditResult::Ignored);
        }
        self.cursor.set_pending_nibble(None);
        let at = self.set_value(Some(self.cursor.position()), &[c as u8], false)?;
        self.move_to(at, 1, false);
        Ok(EditResult::Handled)
    }

    fn type_hex(&mut self, c: char) -> EditorResult<EditResult> {
        let Some(nibble) = c.to_digit(16).map(|d| d as u8) else {
            return Ok(EditResult::Ignored);
        };

        if self.cursor.selection().is_some() {
            // The selection collapses into one byte holding the high nibble,
            // which the next digit completes.
            let at = self.set_value(None, &[nibble], false)?;
            self.cursor.set_position(at, self.buffer.len());
            self.cursor.set_pending_nibble(Some(nibble));
            self.nibble_in_buffer = true;
            self.notifications.cursor_moved();
            return Ok(EditResult::Handled);
        }

        match self.cursor.pending_nibble() {
            None => {
                self.cursor.set_pending_nibble(Some(nibble));
                self.nibble_in_buffer = false;
            }
            Some(high) => {
                // Insert mode inserts the completed byte unless a selection
                // already left a provisional one in place.
                let value = (high << 4) | nibble;
                let at = self.set_value(Some(self.cursor.position()), &[value], self.nibble_in_buffer)?;
                self.nibble_in_buffer = false;
                self.cursor.set_pending_nibble(None);
                self.move_to(at, 1, false);
            }
        }
        Ok(EditResult::Handled)
    }

    fn backspace(&mut self) -> EditorResult<EditResult> {
        self.cursor.set_pending_nibble(None);
        if self.cursor.selection().is_some() {
            let at = self.set_value(None, &[], false)?;
            self.move_to(at, 0, false);
            return Ok(EditResult::Handled);
        }
        let pos = self.cursor.position();
        if pos == 0 {
            return Ok(EditResult::Ignored);
        }
        self.set_value(Some(pos - 1), &[], false)?;
        self.move_to(pos, -1, false);
        Ok(EditResult::Handled)
    }

    fn delete(&mut self) -> EditorResult<EditResult> {
        self.cursor.set_pending_nibble(None);
        if self.cursor.selection().is_some() {
            let at = self.set_value(None, &[], false)?;
            self.move_to(at, 0, false);
            return Ok(EditResult::Handled);
        }
        let pos = self.cursor.position();
        if pos >= self.buffer.len() {
            return Ok(EditResult::Ignored);
        }
        self.set_value(Some(pos), &[], false)?;
        Ok(EditResult::Handled)
    }

    pub fn select_all(&mut self) -> bool {
        let size = self.buffer.len();
        size > 0 && self.select_range(0, size - 1).is_ok()
    }

    /// Places the selected bytes on the clipboard.
    pub fn copy(&mut self) -> bool {
        let Some(sel) = self.cursor.selection() else {
            return false;
        };
        match self.buffer.read(sel.first..sel.last + 1) {
            Ok(bytes) => self.clipboard.set(bytes),
            Err(_) => false,
        }
    }

    pub fn cut(&mut self) -> bool {
        let Some(sel) = self.cursor.selection() else {
            return false;
        };
        if !self.copy() {
            return false;
        }
        if self.set_value(None, &[], false).is_err() {
            return false;
        }
        self.move_to(sel.first, 0, false);
        true
    }

    /// Writes the clipboard content at the cursor (or over the selection).
    pub fn paste(&mut self) -> bool {
        let Some(data) = self.clipboard.get().filter(|d| !d.is_empty()) else {
            return false;
        };
        self.cursor.set_pending_nibble(None);
        let had_selection = self.cursor.selection().is_some();
        match self.set_value(Some(self.cursor.position()), &data, false) {
            Ok(at) => {
                if had_selection {
                    self.move_to(at, 0, false);
                }
                true
            }
            Err(_) => false,
        }
    }

    fn pointer_index(&self, x: u32, y: u32, pane: Pane) -> usize {
        self.geometry
            .pixel_to_index(x, y, pane, self.viewport.first_row)
    }

    fn pointer_down(&mut self, x: u32, y: u32, extend: bool) -> bool {
        self.cursor.set_pending_nibble(None);
        let size = self.buffer.len();
        if self.dragging || extend {
            let index = self.pointer_index(x, y, self.cursor.pane());
            self.cursor.expand_selection(index, size);
            self.cursor.set_position(index, size);
            self.notifications.cursor_moved();
            return true;
        }
        let Some(pane) = self.geometry.pane_at(x) else {
            return false;
        };
        self.cursor.set_pane(pane);
        let index = self.pointer_index(x, y, pane);
        self.cursor.place(index, size);
        self.notifications.cursor_moved();
        true
    }

    fn pointer_drag(&mut self, x: u32, y: u32) -> bool {
        self.dragging = true;
        let size = self.buffer.len();
        let index = self.pointer_index(x, y, self.cursor.pane());
        self.cursor.expand_selection(index, size);
        self.cursor.set_position(index, size);
        self.scroll_to_index(index);
        self.notifications.cursor_moved();
        true
    }

    fn pointer_up(&mut self, x: u32, y: u32) -> bool {
        self.dragging = false;
        if self.cursor.selection().is_some() {
            return false;
        }
        let index = self.pointer_index(x, y, self.cursor.pane());
        if index < self.buffer.len() && index != self.cursor.position() {
            self.cursor.set_position(index, self.buffer.len());
            self.notifications.cursor_moved();
            return true;
        }
        false
    }
}
