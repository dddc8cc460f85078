//! Layout of the dual-pane dump: which byte lives in which row and column,
//! and where that cell is in pixel space.
//!
//! A "pixel" is whatever unit the paint surface works in. The terminal
//! front-end uses one cell per unit with [`FontMetrics::TERMINAL`].

use super::cursor::Pane;

/// Glyph widths used for layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Width of a two-digit hex byte.
    pub hex_width: u32,
    /// Width of a single ASCII glyph.
    pub ascii_width: u32,
    pub text_height: u32,
}

impl FontMetrics {
    pub const TERMINAL: FontMetrics = FontMetrics {
        hex_width: 2,
        ascii_width: 1,
        text_height: 1,
    };
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::TERMINAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub metrics: FontMetrics,
    pub viewport_width: u32,
    pub data_size: usize,
    pub columns: usize,
    pub rows: usize,
    pub address_digits: usize,
    pub address_width: u32,
    pub hex_left: u32,
    pub hex_right: u32,
    pub ascii_left: u32,
    pub ascii_right: u32,
}

impl Geometry {
    pub fn recompute(viewport_width: u32, metrics: FontMetrics, data_size: usize) -> Self {
        let spacer = metrics.hex_width;
        let address_digits = hex_digits(data_size).max(4);
        let address_width = address_digits as u32 * metrics.ascii_width;

        let chrome = address_width + spacer * 4;
        let per_column = metrics.hex_width + metrics.ascii_width * 2;
        let columns = if per_column == 0 {
            1
        } else {
            (viewport_width.saturating_sub(chrome) / per_column).max(1) as usize
        };
        let rows = data_size / columns + 1;

        let hex_left = address_width + spacer * 2;
        let hex_right = hex_left + columns as u32 * (metrics.hex_width + metrics.ascii_width);
        let ascii_left = hex_right + spacer;
        let ascii_right = ascii_left + columns as u32 * metrics.ascii_width;

        Self {
            metrics,
            viewport_width,
            data_size,
            columns,
            rows,
            address_digits,
            address_width,
            hex_left,
            hex_right,
            ascii_left,
            ascii_right,
        }
    }

    pub fn row_height(&self) -> u32 {
        self.metrics.text_height.max(1)
    }

    /// Horizontal stride of one byte in the hex pane (digits plus gap).
    pub fn hex_column_width(&self) -> u32 {
        self.metrics.hex_width + self.metrics.ascii_width
    }

    fn hex_glyph_offset(&self) -> u32 {
        self.metrics.hex_width / 2
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    pub fn column_of(&self, index: usize) -> usize {
        index % self.columns
    }

    pub fn row_start(&self, row: usize) -> usize {
        row * self.columns
    }

    /// Left edge of the hex cell (gap included) for a column.
    pub fn hex_cell_x(&self, column: usize) -> u32 {
        self.hex_left + column as u32 * self.hex_column_width()
    }

    /// Left edge of the two hex digits for a column.
    pub fn hex_glyph_x(&self, column: usize) -> u32 {
        self.hex_cell_x(column) + self.hex_glyph_offset()
    }

    pub fn ascii_x(&self, column: usize) -> u32 {
        self.ascii_left + column as u32 * self.metrics.ascii_width
    }

    /// Glyph rectangles of a byte in both panes, relative to `first_row`.
    /// Returns `None` when the byte sits above the first visible row.
    pub fn byte_rects(&self, index: usize, first_row: usize) -> Option<(PixelRect, PixelRect)> {
        let row = self.row_of(index);
        if row < first_row {
            return None;
        }
        let y = (row - first_row) as u32 * self.row_height();
        let column = self.column_of(index);
        Some((
            PixelRect::new(
                self.hex_glyph_x(column),
                y,
                self.metrics.hex_width,
                self.row_height(),
            ),
            PixelRect::new(
                self.ascii_x(column),
                y,
                self.metrics.ascii_width,
                self.row_height(),
            ),
        ))
    }

    /// X positions of the three pane boundaries: left of the hex pane,
    /// between the panes and right of the ascii pane.
    pub fn pane_boundaries(&self) -> [u32; 3] {
        let half = self.metrics.hex_width / 2;
        [
            self.hex_left.saturating_sub(half),
            self.hex_right + half,
            self.ascii_right + half,
        ]
    }

    /// X positions of the dividers drawn every 4 bytes inside the hex pane.
    pub fn word_dividers(&self) -> Vec<u32> {
        (1..)
            .map(|n| n * 4)
            .take_while(|&col| col < self.columns)
            .map(|col| self.hex_cell_x(col))
            .collect()
    }

    /// Pane under an x coordinate, if any.
    pub fn pane_at(&self, x: u32) -> Option<Pane> {
        let hex_end = self.hex_right.saturating_sub(self.metrics.ascii_width / 2);
        if (self.hex_left..=hex_end).contains(&x) {
            Some(Pane::Hex)
        } else if (self.ascii_left..=self.ascii_right).contains(&x) {
            Some(Pane::Ascii)
        } else {
            None
        }
    }

    /// Maps a pixel position to a cursor index in `[0, data_size]`.
    ///
    /// Clicks left of the pane resolve to column 0, clicks right of it to
    /// the last column, and rows past the data resolve to the virtual end
    /// position.
    pub fn pixel_to_index(&self, x: u32, y: u32, pane: Pane, first_row: usize) -> usize {
        let (left, right, column_width) = match pane {
            Pane::Hex => (self.hex_left, self.hex_right, self.hex_column_width()),
            Pane::Ascii => (self.ascii_left, self.ascii_right, self.metrics.ascii_width),
        };

        let column = if x < left {
            0
        } else if x >= right || column_width == 0 {
            self.columns - 1
        } else {
            (((x - left) / column_width) as usize).min(self.columns - 1)
        };

        let row = first_row + (y / self.row_height()) as usize;
        if row >= self.rows {
            return self.data_size;
        }
        (row * self.columns + column).min(self.data_size)
    }
}

/// Vertical scroll state of the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub first_row: usize,
    pub height: u32,
}

impl Viewport {
    pub fn visible_rows(&self, geometry: &Geometry) -> usize {
        ((self.height / geometry.row_height()) as usize).max(1)
    }

    /// Exclusive end of the visible row range, clipped to the data.
    pub fn last_row(&self, geometry: &Geometry) -> usize {
        (self.first_row + self.visible_rows(geometry)).min(geometry.rows)
    }

    pub fn scroll_to_row(&mut self, row: usize, geometry: &Geometry) {
        let visible = self.visible_rows(geometry);
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row + visible {
            self.first_row = row + 1 - visible;
        }
        self.clamp(geometry);
    }

    pub fn scroll_by(&mut self, rows: isize, geometry: &Geometry) {
        self.first_row = self.first_row.saturating_add_signed(rows);
        self.clamp(geometry);
    }

    pub fn clamp(&mut self, geometry: &Geometry) {
        self.first_row = self.first_row.min(geometry.rows.saturating_sub(1));
    }
}

fn hex_digits(value: usize) -> usize {
    if value == 0 {
        1
    } else {
        (usize::BITS - value.leading_zeros()).div_ceil(4) as usize
    }
}
