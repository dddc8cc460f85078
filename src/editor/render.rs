//! Translation of editor state into draw primitives.
//!
//! The planner never touches a real drawing surface. Hosts implement
//! [`PaintSurface`] and replay the primitive list in order.

use ratatui::style::Color;

use super::controller::Editor;
use super::cursor::{Pane, Selection};
use super::geometry::{Geometry, PixelRect};
use crate::theme::Theme;
use crate::utils::printable_ascii;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawPrimitive {
    FillRect { rect: PixelRect, color: Color },
    OutlineRect { rect: PixelRect, color: Color },
    Text { x: u32, y: u32, text: String, color: Color },
    /// Vertical line spanning `height` units from `y`.
    Line { x: u32, y: u32, height: u32, color: Color },
}

pub trait PaintSurface {
    fn draw(&mut self, primitive: &DrawPrimitive);

    fn draw_all(&mut self, primitives: &[DrawPrimitive]) {
        for primitive in primitives {
            self.draw(primitive);
        }
    }
}

/// Per-byte style override returned by a colorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteStyle {
    pub fg: Option<Color>,
    pub hex_bg: Option<Color>,
    pub ascii_bg: Option<Color>,
}

/// Called with `(index, byte)` for every visible byte.
pub type Colorizer<'a> = &'a dyn Fn(usize, u8) -> Option<ByteStyle>;

/// Colours bytes by class: nulls, control bytes, printable ASCII and
/// bytes with the high bit set.
pub fn heat_map(_index: usize, byte: u8) -> Option<ByteStyle> {
    let hex_bg = match byte {
        0x00 => Color::Rgb(0x10, 0x10, 0x10),
        0x01..=0x1f | 0x7f => Color::Rgb(0x50, 0x50, 0x50),
        0x20..=0x7e => Color::Rgb(0x20, 0x60, 0x20),
        _ => Color::Rgb(0x70, 0x70, 0x70),
    };
    Some(ByteStyle {
        fg: None,
        hex_bg: Some(hex_bg),
        ascii_bg: None,
    })
}

pub struct RenderPlanner<'a> {
    theme: &'a Theme,
    colorizer: Option<Colorizer<'a>>,
}

impl<'a> RenderPlanner<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            colorizer: None,
        }
    }

    pub fn with_colorizer(mut self, colorizer: Option<Colorizer<'a>>) -> Self {
        self.colorizer = colorizer;
        self
    }

    /// Plans a full repaint of the visible rows.
    pub fn plan(&self, editor: &Editor) -> Vec<DrawPrimitive> {
        let g = editor.geometry();
        let viewport = editor.viewport();
        let data = editor.data();
        let first_row = viewport.first_row;
        let last_row = viewport.last_row(g);
        let row_h = g.row_height();
        let height = viewport.height.max(row_h);
        let theme = self.theme;
        let mut out = Vec::new();

        out.push(DrawPrimitive::FillRect {
            rect: PixelRect::new(0, 0, g.viewport_width, height),
            color: theme.background,
        });

        for row in first_row..last_row {
            if row % 2 == 1 {
                out.push(DrawPrimitive::FillRect {
                    rect: PixelRect::new(0, self.row_y(g, row, first_row), g.viewport_width, row_h),
                    color: theme.row_band,
                });
            }
        }

        let spacer = g.metrics.hex_width;
        out.push(DrawPrimitive::FillRect {
            rect: PixelRect::new(0, 0, g.address_width + spacer, height),
            color: theme.address_bg,
        });
        for row in first_row..last_row {
            out.push(DrawPrimitive::Text {
                x: spacer / 2,
                y: self.row_y(g, row, first_row),
                text: format!("{:0width$X}", g.row_start(row), width = g.address_digits),
                color: theme.address,
            });
        }

        let start = g.row_start(first_row).min(data.len());
        let end = g.row_start(last_row).min(data.len());
        let styles: Vec<Option<ByteStyle>> = (start..end)
            .map(|i| self.colorizer.and_then(|c| c(i, data[i])))
            .collect();

        for (offset, style) in styles.iter().enumerate() {
            let Some(style) = style else { continue };
            let Some((hex, ascii)) = g.byte_rects(start + offset, first_row) else {
                continue;
            };
            if let Some(color) = style.hex_bg {
                out.push(DrawPrimitive::FillRect { rect: hex, color });
            }
            if let Some(color) = style.ascii_bg {
                out.push(DrawPrimitive::FillRect { rect: ascii, color });
            }
        }

        let selection = editor.selection();
        if let Some(sel) = selection {
            self.plan_selection(&mut out, g, sel, first_row, last_row, editor.pane());
        }

        for (offset, byte) in data[start..end].iter().enumerate() {
            let index = start + offset;
            let Some((hex, ascii)) = g.byte_rects(index, first_row) else {
                continue;
            };
            let selected = selection.is_some_and(|s| s.contains(index));
            let custom_fg = styles[offset].and_then(|s| s.fg);
            let (hex_fg, ascii_fg) = if selected {
                (theme.selection_fg, theme.selection_fg)
            } else if let Some(fg) = custom_fg {
                (fg, fg)
            } else if printable_ascii(*byte).is_some() {
                (theme.hex_bytes, theme.hex_ascii)
            } else {
                (theme.hex_bytes, theme.nonprintable)
            };
            out.push(DrawPrimitive::Text {
                x: hex.x,
                y: hex.y,
                text: format!("{byte:02X}"),
                color: hex_fg,
            });
            out.push(DrawPrimitive::Text {
                x: ascii.x,
                y: ascii.y,
                text: ascii_glyph(*byte).to_string(),
                color: ascii_fg,
            });
        }

        let lines_height = (last_row - first_row) as u32 * row_h;
        for x in g.word_dividers() {
            out.push(DrawPrimitive::Line {
                x,
                y: 0,
                height: lines_height,
                color: theme.word_divider,
            });
        }
        for x in g.pane_boundaries() {
            out.push(DrawPrimitive::Line {
                x,
                y: 0,
                height,
                color: theme.pane_border,
            });
        }

        if selection.is_none() {
            self.plan_cursor(&mut out, editor, first_row, last_row);
        }
        out
    }

    fn row_y(&self, g: &Geometry, row: usize, first_row: usize) -> u32 {
        (row - first_row) as u32 * g.row_height()
    }

    fn plan_selection(
        &self,
        out: &mut Vec<DrawPrimitive>,
        g: &Geometry,
        sel: Selection,
        first_row: usize,
        last_row: usize,
        active: Pane,
    ) {
        let (hex_color, ascii_color) = match active {
            Pane::Hex => (self.theme.selection_bg, self.theme.selection_mirror_bg),
            Pane::Ascii => (self.theme.selection_mirror_bg, self.theme.selection_bg),
        };
        let rows = g.row_of(sel.first).max(first_row)..=g.row_of(sel.last).min(last_row.saturating_sub(1));
        for row in rows {
            let row_first = sel.first.max(g.row_start(row));
            let row_last = sel.last.min(g.row_start(row) + g.columns - 1);
            if row_first > row_last {
                continue;
            }
            let (first_col, last_col) = (g.column_of(row_first), g.column_of(row_last));
            let y = self.row_y(g, row, first_row);
            let hex_x = g.hex_glyph_x(first_col);
            out.push(DrawPrimitive::FillRect {
                rect: PixelRect::new(
                    hex_x,
                    y,
                    g.hex_glyph_x(last_col) + g.metrics.hex_width - hex_x,
                    g.row_height(),
                ),
                color: hex_color,
            });
            let ascii_x = g.ascii_x(first_col);
            out.push(DrawPrimitive::FillRect {
                rect: PixelRect::new(
                    ascii_x,
                    y,
                    g.ascii_x(last_col) + g.metrics.ascii_width - ascii_x,
                    g.row_height(),
                ),
                color: ascii_color,
            });
        }
    }

    fn plan_cursor(&self, out: &mut Vec<DrawPrimitive>, editor: &Editor, first_row: usize, last_row: usize) {
        let g = editor.geometry();
        let pos = editor.position();
        let row = g.row_of(pos);
        if row < first_row || row >= last_row {
            return;
        }
        let Some((hex, ascii)) = g.byte_rects(pos, first_row) else {
            return;
        };
        let theme = self.theme;
        let (active, passive) = match editor.pane() {
            Pane::Hex => (hex, ascii),
            Pane::Ascii => (ascii, hex),
        };
        out.push(DrawPrimitive::FillRect {
            rect: active,
            color: theme.cursor_bg,
        });
        out.push(DrawPrimitive::OutlineRect {
            rect: passive,
            color: theme.cursor_bg,
        });

        let byte = editor.data().get(pos).copied();
        let pending = editor.cursor().pending_nibble().filter(|_| editor.pane() == Pane::Hex);
        if let Some(nibble) = pending {
            out.push(DrawPrimitive::Text {
                x: hex.x,
                y: hex.y,
                text: format!("{nibble:X}_"),
                color: theme.cursor_pending,
            });
        } else if let Some(byte) = byte {
            out.push(DrawPrimitive::Text {
                x: hex.x,
                y: hex.y,
                text: format!("{byte:02X}"),
                color: if editor.pane() == Pane::Hex {
                    theme.cursor_fg
                } else {
                    theme.hex_bytes
                },
            });
        }
        if let Some(byte) = byte {
            out.push(DrawPrimitive::Text {
                x: ascii.x,
                y: ascii.y,
                text: ascii_glyph(byte).to_string(),
                color: if editor.pane() == Pane::Ascii {
                    theme.cursor_fg
                } else {
                    theme.hex_ascii
                },
            });
        }
    }
}

fn ascii_glyph(byte: u8) -> char {
    printable_ascii(byte).unwrap_or('.')
}

/// Character grid surface; fills and lines are ignored, only text lands.
/// Used for plain text dumps.
#[derive(Debug, Clone)]
pub struct GridSurface {
    width: usize,
    cells: Vec<Vec<char>>,
}

impl GridSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as usize,
            cells: vec![vec![' '; width as usize]; height as usize],
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

impl PaintSurface for GridSurface {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        if let DrawPrimitive::Text { x, y, text, .. } = primitive
            && let Some(row) = self.cells.get_mut(*y as usize)
        {
            for (i, c) in text.chars().enumerate() {
                let col = *x as usize + i;
                if col < self.width {
                    row[col] = c;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned(editor: &Editor) -> Vec<DrawPrimitive> {
        RenderPlanner::new(&Theme::dark()).plan(editor)
    }

    fn grid(editor: &Editor) -> Vec<String> {
        let mut surface = GridSurface::new(80, editor.viewport().height);
        surface.draw_all(&planned(editor));
        surface.lines()
    }

    #[test]
    fn test_background_first_and_cursor_last() {
        let mut ed = Editor::new(b"hello world".to_vec(), true);
        ed.resize(80, 4);
        let prims = planned(&ed);
        assert!(matches!(
            prims.first(),
            Some(DrawPrimitive::FillRect { rect, .. }) if rect.x == 0 && rect.y == 0 && rect.width == 80
        ));
        let theme = Theme::dark();
        let (hex, _) = ed.geometry().byte_rects(0, 0).unwrap();
        assert!(prims.contains(&DrawPrimitive::FillRect {
            rect: hex,
            color: theme.cursor_bg
        }));
    }

    #[test]
    fn test_grid_shows_address_hex_and_ascii() {
        let mut ed = Editor::new(b"AB\x00".to_vec(), true);
        ed.resize(80, 2);
        let lines = grid(&ed);
        assert!(lines[0].starts_with(" 0000"));
        assert!(lines[0].contains("41 42 00"));
        assert!(lines[0].ends_with("AB."));
    }

    #[test]
    fn test_no_cursor_while_selecting() {
        let mut ed = Editor::new(vec![0x41; 40], true);
        ed.resize(80, 4);
        ed.select_range(2, 20).unwrap();
        let theme = Theme::dark();
        let prims = planned(&ed);
        assert!(!prims.iter().any(|p| matches!(
            p,
            DrawPrimitive::FillRect { color, .. } if *color == theme.cursor_bg
        )));
        // Two rows of selection in both panes.
        let active = prims
            .iter()
            .filter(|p| matches!(p, DrawPrimitive::FillRect { color, .. } if *color == theme.selection_bg))
            .count();
        let mirror = prims
            .iter()
            .filter(|p| matches!(p, DrawPrimitive::FillRect { color, .. } if *color == theme.selection_mirror_bg))
            .count();
        assert_eq!(active, 2);
        assert_eq!(mirror, 2);
    }

    #[test]
    fn test_pending_nibble_preview() {
        let mut ed = Editor::new(b"abc".to_vec(), true);
        ed.resize(80, 2);
        ed.dispatch(crate::editor::Intent::TypeChar('7')).unwrap();
        let lines = grid(&ed);
        assert!(lines[0].contains("7_ 62 63"));
    }

    #[test]
    fn test_colorizer_backgrounds_drawn_before_glyphs() {
        let mut ed = Editor::new(vec![0x00, 0x41], true);
        ed.resize(80, 2);
        let theme = Theme::dark();
        let colorizer: Colorizer = &heat_map;
        let prims = RenderPlanner::new(&theme)
            .with_colorizer(Some(colorizer))
            .plan(&ed);
        let fill = prims
            .iter()
            .position(|p| matches!(p, DrawPrimitive::FillRect { color, .. } if *color == Color::Rgb(0x10, 0x10, 0x10)))
            .unwrap();
        let glyph = prims
            .iter()
            .position(|p| matches!(p, DrawPrimitive::Text { text, .. } if text == "00"))
            .unwrap();
        assert!(fill < glyph);
    }

    #[test]
    fn test_only_visible_rows_planned() {
        let mut ed = Editor::new(vec![0u8; 1000], true);
        ed.resize(80, 3);
        ed.dispatch(crate::editor::Intent::Scroll(5)).unwrap();
        let lines = grid(&ed);
        assert!(lines[0].starts_with(&format!(" {:04X}", 5 * ed.geometry().columns)));
        assert_eq!(lines.len(), 3);
    }
}
