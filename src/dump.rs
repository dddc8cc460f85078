//! Headless text dump through the same geometry and planner as the editor.

use anyhow::Result;
use std::io::Write;

use crate::editor::{Editor, GridSurface, Intent, PaintSurface, RenderPlanner};
use crate::theme::Theme;

const PAGE_ROWS: usize = 256;

/// Writes `data` as address/hex/ascii rows laid out for `width` columns.
pub fn write_dump(data: Vec<u8>, width: u32, out: &mut impl Write) -> Result<()> {
    let mut editor = Editor::new(data, false);
    editor.resize(width, PAGE_ROWS as u32);
    let g = *editor.geometry();
    let rows = editor.len().div_ceil(g.columns).max(1);
    let theme = Theme::default();
    let planner = RenderPlanner::new(&theme);

    let mut first_row = 0;
    while first_row < rows {
        let mut surface = GridSurface::new(width, PAGE_ROWS as u32 * g.row_height());
        surface.draw_all(&planner.plan(&editor));
        for line in surface.lines().iter().take(PAGE_ROWS.min(rows - first_row)) {
            writeln!(out, "{line}")?;
        }
        first_row += PAGE_ROWS;
        editor.dispatch(Intent::Scroll(PAGE_ROWS as isize))?;
    }
    Ok(())
}
