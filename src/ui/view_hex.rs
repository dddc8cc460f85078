use crate::editor::render::heat_map;
use crate::editor::{Colorizer, DrawPrimitive, EditResult, PaintSurface, RenderPlanner};
use crate::keymap::Action;
use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::{ActiveView, UIState};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Rasterizes draw primitives into a ratatui buffer, one unit per cell,
/// relative to `area`. Anything outside `area` is clipped.
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }

    fn cell_at(&self, x: u32, y: u32) -> Option<(u16, u16)> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        (x < self.area.width && y < self.area.height).then(|| (self.area.x + x, self.area.y + y))
    }

    fn for_each_cell(&mut self, x: u32, y: u32, width: u32, height: u32, f: impl Fn(&mut ratatui::buffer::Cell)) {
        for dy in 0..height {
            for dx in 0..width {
                if let Some(pos) = self.cell_at(x + dx, y + dy)
                    && let Some(cell) = self.buf.cell_mut(pos)
                {
                    f(cell);
                }
            }
        }
    }
}

impl PaintSurface for BufferSurface<'_> {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        match primitive {
            DrawPrimitive::FillRect { rect, color } => {
                self.for_each_cell(rect.x, rect.y, rect.width, rect.height, |cell| {
                    cell.set_bg(*color);
                });
            }
            DrawPrimitive::OutlineRect { rect, color } => {
                self.for_each_cell(rect.x, rect.y, rect.width, rect.height, |cell| {
                    cell.set_style(
                        Style::default()
                            .fg(*color)
                            .add_modifier(Modifier::UNDERLINED),
                    );
                });
            }
            DrawPrimitive::Text { x, y, text, color } => {
                if let Some((cx, cy)) = self.cell_at(*x, *y) {
                    let room = (self.area.x + self.area.width - cx) as usize;
                    self.buf
                        .set_stringn(cx, cy, text, room, Style::default().fg(*color));
                }
            }
            DrawPrimitive::Line {
                x,
                y,
                height,
                color,
            } => {
                self.for_each_cell(*x, *y, 1, *height, |cell| {
                    cell.set_symbol("│").set_fg(*color);
                });
            }
        }
    }
}

pub struct HexView;

impl Widget for HexView {
    fn render(&self, f: &mut Frame, area: Rect, app_state: &AppState, ui_state: &mut UIState) {
        let theme = ui_state.theme;
        let is_active = ui_state.active_view == ActiveView::Editor;
        let border_style = if is_active {
            Style::default().fg(theme.border_active)
        } else {
            Style::default().fg(theme.border_inactive)
        };

        let title = format!(
            " {}{} ",
            app_state.document.display_name(),
            if app_state.is_dirty() { " *" } else { "" }
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(theme.background).fg(theme.foreground));
        let inner = block.inner(area);
        f.render_widget(block, area);
        ui_state.hex_view_area = inner;

        let colorizer: Colorizer = &heat_map;
        let primitives = RenderPlanner::new(&theme)
            .with_colorizer(ui_state.heat_map.then_some(colorizer))
            .plan(app_state.editor());
        BufferSurface::new(f.buffer_mut(), inner).draw_all(&primitives);
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        ui_state: &mut UIState,
    ) -> WidgetResult {
        let Some(action) = ui_state.keymap.lookup(&key) else {
            return WidgetResult::Ignored;
        };
        let Action::Edit(intent) = action else {
            return WidgetResult::Action(action);
        };
        match app_state.editor_mut().dispatch(intent) {
            Ok(EditResult::Handled) => WidgetResult::Handled,
            Ok(EditResult::Ignored) => WidgetResult::Ignored,
            Err(e) => {
                log::warn!("Edit {:?} refused: {}", intent, e);
                ui_state.set_status_message(format!("Error: {e}"));
                WidgetResult::Handled
            }
        }
    }
}
