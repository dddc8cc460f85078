use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::UIState;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct InspectorView;

impl InspectorView {
    pub fn height(app_state: &AppState) -> u16 {
        app_state.inspector.enabled().len() as u16 + 2
    }
}

impl Widget for InspectorView {
    fn render(&self, f: &mut Frame, area: Rect, app_state: &AppState, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_inactive))
            .title(format!(
                " Data Inspector ({}) ",
                app_state.inspector.endian.label()
            ))
            .style(Style::default().bg(theme.background).fg(theme.foreground));

        let lines: Vec<Line> = app_state
            .inspector
            .rows()
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(format!("{:>8}: ", row.label), Style::default().fg(theme.address)),
                    Span::styled(
                        row.value.clone().unwrap_or_else(|| "-".to_string()),
                        Style::default().fg(theme.hex_bytes),
                    ),
                ])
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn handle_input(
        &mut self,
        _key: KeyEvent,
        _app_state: &mut AppState,
        _ui_state: &mut UIState,
    ) -> WidgetResult {
        WidgetResult::Ignored
    }
}
