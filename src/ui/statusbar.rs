use crate::editor::Editor;
use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::UIState;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

/// Right-hand status text: offset, selection, edit mode and pane.
pub fn editor_info(editor: &Editor) -> String {
    let selection = match editor.selection() {
        Some(sel) => format!("{} bytes ({})", sel.len(), sel),
        None => "none".to_string(),
    };
    format!(
        "Offset: {}/{} | Selection: {} | {} | {}",
        editor.position(),
        editor.len(),
        selection,
        if editor.insert_mode() { "INS" } else { "OVR" },
        editor.pane()
    )
}

pub struct StatusBar;

impl Widget for StatusBar {
    fn render(&self, f: &mut Frame, area: Rect, app_state: &AppState, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let fg = if ui_state.status_message.starts_with("Error") {
            theme.error_fg
        } else {
            theme.status_bar_fg
        };
        let status_msg = Paragraph::new(Span::styled(
            format!(" {}", ui_state.status_message),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.status_bar_bg).fg(fg));
        f.render_widget(status_msg, chunks[0]);

        let info = format!("{} ", editor_info(app_state.editor()));
        let info_widget = Paragraph::new(info)
            .alignment(Alignment::Right)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg));
        f.render_widget(info_widget, chunks[1]);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_error_message_uses_error_colour() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let app_state = AppState::new(SystemConfig::default());
        let mut ui_state = UIState::new(Theme::default());

        ui_state.set_status_message("Error: invalid offset");
        terminal
            .draw(|f| {
                let area = f.area();
                StatusBar.render(f, area, &app_state, &mut ui_state);
            })
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(1, 0)].fg, ui_state.theme.error_fg);

        ui_state.set_status_message("Ready");
        terminal
            .draw(|f| {
                let area = f.area();
                StatusBar.render(f, area, &app_state, &mut ui_state);
            })
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(1, 0)].fg, ui_state.theme.status_bar_fg);
    }

    #[test]
    fn test_editor_info() {
        let mut editor = Editor::new(vec![0; 32], true);
        editor.move_to(5, 0, false);
        assert_eq!(
            editor_info(&editor),
            "Offset: 5/32 | Selection: none | INS | HEX"
        );
        editor.select_range(4, 7).unwrap();
        editor.set_insert_mode(false);
        assert_eq!(
            editor_info(&editor),
            "Offset: 4/32 | Selection: 4 bytes (4..7) | OVR | HEX"
        );
    }
}
