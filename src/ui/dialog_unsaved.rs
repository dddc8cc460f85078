use crate::events::actions::execute_action;
use crate::keymap::Action;
use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult, create_dialog_block};
use crate::ui_state::UIState;
use crate::utils::centered_fixed_rect;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

/// Shown before an action that would drop the edited buffer.
pub struct UnsavedChangesDialog {
    document: String,
    action: Action,
}

impl UnsavedChangesDialog {
    pub fn new(document: impl Into<String>, action: Action) -> Self {
        Self {
            document: document.into(),
            action,
        }
    }

    fn question(&self) -> &'static str {
        match self.action {
            Action::Quit => "Quit without saving?",
            Action::New => "Start an empty buffer without saving?",
            Action::Open => "Open another file without saving?",
            _ => "Continue without saving?",
        }
    }
}

impl Widget for UnsavedChangesDialog {
    fn render(&self, f: &mut Frame, area: Rect, _app_state: &AppState, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let headline = format!("{} has unsaved changes.", self.document);
        let width = (headline.len().max(self.question().len()) as u16 + 6).max(40);
        let area = centered_fixed_rect(width, 6, area);

        let key = Style::default()
            .fg(theme.highlight_fg)
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled(headline, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(self.question()),
            Line::default(),
            Line::from(vec![
                Span::styled("[y]", key),
                Span::raw(" discard  "),
                Span::styled("[n]", key),
                Span::raw(" keep editing"),
            ]),
        ];

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(create_dialog_block(" Unsaved Changes ", theme)),
            area,
        );
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        ui_state: &mut UIState,
    ) -> WidgetResult {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                log::info!("Discarding unsaved changes to {}", self.document);
                execute_action(app_state, ui_state, self.action);
                WidgetResult::Close
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                ui_state.set_status_message("Kept unsaved changes");
                WidgetResult::Close
            }
            _ => WidgetResult::Handled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::theme::Theme;
    use crossterm::event::KeyModifiers;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_answers() {
        let mut app_state = AppState::new(SystemConfig::default());
        let mut ui_state = UIState::new(Theme::default());

        let mut dialog = UnsavedChangesDialog::new("notes.bin", Action::Quit);
        assert_eq!(dialog.handle_input(press(KeyCode::Char('x')), &mut app_state, &mut ui_state), WidgetResult::Handled);
        assert_eq!(dialog.handle_input(press(KeyCode::Esc), &mut app_state, &mut ui_state), WidgetResult::Close);
        assert!(!ui_state.should_quit);
        assert_eq!(ui_state.status_message, "Kept unsaved changes");

        assert_eq!(dialog.handle_input(press(KeyCode::Char('y')), &mut app_state, &mut ui_state), WidgetResult::Close);
        assert!(ui_state.should_quit);
    }

    #[test]
    fn test_render_names_document() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let app_state = AppState::new(SystemConfig::default());
        let mut ui_state = UIState::new(Theme::default());
        let dialog = UnsavedChangesDialog::new("notes.bin", Action::Open);

        terminal
            .draw(|f| {
                let area = f.area();
                dialog.render(f, area, &app_state, &mut ui_state);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..20)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(text.contains("notes.bin has unsaved changes."));
        assert!(text.contains("Open another file without saving?"));
    }
}
