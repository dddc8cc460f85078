use crate::search;
use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult, create_dialog_block, input_area};
use crate::ui_state::{ActiveView, UIState};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Clear, Paragraph},
};

/// Prompts for an offset (`0x1f`, `x1f` or decimal) and moves the cursor there.
pub struct JumpDialog {
    pub input: String,
}

impl JumpDialog {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }
}

impl Default for JumpDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for JumpDialog {
    fn render(&self, f: &mut Frame, area: Rect, app_state: &AppState, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let title = format!(" Jump To Offset (0..{}) ", app_state.editor().len());
        let block = create_dialog_block(&title, theme);

        let area = input_area(area, 30);
        f.render_widget(Clear, area);

        let input = Paragraph::new(self.input.clone()).block(block).style(
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(input, area);
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        ui_state: &mut UIState,
    ) -> WidgetResult {
        match key.code {
            KeyCode::Esc => {
                ui_state.set_status_message("Ready");
                WidgetResult::Close
            }
            KeyCode::Enter => match search::jump(app_state.editor_mut(), &self.input) {
                Ok(index) => {
                    ui_state.active_view = ActiveView::Editor;
                    ui_state.set_status_message(format!("Jumped to 0x{index:x}"));
                    WidgetResult::Close
                }
                Err(e) => {
                    ui_state.set_status_message(format!("Error: {e}"));
                    WidgetResult::Handled
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
                WidgetResult::Handled
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                WidgetResult::Handled
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

    fn type_str(dialog: &mut JumpDialog, s: &str, app: &mut AppState, ui: &mut UIState) {
        for c in s.chars() {
            dialog.handle_input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), app, ui);
        }
    }

    #[test]
    fn test_jump_and_error() {
        let mut app_state = AppState::new(SystemConfig::default());
        app_state.editor_mut().set_data(vec![0; 64]);
        let mut ui_state = UIState::new(Theme::default());
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        let mut dialog = JumpDialog::new();
        type_str(&mut dialog, "0x40", &mut app_state, &mut ui_state);
        let res = dialog.handle_input(enter, &mut app_state, &mut ui_state);
        assert_eq!(res, WidgetResult::Handled);
        assert!(ui_state.status_message.starts_with("Error"));

        dialog.input.clear();
        type_str(&mut dialog, "0x3f", &mut app_state, &mut ui_state);
        let res = dialog.handle_input(enter, &mut app_state, &mut ui_state);
        assert_eq!(res, WidgetResult::Close);
        assert_eq!(app_state.editor().position(), 63);
    }
}
