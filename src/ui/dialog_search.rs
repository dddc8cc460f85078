use crate::editor::Pane;
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

/// Forward search from the cursor. Tab toggles between hex and text input.
pub struct SearchDialog {
    pub input: String,
    pub kind: Pane,
}

impl SearchDialog {
    pub fn new(initial_query: String, kind: Pane) -> Self {
        Self {
            input: initial_query,
            kind,
        }
    }
}

impl Widget for SearchDialog {
    fn render(&self, f: &mut Frame, area: Rect, _app_state: &AppState, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let title = format!(" Search {} (Tab to switch) ", self.kind);
        let block = create_dialog_block(&title, theme);

        let area = input_area(area, 50);
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
            KeyCode::Tab | KeyCode::BackTab => {
                self.kind = self.kind.other();
                WidgetResult::Handled
            }
            KeyCode::Enter => {
                if self.input.is_empty() {
                    return WidgetResult::Close;
                }
                ui_state.last_search = Some((self.input.clone(), self.kind));
                match search::search(app_state.editor_mut(), &self.input, self.kind) {
                    Ok(index) => {
                        ui_state.active_view = ActiveView::Editor;
                        ui_state.set_status_message(format!("Found at 0x{index:x}"));
                    }
                    Err(e) => ui_state.set_status_message(format!("Error: {e}")),
                }
                WidgetResult::Close
            }
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
    use crate::editor::Selection;
    use crate::theme::Theme;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_search_hex_then_ascii() {
        let mut app_state = AppState::new(SystemConfig::default());
        app_state.editor_mut().set_data(b"xxABCxxABC".to_vec());
        let mut ui_state = UIState::new(Theme::default());

        let mut dialog = SearchDialog::new("41 42".to_string(), Pane::Hex);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            dialog.handle_input(enter, &mut app_state, &mut ui_state),
            WidgetResult::Close
        );
        assert_eq!(app_state.editor().selection(), Some(Selection::new(2, 3)));
        assert_eq!(app_state.editor().pane(), Pane::Hex);

        let mut dialog = SearchDialog::new("ABC".to_string(), Pane::Hex);
        dialog.handle_input(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            &mut app_state,
            &mut ui_state,
        );
        assert_eq!(dialog.kind, Pane::Ascii);
        dialog.handle_input(enter, &mut app_state, &mut ui_state);
        assert_eq!(app_state.editor().selection(), Some(Selection::new(7, 9)));
        assert_eq!(app_state.editor().pane(), Pane::Ascii);
        assert_eq!(ui_state.last_search, Some(("ABC".to_string(), Pane::Ascii)));
    }
}
