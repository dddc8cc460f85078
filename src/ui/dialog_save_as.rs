use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult, create_dialog_block, input_area};
use crate::ui_state::UIState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Clear, Paragraph},
};

/// Writes the buffer to a file name relative to the file dialog directory.
pub struct SaveAsDialog {
    pub input: String,
}

impl SaveAsDialog {
    pub fn new(input: String) -> Self {
        Self { input }
    }
}

impl Widget for SaveAsDialog {
    fn render(&self, f: &mut Frame, area: Rect, _app_state: &AppState, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let title = format!(" Save As ({}) ", ui_state.file_dialog_current_dir.display());
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
            KeyCode::Enter => {
                if self.input.is_empty() {
                    return WidgetResult::Handled;
                }
                let path = ui_state.file_dialog_current_dir.join(&self.input);
                match app_state.document.save_as(&path) {
                    Ok(()) => {
                        app_state.system_config.last_file = Some(path.clone());
                        ui_state.set_status_message(format!("Saved {}", path.display()));
                        WidgetResult::Close
                    }
                    Err(e) => {
                        ui_state.set_status_message(format!("Error saving: {e:#}"));
                        WidgetResult::Handled
                    }
                }
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
