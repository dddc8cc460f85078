use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult, create_dialog_block};
use crate::ui_state::{ActiveView, UIState};
use crate::utils::{centered_rect, list_files};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Clear, List, ListItem, ListState},
};
use std::path::PathBuf;

pub struct OpenDialog {
    pub current_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub selected_index: usize,
}

impl OpenDialog {
    pub fn new(current_dir: PathBuf) -> Self {
        let mut dialog = Self {
            current_dir,
            files: Vec::new(),
            selected_index: 0,
        };
        dialog.refresh_files();
        dialog
    }

    pub fn refresh_files(&mut self) {
        self.files = list_files(&self.current_dir);
        self.selected_index = 0;
    }

    pub fn next(&mut self) {
        if !self.files.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.files.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.files.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.files.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    fn enter_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        self.refresh_files();
    }
}

impl Widget for OpenDialog {
    fn render(&self, f: &mut Frame, area: Rect, _app_state: &AppState, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let title = format!(
            " Open {} (Backspace: Up, Esc: Cancel) ",
            self.current_dir.display()
        );
        let block = create_dialog_block(&title, theme);

        let area = centered_rect(60, 50, area);
        f.render_widget(Clear, area);

        let items: Vec<ListItem> = self
            .files
            .iter()
            .map(|path| {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                if path.is_dir() {
                    ListItem::new(format!("{name}/"))
                } else {
                    ListItem::new(name.to_string())
                }
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(theme.menu_selected_bg)
                    .fg(theme.menu_selected_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut state = ListState::default();
        state.select(Some(self.selected_index));
        f.render_stateful_widget(list, area, &mut state);
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
            KeyCode::Down => {
                self.next();
                WidgetResult::Handled
            }
            KeyCode::Up => {
                self.previous();
                WidgetResult::Handled
            }
            KeyCode::Backspace => {
                if let Some(parent) = self.current_dir.parent().map(|p| p.to_path_buf()) {
                    self.enter_dir(parent);
                }
                WidgetResult::Handled
            }
            KeyCode::Enter => {
                let Some(selected) = self.files.get(self.selected_index).cloned() else {
                    return WidgetResult::Handled;
                };
                if selected.is_dir() {
                    self.enter_dir(selected);
                    return WidgetResult::Handled;
                }
                match app_state.open_file(&selected) {
                    Ok(()) => {
                        ui_state.file_dialog_current_dir = self.current_dir.clone();
                        ui_state.active_view = ActiveView::Editor;
                        ui_state.set_status_message(format!(
                            "Loaded {} ({} bytes)",
                            selected.display(),
                            app_state.editor().len()
                        ));
                        WidgetResult::Close
                    }
                    Err(e) => {
                        ui_state.set_status_message(format!("Error loading file: {e:#}"));
                        WidgetResult::Handled
                    }
                }
            }
            _ => WidgetResult::Handled,
        }
    }
}
