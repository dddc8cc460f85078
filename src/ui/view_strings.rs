use crate::state::AppState;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::{ActiveView, UIState};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState},
};

pub struct StringsView;

impl Widget for StringsView {
    fn render(&self, f: &mut Frame, area: Rect, app_state: &AppState, ui_state: &mut UIState) {
        let theme = ui_state.theme;
        let border_style = if ui_state.active_view == ActiveView::Strings {
            Style::default().fg(theme.border_active)
        } else {
            Style::default().fg(theme.border_inactive)
        };
        let strings = &app_state.strings;
        let title = if strings.is_dirty(app_state.editor().buffer()) && !strings.is_scanning() {
            format!(" Strings ({}, stale) ", strings.matches().len())
        } else {
            format!(" Strings ({}) ", strings.matches().len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(theme.background).fg(theme.foreground));
        let inner = block.inner(area);
        f.render_widget(block, area);
        ui_state.strings_view_area = inner;

        let (list_area, gauge_area) = if strings.is_scanning() {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(inner);
            (chunks[1], Some(chunks[0]))
        } else {
            (inner, None)
        };

        if let (Some(gauge_area), Some((done, total))) = (gauge_area, strings.progress()) {
            let ratio = if total == 0 {
                1.0
            } else {
                (done as f64 / total as f64).clamp(0.0, 1.0)
            };
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(theme.gauge).bg(theme.dialog_bg))
                .label(format!("Scanning {done}/{total} (Esc to abort)"))
                .ratio(ratio);
            f.render_widget(gauge, gauge_area);
        }

        let items: Vec<ListItem> = strings
            .matches()
            .iter()
            .map(|m| {
                ListItem::new(format!(
                    "{:>8} {:>5} {:<7} {}",
                    m.start,
                    m.len(),
                    m.kind,
                    m.display_string()
                ))
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme.menu_selected_bg)
                .fg(theme.menu_selected_fg)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        if !strings.matches().is_empty() {
            state.select(Some(strings.selected));
        }
        f.render_stateful_widget(list, list_area, &mut state);
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        app_state: &mut AppState,
        ui_state: &mut UIState,
    ) -> WidgetResult {
        match key.code {
            KeyCode::Esc if app_state.strings.is_scanning() => {
                app_state.strings.cancel();
                ui_state.set_status_message("Strings scan aborted");
                WidgetResult::Handled
            }
            KeyCode::Up => {
                app_state.strings.select_previous();
                WidgetResult::Handled
            }
            KeyCode::Down => {
                app_state.strings.select_next();
                WidgetResult::Handled
            }
            KeyCode::Home => {
                app_state.strings.selected = 0;
                WidgetResult::Handled
            }
            KeyCode::End => {
                app_state.strings.selected = app_state.strings.matches().len().saturating_sub(1);
                WidgetResult::Handled
            }
            KeyCode::Enter => {
                let AppState {
                    strings, document, ..
                } = app_state;
                if let Err(e) = strings.show_in_editor(&mut document.editor) {
                    ui_state.set_status_message(format!("Error: {e}"));
                } else {
                    ui_state.active_view = ActiveView::Editor;
                }
                WidgetResult::Handled
            }
            _ => match ui_state.keymap.lookup(&key) {
                Some(crate::keymap::Action::Edit(_)) | None => WidgetResult::Ignored,
                Some(action) => WidgetResult::Action(action),
            },
        }
    }
}
