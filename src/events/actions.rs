use crate::keymap::Action;
use crate::state::AppState;
use crate::ui::dialog_unsaved::UnsavedChangesDialog;
use crate::ui::dialog_jump::JumpDialog;
use crate::ui::dialog_open::OpenDialog;
use crate::ui::dialog_save_as::SaveAsDialog;
use crate::ui::dialog_search::SearchDialog;
use crate::ui_state::{ActiveView, UIState};

/// Runs `action`, asking first when it would throw away unsaved changes.
pub fn handle_action(app_state: &mut AppState, ui_state: &mut UIState, action: Action) {
    if action.discards_buffer() && app_state.is_dirty() {
        ui_state.active_dialog = Some(Box::new(UnsavedChangesDialog::new(
            app_state.document.display_name(),
            action,
        )));
        return;
    }

    execute_action(app_state, ui_state, action);
}

pub fn execute_action(app_state: &mut AppState, ui_state: &mut UIState, action: Action) {
    log::debug!("Action: {:?}", action);

    match action {
        Action::Edit(intent) => {
            if let Err(e) = app_state.editor_mut().dispatch(intent) {
                ui_state.set_status_message(format!("Error: {e}"));
            }
        }
        Action::Quit => ui_state.should_quit = true,
        Action::New => {
            app_state.new_document();
            ui_state.active_view = ActiveView::Editor;
            ui_state.set_status_message("New buffer");
        }
        Action::Open => {
            ui_state.active_dialog = Some(Box::new(OpenDialog::new(
                ui_state.file_dialog_current_dir.clone(),
            )));
            ui_state.set_status_message("Select a file to open");
        }
        Action::Save => {
            if app_state.document.path.is_none() {
                execute_action(app_state, ui_state, Action::SaveAs);
                return;
            }
            match app_state.document.save() {
                Ok(()) => ui_state.set_status_message(format!(
                    "Saved {}",
                    app_state.document.display_name()
                )),
                Err(e) => ui_state.set_status_message(format!("Error saving: {e:#}")),
            }
        }
        Action::SaveAs => {
            let name = app_state
                .document
                .path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui_state.active_dialog = Some(Box::new(SaveAsDialog::new(name)));
            ui_state.set_status_message("Enter file name");
        }
        Action::Jump => {
            ui_state.active_dialog = Some(Box::new(JumpDialog::new()));
            ui_state.set_status_message("Enter offset (0x.. or decimal)");
        }
        Action::Search => {
            let (query, kind) = ui_state
                .last_search
                .clone()
                .unwrap_or_else(|| (String::new(), app_state.editor().pane()));
            ui_state.active_dialog = Some(Box::new(SearchDialog::new(query, kind)));
            ui_state.set_status_message("Search forward from cursor");
        }
        Action::ToggleStrings => {
            ui_state.show_strings = !ui_state.show_strings;
            if ui_state.show_strings {
                app_state.strings.retry();
                ui_state.active_view = ActiveView::Strings;
                ui_state.set_status_message("Strings view shown");
            } else {
                ui_state.active_view = ActiveView::Editor;
                if app_state.strings.is_scanning() {
                    app_state.strings.cancel();
                }
                ui_state.set_status_message("Strings view hidden");
            }
        }
        Action::FocusNext => {
            ui_state.active_view = match ui_state.active_view {
                ActiveView::Editor if ui_state.show_strings => ActiveView::Strings,
                _ => ActiveView::Editor,
            };
        }
        Action::ToggleInspector => {
            ui_state.show_inspector = !ui_state.show_inspector;
        }
        Action::ToggleEndian => {
            app_state.inspector.toggle_endian();
            app_state.inspector.refresh(&app_state.document.editor);
            app_state.system_config.inspector_endian = app_state.inspector.endian;
            ui_state.set_status_message(format!(
                "Inspector endianness: {}",
                app_state.inspector.endian.label()
            ));
        }
        Action::ToggleHeatMap => {
            ui_state.heat_map = !ui_state.heat_map;
            app_state.system_config.heat_map = ui_state.heat_map;
            ui_state.set_status_message(if ui_state.heat_map {
                "Heat map on"
            } else {
                "Heat map off"
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::editor::Intent;
    use crate::inspector::Endian;
    use crate::theme::Theme;

    fn setup() -> (AppState, UIState) {
        (
            AppState::new(SystemConfig::default()),
            UIState::new(Theme::default()),
        )
    }

    #[test]
    fn test_dirty_quit_asks_first() {
        let (mut app_state, mut ui_state) = setup();
        handle_action(&mut app_state, &mut ui_state, Action::Edit(Intent::TypeChar('4')));
        handle_action(&mut app_state, &mut ui_state, Action::Edit(Intent::TypeChar('1')));
        assert!(app_state.is_dirty());

        handle_action(&mut app_state, &mut ui_state, Action::Quit);
        assert!(!ui_state.should_quit);
        assert!(ui_state.active_dialog.is_some());

        ui_state.active_dialog = None;
        execute_action(&mut app_state, &mut ui_state, Action::Quit);
        assert!(ui_state.should_quit);
    }

    #[test]
    fn test_clean_quit_is_immediate() {
        let (mut app_state, mut ui_state) = setup();
        handle_action(&mut app_state, &mut ui_state, Action::Quit);
        assert!(ui_state.should_quit);
        assert!(ui_state.active_dialog.is_none());
    }

    #[test]
    fn test_save_without_path_opens_save_as() {
        let (mut app_state, mut ui_state) = setup();
        handle_action(&mut app_state, &mut ui_state, Action::Save);
        assert!(ui_state.active_dialog.is_some());
        assert_eq!(ui_state.status_message, "Enter file name");
    }

    #[test]
    fn test_toggles() {
        let (mut app_state, mut ui_state) = setup();
        app_state.editor_mut().set_data(vec![0x01, 0x02]);

        handle_action(&mut app_state, &mut ui_state, Action::ToggleEndian);
        assert_eq!(app_state.inspector.endian, Endian::Little);
        assert_eq!(app_state.system_config.inspector_endian, Endian::Little);
        assert_eq!(app_state.inspector.rows()[1].value.as_deref(), Some("513"));

        handle_action(&mut app_state, &mut ui_state, Action::ToggleStrings);
        assert!(ui_state.strings_focused());
        handle_action(&mut app_state, &mut ui_state, Action::FocusNext);
        assert_eq!(ui_state.active_view, ActiveView::Editor);
        handle_action(&mut app_state, &mut ui_state, Action::FocusNext);
        assert_eq!(ui_state.active_view, ActiveView::Strings);

        handle_action(&mut app_state, &mut ui_state, Action::ToggleHeatMap);
        assert!(ui_state.heat_map);
        assert!(app_state.system_config.heat_map);
    }
}
