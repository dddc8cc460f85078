use crate::editor::Intent;
use crate::events::actions::handle_action;
use crate::state::AppState;
use crate::ui::view_hex::HexView;
use crate::ui::view_strings::StringsView;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::{ActiveView, UIState};
use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

const WHEEL_ROWS: isize = 3;

/// Routes a key to the open dialog, else to the focused view.
pub fn handle_key(key: KeyEvent, app_state: &mut AppState, ui_state: &mut UIState) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if let Some(mut dialog) = ui_state.active_dialog.take() {
        match dialog.handle_input(key, app_state, ui_state) {
            WidgetResult::Close => {}
            WidgetResult::Action(action) => handle_action(app_state, ui_state, action),
            WidgetResult::Handled | WidgetResult::Ignored => {
                // A handler may have replaced the dialog with another one.
                if ui_state.active_dialog.is_none() {
                    ui_state.active_dialog = Some(dialog);
                }
            }
        }
        return;
    }

    let result = if ui_state.strings_focused() {
        StringsView.handle_input(key, app_state, ui_state)
    } else {
        HexView.handle_input(key, app_state, ui_state)
    };
    if let WidgetResult::Action(action) = result {
        handle_action(app_state, ui_state, action);
    }
}

fn relative(area: Rect, column: u16, row: u16) -> (u32, u32) {
    (
        column.saturating_sub(area.x) as u32,
        row.saturating_sub(area.y) as u32,
    )
}

/// Translates terminal mouse events into editor pointer intents, relative to
/// the hex view area of the last frame.
pub fn handle_mouse(mouse: MouseEvent, app_state: &mut AppState, ui_state: &mut UIState) {
    if ui_state.active_dialog.is_some() {
        return;
    }

    let hex_area = ui_state.hex_view_area;
    let position = Position::new(mouse.column, mouse.row);
    let in_hex = hex_area.contains(position);
    let (x, y) = relative(hex_area, mouse.column, mouse.row);
    let extend = mouse.modifiers.contains(KeyModifiers::SHIFT);

    let intent = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if in_hex => {
            ui_state.active_view = ActiveView::Editor;
            ui_state.hex_pressed = true;
            Some(Intent::PointerDown { x, y, extend })
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if ui_state.show_strings && ui_state.strings_view_area.contains(position) {
                ui_state.active_view = ActiveView::Strings;
            }
            None
        }
        MouseEventKind::Drag(MouseButton::Left) if ui_state.hex_pressed => {
            Some(Intent::PointerDrag { x, y })
        }
        MouseEventKind::Up(MouseButton::Left) if ui_state.hex_pressed => {
            ui_state.hex_pressed = false;
            Some(Intent::PointerUp { x, y })
        }
        MouseEventKind::ScrollUp if in_hex => Some(Intent::Scroll(-WHEEL_ROWS)),
        MouseEventKind::ScrollDown if in_hex => Some(Intent::Scroll(WHEEL_ROWS)),
        _ => None,
    };

    if let Some(intent) = intent
        && let Err(e) = app_state.editor_mut().dispatch(intent)
    {
        ui_state.set_status_message(format!("Error: {e}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::editor::{Pane, Selection};
    use crate::theme::Theme;
    use crossterm::event::{KeyCode, KeyEventState};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn setup(data: &[u8]) -> (AppState, UIState) {
        let mut app_state = AppState::new(SystemConfig::default());
        app_state.editor_mut().set_data(data.to_vec());
        app_state.editor_mut().resize(78, 20);
        let mut ui_state = UIState::new(Theme::default());
        ui_state.hex_view_area = Rect::new(1, 1, 78, 20);
        (app_state, ui_state)
    }

    #[test]
    fn test_click_and_drag_selects() {
        let (mut app_state, mut ui_state) = setup(&[0u8; 64]);
        let g = *app_state.editor().geometry();
        let x0 = g.hex_cell_x(1) as u16 + 1;
        let x1 = g.hex_cell_x(3) as u16 + 1;

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x0, 1), &mut app_state, &mut ui_state);
        assert_eq!(app_state.editor().position(), 1);
        assert_eq!(app_state.editor().pane(), Pane::Hex);

        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), x1, 1), &mut app_state, &mut ui_state);
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x1, 1), &mut app_state, &mut ui_state);
        assert_eq!(app_state.editor().selection(), Some(Selection::new(1, 3)));
        assert!(!ui_state.hex_pressed);
    }

    #[test]
    fn test_release_outside_without_press_is_ignored() {
        let (mut app_state, mut ui_state) = setup(&[0u8; 64]);
        let g = *app_state.editor().geometry();
        let x = g.hex_cell_x(5) as u16 + 1;
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, 1), &mut app_state, &mut ui_state);
        assert_eq!(app_state.editor().position(), 0);
    }

    #[test]
    fn test_keys_go_to_dialog_first() {
        let (mut app_state, mut ui_state) = setup(&[0u8; 64]);
        let ctrl_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        handle_key(ctrl_g, &mut app_state, &mut ui_state);
        assert!(ui_state.active_dialog.is_some());

        for c in "0x20".chars() {
            handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), &mut app_state, &mut ui_state);
        }
        assert_eq!(app_state.editor().len(), 64);
        handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut app_state, &mut ui_state);
        assert!(ui_state.active_dialog.is_none());
        assert_eq!(app_state.editor().position(), 0x20);

        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(release, &mut app_state, &mut ui_state);
        assert_eq!(app_state.editor().cursor().pending_nibble(), None);
    }
}
