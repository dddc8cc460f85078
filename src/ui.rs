pub mod dialog_jump;
pub mod dialog_open;
pub mod dialog_save_as;
pub mod dialog_search;
pub mod dialog_unsaved;
pub mod statusbar;
pub mod view_hex;
pub mod view_inspector;
pub mod view_strings;
pub mod widget;

use crate::state::AppState;
use crate::ui_state::UIState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use statusbar::StatusBar;
use view_hex::HexView;
use view_inspector::InspectorView;
use view_strings::StringsView;
use widget::Widget;

/// Screen areas for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub hex: Rect,
    pub strings: Option<Rect>,
    pub inspector: Option<Rect>,
    pub status: Rect,
}

impl AppLayout {
    /// The hex view minus its border: the area the dump is laid out in.
    pub fn hex_inner(&self) -> Rect {
        Rect::new(
            self.hex.x + 1,
            self.hex.y + 1,
            self.hex.width.saturating_sub(2),
            self.hex.height.saturating_sub(2),
        )
    }
}

pub fn layout(area: Rect, app_state: &AppState, ui_state: &UIState) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let (left, strings) = if ui_state.show_strings {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Percentage(35)])
            .split(chunks[0]);
        (main[0], Some(main[1]))
    } else {
        (chunks[0], None)
    };

    let (hex, inspector) = if ui_state.show_inspector && !app_state.inspector.enabled().is_empty() {
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(InspectorView::height(app_state)),
            ])
            .split(left);
        (left[0], Some(left[1]))
    } else {
        (left, None)
    };

    AppLayout {
        hex,
        strings,
        inspector,
        status: chunks[1],
    }
}

pub fn ui(f: &mut Frame, app_state: &AppState, ui_state: &mut UIState) {
    let area = f.area();
    let layout = layout(area, app_state, ui_state);

    HexView.render(f, layout.hex, app_state, ui_state);
    if let Some(area) = layout.strings {
        StringsView.render(f, area, app_state, ui_state);
    }
    if let Some(area) = layout.inspector {
        InspectorView.render(f, area, app_state, ui_state);
    }
    StatusBar.render(f, layout.status, app_state, ui_state);

    if let Some(dialog) = ui_state.active_dialog.take() {
        dialog.render(f, area, app_state, ui_state);
        if ui_state.active_dialog.is_none() {
            ui_state.active_dialog = Some(dialog);
        }
    }
}
