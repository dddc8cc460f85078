use ratatui::layout::Rect;
use std::path::PathBuf;

use crate::config::SystemConfig;
use crate::editor::Pane;
use crate::keymap::Keymap;
use crate::theme::Theme;
use crate::ui::widget::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Editor,
    Strings,
}

pub struct UIState {
    pub theme: Theme,
    pub keymap: Keymap,
    pub active_dialog: Option<Box<dyn Widget>>,
    pub active_view: ActiveView,
    pub show_strings: bool,
    pub show_inspector: bool,
    pub heat_map: bool,
    pub should_quit: bool,
    pub status_message: String,
    pub last_search: Option<(String, Pane)>,
    pub file_dialog_current_dir: PathBuf,
    /// Inner area of the hex view from the last frame; mouse events are
    /// translated relative to it.
    pub hex_view_area: Rect,
    pub strings_view_area: Rect,
    /// A left press started inside the hex view; drags and the release go to the editor.
    pub hex_pressed: bool,
}

impl UIState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            keymap: Keymap::default(),
            active_dialog: None,
            active_view: ActiveView::Editor,
            show_strings: false,
            show_inspector: true,
            heat_map: false,
            should_quit: false,
            status_message: "Ready".to_string(),
            last_search: None,
            file_dialog_current_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            hex_view_area: Rect::default(),
            strings_view_area: Rect::default(),
            hex_pressed: false,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        let mut state = Self::new(Theme::from_name(&config.theme));
        state.heat_map = config.heat_map;
        if let Some(dir) = config.last_file.as_ref().and_then(|p| p.parent())
            && dir.is_dir()
        {
            state.file_dialog_current_dir = dir.to_path_buf();
        }
        state
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn strings_focused(&self) -> bool {
        self.show_strings && self.active_view == ActiveView::Strings
    }
}
