use anyhow::Result;
use std::path::Path;

use crate::config::SystemConfig;
use crate::document::Document;
use crate::editor::{Editor, Notification};
use crate::inspector::Inspector;
use crate::strings::StringsList;

pub struct AppState {
    pub document: Document,
    pub system_config: SystemConfig,
    pub strings: StringsList,
    pub inspector: Inspector,
}

impl AppState {
    pub fn new(system_config: SystemConfig) -> Self {
        let document = Document::new_empty(system_config.insert_mode);
        let strings = StringsList::new(system_config.scan_options());
        let mut inspector = system_config.inspector();
        inspector.refresh(&document.editor);
        Self {
            document,
            system_config,
            strings,
            inspector,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.document.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.document.editor
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        self.document.load(path)?;
        self.strings.cancel();
        self.system_config.last_file = Some(path.to_path_buf());
        Ok(())
    }

    pub fn new_document(&mut self) {
        self.document.reset();
        self.strings.cancel();
    }

    /// Routes the editor's pending notifications to the views that depend
    /// on them. The strings list only rescans while it is visible.
    pub fn process_notifications(&mut self, strings_visible: bool) -> Vec<Notification> {
        let notifications = self.document.editor.take_notifications();
        if !notifications.is_empty() {
            self.inspector.refresh(&self.document.editor);
        }
        if strings_visible
            && let Err(e) = self.strings.refresh(self.document.editor.buffer())
        {
            log::warn!("Cannot scan strings: {e}");
        }
        notifications
    }
}
