use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::editor::Editor;

pub fn load(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn save(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

/// An open file and its editor.
pub struct Document {
    pub path: Option<PathBuf>,
    pub editor: Editor,
    saved_generation: u64,
}

impl Document {
    pub fn new_empty(insert_mode: bool) -> Self {
        let editor = Editor::new(Vec::new(), insert_mode);
        let saved_generation = editor.buffer().generation();
        Self {
            path: None,
            editor,
            saved_generation,
        }
    }

    pub fn open(path: &Path, insert_mode: bool) -> Result<Self> {
        let mut doc = Self::new_empty(insert_mode);
        doc.load(path)?;
        Ok(doc)
    }

    /// Replaces the content with the file at `path`. On failure the current
    /// content is left alone.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let data = load(path)?;
        log::info!("Loaded {} ({} bytes)", path.display(), data.len());
        self.editor.set_data(data);
        self.path = Some(path.to_path_buf());
        self.saved_generation = self.editor.buffer().generation();
        Ok(())
    }

    /// Drops the content and forgets the path.
    pub fn reset(&mut self) {
        self.editor.set_data(Vec::new());
        self.path = None;
        self.saved_generation = self.editor.buffer().generation();
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            bail!("No file name; use Save As");
        };
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        save(path, self.editor.data())?;
        log::info!("Saved {} ({} bytes)", path.display(), self.editor.len());
        self.path = Some(path.to_path_buf());
        self.saved_generation = self.editor.buffer().generation();
        Ok(())
    }

    /// True when the buffer changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.editor.buffer().generation() != self.saved_generation
    }

    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[untitled]".to_string())
    }
}
