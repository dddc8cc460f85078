//! Key bindings: an explicit table from key + modifiers to an action.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::editor::{Intent, Motion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(Intent),
    Quit,
    New,
    Open,
    Save,
    SaveAs,
    Jump,
    Search,
    ToggleStrings,
    FocusNext,
    ToggleInspector,
    ToggleEndian,
    ToggleHeatMap,
}

impl Action {
    /// Actions that throw away the current buffer.
    pub fn discards_buffer(&self) -> bool {
        matches!(self, Action::Quit | Action::New | Action::Open)
    }
}

const NONE: KeyModifiers = KeyModifiers::NONE;
const SHIFT: KeyModifiers = KeyModifiers::SHIFT;
const CTRL: KeyModifiers = KeyModifiers::CONTROL;
const ALT: KeyModifiers = KeyModifiers::ALT;

const fn mv(motion: Motion, extend: bool) -> Action {
    Action::Edit(Intent::Move { motion, extend })
}

#[rustfmt::skip]
const BINDINGS: &[(KeyCode, KeyModifiers, Action)] = &[
    (KeyCode::Char('q'), CTRL, Action::Quit),
    (KeyCode::Char('n'), CTRL, Action::New),
    (KeyCode::Char('o'), CTRL, Action::Open),
    (KeyCode::Char('s'), CTRL, Action::Save),
    (KeyCode::Char('s'), CTRL.union(SHIFT), Action::SaveAs),
    (KeyCode::Char('s'), ALT, Action::SaveAs),
    (KeyCode::Char('g'), CTRL, Action::Jump),
    (KeyCode::Char('f'), CTRL, Action::Search),
    (KeyCode::F(5), NONE, Action::ToggleStrings),
    (KeyCode::F(6), NONE, Action::FocusNext),
    (KeyCode::F(7), NONE, Action::ToggleInspector),
    (KeyCode::F(8), NONE, Action::ToggleEndian),
    (KeyCode::F(9), NONE, Action::ToggleHeatMap),

    (KeyCode::Char('a'), CTRL, Action::Edit(Intent::SelectAll)),
    (KeyCode::Char('c'), CTRL, Action::Edit(Intent::Copy)),
    (KeyCode::Char('x'), CTRL, Action::Edit(Intent::Cut)),
    (KeyCode::Char('v'), CTRL, Action::Edit(Intent::Paste)),
    (KeyCode::Insert, NONE, Action::Edit(Intent::ToggleInsertMode)),
    (KeyCode::Tab, NONE, Action::Edit(Intent::SwitchPane)),
    (KeyCode::BackTab, SHIFT, Action::Edit(Intent::SwitchPane)),
    (KeyCode::Backspace, NONE, Action::Edit(Intent::Backspace)),
    (KeyCode::Delete, NONE, Action::Edit(Intent::Delete)),
    (KeyCode::Esc, NONE, Action::Edit(Intent::ClearSelection)),

    (KeyCode::Left, NONE, mv(Motion::Left, false)),
    (KeyCode::Left, SHIFT, mv(Motion::Left, true)),
    (KeyCode::Right, NONE, mv(Motion::Right, false)),
    (KeyCode::Right, SHIFT, mv(Motion::Right, true)),
    (KeyCode::Up, NONE, mv(Motion::Up, false)),
    (KeyCode::Up, SHIFT, mv(Motion::Up, true)),
    (KeyCode::Down, NONE, mv(Motion::Down, false)),
    (KeyCode::Down, SHIFT, mv(Motion::Down, true)),
    (KeyCode::PageUp, NONE, mv(Motion::PageUp, false)),
    (KeyCode::PageUp, SHIFT, mv(Motion::PageUp, true)),
    (KeyCode::PageDown, NONE, mv(Motion::PageDown, false)),
    (KeyCode::PageDown, SHIFT, mv(Motion::PageDown, true)),
    (KeyCode::Home, NONE, mv(Motion::RowStart, false)),
    (KeyCode::Home, SHIFT, mv(Motion::RowStart, true)),
    (KeyCode::End, NONE, mv(Motion::RowEnd, false)),
    (KeyCode::End, SHIFT, mv(Motion::RowEnd, true)),
    (KeyCode::Home, CTRL, mv(Motion::BufferStart, false)),
    (KeyCode::Home, CTRL.union(SHIFT), mv(Motion::BufferStart, true)),
    (KeyCode::End, CTRL, mv(Motion::BufferEnd, false)),
    (KeyCode::End, CTRL.union(SHIFT), mv(Motion::BufferEnd, true)),
];

pub struct Keymap {
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            bindings: BINDINGS
                .iter()
                .map(|&(code, modifiers, action)| ((code, modifiers), action))
                .collect(),
        }
    }
}

impl Keymap {
    pub fn lookup(&self, key: &KeyEvent) -> Option<Action> {
        let (code, modifiers) = normalize(key);
        if let Some(action) = self.bindings.get(&(code, modifiers)) {
            return Some(*action);
        }
        // Anything else printable is typed into the editor.
        match code {
            KeyCode::Char(c) if !modifiers.intersects(CTRL | ALT) => {
                Some(Action::Edit(Intent::TypeChar(c)))
            }
            _ => None,
        }
    }
}

/// Terminals report Ctrl+Shift+S as `S` with both modifiers; fold such
/// letters to lower case so one table entry covers them.
fn normalize(key: &KeyEvent) -> (KeyCode, KeyModifiers) {
    let modifiers = key.modifiers & (SHIFT | CTRL | ALT);
    match key.code {
        KeyCode::Char(c) if modifiers.intersects(CTRL | ALT) => {
            (KeyCode::Char(c.to_ascii_lowercase()), modifiers)
        }
        code => (code, modifiers),
    }
}
