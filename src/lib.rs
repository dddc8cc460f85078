#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod editor;
pub mod error;

pub mod document;
pub mod dump;
pub mod events;
pub mod inspector;
pub mod keymap;
pub mod search;
pub mod state;
pub mod strings;
pub mod ui;
pub mod ui_state;

pub mod config;
pub mod theme;
pub mod utils;
