pub mod actions;
pub mod input;

use crate::state::AppState;
use crate::strings::ScanStatus;
use crate::ui::{layout, ui};
use crate::ui_state::UIState;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::Stdout;
use std::time::Duration;

/// Scan items (strings or empty windows) pulled per loop tick.
const SCAN_SLICE: usize = 256;
const IDLE_POLL: Duration = Duration::from_millis(250);

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app_state: &mut AppState,
    ui_state: &mut UIState,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let hex = layout(area, app_state, ui_state).hex_inner();
        app_state
            .editor_mut()
            .resize(hex.width as u32, hex.height as u32);

        terminal.draw(|f| ui(f, app_state, ui_state))?;

        if ui_state.should_quit {
            return Ok(());
        }

        let timeout = if app_state.strings.is_scanning() {
            Duration::ZERO
        } else {
            IDLE_POLL
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input::handle_key(key, app_state, ui_state),
                Event::Mouse(mouse) => input::handle_mouse(mouse, app_state, ui_state),
                _ => {}
            }
        }

        if app_state.strings.is_scanning() {
            match app_state.strings.step(SCAN_SLICE) {
                ScanStatus::Running { done, total } => {
                    ui_state.set_status_message(format!("Scanning strings {done}/{total}"));
                }
                ScanStatus::Finished { count } => {
                    ui_state.set_status_message(format!("Found {count} strings"));
                }
                ScanStatus::Idle => {}
            }
        }

        app_state.process_notifications(ui_state.show_strings);

        if ui_state.should_quit {
            return Ok(());
        }
    }
}
