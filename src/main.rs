use hexwrench::config::SystemConfig;
use hexwrench::dump::write_dump;
use hexwrench::events;
use hexwrench::state::AppState;
use hexwrench::ui_state::UIState;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::LevelFilter;
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{ConfigBuilder, WriteLogger};
use std::io;
use std::path::PathBuf;

/// Terminal hex editor with side-by-side hex and ASCII panes.
#[derive(Parser, Debug)]
#[command(name = "hexwrench", version, about)]
struct Args {
    /// File to open (starts with an empty buffer if omitted)
    file: Option<PathBuf>,
    /// Start in overwrite mode instead of insert mode
    #[arg(long)]
    overwrite: bool,
    /// Minimum length of strings listed in the strings view
    #[arg(long, value_name = "N")]
    min_string_length: Option<usize>,
    /// Log level written to the log file (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
    /// Print a plain hexdump of FILE and exit
    #[arg(long, requires = "file")]
    dump: bool,
}

fn init_logging(level: LevelFilter) {
    let Some(path) = SystemConfig::log_path() else {
        return;
    };
    if let Some(dir) = path.parent()
        && std::fs::create_dir_all(dir).is_err()
    {
        return;
    }
    if let Ok(file) = std::fs::File::create(&path) {
        let config = ConfigBuilder::new().set_time_format_rfc3339().build();
        let _ = WriteLogger::init(level, config, file);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.dump
        && let Some(path) = &args.file
    {
        let data = hexwrench::document::load(path)?;
        let mut stdout = io::stdout().lock();
        return write_dump(data, 80, &mut stdout);
    }

    init_logging(args.log_level);
    log::info!("{} {} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut system_config = SystemConfig::load();
    if args.overwrite {
        system_config.insert_mode = false;
    }
    if let Some(min_length) = args.min_string_length {
        system_config.strings_min_length = min_length;
    }

    let mut ui_state = UIState::from_config(&system_config);
    let mut app_state = AppState::new(system_config);

    if let Some(path) = &args.file {
        if let Some(dir) = path.parent().filter(|d| d.is_dir()) {
            ui_state.file_dialog_current_dir = dir.to_path_buf();
        }
        match app_state.open_file(path) {
            Ok(()) => ui_state.set_status_message(format!(
                "Loaded {} ({} bytes)",
                path.display(),
                app_state.editor().len()
            )),
            Err(e) => {
                eprintln!("Error loading file: {e:#}");
                ui_state.set_status_message(format!("Error loading file: {e:#}"));
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Keyboard enhancement is optional; legacy terminals refuse it.
    let keyboard_enhancement_result = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    );
    if let Err(ref e) = keyboard_enhancement_result {
        log::warn!("Keyboard enhancement failed: {e}");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = events::run_app(&mut terminal, &mut app_state, &mut ui_state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
    )?;
    if keyboard_enhancement_result.is_ok() {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    terminal.show_cursor()?;

    if let Err(e) = app_state.system_config.save() {
        log::warn!("Cannot save config: {e:#}");
    }

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}
