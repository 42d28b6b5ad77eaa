use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioOutput;
use crate::logging;
use crate::metadata::LoftyReader;
use crate::player::Player;
use crate::ui::ViewState;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings();

    let mut paths = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--dump-config" {
            print!("{}", settings.to_toml()?);
            return Ok(());
        }
        paths.push(PathBuf::from(arg));
    }

    let log_file = logging::init(&settings.log);
    if let Some(msg) = warning {
        eprintln!("canto: {msg}");
        log::warn!("{msg}");
    }
    if let Some(path) = &log_file {
        log::info!("logging to {}", path.display());
    }

    let output = RodioOutput::open(Duration::from_millis(settings.audio.tick_ms))?;
    let mut player = Player::new(output, Arc::new(LoftyReader), &settings);

    if !paths.is_empty() {
        let summary = player.import_paths(&paths);
        log::info!(
            "imported {} track(s) from the command line, {} failed",
            summary.imported,
            summary.failed.len()
        );
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut view = ViewState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut player, &mut view);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("shutting down");
    run_result
}
