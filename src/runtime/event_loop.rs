use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::MediaOutput;
use crate::config;
use crate::error::TransportError;
use crate::player::Player;
use crate::ui::{self, ViewState};

/// Main terminal event loop: drains media and artwork events, draws, then
/// handles at most one key press. Returns `Ok(())` when the user quits.
pub fn run<M: MediaOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<M>,
    view: &mut ViewState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        player.pump();

        terminal.draw(|f| ui::draw(f, player.state(), view, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, player, view) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when shutdown is requested.
pub(super) fn handle_key_event<M: MediaOutput>(
    key: KeyEvent,
    settings: &config::Settings,
    player: &mut Player<M>,
    view: &mut ViewState,
) -> bool {
    if let Some(input) = view.prompt.as_mut() {
        match key.code {
            KeyCode::Esc => view.prompt = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter => {
                let path = view.prompt.take().unwrap_or_default();
                let path = path.trim();
                if !path.is_empty() {
                    let summary = player.import_paths(&[PathBuf::from(path)]);
                    log::info!(
                        "imported {} track(s) from {path}, {} failed",
                        summary.imported,
                        summary.failed.len()
                    );
                }
            }
            KeyCode::Char(c) if !c.is_control() => input.push(c),
            _ => {}
        }
        return false;
    }

    let scrub = settings.controls.scrub_seconds as i64;
    // The cursor only means something while the playlist is on screen.
    let listing = player.state().show_playlist();
    let result = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => player.toggle_play_pause(),
        KeyCode::Char('l') | KeyCode::Char('n') => player.next(),
        KeyCode::Char('h') | KeyCode::Char('b') => player.previous(),
        KeyCode::Right | KeyCode::Char('L') => {
            player.scrub(scrub);
            Ok(())
        }
        KeyCode::Left | KeyCode::Char('H') => {
            player.scrub(-scrub);
            Ok(())
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            player.step_volume(settings.audio.volume_step);
            Ok(())
        }
        KeyCode::Char('-') => {
            player.step_volume(-settings.audio.volume_step);
            Ok(())
        }
        KeyCode::Tab | KeyCode::Char('P') => {
            player.toggle_playlist();
            view.cursor = player.state().current_index();
            Ok(())
        }
        KeyCode::Char('j') | KeyCode::Down if listing => {
            let len = player.state().tracks().len();
            if len > 0 {
                view.cursor = (view.cursor + 1).min(len - 1);
            }
            Ok(())
        }
        KeyCode::Char('k') | KeyCode::Up if listing => {
            view.cursor = view.cursor.saturating_sub(1);
            Ok(())
        }
        KeyCode::Enter if listing => player.select_track(view.cursor),
        KeyCode::Char('o') => {
            view.prompt = Some(String::new());
            Ok(())
        }
        _ => Ok(()),
    };

    match result {
        Ok(()) => {}
        Err(TransportError::EmptyCatalog) => log::debug!("ignored {:?}: playlist is empty", key.code),
        Err(e) => log::warn!("{:?} failed: {e}", key.code),
    }
    false
}
