//! UI rendering helpers for the terminal user interface.
//!
//! This module projects [`PlayerState`] into widgets using `ratatui`. It
//! never mutates player state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::audio::format_time;
use crate::config::{ControlsSettings, UiSettings};
use crate::metadata::CoverArt;
use crate::player::{PlayerState, playlist_rows};

/// Presentation-only state owned by the event loop.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Row under the keyboard cursor in the playlist panel.
    pub cursor: usize,
    /// Path being typed into the import prompt, when open.
    pub prompt: Option<String>,
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[←/→] scrub -/+{scrub_seconds}s"),
        "[-/+] volume".to_string(),
        "[tab] playlist".to_string(),
        "[j/k enter] pick".to_string(),
        "[o] open".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

pub(crate) fn volume_icon(muted: bool) -> &'static str {
    if muted { "🔇" } else { "🔊" }
}

pub(crate) fn transport_icon(playing: bool) -> &'static str {
    if playing { "⏸" } else { "▶" }
}

/// One-line description of the artwork slot.
pub(crate) fn cover_summary(cover: Option<&CoverArt>) -> String {
    match cover {
        Some(art) => {
            let kib = art.len() as f64 / 1024.0;
            format!("cover: {} ({kib:.1} KiB)", art.mime().unwrap_or("image"))
        }
        None => "cover: -".to_string(),
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    state: &PlayerState,
    view: &ViewState,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let playlist_height = if state.show_playlist() {
        Constraint::Min(3)
    } else {
        Constraint::Length(0)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            playlist_height,
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" canto ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, chunks[1], state, ui_settings);
    draw_progress(frame, chunks[2], state);
    draw_transport(frame, chunks[3], state);
    if state.show_playlist() {
        draw_playlist(frame, chunks[4], state, view);
    }
    draw_status(frame, chunks[5], state, view);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[6]);
}

fn draw_now_playing(frame: &mut Frame, area: Rect, state: &PlayerState, ui: &UiSettings) {
    let (title, artist) = match state.current_track() {
        Some(t) => (t.title(), t.artist()),
        None => (ui.placeholder_title.as_str(), "Unknown Artist"),
    };

    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(artist.to_string()).dim(),
        Line::from(cover_summary(state.cover_image())).italic(),
    ];
    let panel = Paragraph::new(lines).block(
        Block::bordered()
            .padding(Padding::left(1))
            .title(" now playing "),
    );
    frame.render_widget(panel, area);
}

fn draw_progress(frame: &mut Frame, area: Rect, state: &PlayerState) {
    let label = format!(
        "{} / {}",
        format_time(state.current_time()),
        format_time(state.duration())
    );
    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .ratio((state.progress() / 100.0).clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_transport(frame: &mut Frame, area: Rect, state: &PlayerState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(10)])
        .split(area);

    let transport = Paragraph::new(format!("⏮  {}  ⏭", transport_icon(state.is_playing())))
        .alignment(Alignment::Center)
        .block(Block::bordered());
    frame.render_widget(transport, halves[0]);

    let volume = Gauge::default()
        .block(Block::bordered().title(format!(" {} ", volume_icon(state.is_muted()))))
        .ratio(state.volume().clamp(0.0, 1.0))
        .label(format!("{:.0}%", state.volume() * 100.0));
    frame.render_widget(volume, halves[1]);
}

fn draw_playlist(frame: &mut Frame, area: Rect, state: &PlayerState, view: &ViewState) {
    let items: Vec<ListItem> = playlist_rows(state)
        .into_iter()
        .map(|row| {
            let marker = if row.active { "● " } else { "  " };
            let text = format!("{marker}{} - {}", row.title, row.artist);
            if row.highlighted {
                ListItem::new(text).style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(text)
            }
        })
        .collect();

    let total = items.len();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" playlist ({total}) ")),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if total > 0 {
        list_state.select(Some(view.cursor.min(total - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &PlayerState, view: &ViewState) {
    let (title, text) = match &view.prompt {
        Some(input) => (" open (enter imports, esc cancels) ", format!("{input}▏")),
        None => {
            let text = match state.status() {
                Some(msg) => msg.to_string(),
                None if state.tracks().is_empty() => "press o to open files".to_string(),
                None => format!(
                    "track {} of {}",
                    state.current_index() + 1,
                    state.tracks().len()
                ),
            };
            (" status ", text)
        }
    };
    let status = Paragraph::new(text)
        .block(Block::bordered().padding(Padding::left(1)).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::player::Player;
    use crate::test_support::{FakeMedia, ScriptedReader, blob, tagged};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn render(state: &PlayerState, view: &ViewState) -> String {
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| draw(f, state, view, &settings.ui, &settings.controls))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn icons_follow_state() {
        assert_eq!(volume_icon(true), "🔇");
        assert_eq!(volume_icon(false), "🔊");
        assert_eq!(transport_icon(true), "⏸");
        assert_eq!(transport_icon(false), "▶");
    }

    #[test]
    fn cover_summary_describes_art_or_placeholder() {
        assert_eq!(cover_summary(None), "cover: -");
        let art = CoverArt::new(vec![0; 2048], Some("image/png".into()));
        assert_eq!(cover_summary(Some(&art)), "cover: image/png (2.0 KiB)");
    }

    #[test]
    fn empty_player_renders_placeholders() {
        let player = Player::new(FakeMedia::default(), Arc::new(ScriptedReader), &Settings::default());
        let screen = render(player.state(), &ViewState::default());
        assert!(screen.contains("Audio Title"));
        assert!(screen.contains("Unknown Artist"));
        assert!(screen.contains("0:00 / 0:00"));
    }

    #[test]
    fn playlist_panel_lists_tracks_when_shown() {
        let mut player = Player::new(FakeMedia::default(), Arc::new(ScriptedReader), &Settings::default());
        player.import_blobs(vec![
            blob("a.mp3", tagged("First", "Band", "")),
            blob("b.mp3", tagged("Second", "Band", "")),
        ]);
        player.toggle_playlist();

        let screen = render(player.state(), &ViewState::default());
        assert!(screen.contains("playlist (2)"));
        assert!(screen.contains("Second - Band"));
    }
}
