use std::collections::HashMap;

use crate::audio::is_muted;
use crate::library::{Catalog, Track, TrackId};
use crate::metadata::CoverArt;

/// Everything the controls render from.
///
/// `is_playing` is intent: the state the controller drives the output
/// toward, not a reading from the output.
#[derive(Debug)]
pub struct PlayerState {
    pub(super) catalog: Catalog,
    pub(super) current_index: usize,
    pub(super) is_playing: bool,
    pub(super) current_time: f64,
    pub(super) duration: f64,
    pub(super) progress: f64,
    pub(super) volume: f64,
    pub(super) cover_image: Option<CoverArt>,
    pub(super) show_playlist: bool,
    /// Resolved artwork per track; `None` values mean "resolved, no art".
    pub(super) artwork: HashMap<TrackId, Option<CoverArt>>,
    /// Track currently bound to the output.
    pub(super) bound: Option<TrackId>,
    pub(super) status: Option<String>,
}

impl PlayerState {
    pub(super) fn new(volume: f64, show_playlist: bool) -> Self {
        Self {
            catalog: Catalog::new(),
            current_index: 0,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            progress: 0.0,
            volume,
            cover_image: None,
            show_playlist,
            artwork: HashMap::new(),
            bound: None,
            status: None,
        }
    }

    pub fn tracks(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.catalog.get(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Position as `0..=100`; zero while the duration is unknown.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        is_muted(self.volume)
    }

    /// Artwork of the current track, once resolved.
    pub fn cover_image(&self) -> Option<&CoverArt> {
        self.cover_image.as_ref()
    }

    pub fn show_playlist(&self) -> bool {
        self.show_playlist
    }

    /// Last user-facing problem (e.g. playback refused), cleared on success.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(super) fn reset_position(&mut self) {
        self.current_time = 0.0;
        self.duration = 0.0;
        self.progress = 0.0;
    }

    pub(super) fn set_position(&mut self, current_time: f64, progress: f64) {
        self.current_time = current_time;
        self.progress = progress;
    }
}
