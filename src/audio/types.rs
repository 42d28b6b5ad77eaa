//! The playback seam.
//!
//! Decoding, buffering and real-time output all happen behind
//! [`MediaOutput`]. The controller binds sources, asks for play/pause/seek,
//! and reacts to the [`MediaEvent`]s it polls back.

use crate::error::PlaybackError;
use crate::library::SourceHandle;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The playback position moved.
    TimeUpdate,
    /// A freshly loaded source now reports its duration.
    LoadedMetadata,
}

pub trait MediaOutput {
    /// Attach `source` (or nothing). Takes effect on the next [`load`](Self::load).
    fn bind(&mut self, source: Option<SourceHandle>);

    /// Prepare the bound source from position zero, paused.
    ///
    /// Decode problems are reported by the following [`play`](Self::play).
    fn load(&mut self);

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Position in seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Length in seconds; `0.0` until known.
    fn duration(&self) -> f64;

    /// Native volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);

    /// Events raised since the previous call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
