//! Playback output and the time/volume mapping around it.
//!
//! The controller only talks to a [`MediaOutput`]; [`RodioOutput`] is the
//! real device-backed implementation.

mod mapper;
mod output;
mod types;

pub use mapper::{clamp_volume, format_time, is_muted, progress_percent, seek_target};
pub use output::RodioOutput;
pub use types::{MediaEvent, MediaOutput};
