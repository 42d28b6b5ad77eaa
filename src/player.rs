//! Player model and transport control.
//!
//! [`PlayerState`] is the single owned state of one player instance.
//! [`Player`] mutates it in response to user commands, output events and
//! background metadata completions, and keeps the [`MediaOutput`] in step.
//!
//! [`MediaOutput`]: crate::audio::MediaOutput

mod controller;
mod playlist;
mod state;

pub use controller::{ImportSummary, Player};
pub use playlist::{PlaylistRow, playlist_rows};
pub use state::PlayerState;
