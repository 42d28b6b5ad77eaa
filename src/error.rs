//! Error types shared across the player.
//!
//! None of these are fatal to the program: the runtime logs them and keeps
//! going with degraded metadata or a paused transport.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a [`MediaOutput`](crate::audio::MediaOutput).
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// `play` was requested with nothing bound.
    #[error("no source bound to the output")]
    NoSource,

    /// The bound bytes could not be decoded.
    #[error("failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },

    /// The audio device could not be opened.
    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("seek failed: {0}")]
    Seek(String),
}

/// Failures while reading tags out of a file's bytes.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unrecognized or unreadable audio container: {0}")]
    Probe(String),

    #[error("file carries no tags")]
    NoTags,
}

/// Failures while turning user-selected files into playable sources.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejected transport commands.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("the playlist is empty")]
    EmptyCatalog,

    #[error("track {index} does not exist (playlist has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}
