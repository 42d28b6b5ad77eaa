//! Track catalog and file import.
//!
//! Imported files become immutable [`Track`]s appended to a [`Catalog`] in
//! selection order. Each track owns a [`SourceHandle`] that reads the file lazily.

mod catalog;
mod import;
mod model;

pub use catalog::Catalog;
pub use import::{ImportedTrack, collect_audio_files, import_blobs, open_blobs};
pub use model::{BlobData, FileBlob, SourceHandle, SourceReader, Track, TrackId};
