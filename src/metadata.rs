//! Display metadata extraction.
//!
//! A [`MetadataReader`] reads tag data from a track's source. Import calls it
//! inline; cover art for the active track is fetched in the background by
//! the [`Resolver`] and tagged with the track it was requested for.

mod reader;
mod resolver;
mod types;

pub use reader::{LoftyReader, MetadataReader, resolve};
pub use resolver::{Resolution, Resolver};
pub use types::{CoverArt, Picture, ResolvedMetadata, TagData};

#[cfg(test)]
mod tests;
