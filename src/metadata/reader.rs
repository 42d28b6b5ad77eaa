use lofty::picture::PictureType;
use lofty::prelude::*;
use lofty::probe::Probe;

use crate::error::MetadataError;
use crate::library::SourceHandle;

use super::types::{Picture, ResolvedMetadata, TagData};

/// Extracts tag data from a source.
pub trait MetadataReader: Send + Sync {
    fn read(&self, source: &SourceHandle) -> Result<TagData, MetadataError>;
}

/// [`MetadataReader`] backed by `lofty`.
pub struct LoftyReader;

impl MetadataReader for LoftyReader {
    fn read(&self, source: &SourceHandle) -> Result<TagData, MetadataError> {
        let reader = source
            .open()
            .map_err(|e| MetadataError::Probe(e.to_string()))?;
        let tagged = Probe::new(reader)
            .guess_file_type()
            .map_err(|e| MetadataError::Probe(e.to_string()))?
            .read()
            .map_err(|e| MetadataError::Probe(e.to_string()))?;

        let tag = tagged
            .primary_tag()
            .or_else(|| tagged.first_tag())
            .ok_or(MetadataError::NoTags)?;

        // Prefer front cover, otherwise keep the container's order.
        let (front, rest): (Vec<_>, Vec<_>) = tag
            .pictures()
            .iter()
            .partition(|p| p.pic_type() == PictureType::CoverFront);
        let pictures = front
            .into_iter()
            .chain(rest)
            .map(|p| Picture {
                data: p.data().to_vec(),
                mime: p.mime_type().map(|m| m.as_str().to_string()),
            })
            .collect();

        Ok(TagData {
            title: tag.title().map(|s| s.into_owned()),
            artist: tag.artist().map(|s| s.into_owned()),
            pictures,
        })
    }
}

/// Read display metadata, degrading any failure to an empty result.
pub fn resolve(reader: &dyn MetadataReader, source: &SourceHandle) -> ResolvedMetadata {
    match reader.read(source) {
        Ok(tags) => ResolvedMetadata::from(tags),
        Err(e) => {
            log::debug!("metadata unavailable for {}: {e}", source.name());
            ResolvedMetadata::default()
        }
    }
}
