use std::fmt;
use std::sync::Arc;

/// One embedded picture as reported by the tag reader.
#[derive(Debug, Clone)]
pub struct Picture {
    pub data: Vec<u8>,
    pub mime: Option<String>,
}

/// Raw tag data read from a file. Empty strings are possible here.
#[derive(Debug, Clone, Default)]
pub struct TagData {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Front cover first when the container says which picture is which.
    pub pictures: Vec<Picture>,
}

/// Decoded artwork bytes, shared between the cache and the display slot.
#[derive(Clone, PartialEq)]
pub struct CoverArt {
    data: Arc<[u8]>,
    mime: Option<String>,
}

impl CoverArt {
    pub fn new(data: Vec<u8>, mime: Option<String>) -> Self {
        Self {
            data: data.into(),
            mime,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for CoverArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverArt")
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Display values after cleanup: blank strings dropped, first picture kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub cover: Option<CoverArt>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<TagData> for ResolvedMetadata {
    fn from(tags: TagData) -> Self {
        Self {
            title: non_blank(tags.title),
            artist: non_blank(tags.artist),
            cover: tags
                .pictures
                .into_iter()
                .find(|p| !p.data.is_empty())
                .map(|p| CoverArt::new(p.data, p.mime)),
        }
    }
}
