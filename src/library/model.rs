use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Stable identity of a catalog entry, allocated on append.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(u64);

impl TrackId {
    pub(super) fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a file's bytes live.
#[derive(Debug, Clone)]
pub enum BlobData {
    /// On disk; read lazily whenever the source is opened.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Arc<[u8]>),
}

/// A user-selected file: its display name and its (unread) contents.
#[derive(Debug, Clone)]
pub struct FileBlob {
    pub name: String,
    pub data: BlobData,
}

impl FileBlob {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            data: BlobData::Path(path.to_path_buf()),
        }
    }
}

/// Playable source bound to one file.
///
/// Cloning is cheap. Nothing is read until [`SourceHandle::open`]; the
/// handle itself is released once the catalog, the media output and any
/// in-flight metadata request have all dropped their clones.
#[derive(Clone)]
pub struct SourceHandle {
    name: Arc<str>,
    data: Arc<BlobData>,
}

impl SourceHandle {
    pub fn from_blob(blob: FileBlob) -> Self {
        Self {
            name: blob.name.into(),
            data: Arc::new(blob.data),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(name: &str, bytes: Vec<u8>) -> Self {
        Self::from_blob(FileBlob {
            name: name.to_string(),
            data: BlobData::Bytes(bytes.into()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open a fresh reader positioned at the start of the file.
    pub fn open(&self) -> io::Result<SourceReader> {
        match self.data.as_ref() {
            BlobData::Path(path) => Ok(SourceReader::File(BufReader::new(File::open(path)?))),
            BlobData::Bytes(bytes) => Ok(SourceReader::Memory(Cursor::new(Arc::clone(bytes)))),
        }
    }

    /// Size in bytes, when it can be determined without reading.
    pub fn byte_len(&self) -> Option<u64> {
        match self.data.as_ref() {
            BlobData::Path(path) => fs::metadata(path).ok().map(|m| m.len()),
            BlobData::Bytes(bytes) => Some(bytes.len() as u64),
        }
    }

    #[cfg(test)]
    pub(crate) fn downgrade(&self) -> std::sync::Weak<BlobData> {
        Arc::downgrade(&self.data)
    }
}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceHandle")
            .field("name", &self.name)
            .field("data", &self.data)
            .finish()
    }
}

/// Reader over a source's bytes, from disk or memory.
pub enum SourceReader {
    File(BufReader<File>),
    Memory(Cursor<Arc<[u8]>>),
}

impl Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(r) => r.read(buf),
            Self::Memory(r) => r.read(buf),
        }
    }
}

impl Seek for SourceReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(r) => r.seek(pos),
            Self::Memory(r) => r.seek(pos),
        }
    }
}

/// One playlist entry. Immutable once appended to the catalog.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    title: String,
    artist: String,
    source: SourceHandle,
}

impl Track {
    pub(super) fn new(id: TrackId, title: String, artist: String, source: SourceHandle) -> Self {
        Self {
            id,
            title,
            artist,
            source,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn source(&self) -> &SourceHandle {
        &self.source
    }
}
