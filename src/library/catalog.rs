use super::model::{SourceHandle, Track, TrackId};

/// Append-only, ordered list of tracks. Insertion order is playback order.
#[derive(Debug, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    next_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track and return the id allocated for it.
    pub fn push(&mut self, title: String, artist: String, source: SourceHandle) -> TrackId {
        let id = TrackId::new(self.next_id);
        self.next_id += 1;
        self.tracks.push(Track::new(id, title, artist, source));
        id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Index after `current`, wrapping to the first track.
    /// Returns `None` for an empty catalog.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        Some((current + 1) % self.tracks.len())
    }

    /// Index before `current`, wrapping to the last track.
    /// Returns `None` for an empty catalog.
    pub fn prev_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match current {
            0 => Some(self.tracks.len() - 1),
            // An out-of-range cursor walks back from the end.
            c if c > self.tracks.len() => Some(self.tracks.len() - 1),
            c => Some(c - 1),
        }
    }
}
