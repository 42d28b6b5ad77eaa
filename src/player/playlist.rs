use super::state::PlayerState;

/// Render-ready view of one playlist entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistRow {
    pub index: usize,
    pub title: String,
    pub artist: String,
    /// This is the current track.
    pub highlighted: bool,
    /// Current track and playback intent is on.
    pub active: bool,
}

/// Derive playlist rows from the player state.
pub fn playlist_rows(state: &PlayerState) -> Vec<PlaylistRow> {
    state
        .tracks()
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let highlighted = index == state.current_index();
            PlaylistRow {
                index,
                title: track.title().to_string(),
                artist: track.artist().to_string(),
                highlighted,
                active: highlighted && state.is_playing(),
            }
        })
        .collect()
}
