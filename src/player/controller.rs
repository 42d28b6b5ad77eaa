use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::audio::{MediaEvent, MediaOutput, clamp_volume, progress_percent, seek_target};
use crate::config::{LibrarySettings, Settings};
use crate::error::{ImportError, PlaybackError, TransportError};
use crate::library::{
    FileBlob, ImportedTrack, SourceHandle, TrackId, collect_audio_files, import_blobs, open_blobs,
};
use crate::metadata::{MetadataReader, Resolution, Resolver};

use super::state::PlayerState;

/// Outcome of an import batch.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: Vec<ImportError>,
}

/// Transport controller for one player instance.
///
/// Owns the state, the output and the metadata worker; dropping it releases
/// every source and artwork buffer it allocated.
pub struct Player<M: MediaOutput> {
    state: PlayerState,
    media: M,
    reader: Arc<dyn MetadataReader>,
    resolver: Resolver,
    pending_artwork: HashSet<TrackId>,
    library: LibrarySettings,
}

impl<M: MediaOutput> Player<M> {
    pub fn new(mut media: M, reader: Arc<dyn MetadataReader>, settings: &Settings) -> Self {
        let volume = clamp_volume(settings.audio.initial_volume);
        media.set_volume(volume);

        Self {
            state: PlayerState::new(volume, settings.ui.show_playlist),
            media,
            resolver: Resolver::spawn(Arc::clone(&reader)),
            reader,
            pending_artwork: HashSet::new(),
            library: settings.library.clone(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Import files and directories, in the given order.
    pub fn import_paths(&mut self, paths: &[PathBuf]) -> ImportSummary {
        let files = collect_audio_files(paths, &self.library);
        let (blobs, failed) = open_blobs(&files);
        let imported = self.import_blobs(blobs);

        log::info!(
            "imported {imported} track(s), {} failure(s), playlist now {}",
            failed.len(),
            self.state.catalog.len()
        );
        ImportSummary { imported, failed }
    }

    /// Resolve and append raw blobs. Returns how many tracks were added.
    pub fn import_blobs(&mut self, blobs: Vec<FileBlob>) -> usize {
        let imported = import_blobs(blobs, self.reader.as_ref(), &self.library);
        let count = imported.len();
        self.append(imported);
        count
    }

    fn append(&mut self, imported: Vec<ImportedTrack>) {
        for t in imported {
            self.state.catalog.push(t.title, t.artist, t.source);
        }
        self.reconcile();
    }

    /// Start playback of the current track.
    ///
    /// On refusal the intent stays paused and the error is kept as the
    /// status message.
    pub fn play(&mut self) -> Result<(), TransportError> {
        if self.state.catalog.is_empty() {
            return Err(TransportError::EmptyCatalog);
        }
        self.reconcile();

        match self.media.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.state.status = None;
                Ok(())
            }
            Err(e) => {
                self.playback_refused(&e);
                Err(e.into())
            }
        }
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.state.is_playing = false;
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), TransportError> {
        if self.state.is_playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    pub fn next(&mut self) -> Result<(), TransportError> {
        let index = self
            .state
            .catalog
            .next_index(self.state.current_index)
            .ok_or(TransportError::EmptyCatalog)?;
        self.move_to(index);
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), TransportError> {
        let index = self
            .state
            .catalog
            .prev_index(self.state.current_index)
            .ok_or(TransportError::EmptyCatalog)?;
        self.move_to(index);
        Ok(())
    }

    pub fn select_track(&mut self, index: usize) -> Result<(), TransportError> {
        let len = self.state.catalog.len();
        if len == 0 {
            return Err(TransportError::EmptyCatalog);
        }
        if index >= len {
            return Err(TransportError::IndexOutOfRange { index, len });
        }
        self.move_to(index);
        Ok(())
    }

    fn move_to(&mut self, index: usize) {
        self.state.current_index = index;
        self.reconcile();
    }

    /// Bring the output in line with the current track.
    ///
    /// Acts only when the track at `current_index` differs from the bound
    /// one: binds it, restarts from zero, resumes playback if the intent is
    /// playing, and shows (or requests) its artwork.
    fn reconcile(&mut self) {
        let target = self
            .state
            .current_track()
            .map(|t| (t.id(), t.source().clone()));
        let target_id = target.as_ref().map(|(id, _)| *id);
        if target_id == self.state.bound {
            return;
        }

        self.state.bound = target_id;
        self.state.reset_position();

        let Some((id, source)) = target else {
            self.media.bind(None);
            self.media.load();
            self.state.cover_image = None;
            return;
        };

        log::debug!("binding track {id} ({})", source.name());
        self.media.bind(Some(source.clone()));
        self.media.load();

        if self.state.is_playing {
            if let Err(e) = self.media.play() {
                self.playback_refused(&e);
            }
        }

        self.show_artwork(id, source);
    }

    fn playback_refused(&mut self, e: &PlaybackError) {
        log::warn!("playback did not start: {e}");
        self.state.is_playing = false;
        self.state.status = Some(e.to_string());
    }

    fn show_artwork(&mut self, id: TrackId, source: SourceHandle) {
        match self.state.artwork.get(&id) {
            Some(cached) => self.state.cover_image = cached.clone(),
            None => {
                self.state.cover_image = None;
                if self.pending_artwork.insert(id) {
                    self.resolver.request(id, source);
                }
            }
        }
    }

    /// Record a finished resolution.
    ///
    /// Artwork is cached per track; it only reaches the displayed slot when
    /// its track is still the bound one, so late completions for tracks the
    /// user already skipped past never overwrite the current cover.
    pub fn apply_resolution(&mut self, resolution: Resolution) {
        let Resolution { track, metadata } = resolution;
        self.pending_artwork.remove(&track);
        self.state.artwork.insert(track, metadata.cover.clone());

        if self.state.bound == Some(track) {
            self.state.cover_image = metadata.cover;
        } else {
            log::debug!("artwork for track {track} arrived after it stopped being current");
        }
    }

    /// Process output events and background completions.
    pub fn pump(&mut self) {
        for event in self.media.poll_events() {
            self.handle_media_event(event);
        }
        for resolution in self.resolver.drain() {
            self.apply_resolution(resolution);
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => {
                let current = self.media.current_time();
                let progress = progress_percent(current, self.media.duration()).unwrap_or(0.0);
                self.state.set_position(current, progress);
            }
            MediaEvent::LoadedMetadata => {
                self.state.duration = self.media.duration();
            }
        }
    }

    /// Seek to `progress` percent of the track. Ignored until the duration
    /// is known.
    pub fn seek_to_progress(&mut self, progress: f64) {
        let Some(target) = seek_target(progress, self.media.duration()) else {
            return;
        };
        self.media.set_current_time(target);
        self.state.set_position(target, progress.clamp(0.0, 100.0));
    }

    /// Seek relative to the current position.
    pub fn scrub(&mut self, seconds: i64) {
        let target = self.media.current_time() + seconds as f64;
        if let Some(progress) = progress_percent(target, self.media.duration()) {
            self.seek_to_progress(progress);
        }
    }

    pub fn set_volume(&mut self, volume: f64) {
        let volume = clamp_volume(volume);
        self.state.volume = volume;
        self.media.set_volume(volume);
    }

    /// Step the volume by `delta`, snapped to multiples of `delta` so that
    /// repeated steps land exactly on silence and full volume.
    pub fn step_volume(&mut self, delta: f64) {
        let step = delta.abs();
        let raw = self.state.volume + delta;
        let target = if step > 0.0 {
            (raw / step).round() * step
        } else {
            raw
        };
        self.set_volume(target);
    }

    pub fn toggle_playlist(&mut self) {
        self.state.show_playlist = !self.state.show_playlist;
    }

    #[cfg(test)]
    pub(crate) fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub(crate) fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Block until every requested artwork resolution has been applied.
    #[cfg(test)]
    pub(crate) fn settle(&mut self) {
        use std::time::Duration;
        while !self.pending_artwork.is_empty() {
            match self.resolver.recv_timeout(Duration::from_secs(5)) {
                Some(r) => self.apply_resolution(r),
                None => panic!("metadata worker did not answer"),
            }
        }
    }
}
