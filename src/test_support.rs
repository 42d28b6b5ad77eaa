//! Scripted collaborators shared by unit tests.

use std::io::Read;

use crate::audio::{MediaEvent, MediaOutput};
use crate::error::{MetadataError, PlaybackError};
use crate::library::{BlobData, FileBlob, SourceHandle};
use crate::metadata::{MetadataReader, Picture, TagData};

/// Reads tags encoded in the bytes themselves as `tags:title|artist|cover`.
/// Anything else fails to probe.
pub struct ScriptedReader;

impl MetadataReader for ScriptedReader {
    fn read(&self, source: &SourceHandle) -> Result<TagData, MetadataError> {
        let mut bytes = Vec::new();
        source
            .open()
            .and_then(|mut r| r.read_to_end(&mut bytes))
            .map_err(|e| MetadataError::Probe(e.to_string()))?;
        let text = std::str::from_utf8(&bytes).map_err(|e| MetadataError::Probe(e.to_string()))?;
        let Some(rest) = text.strip_prefix("tags:") else {
            return Err(MetadataError::Probe("no tag header".to_string()));
        };

        let mut parts = rest.split('|');
        let title = parts.next().map(str::to_string);
        let artist = parts.next().map(str::to_string);
        let pictures = parts
            .next()
            .filter(|c| !c.is_empty())
            .map(|c| {
                vec![Picture {
                    data: c.as_bytes().to_vec(),
                    mime: Some("image/png".to_string()),
                }]
            })
            .unwrap_or_default();

        Ok(TagData {
            title,
            artist,
            pictures,
        })
    }
}

pub fn tagged(title: &str, artist: &str, cover: &str) -> Vec<u8> {
    format!("tags:{title}|{artist}|{cover}").into_bytes()
}

pub fn blob(name: &str, bytes: Vec<u8>) -> FileBlob {
    FileBlob {
        name: name.to_string(),
        data: BlobData::Bytes(bytes.into()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Bind(Option<String>),
    Load,
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
}

/// In-memory stand-in for the audio output.
#[derive(Default)]
pub struct FakeMedia {
    pub calls: Vec<Call>,
    pub bound: Option<String>,
    pub playing: bool,
    pub time: f64,
    pub duration: f64,
    /// Duration reported once a source is loaded.
    pub duration_on_load: f64,
    pub volume: f64,
    pub fail_play: bool,
    /// Set once the loaded source has played to its end.
    pub ended: bool,
    pub events: Vec<MediaEvent>,
}

impl FakeMedia {
    pub fn with_duration(seconds: f64) -> Self {
        Self {
            duration_on_load: seconds,
            ..Self::default()
        }
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Simulate playback progressing by `seconds`.
    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
        self.events.push(MediaEvent::TimeUpdate);
    }

    /// Simulate the source running out, like a drained sink.
    pub fn finish(&mut self) {
        self.time = self.duration;
        self.ended = true;
        self.events.push(MediaEvent::TimeUpdate);
    }
}

impl MediaOutput for FakeMedia {
    fn bind(&mut self, source: Option<SourceHandle>) {
        self.bound = source.map(|s| s.name().to_string());
        self.calls.push(Call::Bind(self.bound.clone()));
        self.playing = false;
        self.time = 0.0;
        self.duration = 0.0;
    }

    fn load(&mut self) {
        self.calls.push(Call::Load);
        self.time = 0.0;
        self.ended = false;
        if self.bound.is_some() {
            self.duration = self.duration_on_load;
            self.events.push(MediaEvent::LoadedMetadata);
        }
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(Call::Play);
        if self.bound.is_none() {
            return Err(PlaybackError::NoSource);
        }
        if self.fail_play {
            return Err(PlaybackError::Output("blocked by policy".to_string()));
        }
        if self.ended {
            self.load();
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        if self.ended {
            self.load();
        }
        self.calls.push(Call::Seek(seconds));
        self.time = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.calls.push(Call::Volume(volume));
        self.volume = volume;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.events)
    }
}
