//! `rodio`-backed [`MediaOutput`].
//!
//! One paused `Sink` is prepared per loaded source. Position comes from the
//! sink itself, so no separate clock is kept.

use std::path::Path;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::PlaybackError;
use crate::library::{SourceHandle, SourceReader};

use super::types::{MediaEvent, MediaOutput};

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<SourceHandle>,
    load_error: Option<String>,
    duration: f64,
    volume: f32,
    events: Vec<MediaEvent>,
    last_tick: Instant,
    tick: Duration,
}

impl RodioOutput {
    /// Open the default output device. Time updates are raised at most once
    /// per `tick` while playing.
    pub fn open(tick: Duration) -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land
        // on top of the terminal UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            load_error: None,
            duration: 0.0,
            volume: 1.0,
            events: Vec::new(),
            last_tick: Instant::now(),
            tick,
        })
    }

    fn decode(source: &SourceHandle) -> Result<Decoder<SourceReader>, String> {
        let reader = source.open().map_err(|e| e.to_string())?;
        let mut builder = Decoder::builder().with_data(reader).with_seekable(true);
        if let Some(len) = source.byte_len() {
            builder = builder.with_byte_len(len);
        }
        if let Some(ext) = Path::new(source.name()).extension().and_then(|e| e.to_str()) {
            builder = builder.with_hint(ext);
        }
        builder.build().map_err(|e| e.to_string())
    }
}

impl MediaOutput for RodioOutput {
    fn bind(&mut self, source: Option<SourceHandle>) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.source = source;
        self.load_error = None;
        self.duration = 0.0;
    }

    fn load(&mut self) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.load_error = None;
        self.duration = 0.0;

        let Some(source) = self.source.as_ref() else {
            return;
        };

        match Self::decode(source) {
            Ok(decoder) => {
                self.duration = decoder
                    .total_duration()
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0);

                let sink = Sink::connect_new(self.stream.mixer());
                sink.set_volume(self.volume);
                sink.append(decoder);
                sink.pause();
                self.sink = Some(sink);
                self.events.push(MediaEvent::LoadedMetadata);
            }
            Err(reason) => {
                log::debug!("decode of {} failed: {reason}", source.name());
                self.load_error = Some(reason);
            }
        }
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if let Some(reason) = &self.load_error {
            return Err(PlaybackError::Decode {
                name: self
                    .source
                    .as_ref()
                    .map(|s| s.name().to_string())
                    .unwrap_or_default(),
                reason: reason.clone(),
            });
        }

        // A finished sink has nothing left to play; start the source over.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.load();
        }

        let sink = self.sink.as_ref().ok_or(PlaybackError::NoSource)?;
        sink.play();
        self.last_tick = Instant::now();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn current_time(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, seconds: f64) {
        // A drained sink has dropped its decoder; rebuild it so the seek
        // lands, and keep playing if it was.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            let resume = self.sink.as_ref().is_some_and(|s| !s.is_paused());
            self.load();
            if resume {
                if let Some(sink) = self.sink.as_ref() {
                    sink.play();
                }
            }
        }

        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let target = Duration::from_secs_f64(seconds.max(0.0));
        if let Err(e) = sink.try_seek(target) {
            log::warn!("{}", PlaybackError::Seek(e.to_string()));
        }
        self.events.push(MediaEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume as f32;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        if let Some(sink) = self.sink.as_ref() {
            if !sink.is_paused() && !sink.empty() && self.last_tick.elapsed() >= self.tick {
                self.last_tick = Instant::now();
                self.events.push(MediaEvent::TimeUpdate);
            }
        }
        std::mem::take(&mut self.events)
    }
}
