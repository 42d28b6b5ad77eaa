use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
#[cfg(test)]
use std::time::Duration;

use crate::library::{SourceHandle, TrackId};

use super::reader::{MetadataReader, resolve};
use super::types::ResolvedMetadata;

struct ResolveRequest {
    track: TrackId,
    source: SourceHandle,
}

/// A finished background resolution, tagged with the track it was for.
#[derive(Debug)]
pub struct Resolution {
    pub track: TrackId,
    pub metadata: ResolvedMetadata,
}

/// Background metadata worker.
///
/// Requests are processed in order on one thread; completions are collected
/// with [`Resolver::drain`] from the event loop, which owns all state
/// mutation. There is no cancellation: callers decide whether a completion
/// is still relevant by its `track`.
pub struct Resolver {
    tx: Option<Sender<ResolveRequest>>,
    rx: Receiver<Resolution>,
    join: Option<JoinHandle<()>>,
}

impl Resolver {
    pub fn spawn(reader: Arc<dyn MetadataReader>) -> Self {
        let (tx, req_rx) = mpsc::channel::<ResolveRequest>();
        let (done_tx, rx) = mpsc::channel::<Resolution>();

        let join = thread::spawn(move || {
            for ResolveRequest { track, source } in req_rx {
                let metadata = resolve(reader.as_ref(), &source);
                drop(source);
                if done_tx.send(Resolution { track, metadata }).is_err() {
                    break;
                }
            }
        });

        Self {
            tx: Some(tx),
            rx,
            join: Some(join),
        }
    }

    pub fn request(&self, track: TrackId, source: SourceHandle) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        if tx.send(ResolveRequest { track, source }).is_err() {
            log::warn!("metadata worker has stopped; dropping request for track {track}");
        }
    }

    /// Collect every completion available right now without blocking.
    pub fn drain(&self) -> Vec<Resolution> {
        self.rx.try_iter().collect()
    }

    #[cfg(test)]
    pub(crate) fn recv_timeout(&self, timeout: Duration) -> Option<Resolution> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.tx.take();
        if let Some(h) = self.join.take() {
            if h.join().is_err() {
                log::warn!("metadata worker panicked");
            }
        }
    }
}
