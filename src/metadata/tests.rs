use super::*;
use crate::error::MetadataError;
use crate::library::{FileBlob, SourceHandle, TrackId};
use crate::test_support::{ScriptedReader, tagged};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn resolved_metadata_drops_blank_values() {
    let meta = ResolvedMetadata::from(TagData {
        title: Some("  Title  ".into()),
        artist: Some("   ".into()),
        pictures: Vec::new(),
    });
    assert_eq!(meta.title.as_deref(), Some("Title"));
    assert_eq!(meta.artist, None);
    assert_eq!(meta.cover, None);
}

#[test]
fn resolved_metadata_keeps_first_non_empty_picture() {
    let meta = ResolvedMetadata::from(TagData {
        title: None,
        artist: None,
        pictures: vec![
            Picture {
                data: Vec::new(),
                mime: None,
            },
            Picture {
                data: vec![1, 2, 3],
                mime: Some("image/jpeg".into()),
            },
            Picture {
                data: vec![9],
                mime: None,
            },
        ],
    });
    let cover = meta.cover.unwrap();
    assert_eq!(cover.data(), &[1, 2, 3]);
    assert_eq!(cover.mime(), Some("image/jpeg"));
    assert_eq!(cover.len(), 3);
}

#[test]
fn resolve_degrades_reader_errors_to_empty_metadata() {
    let source = SourceHandle::from_bytes("x.mp3", b"definitely not tagged".to_vec());
    let meta = resolve(&ScriptedReader, &source);
    assert_eq!(meta, ResolvedMetadata::default());
}

#[test]
fn lofty_reader_rejects_bytes_that_are_not_audio() {
    let text = SourceHandle::from_bytes("notes.mp3", b"plain text, not a container".to_vec());
    assert!(LoftyReader.read(&text).is_err());
    let empty = SourceHandle::from_bytes("empty.mp3", Vec::new());
    assert_eq!(resolve(&LoftyReader, &empty), ResolvedMetadata::default());
}

#[test]
fn lofty_reader_reports_missing_files_as_probe_errors() {
    let dir = tempfile::tempdir().unwrap();
    let blob = FileBlob::from_path(&dir.path().join("gone.flac"));
    let source = SourceHandle::from_blob(blob);
    assert!(matches!(LoftyReader.read(&source), Err(MetadataError::Probe(_))));
}

#[test]
fn resolver_tags_completions_with_the_requested_track() {
    let resolver = Resolver::spawn(Arc::new(ScriptedReader));
    let first = TrackId::from_raw(1);
    let second = TrackId::from_raw(2);

    resolver.request(first, SourceHandle::from_bytes("a.mp3", tagged("A", "X", "cover-a")));
    resolver.request(second, SourceHandle::from_bytes("b.mp3", b"untagged".to_vec()));

    let a = resolver.recv_timeout(Duration::from_secs(5)).unwrap();
    let b = resolver.recv_timeout(Duration::from_secs(5)).unwrap();

    assert_eq!(a.track, first);
    assert_eq!(a.metadata.cover.unwrap().data(), b"cover-a");
    assert_eq!(b.track, second);
    assert_eq!(b.metadata, ResolvedMetadata::default());
    assert!(resolver.drain().is_empty());
}

#[test]
fn resolver_releases_the_source_once_done() {
    let resolver = Resolver::spawn(Arc::new(ScriptedReader));
    let source = SourceHandle::from_bytes("a.mp3", tagged("A", "X", ""));
    let weak = source.downgrade();

    resolver.request(TrackId::from_raw(7), source);
    assert!(resolver.recv_timeout(Duration::from_secs(5)).is_some());
    drop(resolver);

    assert!(weak.upgrade().is_none());
}

struct PanickingReader;

impl MetadataReader for PanickingReader {
    fn read(&self, _source: &SourceHandle) -> Result<TagData, MetadataError> {
        panic!("reader blew up");
    }
}

#[test]
fn dropping_the_resolver_survives_a_panicked_worker() {
    let resolver = Resolver::spawn(Arc::new(PanickingReader));
    resolver.request(TrackId::from_raw(1), SourceHandle::from_bytes("a.mp3", Vec::new()));

    assert!(resolver.recv_timeout(Duration::from_secs(5)).is_none());
    drop(resolver);
}
