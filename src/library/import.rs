use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::ImportError;
use crate::metadata::{MetadataReader, resolve};

use super::model::{FileBlob, SourceHandle};

/// A resolved import, ready to be appended to the catalog.
#[derive(Debug)]
pub struct ImportedTrack {
    pub title: String,
    pub artist: String,
    pub source: SourceHandle,
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Title used when a file carries no usable title tag: the file name minus
/// its last extension.
pub(crate) fn fallback_title(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    };

    if !stem.trim().is_empty() {
        stem.to_string()
    } else if !base.trim().is_empty() {
        base.to_string()
    } else {
        "Unknown Title".to_string()
    }
}

/// Expand user-selected paths into the audio files to import.
///
/// Directories are walked in file-name order; plain files are kept only when
/// their extension is one of `settings.extensions`.
pub fn collect_audio_files(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut walker = WalkDir::new(path)
                .follow_links(settings.follow_links)
                .sort_by_file_name();

            // Non-recursive = only the root directory.
            let depth_cap = if settings.recursive {
                settings.max_depth
            } else {
                Some(1)
            };
            if let Some(d) = depth_cap {
                walker = walker.max_depth(d);
            }

            for entry in walker
                .into_iter()
                .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
                .filter_map(Result::ok)
            {
                let p = entry.path();
                if p.is_file() && is_audio_file(p, settings) {
                    files.push(p.to_path_buf());
                }
            }
        } else if is_audio_file(path, settings) {
            files.push(path.clone());
        } else {
            log::debug!("skipping {}: not an audio file", path.display());
        }
    }

    files
}

/// Open a lazily-read blob for each file.
///
/// Only the file's metadata is touched here; contents are read when tags
/// are probed or the track is loaded. Files that cannot be stat'ed are
/// reported and skipped; the rest of the batch still loads.
pub fn open_blobs(paths: &[PathBuf]) -> (Vec<FileBlob>, Vec<ImportError>) {
    let mut blobs = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();

    for path in paths {
        match fs::metadata(path) {
            Ok(_) => blobs.push(FileBlob::from_path(path)),
            Err(source) => {
                log::warn!("cannot open {}: {source}", path.display());
                failures.push(ImportError::Io {
                    path: path.clone(),
                    source,
                });
            }
        }
    }

    (blobs, failures)
}

/// Bind each blob to a fresh source and resolve its display metadata.
///
/// Metadata failures never drop a file: the track falls back to its file
/// name and `settings.unknown_artist`.
pub fn import_blobs(
    blobs: Vec<FileBlob>,
    reader: &dyn MetadataReader,
    settings: &LibrarySettings,
) -> Vec<ImportedTrack> {
    blobs
        .into_iter()
        .map(|blob| {
            let title_fallback = fallback_title(&blob.name);
            let source = SourceHandle::from_blob(blob);
            let meta = resolve(reader, &source);
            let title = meta.title.unwrap_or(title_fallback);
            let artist = meta
                .artist
                .unwrap_or_else(|| settings.unknown_artist.clone());

            ImportedTrack {
                title,
                artist,
                source,
            }
        })
        .collect()
}
