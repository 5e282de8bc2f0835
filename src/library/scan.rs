use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::PlaylistSettings;

use super::model::Track;

const COVER_STEMS: [&str; 3] = ["cover", "folder", "front"];
const COVER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

fn normalized_extensions(settings: &PlaylistSettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Find a `cover.jpg`-style image next to `audio`.
pub(super) fn find_cover(audio: &Path) -> Option<PathBuf> {
    let dir = audio.parent()?;
    let entries = std::fs::read_dir(dir).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            let stem_ok = p
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| COVER_STEMS.contains(&s.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            let ext_ok = p
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| COVER_EXTENSIONS.contains(&s.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            stem_ok && ext_ok
        })
        .collect();

    // read_dir order is platform-dependent.
    candidates.sort();
    candidates.into_iter().next()
}

fn read_tags(path: &Path) -> (Option<String>, Option<String>) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return (None, None);
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return (None, None);
    };

    let clean = |v: Option<std::borrow::Cow<'_, str>>| {
        v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    };
    (clean(tag.title()), clean(tag.artist()))
}

/// Build tracks from the audio files under `dir`.
///
/// Title and artist come from the file's tags when present, otherwise the
/// file stem and "Unknown artist". Results are sorted case-insensitively by
/// their `Artist - Title` label.
pub fn scan(dir: &Path, settings: &PlaylistSettings) -> Vec<Track> {
    let exts = normalized_extensions(settings);
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

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
        let path = entry.path();
        if !path.is_file() || !has_extension(path, &exts) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let (title, artist) = read_tags(path);

        let cover_url = find_cover(path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| settings.default_cover_url.clone());

        tracks.push(Track {
            title: title.unwrap_or(stem),
            artist: artist.unwrap_or_else(|| "Unknown artist".to_string()),
            source: path.to_path_buf(),
            cover_url,
        });
    }

    log::info!("scanned {} track(s) under {}", tracks.len(), dir.display());

    tracks.sort_by_key(|t| t.label().to_lowercase());
    tracks
}
