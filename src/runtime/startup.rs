use std::path::Path;

use crate::app::PlayerController;
use crate::audio::MediaBackend;
use crate::config::{PlaybackSettings, PlaylistSettings};
use crate::library::{LibraryError, Playlist, Track, builtin_tracks, scan};

/// Pick the playlist origin: a scanned directory, then `[[playlist.tracks]]`,
/// then the built-in tracks.
pub fn build_playlist(
    dir: Option<&Path>,
    settings: &PlaylistSettings,
) -> Result<Playlist, LibraryError> {
    let tracks = match dir {
        Some(dir) => scan(dir, settings),
        None if !settings.tracks.is_empty() => configured_tracks(settings),
        None => builtin_tracks(&settings.assets_dir),
    };
    Playlist::new(tracks)
}

fn configured_tracks(settings: &PlaylistSettings) -> Vec<Track> {
    settings
        .tracks
        .iter()
        .map(|entry| Track {
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            source: if entry.source.is_absolute() {
                entry.source.clone()
            } else {
                settings.assets_dir.join(&entry.source)
            },
            cover_url: if entry.cover_url.is_empty() {
                settings.default_cover_url.clone()
            } else {
                entry.cover_url.clone()
            },
        })
        .collect()
}

/// Apply configured startup behavior as ordinary user actions.
pub fn apply_playback_defaults<B: MediaBackend>(
    player: &mut PlayerController<B>,
    settings: &PlaybackSettings,
) {
    if settings.looping {
        player.toggle_loop();
    }
    if settings.autoplay {
        player.toggle_play_pause();
    }
}
