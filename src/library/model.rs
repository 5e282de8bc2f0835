use std::path::PathBuf;

use thiserror::Error;

/// A single entry of the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Resolved location of the audio data.
    pub source: PathBuf,
    /// Resolved cover image reference (URL or path). May be empty.
    pub cover_url: String,
}

impl Track {
    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn label(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            a => format!("{} - {}", a, self.title),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("playlist is empty")]
    EmptyPlaylist,
}

/// Read-only ordered sequence of tracks. Never empty.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, LibraryError> {
        if tracks.is_empty() {
            return Err(LibraryError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Track at `index`. Callers keep the index in range with [`Playlist::next_index`].
    pub fn get(&self, index: usize) -> &Track {
        &self.tracks[index]
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Index following `index`, wrapping to 0 after the last track.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }
}
