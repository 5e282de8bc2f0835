use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reprise/config.toml` or `~/.config/reprise/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REPRISE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub playlist: PlaylistSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often a playing handle reports its position (milliseconds).
    pub time_update_ms: u64,
    /// Output volume, 0.0 to 1.0.
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            time_update_ms: 250,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether to render the cover reference box.
    pub show_cover: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "Now Playing".to_string(),
            show_cover: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Input poll timeout per event-loop iteration (milliseconds).
    pub poll_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            poll_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start with the loop flag on.
    pub looping: bool,
    /// Request playback of the first track right after startup.
    pub autoplay: bool,
}

/// One `[[playlist.tracks]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEntry {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    /// Audio file; relative paths resolve against `playlist.assets_dir`.
    pub source: PathBuf,
    #[serde(default)]
    pub cover_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Directory that relative track sources resolve against.
    pub assets_dir: PathBuf,
    /// Explicit playlist. Empty means "use the built-in tracks".
    pub tracks: Vec<TrackEntry>,
    /// Cover reference for scanned tracks without a sibling cover image.
    pub default_cover_url: String,

    /// File extensions to treat as audio when scanning (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            tracks: Vec::new(),
            default_cover_url: String::new(),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter (`error`, `warn`, `info`, `debug`, `trace`); `RUST_LOG` wins.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/reprise/reprise.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}
