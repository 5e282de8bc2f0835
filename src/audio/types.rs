//! Event and error types shared by the media layer.

use std::path::PathBuf;

use thiserror::Error;

/// Identity of one playback handle. Never reused within a process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub(crate) u64);

/// What a playback handle reports about itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback started or resumed.
    Started,
    /// Playback paused (including the implicit pause at end of track).
    Paused,
    /// The track ran out and the handle is not looping.
    Ended,
    /// Position advanced. `duration` is NaN while unknown.
    TimeUpdate { position: f64, duration: f64 },
    /// Duration became known. NaN when the source cannot tell.
    LoadedMetadata { duration: f64 },
}

/// A [`MediaEvent`] tagged with the handle that produced it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandleEvent {
    pub handle: HandleId,
    pub event: MediaEvent,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no audio output device: {0}")]
    Device(String),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
