use crate::library::Track;

use super::emitter::EventEmitter;
use super::types::MediaError;

/// One live playback resource bound to a single track.
///
/// Requests are fire-and-forget: the outcome is reported later through the
/// [`EventEmitter`] the handle was opened with.
pub trait MediaHandle {
    fn play(&mut self);
    fn pause(&mut self);
    /// Current position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    fn set_looping(&mut self, looping: bool);
    /// Give the handle a chance to report progress, metadata or end of track.
    fn poll(&mut self);
    /// Stop output and release the underlying resources.
    fn stop(&mut self);
}

/// Factory for playback handles.
pub trait MediaBackend {
    type Handle: MediaHandle;

    fn open(&mut self, track: &Track, events: EventEmitter) -> Result<Self::Handle, MediaError>;
}
