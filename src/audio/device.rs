//! `rodio`-backed media primitive.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::library::Track;

use super::backend::{MediaBackend, MediaHandle};
use super::emitter::EventEmitter;
use super::sink::{create_sink_at, probe_duration};
use super::types::{MediaError, MediaEvent};

/// Hands out one [`RodioHandle`] per track, all playing into one mixer.
pub struct RodioBackend {
    mixer: Mixer,
    time_update: Duration,
    volume: f32,
    // Keeps the device open while handles play into its mixer.
    _stream: Option<OutputStream>,
}

impl RodioBackend {
    pub fn open_default(settings: &AudioSettings) -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MediaError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land
        // on top of the TUI.
        stream.log_on_drop(false);

        let mut backend = Self::with_mixer(stream.mixer().clone(), settings);
        backend._stream = Some(stream);
        Ok(backend)
    }

    /// Play into `mixer`; whoever pulls its samples drives playback.
    pub fn with_mixer(mixer: Mixer, settings: &AudioSettings) -> Self {
        Self {
            mixer,
            time_update: Duration::from_millis(settings.time_update_ms.max(1)),
            volume: settings.volume,
            _stream: None,
        }
    }
}

impl MediaBackend for RodioBackend {
    type Handle = RodioHandle;

    fn open(&mut self, track: &Track, events: EventEmitter) -> Result<RodioHandle, MediaError> {
        let mixer = self.mixer.clone();
        let (sink, decoded) = create_sink_at(&mixer, &track.source, Duration::ZERO)?;
        sink.set_volume(self.volume);

        let duration = decoded.or_else(|| probe_duration(&track.source));
        log::debug!(
            "opened {:?} (duration {:?}) as {:?}",
            track.source,
            duration,
            events.id()
        );

        Ok(RodioHandle {
            source: track.source.clone(),
            mixer,
            sink,
            offset: Duration::ZERO,
            duration,
            volume: self.volume,
            looping: false,
            playing: false,
            metadata_sent: false,
            time_update_due: false,
            last_update: None,
            time_update: self.time_update,
            events,
        })
    }
}

pub struct RodioHandle {
    source: PathBuf,
    mixer: Mixer,
    sink: Sink,
    // Position of the sink's first sample within the track, set when the
    // sink had to be rebuilt to seek.
    offset: Duration,
    duration: Option<Duration>,
    volume: f32,
    looping: bool,
    playing: bool,
    metadata_sent: bool,
    time_update_due: bool,
    last_update: Option<Instant>,
    time_update: Duration,
    events: EventEmitter,
}

impl RodioHandle {
    fn duration_secs(&self) -> f64 {
        self.duration.map_or(f64::NAN, |d| d.as_secs_f64())
    }

    /// Replace the sink with a fresh one starting at `at`, keeping play state.
    fn rebuild(&mut self, at: Duration) -> Result<(), MediaError> {
        let (sink, _) = create_sink_at(&self.mixer, &self.source, at)?;
        sink.set_volume(self.volume);
        if self.playing {
            sink.play();
        }
        self.sink.stop();
        self.sink = sink;
        self.offset = at;
        Ok(())
    }

    fn emit_time_update(&mut self) {
        self.events.emit(MediaEvent::TimeUpdate {
            position: self.current_time(),
            duration: self.duration_secs(),
        });
        self.last_update = Some(Instant::now());
        self.time_update_due = false;
    }

    fn finish_track(&mut self) {
        if self.looping {
            match self.rebuild(Duration::ZERO) {
                Ok(()) => {
                    self.time_update_due = true;
                    return;
                }
                Err(e) => log::warn!("failed to restart looping track: {e}"),
            }
        }

        self.playing = false;
        self.events.emit(MediaEvent::TimeUpdate {
            position: self.duration.map_or_else(|| self.current_time(), |d| d.as_secs_f64()),
            duration: self.duration_secs(),
        });
        self.events.emit(MediaEvent::Paused);
        self.events.emit(MediaEvent::Ended);
    }
}

impl MediaHandle for RodioHandle {
    fn play(&mut self) {
        if self.playing {
            return;
        }
        if self.sink.empty() {
            // Exhausted: playing again starts from the top.
            if let Err(e) = self.rebuild(Duration::ZERO) {
                log::warn!("cannot restart {:?}: {e}", self.source);
                return;
            }
        }
        self.sink.play();
        self.playing = true;
        self.last_update = None;
        self.events.emit(MediaEvent::Started);
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.sink.pause();
        self.playing = false;
        self.events.emit(MediaEvent::Paused);
    }

    fn current_time(&self) -> f64 {
        (self.offset + self.sink.get_pos()).as_secs_f64()
    }

    fn set_current_time(&mut self, secs: f64) {
        let mut secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        if let Some(d) = self.duration {
            secs = secs.min(d.as_secs_f64());
        }
        let target = Duration::from_secs_f64(secs);

        // A rebuilt sink wraps `skip_duration`, which cannot seek backwards.
        let seeked = self.offset.is_zero()
            && !self.sink.empty()
            && match self.sink.try_seek(target) {
                Ok(()) => true,
                Err(e) => {
                    log::debug!("try_seek failed ({e}), rebuilding sink");
                    false
                }
            };
        if !seeked {
            if let Err(e) = self.rebuild(target) {
                log::warn!("seek in {:?} failed: {e}", self.source);
                return;
            }
        }
        self.time_update_due = true;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn poll(&mut self) {
        if !self.metadata_sent {
            self.metadata_sent = true;
            self.events.emit(MediaEvent::LoadedMetadata {
                duration: self.duration_secs(),
            });
        }

        if self.playing && self.sink.empty() {
            self.finish_track();
            if !self.playing {
                return;
            }
        }

        let due = self.time_update_due
            || (self.playing
                && self
                    .last_update
                    .is_none_or(|t| t.elapsed() >= self.time_update));
        if due {
            self.emit_time_update();
        }
    }

    fn stop(&mut self) {
        self.sink.stop();
        if self.playing {
            self.playing = false;
            self.events.emit(MediaEvent::Paused);
        }
    }
}

impl Drop for RodioHandle {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
