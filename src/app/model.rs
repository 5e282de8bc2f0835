//! Player state and its reducer.
//!
//! `PlayerState::reduce` is the only code that writes player state. It takes
//! user actions and media events alike and returns the [`Effect`]s the
//! controller has to apply to the playback handle.

use crate::audio::MediaEvent;
use crate::library::Playlist;

/// Everything that can change player state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlayerMsg {
    TogglePlayPause,
    SkipTrack,
    ToggleLoop,
    /// Seek to a slider value in percent of the duration.
    Seek(f64),
    /// An event from the live playback handle.
    Media(MediaEvent),
}

/// Requests for the playback handle produced by the reducer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Effect {
    Play,
    Pause,
    SeekTo(f64),
    SetLooping(bool),
    /// Retire the current handle and open one for the current track.
    ReplaceHandle { play: bool },
}

/// UI-facing playback state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub current_track_index: usize,
    /// Confirmed by the handle; only `Started`/`Paused` change it.
    pub is_playing: bool,
    pub progress_secs: f64,
    /// 0 until the handle reports a duration.
    pub duration_secs: f64,
    pub is_looping: bool,
    // Last play/pause request the handle has not confirmed yet.
    requested: Option<bool>,
}

/// Map a slider value (percent) to a position inside `[0, duration]`.
pub fn seek_target(slider_value: f64, duration: f64) -> f64 {
    if slider_value.is_nan() || duration <= 0.0 {
        return 0.0;
    }
    (slider_value / 100.0 * duration).clamp(0.0, duration)
}

/// Unknown, infinite or negative durations count as 0.
fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

impl PlayerState {
    /// Whether the player is playing or has been asked to play.
    pub fn play_intent(&self) -> bool {
        self.requested.unwrap_or(self.is_playing)
    }

    /// Seek-bar position in percent.
    pub fn slider_value(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.progress_secs / self.duration_secs * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    fn clamp_progress(&self, position: f64) -> f64 {
        let position = if position.is_finite() {
            position.max(0.0)
        } else {
            0.0
        };
        if self.duration_secs > 0.0 {
            position.min(self.duration_secs)
        } else {
            position
        }
    }

    fn advance(&mut self, playlist: &Playlist) -> Vec<Effect> {
        self.current_track_index = playlist.next_index(self.current_track_index);
        // The outgoing handle is stopped as part of the replacement; the new
        // one confirms with `Started`.
        self.is_playing = false;
        self.requested = Some(true);
        self.progress_secs = 0.0;
        self.duration_secs = 0.0;
        vec![Effect::ReplaceHandle { play: true }]
    }

    /// Apply `msg` and return what the playback handle has to do.
    pub fn reduce(&mut self, msg: PlayerMsg, playlist: &Playlist) -> Vec<Effect> {
        match msg {
            PlayerMsg::TogglePlayPause => {
                let want = !self.play_intent();
                self.requested = Some(want);
                vec![if want { Effect::Play } else { Effect::Pause }]
            }
            PlayerMsg::SkipTrack => self.advance(playlist),
            PlayerMsg::ToggleLoop => {
                self.is_looping = !self.is_looping;
                vec![Effect::SetLooping(self.is_looping)]
            }
            PlayerMsg::Seek(value) => {
                let target = seek_target(value, self.duration_secs);
                self.progress_secs = target;
                vec![Effect::SeekTo(target)]
            }
            PlayerMsg::Media(event) => self.reduce_media(event, playlist),
        }
    }

    fn reduce_media(&mut self, event: MediaEvent, playlist: &Playlist) -> Vec<Effect> {
        match event {
            MediaEvent::Started => {
                self.is_playing = true;
                if self.requested == Some(true) {
                    self.requested = None;
                }
                Vec::new()
            }
            MediaEvent::Paused => {
                self.is_playing = false;
                if self.requested == Some(false) {
                    self.requested = None;
                }
                Vec::new()
            }
            MediaEvent::TimeUpdate { position, duration } => {
                self.duration_secs = sanitize_duration(duration);
                self.progress_secs = self.clamp_progress(position);
                Vec::new()
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.duration_secs = sanitize_duration(duration);
                self.progress_secs = self.clamp_progress(self.progress_secs);
                Vec::new()
            }
            MediaEvent::Ended if self.is_looping => {
                // The handle should have repeated on its own; rewind it in place.
                self.progress_secs = 0.0;
                self.requested = Some(true);
                vec![Effect::SeekTo(0.0), Effect::Play]
            }
            MediaEvent::Ended => self.advance(playlist),
        }
    }
}
