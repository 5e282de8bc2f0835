use log::{debug, info, warn};

use crate::audio::{EventBus, HandleEvent, HandleId, MediaBackend, MediaHandle, Subscription};
use crate::library::Playlist;

use super::model::{Effect, PlayerMsg, PlayerState};

struct LiveHandle<H> {
    handle: H,
    subscription: Subscription,
}

/// Single owner of player state and of the one live playback handle.
///
/// User actions return immediately; whatever the handle does in response
/// arrives later through [`PlayerController::pump`].
pub struct PlayerController<B: MediaBackend> {
    playlist: Playlist,
    state: PlayerState,
    backend: B,
    bus: EventBus,
    live: Option<LiveHandle<B::Handle>>,
}

impl<B: MediaBackend> PlayerController<B> {
    /// Start at the first track, paused, loop off, with a handle opened for it.
    pub fn mount(playlist: Playlist, backend: B) -> Self {
        let mut controller = Self {
            playlist,
            state: PlayerState::default(),
            backend,
            bus: EventBus::new(),
            live: None,
        };
        controller.replace_handle(false);
        controller
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Id of the handle whose events are currently accepted.
    pub fn live_handle_id(&self) -> Option<HandleId> {
        self.live.as_ref().map(|l| l.subscription.id())
    }

    pub fn toggle_play_pause(&mut self) {
        if self.live.is_none() {
            debug!("play/pause ignored: no playable handle");
            return;
        }
        self.dispatch(PlayerMsg::TogglePlayPause);
    }

    pub fn skip_track(&mut self) {
        self.dispatch(PlayerMsg::SkipTrack);
    }

    pub fn toggle_loop(&mut self) {
        self.dispatch(PlayerMsg::ToggleLoop);
    }

    /// Seek to `slider_value` percent of the track.
    pub fn seek(&mut self, slider_value: f64) {
        if self.live.is_none() {
            return;
        }
        self.dispatch(PlayerMsg::Seek(slider_value));
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta_secs: f64) {
        let duration = self.state.duration_secs;
        if duration <= 0.0 {
            return;
        }
        let value = (self.state.progress_secs + delta_secs) / duration * 100.0;
        self.seek(value);
    }

    /// Poll the live handle and reduce every queued event. Returns how many
    /// events were taken off the bus (stale ones included).
    pub fn pump(&mut self) -> usize {
        if let Some(live) = self.live.as_mut() {
            live.handle.poll();
        }
        let events = self.bus.drain();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// Reduce one handle event, discarding it unless it comes from the live handle.
    pub fn handle_event(&mut self, event: HandleEvent) {
        if Some(event.handle) != self.live_handle_id() {
            debug!("dropping {:?} from retired {:?}", event.event, event.handle);
            return;
        }
        self.dispatch(PlayerMsg::Media(event.event));
    }

    /// Stop playback and release the handle. Also done on drop.
    pub fn unmount(&mut self) {
        self.release_handle();
    }

    fn dispatch(&mut self, msg: PlayerMsg) {
        let effects = self.state.reduce(msg, &self.playlist);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ReplaceHandle { play } => self.replace_handle(play),
            Effect::Play => self.with_handle(|h| h.play()),
            Effect::Pause => self.with_handle(|h| h.pause()),
            Effect::SeekTo(secs) => self.with_handle(|h| h.set_current_time(secs)),
            Effect::SetLooping(looping) => self.with_handle(|h| h.set_looping(looping)),
        }
    }

    fn with_handle(&mut self, f: impl FnOnce(&mut B::Handle)) {
        if let Some(live) = self.live.as_mut() {
            f(&mut live.handle);
        }
    }

    /// Retire the live handle, then open one for the current track.
    ///
    /// The old handle is stopped and its subscription detached before the new
    /// handle exists, so at most one handle can ever report into the state.
    fn replace_handle(&mut self, play: bool) {
        self.release_handle();

        let track = self.playlist.get(self.state.current_track_index);
        let (emitter, subscription) = self.bus.subscribe();
        match self.backend.open(track, emitter) {
            Ok(mut handle) => {
                handle.set_looping(self.state.is_looping);
                if play {
                    handle.play();
                }
                info!(
                    "track {} ({}) bound to {:?}",
                    self.state.current_track_index,
                    track.label(),
                    subscription.id()
                );
                self.live = Some(LiveHandle {
                    handle,
                    subscription,
                });
            }
            Err(e) => {
                warn!("cannot play {}: {e}", track.label());
            }
        }
    }

    fn release_handle(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.handle.stop();
            live.subscription.detach();
            debug!("released {:?}", live.subscription.id());
        }
    }
}

impl<B: MediaBackend> Drop for PlayerController<B> {
    fn drop(&mut self) {
        self.release_handle();
    }
}
