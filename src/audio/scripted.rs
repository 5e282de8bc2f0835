//! In-memory media backend for tests.
//!
//! Records every request and behaves like a well-mannered media element: it
//! confirms state changes through its emitter and stays silent on redundant
//! requests. Tests drive everything else by emitting through the recorded
//! emitters.

use std::cell::RefCell;
use std::rc::Rc;

use crate::library::Track;

use super::backend::{MediaBackend, MediaHandle};
use super::emitter::EventEmitter;
use super::types::{MediaError, MediaEvent};

/// One recorded request; `usize` is the handle's ordinal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Open(String),
    Play(usize),
    Pause(usize),
    Seek(usize, f64),
    Loop(usize, bool),
    Stop(usize),
}

#[derive(Default)]
pub(crate) struct Script {
    pub calls: Vec<Call>,
    /// Emitter of every successfully opened handle, by ordinal.
    pub emitters: Vec<EventEmitter>,
    /// Track titles whose open fails.
    pub unplayable: Vec<String>,
}

pub(crate) type Shared = Rc<RefCell<Script>>;

#[derive(Default)]
pub(crate) struct ScriptedBackend {
    script: Shared,
}

impl ScriptedBackend {
    pub fn with_unplayable(titles: &[&str]) -> Self {
        let backend = Self::default();
        backend.script.borrow_mut().unplayable = titles.iter().map(|s| s.to_string()).collect();
        backend
    }

    pub fn script(&self) -> Shared {
        self.script.clone()
    }
}

pub(crate) struct ScriptedHandle {
    n: usize,
    script: Shared,
    events: EventEmitter,
    playing: bool,
    position: f64,
}

impl ScriptedHandle {
    fn record(&self, call: Call) {
        self.script.borrow_mut().calls.push(call);
    }
}

impl MediaHandle for ScriptedHandle {
    fn play(&mut self) {
        self.record(Call::Play(self.n));
        if !self.playing {
            self.playing = true;
            self.events.emit(MediaEvent::Started);
        }
    }

    fn pause(&mut self) {
        self.record(Call::Pause(self.n));
        if self.playing {
            self.playing = false;
            self.events.emit(MediaEvent::Paused);
        }
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, secs: f64) {
        self.record(Call::Seek(self.n, secs));
        self.position = secs;
    }

    fn set_looping(&mut self, looping: bool) {
        self.record(Call::Loop(self.n, looping));
    }

    fn poll(&mut self) {}

    fn stop(&mut self) {
        self.record(Call::Stop(self.n));
        if self.playing {
            self.playing = false;
            self.events.emit(MediaEvent::Paused);
        }
    }
}

impl MediaBackend for ScriptedBackend {
    type Handle = ScriptedHandle;

    fn open(&mut self, track: &Track, events: EventEmitter) -> Result<ScriptedHandle, MediaError> {
        let mut script = self.script.borrow_mut();
        script.calls.push(Call::Open(track.title.clone()));
        if script.unplayable.contains(&track.title) {
            return Err(MediaError::Open {
                path: track.source.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        let n = script.emitters.len();
        script.emitters.push(events.clone());
        Ok(ScriptedHandle {
            n,
            script: self.script.clone(),
            events,
            playing: false,
            position: 0.0,
        })
    }
}
