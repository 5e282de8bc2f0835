//! Per-handle event subscriptions.
//!
//! Every handle gets an [`EventEmitter`] bound to a fresh [`HandleId`]; the
//! owner keeps the matching [`Subscription`]. Detaching the subscription
//! makes every later `emit` from that handle a no-op, so a retired handle can
//! never write into player state again. Events already queued before the
//! detach still carry the old id and are filtered by the consumer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use super::types::{HandleEvent, HandleId, MediaEvent};

#[derive(Debug, Clone)]
pub struct EventEmitter {
    id: HandleId,
    tx: Sender<HandleEvent>,
    attached: Arc<AtomicBool>,
}

impl EventEmitter {
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Queue `event`. Returns false when the subscription was detached.
    pub fn emit(&self, event: MediaEvent) -> bool {
        if !self.attached.load(Ordering::Acquire) {
            return false;
        }
        self.tx
            .send(HandleEvent {
                handle: self.id,
                event,
            })
            .is_ok()
    }
}

/// Owner side of an emitter. Detaches on drop.
#[derive(Debug)]
pub struct Subscription {
    id: HandleId,
    attached: Arc<AtomicBool>,
}

impl Subscription {
    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Single queue all handles report into.
#[derive(Debug)]
pub struct EventBus {
    tx: Sender<HandleEvent>,
    rx: Receiver<HandleEvent>,
    next_id: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, next_id: 0 }
    }

    /// Allocate a new handle id with an attached emitter.
    pub fn subscribe(&mut self) -> (EventEmitter, Subscription) {
        let id = HandleId(self.next_id);
        self.next_id += 1;

        let attached = Arc::new(AtomicBool::new(true));
        let emitter = EventEmitter {
            id,
            tx: self.tx.clone(),
            attached: attached.clone(),
        };
        (emitter, Subscription { id, attached })
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<HandleEvent> {
        self.rx.try_iter().collect()
    }
}
