//! Media primitive: the playback-handle capability the player drives.
//!
//! `backend` defines the traits, `emitter` the per-handle event plumbing and
//! `device` the `rodio` implementation used at runtime.

mod backend;
mod device;
mod emitter;
mod sink;
mod types;

#[cfg(test)]
pub(crate) mod scripted;

pub use backend::{MediaBackend, MediaHandle};
pub use device::RodioBackend;
pub use emitter::{EventBus, EventEmitter, Subscription};
pub use types::*;
