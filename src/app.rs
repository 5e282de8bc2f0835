//! Application module: player state and the controller that owns playback.
//!
//! `app::model` holds `PlayerState` and its reducer; `app::controller` owns
//! the live playback handle and feeds user actions and media events through
//! the reducer.

mod controller;
mod model;

pub use controller::*;
pub use model::*;
