//! Playlist store: the fixed, ordered list of tracks the player cycles through.
//!
//! A playlist is built once at startup (from a scanned directory, from the
//! config file, or from the built-in set) and never mutated afterwards.

mod builtin;
mod model;
mod scan;

pub use builtin::builtin_tracks;
pub use model::*;
pub use scan::scan;
