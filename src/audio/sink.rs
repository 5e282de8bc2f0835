//! Utilities for creating `rodio` sinks from track sources.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use super::types::MediaError;

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the total duration when the decoder knows it.
pub(super) fn create_sink_at(
    mixer: &Mixer,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), MediaError> {
    let file = File::open(path).map_err(|source| MediaError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| MediaError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(mixer);
    sink.pause();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    Ok((sink, total))
}

/// Read the duration from the file's container metadata.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
