//! Utilities for creating `rodio` sinks from files.
//!
//! Opening/decoding a file and preparing a paused `Sink` at a requested
//! start position, plus a tag-based duration probe for decoders that cannot
//! tell the length up front.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

/// A paused sink for `file` starting at `start_at`, with the decoder's idea
/// of the total duration.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    file: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let handle = File::open(file).map_err(|source| AudioError::Open {
        path: file.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(handle)).map_err(|source| AudioError::Decode {
        path: file.to_path_buf(),
        source,
    })?;
    let total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}

/// Duration from the file's audio properties, if it has a non-zero one.
pub(super) fn probe_duration(file: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(file).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}
