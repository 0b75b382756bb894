use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{info, warn};
use thiserror::Error;

use super::model::Track;

/// Reasons a track source can fail to produce a listing.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("music folder {} does not exist", .0.display())]
    MissingDir(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid track manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("track listing was interrupted")]
    Disconnected,
}

pub type FetchResult = Result<Vec<Track>, LibraryError>;

/// Something that can list the tracks available for playback.
pub trait TrackSource: Send + 'static {
    /// Short human-readable description used in logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> FetchResult;
}

/// Run `source` on a worker thread and deliver its single result.
///
/// The receiver yields exactly one value; if the worker dies first the
/// channel disconnects instead.
pub fn spawn_fetch(source: Box<dyn TrackSource>) -> Receiver<FetchResult> {
    let (tx, rx) = mpsc::channel::<FetchResult>();

    thread::spawn(move || {
        let result = source.fetch();
        match &result {
            Ok(tracks) => info!("{} listed {} tracks", source.describe(), tracks.len()),
            Err(e) => warn!("{} failed: {e}", source.describe()),
        }
        let _ = tx.send(result);
    });

    rx
}
