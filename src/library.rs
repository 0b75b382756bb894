//! Track library: the `Track` model and the sources that produce it.
//!
//! A source is queried once at startup, on a worker thread, and the result
//! is handed to the playback controller.

mod display;
mod manifest;
mod model;
mod scan;
mod source;

pub use manifest::ManifestSource;
pub use model::Track;
pub use scan::DirectorySource;
pub use source::{FetchResult, LibraryError, TrackSource, spawn_fetch};
