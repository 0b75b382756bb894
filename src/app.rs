//! Application module: the playback controller and the commands it accepts.
//!
//! `Controller` owns the playback state and the playlist manager, and is the
//! only thing that talks to the audio output.

mod command;
mod controller;
mod state;

pub use command::Command;
pub use controller::Controller;
pub use state::PlayerStatus;
