//! Playback: walking a move list in time and turning it into samples.

mod config;
mod driver;
mod performance;

pub use config::{MissedMovePolicy, PlaybackConfig};
pub use driver::{MoveSink, PlaybackDriver, PlaybackState, TickOutcome};
pub use performance::Performance;
