//! Pitch: the frequency newtype and the board-to-pitch mapping.

mod frequency;
mod pitch_map;

pub use frequency::Frequency;
pub use pitch_map::PitchMap;
