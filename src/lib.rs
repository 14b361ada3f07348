//! Orchesstra - chess games as polyphonic soundscapes
//!
//! Every piece that has moved owns a voice on its square. The voice's timbre
//! comes from the piece kind, its pitch from the square it stands on and its
//! loudness from how mobile and threatening the piece currently is.
//!
//! ```
//! use orchesstra::chess::Game;
//! use orchesstra::orchestra::VoiceAllocator;
//! use orchesstra::Signal;
//!
//! let game = Game::from_pgn("1. e4 d5 2. exd5 *").unwrap();
//! let mut orchestra = VoiceAllocator::<44100>::new();
//! for mv in game.moves() {
//!     orchestra.make_move(mv).unwrap();
//! }
//!
//! // The d5 pawn's voice was taken; the e-pawn's voice moved on to d5.
//! assert_eq!(orchestra.voice_count(), 1);
//! let sample = orchestra.next_sample();
//! assert!(sample.abs() <= 1.0);
//! ```

pub mod chess;
pub mod core;
pub mod error;
pub mod music;
pub mod orchestra;
pub mod playback;
pub mod render;
pub mod synthesis;

// Re-export commonly used types at the crate root
pub use crate::core::{Pitched, Signal};
pub use error::{Error, Result};
pub use music::{Frequency, PitchMap};
pub use orchestra::{OrchestraConfig, RelevelPolicy, VoiceAllocator};
pub use playback::{Performance, PlaybackConfig, PlaybackDriver};
pub use synthesis::{Oscillator, Timbre, Voice, Waveform};

#[cfg(feature = "macros")]
pub use orchesstra_macros::square;
