//! Sound generation: oscillators, the piece timbre catalog and voices.

mod oscillator;
mod timbre;
mod voice;

pub use oscillator::{Oscillator, Waveform};
pub use timbre::{Partial, Timbre};
pub use voice::{Voice, VoiceId, VoiceState};
