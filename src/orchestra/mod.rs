//! The orchestra: one voice per moved piece, kept in step with the game.

mod allocator;
mod config;

pub use allocator::{Seat, VoiceAllocator};
pub use config::{OrchestraConfig, RelevelPolicy};
