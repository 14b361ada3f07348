//! Core signal processing traits shared by oscillators, voices and the
//! orchestra mix.

mod signal;

pub use signal::{Pitched, Signal};
