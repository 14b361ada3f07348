//! Frequency type for representing pitch in Hz.

use super::PitchMap;
use crate::chess::Square;

/// A frequency value in Hz.
///
/// Accepts frequencies directly in Hz, piano key numbers, or board squares
/// (through the [`PitchMap`]).
///
/// # Examples
///
/// ```
/// use orchesstra::music::Frequency;
///
/// // From Hz
/// let freq: Frequency = 440.0.into();
/// assert_eq!(freq.as_f64(), 440.0);
///
/// // From a square: a1 is piano key 25, an octave below A4
/// let freq: Frequency = orchesstra::chess::Square::new(0, 0).into();
/// assert!((freq.as_f64() - 110.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Frequency(f64);

impl Frequency {
    pub fn from_hz(hz: f64) -> Self {
        Frequency(hz)
    }

    /// Creates a frequency from an 88-key piano key number (49 = A4 = 440 Hz).
    ///
    /// # Examples
    ///
    /// ```
    /// use orchesstra::music::Frequency;
    ///
    /// let freq = Frequency::from_piano_key(37); // A3
    /// assert!((freq.as_f64() - 220.0).abs() < 1e-9);
    /// ```
    pub fn from_piano_key(key: u8) -> Self {
        // f = 440 * 2^((n - 49) / 12)
        let hz = 440.0 * 2.0_f64.powf((f64::from(key) - 49.0) / 12.0);
        Frequency(hz)
    }

    /// Returns the frequency value in Hz.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Frequency {
    fn from(hz: f64) -> Self {
        Frequency::from_hz(hz)
    }
}

impl From<Square> for Frequency {
    fn from(square: Square) -> Self {
        PitchMap::frequency(square)
    }
}
