//! Phase-accumulating oscillator with a selectable waveform.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::{Pitched, Signal};

/// The four basic periodic waveforms.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Value of one period at `phase` in `[0.0, 1.0)`, in `[-1.0, 1.0]`.
    fn sample(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => (phase * 2.0 * PI).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            // Rises from -1 to 1 over the first half, falls back over the second.
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
        }
    }
}

/// A continuously running oscillator.
///
/// Maintains phase continuity across calls to `next_sample()` and across
/// frequency changes, so retuning never clicks.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz (e.g., 44100 for CD quality)
///
/// # Examples
///
/// ```
/// use orchesstra::{Oscillator, Signal, Waveform};
///
/// let mut osc = Oscillator::<44100>::new(Waveform::Sawtooth, 220.0);
/// assert_eq!(osc.next_sample(), -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator<const SAMPLE_RATE: u32> {
    waveform: Waveform,
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    frequency: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
}

impl<const SAMPLE_RATE: u32> Oscillator<SAMPLE_RATE> {
    pub fn new(waveform: Waveform, frequency: f64) -> Self {
        Self {
            waveform,
            phase: 0.0,
            frequency,
            phase_increment: frequency / SAMPLE_RATE as f64,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Resets the phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl<const SAMPLE_RATE: u32> Signal for Oscillator<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let sample = self.waveform.sample(self.phase);

        // Increment phase and wrap to [0.0, 1.0), even above the sample rate
        self.phase = (self.phase + self.phase_increment).rem_euclid(1.0);

        sample
    }
}

impl<const SAMPLE_RATE: u32> Pitched for Oscillator<SAMPLE_RATE> {
    fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        self.phase_increment = frequency / SAMPLE_RATE as f64;
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}
