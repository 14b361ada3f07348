//! Voice - a timbre's oscillators with their own pitch and level.

use std::fmt;

use super::{Oscillator, Timbre};
use crate::core::{Pitched, Signal};
use crate::error::{Error, Result};
use crate::music::Frequency;

/// Identity of a voice, stable across migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(pub u64);

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Active,
    Released,
}

/// A running sound generator built from a [`Timbre`].
///
/// All oscillators start running at construction, muted, and keep their
/// phase through every retune. Once released a voice is silent for good and
/// every further control call fails with [`Error::UseAfterRelease`].
///
/// # Examples
///
/// ```
/// use orchesstra::chess::PieceKind;
/// use orchesstra::synthesis::{Timbre, Voice, VoiceId};
///
/// let mut voice = Voice::<44100>::new(VoiceId(1), Timbre::for_piece(PieceKind::Rook));
/// voice.retune(220.0).unwrap();
/// voice.relevel(0.5).unwrap();
/// let freqs = voice.frequencies();
/// assert_eq!(freqs[0], 110.0);
/// assert!((freqs[1] - 220.0 / 3.0).abs() < 1e-9);
///
/// voice.release().unwrap();
/// assert!(voice.relevel(0.5).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Voice<const SAMPLE_RATE: u32> {
    id: VoiceId,
    timbre: &'static Timbre,
    oscillators: Vec<Oscillator<SAMPLE_RATE>>,
    gains: Vec<f64>,
    level: f64,
    state: VoiceState,
}

impl<const SAMPLE_RATE: u32> Voice<SAMPLE_RATE> {
    pub fn new(id: VoiceId, timbre: &'static Timbre) -> Self {
        let oscillators: Vec<_> = timbre
            .partials
            .iter()
            .map(|p| Oscillator::new(p.waveform, 0.0))
            .collect();
        let gains = vec![0.0; oscillators.len()];

        Self {
            id,
            timbre,
            oscillators,
            gains,
            level: 0.0,
            state: VoiceState::Active,
        }
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn timbre(&self) -> &'static Timbre {
        self.timbre
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_released(&self) -> bool {
        self.state == VoiceState::Released
    }

    /// Current per-oscillator frequencies in Hz.
    pub fn frequencies(&self) -> Vec<f64> {
        self.oscillators.iter().map(Pitched::frequency).collect()
    }

    /// Current per-oscillator gains.
    pub fn gains(&self) -> &[f64] {
        &self.gains
    }

    /// Base gain last passed to [`relevel`](Self::relevel).
    pub fn level(&self) -> f64 {
        self.level
    }

    fn ensure_active(&self) -> Result<()> {
        match self.state {
            VoiceState::Active => Ok(()),
            VoiceState::Released => Err(Error::UseAfterRelease(self.id)),
        }
    }

    /// Sets every oscillator to `base * frequency_ratio` immediately.
    pub fn retune(&mut self, base: impl Into<Frequency>) -> Result<()> {
        self.ensure_active()?;
        let base = base.into().as_f64();
        for (osc, partial) in self.oscillators.iter_mut().zip(self.timbre.partials) {
            osc.set_frequency(base * partial.frequency_ratio);
        }
        Ok(())
    }

    /// Sets every oscillator gain to `level * gain_ratio` immediately.
    pub fn relevel(&mut self, level: f64) -> Result<()> {
        self.ensure_active()?;
        for (gain, partial) in self.gains.iter_mut().zip(self.timbre.partials) {
            *gain = level * partial.gain_ratio;
        }
        self.level = level;
        Ok(())
    }

    /// Mutes without releasing.
    pub fn silence(&mut self) -> Result<()> {
        self.relevel(0.0)
    }

    /// Stops the oscillators for good.
    pub fn release(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.state = VoiceState::Released;
        self.gains.fill(0.0);
        self.level = 0.0;
        Ok(())
    }
}

impl<const SAMPLE_RATE: u32> Signal for Voice<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        if self.is_released() {
            return 0.0;
        }
        self.oscillators
            .iter_mut()
            .zip(&self.gains)
            .map(|(osc, gain)| osc.next_sample() * gain)
            .sum()
    }
}
