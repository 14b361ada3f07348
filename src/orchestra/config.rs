#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chess::Destination;

/// Which voices are re-levelled after each move.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelevelPolicy {
    /// Only the side that just moved.
    #[default]
    MovingSide,
    /// Both sides, every move.
    AllVoices,
}

/// Loudness constants of the orchestra.
///
/// # Examples
///
/// ```
/// use orchesstra::orchestra::{OrchestraConfig, RelevelPolicy};
///
/// let config = OrchestraConfig::default()
///     .with_relevel(RelevelPolicy::AllVoices)
///     .with_master_gain(0.25);
/// assert_eq!(config.accent_gain, 0.5);
/// assert_eq!(config.master_gain, 0.25);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestraConfig {
    /// Level of the voice that just moved.
    pub accent_gain: f64,
    /// Upper bound of the mobility share of a resting voice's level.
    pub mobility_cap: f64,
    /// Destination count that maps to a level of 1.0 before capping.
    pub mobility_divisor: f64,
    /// Added when any destination is a capture.
    pub capture_bonus: f64,
    /// Scale applied to the summed voices.
    pub master_gain: f64,
    pub relevel: RelevelPolicy,
}

impl Default for OrchestraConfig {
    fn default() -> Self {
        Self {
            accent_gain: 0.5,
            mobility_cap: 0.5,
            mobility_divisor: 16.0,
            capture_bonus: 0.25,
            master_gain: 0.125,
            relevel: RelevelPolicy::MovingSide,
        }
    }
}

impl OrchestraConfig {
    pub fn with_relevel(mut self, relevel: RelevelPolicy) -> Self {
        self.relevel = relevel;
        self
    }

    pub fn with_master_gain(mut self, master_gain: f64) -> Self {
        self.master_gain = master_gain;
        self
    }

    pub fn with_accent_gain(mut self, accent_gain: f64) -> Self {
        self.accent_gain = accent_gain;
        self
    }

    /// Level of a resting voice given its legal destinations:
    /// `min(cap, count / divisor)` plus the capture bonus if any destination
    /// takes a piece.
    pub fn loudness(&self, destinations: &[Destination]) -> f64 {
        let mobility = (destinations.len() as f64 / self.mobility_divisor).min(self.mobility_cap);
        if destinations.iter().any(|d| d.is_capture) {
            mobility + self.capture_bonus
        } else {
            mobility
        }
    }
}
