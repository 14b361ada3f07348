#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the driver does with move indices a late tick jumped over.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissedMovePolicy {
    /// Play only the move for the current index; skipped moves never sound.
    #[default]
    Skip,
    /// Play every skipped move, in order, before the current one.
    CatchUp,
}

/// Timing of a performance.
///
/// # Examples
///
/// ```
/// use orchesstra::playback::PlaybackConfig;
///
/// let config = PlaybackConfig::default().with_move_duration_ms(250.0);
/// assert_eq!(config.grace_ms(), 1000.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Time each move holds the stage.
    pub move_duration_ms: f64,
    /// Ring-out after the last move, in move durations.
    pub grace_moves: f64,
    /// How often a sample-driven performance ticks its driver.
    pub control_rate_hz: f64,
    pub missed_moves: MissedMovePolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            move_duration_ms: 500.0,
            grace_moves: 4.0,
            control_rate_hz: 60.0,
            missed_moves: MissedMovePolicy::Skip,
        }
    }
}

impl PlaybackConfig {
    pub fn with_move_duration_ms(mut self, move_duration_ms: f64) -> Self {
        self.move_duration_ms = move_duration_ms;
        self
    }

    pub fn with_grace_moves(mut self, grace_moves: f64) -> Self {
        self.grace_moves = grace_moves;
        self
    }

    pub fn with_control_rate_hz(mut self, control_rate_hz: f64) -> Self {
        self.control_rate_hz = control_rate_hz;
        self
    }

    pub fn with_missed_moves(mut self, missed_moves: MissedMovePolicy) -> Self {
        self.missed_moves = missed_moves;
        self
    }

    pub fn grace_ms(&self) -> f64 {
        self.grace_moves * self.move_duration_ms
    }

    /// Falls back to the default for any timing playback cannot finish on:
    /// non-finite values, a duration that is not positive, a negative grace
    /// or a control rate below 1 Hz.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let usable = |value: f64, in_range: bool, fallback: f64| {
            if value.is_finite() && in_range {
                value
            } else {
                fallback
            }
        };

        Self {
            move_duration_ms: usable(
                self.move_duration_ms,
                self.move_duration_ms > 0.0,
                defaults.move_duration_ms,
            ),
            grace_moves: usable(
                self.grace_moves,
                self.grace_moves >= 0.0,
                defaults.grace_moves,
            ),
            control_rate_hz: usable(
                self.control_rate_hz,
                self.control_rate_hz >= 1.0,
                defaults.control_rate_hz,
            ),
            missed_moves: self.missed_moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_keeps_usable_values() {
        let config = PlaybackConfig::default()
            .with_move_duration_ms(40.0)
            .with_grace_moves(0.0)
            .with_control_rate_hz(1.0);
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_sanitized_replaces_unusable_values() {
        let config = PlaybackConfig::default()
            .with_move_duration_ms(f64::NAN)
            .with_grace_moves(-1.0)
            .with_control_rate_hz(0.0)
            .with_missed_moves(MissedMovePolicy::CatchUp)
            .sanitized();
        assert_eq!(config.move_duration_ms, 500.0);
        assert_eq!(config.grace_moves, 4.0);
        assert_eq!(config.control_rate_hz, 60.0);
        assert_eq!(config.missed_moves, MissedMovePolicy::CatchUp);

        let config = PlaybackConfig::default()
            .with_move_duration_ms(0.0)
            .with_control_rate_hz(f64::INFINITY)
            .sanitized();
        assert_eq!(config.move_duration_ms, 500.0);
        assert_eq!(config.control_rate_hz, 60.0);
    }
}
