//! Clock-driven playback of a move list.
//!
//! The `PlaybackDriver` maps wall time onto move indices at a fixed duration
//! per move. It is polled: every `tick()` compares the index due at `now_ms`
//! with the last one played and hands at most the due move (or, when catching
//! up, the moves in between) to a [`MoveSink`]. After the last move the
//! driver rings out for a grace period and then silences the sink once.

use log::{debug, info};

use super::{MissedMovePolicy, PlaybackConfig};
use crate::chess::{Move, Position};
use crate::error::Result;
use crate::orchestra::VoiceAllocator;

/// Receiver of the driver's calls.
pub trait MoveSink {
    fn make_move(&mut self, mv: &Move) -> Result<()>;

    fn shutup(&mut self);
}

impl<const SAMPLE_RATE: u32, P: Position> MoveSink for VoiceAllocator<SAMPLE_RATE, P> {
    fn make_move(&mut self, mv: &Move) -> Result<()> {
        VoiceAllocator::make_move(self, mv)
    }

    fn shutup(&mut self) {
        VoiceAllocator::shutup(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackState {
    Playing,
    /// Past the last move, waiting out the grace period.
    RingingOut { completed_at: f64 },
    /// Silenced; further ticks do nothing.
    Finished,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was due.
    Waiting,
    /// Moves were played, up to and including this index.
    Advanced(usize),
    /// The game just ran out; the grace period starts.
    Completed,
    /// The grace period ended and the sink was silenced.
    Silenced,
}

/// Polled playback of one game.
///
/// # Examples
///
/// ```
/// use orchesstra::chess::Game;
/// use orchesstra::orchestra::VoiceAllocator;
/// use orchesstra::playback::{PlaybackConfig, PlaybackDriver, TickOutcome};
///
/// let game = Game::from_san(["e4", "e5"]).unwrap();
/// let mut driver = PlaybackDriver::new(game.into_moves(), PlaybackConfig::default());
/// let mut orchestra = VoiceAllocator::<44100>::new();
///
/// assert_eq!(driver.tick(0.0, &mut orchestra).unwrap(), TickOutcome::Advanced(0));
/// assert_eq!(driver.tick(100.0, &mut orchestra).unwrap(), TickOutcome::Waiting);
/// assert_eq!(driver.tick(600.0, &mut orchestra).unwrap(), TickOutcome::Advanced(1));
/// assert_eq!(orchestra.voice_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    moves: Vec<Move>,
    config: PlaybackConfig,
    last_index: Option<usize>,
    state: PlaybackState,
}

impl PlaybackDriver {
    /// Starts playback of `moves`. Unusable timings in `config` fall back
    /// to their defaults, see [`PlaybackConfig::sanitized`].
    pub fn new(moves: Vec<Move>, config: PlaybackConfig) -> Self {
        Self {
            moves,
            config: config.sanitized(),
            last_index: None,
            state: PlaybackState::Playing,
        }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Index of the last move handed to the sink.
    pub fn current_index(&self) -> Option<usize> {
        self.last_index
    }

    pub fn current_move(&self) -> Option<&Move> {
        self.last_index.and_then(|i| self.moves.get(i))
    }

    /// Length of the game in milliseconds, excluding the grace period.
    pub fn duration_ms(&self) -> f64 {
        self.moves.len() as f64 * self.config.move_duration_ms
    }

    /// Fraction of the game elapsed at `now_ms`, in `[0.0, 1.0]`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        let total = self.duration_ms();
        if total <= 0.0 {
            return 1.0;
        }
        (now_ms / total).clamp(0.0, 1.0)
    }

    /// Stops without calling the sink again.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Finished;
    }

    /// Advances playback to `now_ms`.
    ///
    /// Each index is handed to the sink at most once and indices never go
    /// backwards. If the sink fails, that index still counts as played.
    pub fn tick(&mut self, now_ms: f64, sink: &mut impl MoveSink) -> Result<TickOutcome> {
        match self.state {
            PlaybackState::Finished => Ok(TickOutcome::Waiting),
            PlaybackState::RingingOut { completed_at } => {
                if now_ms >= completed_at + self.config.grace_ms() {
                    sink.shutup();
                    self.state = PlaybackState::Finished;
                    info!("playback finished at {now_ms:.0} ms");
                    Ok(TickOutcome::Silenced)
                } else {
                    Ok(TickOutcome::Waiting)
                }
            }
            PlaybackState::Playing => self.advance(now_ms, sink),
        }
    }

    fn advance(&mut self, now_ms: f64, sink: &mut impl MoveSink) -> Result<TickOutcome> {
        let count = self.moves.len();
        if count == 0 || now_ms > self.duration_ms() {
            if self.config.missed_moves == MissedMovePolicy::CatchUp && count > 0 {
                self.play_through(count - 1, sink)?;
            }
            self.state = PlaybackState::RingingOut { completed_at: now_ms };
            info!("all {count} moves played, ringing out");
            return Ok(TickOutcome::Completed);
        }
        if now_ms < 0.0 {
            return Ok(TickOutcome::Waiting);
        }

        // `now == duration` lands one past the end.
        let target = ((now_ms / self.config.move_duration_ms).floor() as usize).min(count - 1);
        if self.last_index.is_some_and(|last| target <= last) {
            return Ok(TickOutcome::Waiting);
        }

        match self.config.missed_moves {
            MissedMovePolicy::Skip => {
                if let Some(last) = self.last_index {
                    if target > last + 1 {
                        debug!("skipping moves {}..{}", last + 1, target);
                    }
                }
                self.play(target, sink)?;
            }
            MissedMovePolicy::CatchUp => self.play_through(target, sink)?,
        }
        Ok(TickOutcome::Advanced(target))
    }

    fn play_through(&mut self, target: usize, sink: &mut impl MoveSink) -> Result<()> {
        let first = self.last_index.map_or(0, |last| last + 1);
        for index in first..=target {
            self.play(index, sink)?;
        }
        Ok(())
    }

    fn play(&mut self, index: usize, sink: &mut impl MoveSink) -> Result<()> {
        self.last_index = Some(index);
        let mv = &self.moves[index];
        debug!("move {index}: {}", mv.notation);
        sink.make_move(mv)
    }
}

impl Default for PlaybackDriver {
    fn default() -> Self {
        Self::new(Vec::new(), PlaybackConfig::default())
    }
}
