//! Square-keyed voice allocator.
//!
//! # Design Overview
//!
//! The `VoiceAllocator` keeps at most one voice per board square and a
//! private mirror of the game. Each incoming move is applied in one step:
//!
//! 1. A voice standing on the destination is released (capture). So is the
//!    voice of a pawn taken en passant.
//! 2. The mover's voice migrates from the origin to the destination, keeping
//!    its identity and timbre. A piece that has not sounded yet gets a fresh
//!    voice. A castling rook's voice migrates with the rook.
//! 3. The mirror applies the move.
//! 4. The mover's voice is retuned to the destination's pitch and accented.
//! 5. Resting voices are re-levelled from their mobility in the new position,
//!    for the side that moved or for everyone, depending on the
//!    [`RelevelPolicy`](super::RelevelPolicy).
//!
//! The mirror is never asked whether a move is legal; the stream is trusted.
//!
//! ## Example Usage
//!
//! ```
//! use orchesstra::chess::Board;
//! use orchesstra::orchestra::VoiceAllocator;
//! use orchesstra::Signal;
//!
//! let board = Board::standard();
//! let e4 = board.parse_san("e4").unwrap();
//!
//! let mut orchestra = VoiceAllocator::<44100>::new();
//! orchestra.make_move(&e4).unwrap();
//! assert_eq!(orchestra.voice_count(), 1);
//!
//! let mut buffer = vec![0.0; 256];
//! orchestra.process(&mut buffer);
//!
//! orchestra.shutup();
//! assert_eq!(orchestra.voice_count(), 0);
//! ```

use std::collections::BTreeMap;

use log::{debug, info, trace, warn};

use super::{OrchestraConfig, RelevelPolicy};
use crate::chess::{Board, Color, Move, Position, Square};
use crate::core::Signal;
use crate::error::Result;
use crate::music::PitchMap;
use crate::synthesis::{Timbre, Voice, VoiceId};

/// A voice together with the side whose piece it follows.
#[derive(Debug)]
pub struct Seat<const SAMPLE_RATE: u32> {
    voice: Voice<SAMPLE_RATE>,
    color: Color,
}

impl<const SAMPLE_RATE: u32> Seat<SAMPLE_RATE> {
    pub fn voice(&self) -> &Voice<SAMPLE_RATE> {
        &self.voice
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Owns every sounding voice of one game and keeps them in step with it.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz
/// * `P` - The rules engine mirrored for mobility queries (defaults to [`Board`])
#[derive(Debug)]
pub struct VoiceAllocator<const SAMPLE_RATE: u32, P: Position = Board> {
    seats: BTreeMap<Square, Seat<SAMPLE_RATE>>,
    position: P,
    config: OrchestraConfig,
    next_id: u64,
}

impl<const SAMPLE_RATE: u32> VoiceAllocator<SAMPLE_RATE> {
    /// An empty orchestra mirroring the standard initial position.
    pub fn new() -> Self {
        Self::with_position(Board::standard())
    }
}

impl<const SAMPLE_RATE: u32> Default for VoiceAllocator<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32, P: Position> VoiceAllocator<SAMPLE_RATE, P> {
    /// An empty orchestra mirroring `position`.
    pub fn with_position(position: P) -> Self {
        Self {
            seats: BTreeMap::new(),
            position,
            config: OrchestraConfig::default(),
            next_id: 0,
        }
    }

    pub fn with_config(mut self, config: OrchestraConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestraConfig {
        &self.config
    }

    /// The mirrored game state.
    pub fn position(&self) -> &P {
        &self.position
    }

    pub fn voice_at(&self, square: Square) -> Option<&Voice<SAMPLE_RATE>> {
        self.seats.get(&square).map(|seat| &seat.voice)
    }

    /// All seats in row-major square order.
    pub fn seats(&self) -> impl Iterator<Item = (Square, &Seat<SAMPLE_RATE>)> {
        self.seats.iter().map(|(square, seat)| (*square, seat))
    }

    pub fn voices(&self) -> impl Iterator<Item = (Square, &Voice<SAMPLE_RATE>)> {
        self.seats.iter().map(|(square, seat)| (*square, &seat.voice))
    }

    pub fn voice_count(&self) -> usize {
        self.seats.len()
    }

    /// Applies one trusted move to the voices and the mirror.
    ///
    /// Fails only when no voice can be built for the mover, and then nothing
    /// has been mutated.
    pub fn make_move(&mut self, mv: &Move) -> Result<()> {
        debug_assert!(
            mv.from == mv.to || self.position.color_at(mv.to) != Some(mv.color),
            "{} lands on a piece of its own colour",
            mv.notation
        );

        let effects = self.position.side_effects(mv);

        // Building a voice runs while the map is still untouched.
        let seat = match self.seats.remove(&mv.from) {
            Some(seat) => {
                debug!(
                    "{}: voice {} migrates {} -> {}",
                    mv.notation,
                    seat.voice.id(),
                    mv.from,
                    mv.to
                );
                seat
            }
            None => Seat {
                voice: self.build_voice(mv)?,
                color: mv.color,
            },
        };

        if mv.to != mv.from {
            self.release_seat(mv.to, "capture");
        }
        if let Some(victim) = effects.en_passant_victim {
            self.release_seat(victim, "en passant capture");
        }
        self.seats.insert(mv.to, seat);

        let rook_hop = effects
            .rook_hop
            .and_then(|(from, to)| self.seats.remove(&from).map(|seat| (to, seat)));
        if let Some((to, seat)) = rook_hop {
            debug!("{}: rook voice {} follows to {}", mv.notation, seat.voice.id(), to);
            self.seats.insert(to, seat);
        }

        self.position.apply(mv);

        if let Some(seat) = self.seats.get_mut(&mv.to) {
            seat.voice.retune(PitchMap::frequency(mv.to))?;
            seat.voice.relevel(self.config.accent_gain)?;
        }
        if let Some((_, rook_to)) = effects.rook_hop {
            if let Some(seat) = self.seats.get_mut(&rook_to) {
                seat.voice.retune(PitchMap::frequency(rook_to))?;
            }
        }

        self.relevel_resting(mv)
    }

    /// Releases every voice and empties the map. Safe to call repeatedly.
    pub fn shutup(&mut self) {
        if self.seats.is_empty() {
            return;
        }
        let count = self.seats.len();
        for (square, mut seat) in std::mem::take(&mut self.seats) {
            if let Err(err) = seat.voice.release() {
                warn!("voice on {square} was already released: {err}");
            }
        }
        info!("orchestra silenced, {count} voices released");
    }

    fn build_voice(&mut self, mv: &Move) -> Result<Voice<SAMPLE_RATE>> {
        let timbre = Timbre::from_code(mv.piece.code())?;
        let id = VoiceId(self.next_id);
        self.next_id += 1;
        debug!("{}: new {:?} voice {} on {}", mv.notation, timbre.kind, id, mv.to);
        Ok(Voice::new(id, timbre))
    }

    fn release_seat(&mut self, square: Square, reason: &str) {
        if let Some(mut seat) = self.seats.remove(&square) {
            debug!("{reason} on {square}: voice {} released", seat.voice.id());
            if let Err(err) = seat.voice.release() {
                warn!("voice on {square} was already released: {err}");
            }
        }
    }

    fn relevel_resting(&mut self, mv: &Move) -> Result<()> {
        let policy = self.config.relevel;
        for (square, seat) in self.seats.iter_mut() {
            if *square == mv.to {
                continue;
            }
            if policy == RelevelPolicy::MovingSide && seat.color != mv.color {
                continue;
            }
            let destinations = self.position.legal_destinations(*square);
            let level = self.config.loudness(&destinations);
            trace!("{square}: {} destinations, level {level:.3}", destinations.len());
            seat.voice.relevel(level)?;
        }
        Ok(())
    }
}

impl<const SAMPLE_RATE: u32, P: Position> Signal for VoiceAllocator<SAMPLE_RATE, P> {
    /// Sums all voices and scales by the master gain.
    fn next_sample(&mut self) -> f64 {
        let sum: f64 = self.seats.values_mut().map(|seat| seat.voice.next_sample()).sum();
        sum * self.config.master_gain
    }
}

impl<const SAMPLE_RATE: u32, P: Position> Drop for VoiceAllocator<SAMPLE_RATE, P> {
    fn drop(&mut self) {
        self.shutup();
    }
}
