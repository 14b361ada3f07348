//! The fixed catalog of piece timbres.

use super::Waveform;
use crate::chess::PieceKind;
use crate::error::{Error, Result};

/// One oscillator of a timbre, relative to the voice's base pitch and level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    pub waveform: Waveform,
    pub frequency_ratio: f64,
    pub gain_ratio: f64,
}

impl Partial {
    const fn new(waveform: Waveform, frequency_ratio: f64, gain_ratio: f64) -> Self {
        Self {
            waveform,
            frequency_ratio,
            gain_ratio,
        }
    }
}

/// An immutable sound descriptor: one or two partials.
#[derive(Debug, PartialEq)]
pub struct Timbre {
    pub kind: PieceKind,
    pub partials: &'static [Partial],
}

const THIRD: f64 = 1.0 / 3.0;

static PAWN: Timbre = Timbre {
    kind: PieceKind::Pawn,
    partials: &[Partial::new(Waveform::Sawtooth, 1.0, 1.0)],
};

static KNIGHT: Timbre = Timbre {
    kind: PieceKind::Knight,
    partials: &[
        Partial::new(Waveform::Triangle, 1.0, 1.0),
        Partial::new(Waveform::Square, 3.01, THIRD),
    ],
};

static BISHOP: Timbre = Timbre {
    kind: PieceKind::Bishop,
    partials: &[
        Partial::new(Waveform::Square, 1.0, 1.0),
        Partial::new(Waveform::Triangle, 0.5, THIRD),
    ],
};

static ROOK: Timbre = Timbre {
    kind: PieceKind::Rook,
    partials: &[
        Partial::new(Waveform::Square, 0.5, 1.0),
        Partial::new(Waveform::Sine, THIRD, THIRD),
    ],
};

static QUEEN: Timbre = Timbre {
    kind: PieceKind::Queen,
    partials: &[
        Partial::new(Waveform::Sawtooth, 0.5, 1.0),
        Partial::new(Waveform::Sine, 2.0, THIRD),
    ],
};

static KING: Timbre = Timbre {
    kind: PieceKind::King,
    partials: &[
        Partial::new(Waveform::Sine, 0.5, 1.0),
        Partial::new(Waveform::Triangle, THIRD, THIRD),
    ],
};

impl Timbre {
    pub fn for_piece(kind: PieceKind) -> &'static Timbre {
        match kind {
            PieceKind::Pawn => &PAWN,
            PieceKind::Knight => &KNIGHT,
            PieceKind::Bishop => &BISHOP,
            PieceKind::Rook => &ROOK,
            PieceKind::Queen => &QUEEN,
            PieceKind::King => &KING,
        }
    }

    /// Looks a timbre up by one-letter piece code.
    ///
    /// # Examples
    ///
    /// ```
    /// use orchesstra::synthesis::Timbre;
    ///
    /// assert_eq!(Timbre::from_code('n').unwrap().partials.len(), 2);
    /// assert!(Timbre::from_code('x').is_err());
    /// ```
    pub fn from_code(code: char) -> Result<&'static Timbre> {
        PieceKind::from_code(code)
            .map(Self::for_piece)
            .ok_or(Error::InvalidTimbre(code))
    }

    pub fn oscillator_count(&self) -> usize {
        self.partials.len()
    }
}
