#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Color, PieceKind, Square};
use crate::error::{Error, Result};

/// One ply of a game, as produced by the rules engine.
///
/// The move stream is trusted: nothing downstream re-validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// SAN notation, e.g. `"Nf3"` or `"exd5"`.
    pub notation: String,
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub color: Color,
    pub is_capture: bool,
    pub promotion: Option<PieceKind>,
}

/// A legal destination from some square, as returned by mobility queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub square: Square,
    pub is_capture: bool,
}

/// Pieces a move displaces besides the mover itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideEffects {
    /// Square of a pawn taken en passant.
    pub en_passant_victim: Option<Square>,
    /// Rook movement accompanying a castle, `(from, to)`.
    pub rook_hop: Option<(Square, Square)>,
}

/// A move as it arrives over a loosely typed boundary: squares as keys and
/// the piece and colour as one-letter codes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub notation: String,
    pub from: String,
    pub to: String,
    pub piece: char,
    pub color: char,
    pub is_capture: bool,
    pub promotion: Option<char>,
}

impl TryFrom<MoveRecord> for Move {
    type Error = Error;

    fn try_from(record: MoveRecord) -> Result<Self> {
        let piece = PieceKind::from_code(record.piece).ok_or(Error::InvalidTimbre(record.piece))?;
        let promotion = record
            .promotion
            .map(|code| PieceKind::from_code(code).ok_or(Error::InvalidTimbre(code)))
            .transpose()?;

        Ok(Move {
            notation: record.notation,
            from: record.from.parse()?,
            to: record.to.parse()?,
            piece,
            color: Color::from_code(record.color)?,
            is_capture: record.is_capture,
            promotion,
        })
    }
}

impl From<&Move> for MoveRecord {
    fn from(mv: &Move) -> Self {
        MoveRecord {
            notation: mv.notation.clone(),
            from: mv.from.to_string(),
            to: mv.to.to_string(),
            piece: mv.piece.code(),
            color: mv.color.code(),
            is_capture: mv.is_capture,
            promotion: mv.promotion.map(PieceKind::code),
        }
    }
}
