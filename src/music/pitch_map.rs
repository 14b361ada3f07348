use super::Frequency;
use crate::chess::Square;

/// Piano key of a1. Each step along the row-major order raises the pitch by
/// one semitone, so h8 lands on key 88.
const FIRST_KEY: u8 = 25;

/// Maps board squares onto 64 consecutive equal-tempered semitones.
///
/// a1 sounds A2 (110 Hz) and each square in row-major order is one semitone
/// above the previous, up to h8.
///
/// # Examples
///
/// ```
/// use orchesstra::chess::Square;
/// use orchesstra::music::PitchMap;
///
/// let a2: Square = "a2".parse().unwrap();
/// assert_eq!(PitchMap::note_number(a2), 33);
/// assert!((PitchMap::frequency(a2).as_f64() - 174.614).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchMap;

impl PitchMap {
    /// Piano key number for `square`: `25 + rank * 8 + file`.
    pub fn note_number(square: Square) -> u8 {
        FIRST_KEY + square.index() as u8
    }

    pub fn frequency(square: Square) -> Frequency {
        Frequency::from_piano_key(Self::note_number(square))
    }

    /// All 64 frequencies in Hz, indexed row-major.
    pub fn table() -> [f64; 64] {
        let mut table = [0.0; 64];
        for square in Square::all() {
            table[square.index()] = Self::frequency(square).as_f64();
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_pitches() {
        let a1 = Square::new(0, 0);
        let h8 = Square::new(7, 7);
        assert!((PitchMap::frequency(a1).as_f64() - 110.0).abs() < 1e-9);
        assert_eq!(PitchMap::note_number(h8), 88);
        assert!((PitchMap::frequency(h8).as_f64() - 4186.009).abs() < 1e-3);
    }

    #[test]
    fn test_strictly_increasing_in_row_major_order() {
        let table = PitchMap::table();
        assert!(table.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_semitone_steps() {
        let table = PitchMap::table();
        let ratio = 2.0_f64.powf(1.0 / 12.0);
        for w in table.windows(2) {
            assert!((w[1] / w[0] - ratio).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pure() {
        for square in Square::all() {
            assert_eq!(PitchMap::frequency(square), PitchMap::frequency(square));
            assert_eq!(PitchMap::table()[square.index()], PitchMap::frequency(square).as_f64());
        }
    }
}
