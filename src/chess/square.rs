use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A board square packed into a single byte, `rank * 8 + file`.
///
/// Ordering follows the packed index, so sorting squares walks the board in
/// row-major order: a1, b1, ..., h1, a2, ..., h8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from a 0-indexed file and rank.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is 8 or above.
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square coordinates must be 0-7");
        Square(rank * 8 + file)
    }

    /// Square for a row-major index, or `None` past h8.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 64).then(|| Square(index as u8))
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Row-major index, 0 for a1 and 63 for h8.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The square `df` files and `dr` ranks away, if it is on the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::InvalidSquare(s.to_string()));
        }

        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(Error::InvalidSquare(s.to_string()));
        }

        Ok(Square::new(file - b'a', rank - b'1'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq.file(), 4);
        assert_eq!(sq.rank(), 3);
        assert_eq!(sq.to_string(), "e4");
        assert_eq!("A1".parse::<Square>().unwrap(), Square::new(0, 0));
    }

    #[test]
    fn test_parse_rejects_bad_keys() {
        for key in ["", "e", "e9", "i1", "e44", "4e"] {
            assert!(matches!(key.parse::<Square>(), Err(Error::InvalidSquare(_))), "{key}");
        }
    }

    #[test]
    fn test_row_major_order() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_string(), "a1");
        assert_eq!(squares[8].to_string(), "a2");
        assert_eq!(squares[63].to_string(), "h8");
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1 = Square::new(0, 0);
        assert_eq!(a1.offset(1, 2), Some(Square::new(1, 2)));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(Square::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Square::from_index(28), Some(Square::new(4, 3)));
        assert_eq!(Square::from_index(64), None);
    }
}
