use super::{Color, Destination, Move, SideEffects, Square};

/// The rules engine the orchestra mirrors.
///
/// Implementations advance a private copy of the game and answer mobility
/// queries against it. They are never asked to validate a move: the stream
/// handed to `apply` is assumed to be legal.
pub trait Position {
    /// Advances the position by one trusted move.
    fn apply(&mut self, mv: &Move);

    /// Pieces `mv` would displace besides the mover, computed before `apply`.
    fn side_effects(&self, mv: &Move) -> SideEffects;

    /// Legal destinations for the piece on `square`, evaluated for that
    /// piece's colour whether or not it is that side's turn.
    ///
    /// Empty squares have no destinations.
    fn legal_destinations(&self, square: Square) -> Vec<Destination>;

    /// Colour of the piece on `square`, if any.
    fn color_at(&self, square: Square) -> Option<Color>;
}
