//! A small chess rules engine: enough to replay games, answer mobility
//! queries and hand the orchestra a trusted, verbose move stream.

mod board;
mod movegen;
mod moves;
mod pgn;
mod piece;
mod position;
mod san;
mod square;

pub use board::{Board, CastlingRights};
pub use moves::{Destination, Move, MoveRecord, SideEffects};
pub use pgn::Game;
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;
pub use square::Square;
