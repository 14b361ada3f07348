use super::{
    Color, Destination, Move, Piece, PieceKind, Position, SideEffects, Square,
    movegen::{self, Candidate},
    san,
};
use crate::error::Result;

/// Which castles each side may still perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    fn revoke(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Drops the right tied to a rook's home corner once anything leaves or
    /// lands on it.
    fn touch(&mut self, square: Square) {
        match (square.file(), square.rank()) {
            (0, 0) => self.white_queenside = false,
            (7, 0) => self.white_kingside = false,
            (0, 7) => self.black_queenside = false,
            (7, 7) => self.black_kingside = false,
            _ => {}
        }
    }
}

/// An 8x8 mailbox position.
///
/// `Board` applies moves without validating them, answers legality and
/// mobility queries, and reads SAN against the current position.
///
/// # Examples
///
/// ```
/// use orchesstra::chess::Board;
///
/// let mut board = Board::standard();
/// let mv = board.parse_san("Nf3").unwrap();
/// assert_eq!(mv.from.to_string(), "g1");
///
/// board.apply(&mv);
/// assert!(board.piece_at(mv.to).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Board {
    /// A board with no pieces, white to move and no castling rights.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
        }
    }

    /// The standard initial position.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            board.put(Square::new(file, 0), Some(Piece::new(kind, Color::White)));
            board.put(Square::new(file, 1), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.put(Square::new(file, 6), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            board.put(Square::new(file, 7), Some(Piece::new(kind, Color::Black)));
        }
        board.castling = CastlingRights::all();
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Places or removes a piece without touching any other state.
    pub fn put(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    /// Square a pawn may capture onto en passant this ply.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| *p == Piece::new(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| movegen::is_attacked(self, king, color.opposite()))
    }

    /// Pieces displaced by `mv` besides the mover.
    pub fn side_effects(&self, mv: &Move) -> SideEffects {
        let mut effects = SideEffects::default();

        if mv.piece == PieceKind::Pawn
            && Some(mv.to) == self.en_passant
            && mv.from.file() != mv.to.file()
            && self.piece_at(mv.to).is_none()
        {
            effects.en_passant_victim = Some(Square::new(mv.to.file(), mv.from.rank()));
        }

        if mv.piece == PieceKind::King
            && mv.from.file() == 4
            && mv.from.file().abs_diff(mv.to.file()) == 2
        {
            let rank = mv.from.rank();
            effects.rook_hop = Some(if mv.to.file() == 6 {
                (Square::new(7, rank), Square::new(5, rank))
            } else {
                (Square::new(0, rank), Square::new(3, rank))
            });
        }

        effects
    }

    /// Plays `mv`, trusting that it is legal.
    ///
    /// Handles captures, en passant, the castling rook, promotion, castling
    /// rights and the en-passant target. If `from` is empty the piece named
    /// by the move is conjured there.
    pub fn apply(&mut self, mv: &Move) {
        let effects = self.side_effects(mv);
        let mover = self.squares[mv.from.index()]
            .take()
            .unwrap_or(Piece::new(mv.piece, mv.color));

        if let Some(victim) = effects.en_passant_victim {
            self.put(victim, None);
        }
        if let Some((rook_from, rook_to)) = effects.rook_hop {
            let rook = self.squares[rook_from.index()].take();
            self.put(rook_to, rook);
        }

        let placed = match mv.promotion {
            Some(kind) => Piece::new(kind, mover.color),
            None => mover,
        };
        self.put(mv.to, Some(placed));

        if mover.kind == PieceKind::King {
            self.castling.revoke(mover.color);
        }
        self.castling.touch(mv.from);
        self.castling.touch(mv.to);

        let double_push =
            mover.kind == PieceKind::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2;
        self.en_passant = double_push
            .then(|| Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2));
        self.side_to_move = mover.color.opposite();
    }

    /// Legal destinations of the piece on `square`, deduplicated by square.
    ///
    /// The query is answered for the piece's own colour. When that side is
    /// not to move, the board is viewed as if it were, without an en-passant
    /// target.
    pub fn legal_destinations(&self, square: Square) -> Vec<Destination> {
        let Some(piece) = self.piece_at(square) else {
            return Vec::new();
        };

        let flipped;
        let view = if piece.color == self.side_to_move {
            self
        } else {
            let mut board = self.clone();
            board.side_to_move = piece.color;
            board.en_passant = None;
            flipped = board;
            &flipped
        };

        let mut out: Vec<Destination> = Vec::new();
        for candidate in movegen::legal(view, square) {
            // The flipped view can leave the other king in check; taking it
            // is never a move.
            let takes_king = view
                .piece_at(candidate.to)
                .is_some_and(|target| target.kind == PieceKind::King);
            if takes_king || out.iter().any(|d| d.square == candidate.to) {
                continue;
            }
            out.push(Destination {
                square: candidate.to,
                is_capture: view.describe(candidate).is_capture,
            });
        }
        out
    }

    /// All legal moves of the side to move, with SAN notation.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = movegen::legal_moves(self);
        san::annotate(self, &mut moves);
        moves
    }

    /// Reads one SAN token against this position.
    pub fn parse_san(&self, token: &str) -> Result<Move> {
        san::parse(self, token)
    }

    /// Turns a candidate into a full move (without notation).
    pub(crate) fn describe(&self, candidate: Candidate) -> Move {
        let piece = self
            .piece_at(candidate.from)
            .unwrap_or(Piece::new(PieceKind::Pawn, self.side_to_move));
        let en_passant = piece.kind == PieceKind::Pawn
            && candidate.from.file() != candidate.to.file()
            && self.piece_at(candidate.to).is_none();

        Move {
            notation: String::new(),
            from: candidate.from,
            to: candidate.to,
            piece: piece.kind,
            color: piece.color,
            is_capture: self.piece_at(candidate.to).is_some() || en_passant,
            promotion: candidate.promotion,
        }
    }

    /// Text diagram of the board, white at the bottom.
    pub fn ascii(&self) -> String {
        let mut out = String::from("   +------------------------+\n");
        for rank in (0..8).rev() {
            out.push_str(&format!(" {} |", rank + 1));
            for file in 0..8 {
                let symbol = self.piece_at(Square::new(file, rank)).map_or('.', Piece::symbol);
                out.push_str(&format!(" {symbol} "));
            }
            out.push_str("|\n");
        }
        out.push_str("   +------------------------+\n");
        out.push_str("     a  b  c  d  e  f  g  h");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Position for Board {
    fn apply(&mut self, mv: &Move) {
        Board::apply(self, mv);
    }

    fn side_effects(&self, mv: &Move) -> SideEffects {
        Board::side_effects(self, mv)
    }

    fn legal_destinations(&self, square: Square) -> Vec<Destination> {
        Board::legal_destinations(self, square)
    }

    fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(key: &str) -> Square {
        key.parse().unwrap()
    }

    fn play(board: &mut Board, moves: &[&str]) {
        for san in moves {
            let mv = board.parse_san(san).unwrap();
            board.apply(&mv);
        }
    }

    #[test]
    fn test_standard_position() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.piece_at(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.piece_at(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.castling_rights(), CastlingRights::all());
    }

    #[test]
    fn test_double_push_sets_en_passant() {
        let mut board = Board::standard();
        play(&mut board, &["e4"]);
        assert_eq!(board.en_passant(), Some(sq("e3")));
        assert_eq!(board.side_to_move(), Color::Black);
        play(&mut board, &["Nf6"]);
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn test_en_passant_capture_removes_pawn() {
        let mut board = Board::standard();
        play(&mut board, &["e4", "a6", "e5", "d5"]);
        let mv = board.parse_san("exd6").unwrap();
        assert!(mv.is_capture);
        assert_eq!(board.side_effects(&mv).en_passant_victim, Some(sq("d5")));

        board.apply(&mv);
        assert_eq!(board.piece_at(sq("d5")), None);
        assert_eq!(board.piece_at(sq("d6")), Some(Piece::new(PieceKind::Pawn, Color::White)));
    }

    #[test]
    fn test_castling_moves_rook_and_revokes_rights() {
        let mut board = Board::standard();
        play(&mut board, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);
        let mv = board.parse_san("O-O").unwrap();
        assert_eq!(board.side_effects(&mv).rook_hop, Some((sq("h1"), sq("f1"))));

        board.apply(&mv);
        assert_eq!(board.piece_at(sq("g1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.piece_at(sq("f1")), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(board.piece_at(sq("h1")), None);
        assert!(!board.castling_rights().kingside(Color::White));
        assert!(!board.castling_rights().queenside(Color::White));
        assert!(board.castling_rights().kingside(Color::Black));
    }

    #[test]
    fn test_promotion_replaces_pawn() {
        let mut board = Board::empty();
        board.put(sq("b7"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.put(sq("e1"), Some(Piece::new(PieceKind::King, Color::White)));
        board.put(sq("h8"), Some(Piece::new(PieceKind::King, Color::Black)));

        let mv = board.parse_san("b8=N").unwrap();
        board.apply(&mv);
        assert_eq!(board.piece_at(sq("b8")), Some(Piece::new(PieceKind::Knight, Color::White)));
    }

    #[test]
    fn test_legal_destinations_for_side_not_to_move() {
        let mut board = Board::standard();
        play(&mut board, &["e4"]);
        // Black to move, but white's knight is still mobile.
        let dests = board.legal_destinations(sq("g1"));
        let keys: Vec<String> = dests.iter().map(|d| d.square.to_string()).collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"e2".to_string()));
        assert!(dests.iter().all(|d| !d.is_capture));
    }

    #[test]
    fn test_legal_destinations_report_captures() {
        let mut board = Board::standard();
        play(&mut board, &["e4", "d5"]);
        let dests = board.legal_destinations(sq("e4"));
        assert_eq!(dests.len(), 2);
        assert!(dests.iter().any(|d| d.square == sq("d5") && d.is_capture));
        assert!(dests.iter().any(|d| d.square == sq("e5") && !d.is_capture));
    }

    #[test]
    fn test_legal_destinations_dedupe_promotions() {
        let mut board = Board::empty();
        board.put(sq("a7"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.put(sq("e1"), Some(Piece::new(PieceKind::King, Color::White)));
        board.put(sq("e8"), Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(board.legal_destinations(sq("a7")).len(), 1);
    }

    #[test]
    fn test_legal_destinations_skip_checked_king() {
        let mut board = Board::empty();
        board.put(sq("a1"), Some(Piece::new(PieceKind::King, Color::White)));
        board.put(sq("d1"), Some(Piece::new(PieceKind::Rook, Color::White)));
        board.put(sq("e4"), Some(Piece::new(PieceKind::Bishop, Color::White)));
        board.put(sq("e8"), Some(Piece::new(PieceKind::King, Color::Black)));
        board.put(sq("h7"), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        // The bishop steps aside and uncovers the rook on the e-file.
        play(&mut board, &["Re1", "h6", "Bd5+"]);
        assert!(board.is_in_check(Color::Black));

        let dests = board.legal_destinations(sq("e1"));
        assert_eq!(dests.len(), 12);
        assert!(dests.iter().all(|d| d.square != sq("e8")));
        assert!(dests.iter().all(|d| !d.is_capture));
    }

    #[test]
    fn test_empty_square_has_no_destinations() {
        assert!(Board::standard().legal_destinations(sq("e4")).is_empty());
    }

    #[test]
    fn test_apply_conjures_missing_piece() {
        let mut board = Board::empty();
        let mv = Move {
            notation: "Nf3".to_string(),
            from: sq("g1"),
            to: sq("f3"),
            piece: PieceKind::Knight,
            color: Color::White,
            is_capture: false,
            promotion: None,
        };
        board.apply(&mv);
        assert_eq!(board.piece_at(sq("f3")), Some(Piece::new(PieceKind::Knight, Color::White)));
    }

    #[test]
    fn test_ascii_diagram() {
        let art = Board::standard().ascii();
        assert!(art.contains(" 8 | r  n  b  q  k  b  n  r |"));
        assert!(art.contains(" 1 | R  N  B  Q  K  B  N  R |"));
        assert!(art.ends_with("a  b  c  d  e  f  g  h"));
    }
}
