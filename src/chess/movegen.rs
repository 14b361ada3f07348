//! Move generation for a standard 8x8 board.
//!
//! Pseudo-legal candidates are generated per piece and filtered by playing
//! them on a copy of the board and checking the mover's king.

use super::{Board, Color, Move, Piece, PieceKind, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A move before it has been described against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// True iff any piece of colour `by` attacks `target`.
pub(crate) fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    // Pawns attack diagonally forward, so look one rank behind the target.
    for df in [-1, 1] {
        if let Some(sq) = target.offset(df, -by.forward()) {
            if board.piece_at(sq) == Some(Piece::new(PieceKind::Pawn, by)) {
                return true;
            }
        }
    }

    let hits = |deltas: &[(i8, i8)], kind: PieceKind| {
        deltas.iter().any(|&(df, dr)| {
            target
                .offset(df, dr)
                .is_some_and(|sq| board.piece_at(sq) == Some(Piece::new(kind, by)))
        })
    };
    if hits(&KNIGHT_DELTAS, PieceKind::Knight) || hits(&KING_DELTAS, PieceKind::King) {
        return true;
    }

    slider_hits(board, target, by, &ROOK_DIRS, PieceKind::Rook)
        || slider_hits(board, target, by, &BISHOP_DIRS, PieceKind::Bishop)
}

fn slider_hits(
    board: &Board,
    target: Square,
    by: Color,
    dirs: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    for &(df, dr) in dirs {
        let mut cur = target;
        while let Some(next) = cur.offset(df, dr) {
            if let Some(piece) = board.piece_at(next) {
                if piece.color == by && (piece.kind == kind || piece.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cur = next;
        }
    }
    false
}

/// Candidates for the piece on `from`, ignoring king safety.
///
/// En passant is only offered when the piece belongs to the side to move,
/// since the target square expires after one ply.
pub(crate) fn pseudo_legal(board: &Board, from: Square) -> Vec<Candidate> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, &mut out),
        PieceKind::Knight => step_moves(board, from, piece.color, &KNIGHT_DELTAS, &mut out),
        PieceKind::Bishop => slide_moves(board, from, piece.color, &BISHOP_DIRS, &mut out),
        PieceKind::Rook => slide_moves(board, from, piece.color, &ROOK_DIRS, &mut out),
        PieceKind::Queen => {
            slide_moves(board, from, piece.color, &ROOK_DIRS, &mut out);
            slide_moves(board, from, piece.color, &BISHOP_DIRS, &mut out);
        }
        PieceKind::King => {
            step_moves(board, from, piece.color, &KING_DELTAS, &mut out);
            castling_moves(board, from, piece.color, &mut out);
        }
    }
    out
}

/// Candidates for the piece on `from` that do not leave its own king in check.
pub(crate) fn legal(board: &Board, from: Square) -> Vec<Candidate> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    pseudo_legal(board, from)
        .into_iter()
        .filter(|candidate| {
            let mut next = board.clone();
            next.apply(&board.describe(*candidate));
            !next.is_in_check(piece.color)
        })
        .collect()
}

/// True iff the side to move has at least one legal move.
pub(crate) fn has_legal_move(board: &Board) -> bool {
    let side = board.side_to_move();
    Square::all()
        .filter(|&sq| board.piece_at(sq).is_some_and(|p| p.color == side))
        .any(|sq| !legal(board, sq).is_empty())
}

/// All legal moves of the side to move, described but without notation.
pub(crate) fn legal_moves(board: &Board) -> Vec<Move> {
    let side = board.side_to_move();
    Square::all()
        .filter(|&sq| board.piece_at(sq).is_some_and(|p| p.color == side))
        .flat_map(|sq| legal(board, sq))
        .map(|candidate| board.describe(candidate))
        .collect()
}

fn push_pawn_move(from: Square, to: Square, color: Color, out: &mut Vec<Candidate>) {
    let last_rank = color.opposite().back_rank();
    if to.rank() == last_rank {
        out.extend(PROMOTIONS.iter().map(|&kind| Candidate {
            from,
            to,
            promotion: Some(kind),
        }));
    } else {
        out.push(Candidate {
            from,
            to,
            promotion: None,
        });
    }
}

fn pawn_moves(board: &Board, from: Square, color: Color, out: &mut Vec<Candidate>) {
    let forward = color.forward();

    if let Some(one) = from.offset(0, forward) {
        if board.piece_at(one).is_none() {
            push_pawn_move(from, one, color, out);

            let start_rank = (color.back_rank() as i8 + forward) as u8;
            if from.rank() == start_rank {
                if let Some(two) = from.offset(0, 2 * forward) {
                    if board.piece_at(two).is_none() {
                        out.push(Candidate {
                            from,
                            to: two,
                            promotion: None,
                        });
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, forward) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != color => push_pawn_move(from, to, color, out),
            None if board.side_to_move() == color && board.en_passant() == Some(to) => {
                out.push(Candidate {
                    from,
                    to,
                    promotion: None,
                });
            }
            _ => {}
        }
    }
}

fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    deltas: &[(i8, i8)],
    out: &mut Vec<Candidate>,
) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            if board.piece_at(to).is_none_or(|p| p.color != color) {
                out.push(Candidate {
                    from,
                    to,
                    promotion: None,
                });
            }
        }
    }
}

fn slide_moves(
    board: &Board,
    from: Square,
    color: Color,
    dirs: &[(i8, i8)],
    out: &mut Vec<Candidate>,
) {
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            match board.piece_at(to) {
                None => out.push(Candidate {
                    from,
                    to,
                    promotion: None,
                }),
                Some(p) => {
                    if p.color != color {
                        out.push(Candidate {
                            from,
                            to,
                            promotion: None,
                        });
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}

fn castling_moves(board: &Board, from: Square, color: Color, out: &mut Vec<Candidate>) {
    let rank = color.back_rank();
    if from != Square::new(4, rank) || is_attacked(board, from, color.opposite()) {
        return;
    }

    let rights = board.castling_rights();
    let rook = Some(Piece::new(PieceKind::Rook, color));

    // (allowed, rook file, files that must be empty, files the king crosses, king target file)
    let sides: [(bool, u8, &[u8], &[u8], u8); 2] = [
        (rights.kingside(color), 7, &[5, 6], &[5, 6], 6),
        (rights.queenside(color), 0, &[1, 2, 3], &[3, 2], 2),
    ];

    for (allowed, rook_file, empty, crossed, target) in sides {
        if !allowed || board.piece_at(Square::new(rook_file, rank)) != rook {
            continue;
        }
        if empty.iter().any(|&f| board.piece_at(Square::new(f, rank)).is_some()) {
            continue;
        }
        if crossed
            .iter()
            .any(|&f| is_attacked(board, Square::new(f, rank), color.opposite()))
        {
            continue;
        }
        out.push(Candidate {
            from,
            to: Square::new(target, rank),
            promotion: None,
        });
    }
}
