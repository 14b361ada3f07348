//! Standard algebraic notation: writing it for generated moves and reading
//! it back against a position.

use super::{Board, Move, PieceKind, Square, movegen};
use crate::error::{Error, Result};

/// Fills in `notation` for every move in `moves`, which must be the full
/// legal move list of `board` so disambiguation can see the rivals.
pub(crate) fn annotate(board: &Board, moves: &mut [Move]) {
    let notations: Vec<String> = moves.iter().map(|mv| notation(board, mv, moves)).collect();
    for (mv, san) in moves.iter_mut().zip(notations) {
        mv.notation = san;
    }
}

fn is_castle(mv: &Move) -> bool {
    mv.piece == PieceKind::King && mv.from.file().abs_diff(mv.to.file()) == 2
}

fn notation(board: &Board, mv: &Move, all: &[Move]) -> String {
    let mut san = String::new();

    if is_castle(mv) {
        san.push_str(if mv.to.file() == 6 { "O-O" } else { "O-O-O" });
    } else {
        match mv.piece.san_letter() {
            Some(letter) => {
                san.push(letter);
                san.push_str(&disambiguation(mv, all));
            }
            None if mv.is_capture => san.push(file_char(mv.from)),
            None => {}
        }
        if mv.is_capture {
            san.push('x');
        }
        san.push_str(&mv.to.to_string());
        if let Some(letter) = mv.promotion.and_then(PieceKind::san_letter) {
            san.push('=');
            san.push(letter);
        }
    }

    let mut next = board.clone();
    next.apply(mv);
    if next.is_in_check(next.side_to_move()) {
        san.push(if movegen::has_legal_move(&next) { '+' } else { '#' });
    }
    san
}

fn disambiguation(mv: &Move, all: &[Move]) -> String {
    let rivals: Vec<&Move> = all
        .iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|r| r.from.file() != mv.from.file()) {
        file_char(mv.from).to_string()
    } else if rivals.iter().all(|r| r.from.rank() != mv.from.rank()) {
        rank_char(mv.from).to_string()
    } else {
        mv.from.to_string()
    }
}

fn file_char(square: Square) -> char {
    (b'a' + square.file()) as char
}

fn rank_char(square: Square) -> char {
    (b'1' + square.rank()) as char
}

fn illegal(token: &str, reason: &str) -> Error {
    Error::IllegalMove {
        san: token.to_string(),
        reason: reason.to_string(),
    }
}

/// Reads one SAN token against `board`.
///
/// Check, mate and annotation suffixes are ignored, `0-0` is accepted for
/// `O-O`, and a promotion may be written with or without `=`. A pawn reaching
/// the last rank without a promotion letter promotes to a queen.
pub(crate) fn parse(board: &Board, token: &str) -> Result<Move> {
    let body = token.trim().trim_end_matches(['+', '#', '!', '?']);
    if body.is_empty() {
        return Err(illegal(token, "empty move"));
    }

    let candidates = movegen::legal_moves(board);

    let matches: Vec<&Move> = match body {
        "O-O" | "0-0" => candidates
            .iter()
            .filter(|mv| is_castle(mv) && mv.to.file() == 6)
            .collect(),
        "O-O-O" | "0-0-0" => candidates
            .iter()
            .filter(|mv| is_castle(mv) && mv.to.file() == 2)
            .collect(),
        _ => {
            let pattern = Pattern::read(token, body)?;
            candidates.iter().filter(|mv| pattern.matches(mv)).collect()
        }
    };

    match matches.as_slice() {
        [] => Err(illegal(token, "no legal move matches")),
        [single] => {
            let mut mv = (*single).clone();
            mv.notation = notation(board, &mv, &candidates);
            Ok(mv)
        }
        _ => Err(Error::AmbiguousMove(token.to_string())),
    }
}

/// The constraints a non-castling SAN token places on a move.
struct Pattern {
    piece: PieceKind,
    to: Square,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    promotion: Option<PieceKind>,
}

impl Pattern {
    fn read(token: &str, body: &str) -> Result<Self> {
        let mut rest = body;

        let mut promotion = None;
        if let Some((head, tail)) = rest.split_once('=') {
            let letter = tail
                .chars()
                .next()
                .ok_or_else(|| illegal(token, "missing promotion piece"))?;
            promotion = Some(promotion_kind(token, letter)?);
            rest = head;
        } else if let Some(last) = rest.chars().last() {
            if rest.len() > 2 && matches!(last, 'Q' | 'R' | 'B' | 'N') {
                promotion = Some(promotion_kind(token, last)?);
                rest = &rest[..rest.len() - 1];
            }
        }

        if rest.len() < 2 || !rest.is_char_boundary(rest.len() - 2) {
            return Err(illegal(token, "missing destination"));
        }
        let (prefix, dest) = rest.split_at(rest.len() - 2);
        let to: Square = dest.parse().map_err(|_| illegal(token, "bad destination square"))?;

        let mut chars = prefix.chars().peekable();
        let piece = match chars.peek() {
            Some(c) if c.is_ascii_uppercase() => {
                let kind = PieceKind::from_code(*c)
                    .ok_or_else(|| illegal(token, "unknown piece letter"))?;
                chars.next();
                kind
            }
            _ => PieceKind::Pawn,
        };

        let mut from_file = None;
        let mut from_rank = None;
        for c in chars {
            match c {
                'x' | ':' => {}
                'a'..='h' => from_file = Some(c as u8 - b'a'),
                '1'..='8' => from_rank = Some(c as u8 - b'1'),
                _ => return Err(illegal(token, "unexpected character")),
            }
        }

        Ok(Self {
            piece,
            to,
            from_file,
            from_rank,
            promotion,
        })
    }

    fn matches(&self, mv: &Move) -> bool {
        let promotion = match (self.promotion, mv.promotion) {
            (None, Some(kind)) => kind == PieceKind::Queen,
            (wanted, got) => wanted == got,
        };

        mv.piece == self.piece
            && mv.to == self.to
            && self.from_file.is_none_or(|f| mv.from.file() == f)
            && self.from_rank.is_none_or(|r| mv.from.rank() == r)
            && promotion
    }
}

fn promotion_kind(token: &str, letter: char) -> Result<PieceKind> {
    match PieceKind::from_code(letter) {
        Some(kind) if !matches!(kind, PieceKind::Pawn | PieceKind::King) => Ok(kind),
        _ => Err(illegal(token, "invalid promotion piece")),
    }
}
