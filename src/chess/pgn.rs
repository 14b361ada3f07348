use log::debug;

use super::{Board, Move};
use crate::error::Result;

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// A replayed game: the verbose move list plus whatever the PGN header said.
///
/// # Examples
///
/// ```
/// use orchesstra::chess::Game;
///
/// let game = Game::from_pgn("[White \"Anon\"]\n1. e4 e5 2. Nf3 {develops} Nc6 *").unwrap();
/// assert_eq!(game.len(), 4);
/// assert_eq!(game.tag("White"), Some("Anon"));
/// assert_eq!(game.moves()[2].notation, "Nf3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    tags: Vec<(String, String)>,
    moves: Vec<Move>,
    result: Option<String>,
}

impl Game {
    /// Wraps an already verbose move list.
    pub fn new(moves: Vec<Move>) -> Self {
        Self {
            moves,
            ..Self::default()
        }
    }

    /// Replays SAN tokens from the standard position.
    pub fn from_san<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut board = Board::standard();
        let mut moves = Vec::new();
        for token in tokens {
            let mv = board.parse_san(token.as_ref())?;
            board.apply(&mv);
            moves.push(mv);
        }
        Ok(Self::new(moves))
    }

    /// Reads a single-game PGN.
    ///
    /// Tag pairs are kept. Comments, variations, NAGs, move numbers and the
    /// result token are dropped from the movetext before replay.
    pub fn from_pgn(text: &str) -> Result<Self> {
        let mut tags = Vec::new();
        let mut tokens = Vec::new();
        let mut result = None;

        for word in lex(text, &mut tags) {
            if RESULTS.contains(&word.as_str()) {
                result = Some(word);
                continue;
            }
            if word.starts_with('$') {
                continue;
            }
            let san = strip_move_number(&word);
            if !san.is_empty() {
                tokens.push(san.to_string());
            }
        }

        let mut game = Self::from_san(tokens)?;
        debug!("read PGN game with {} plies and {} tags", game.len(), tags.len());
        game.tags = tags;
        game.result = result;
        Ok(game)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `1-0`, `0-1`, `1/2-1/2` or `*`, if the movetext ended with one.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// The position after the last move.
    pub fn final_position(&self) -> Board {
        let mut board = Board::standard();
        for mv in &self.moves {
            board.apply(mv);
        }
        board
    }
}

/// Splits movetext into words, collecting tag pairs on the way and skipping
/// comments and (nested) variations.
fn lex(text: &str, tags: &mut Vec<(String, String)>) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        let skip_until = match c {
            '{' => Some('}'),
            ';' => Some('\n'),
            '[' => Some(']'),
            '(' => None,
            c if c.is_whitespace() => {
                flush(&mut word, &mut words);
                continue;
            }
            c => {
                word.push(c);
                continue;
            }
        };
        flush(&mut word, &mut words);

        match skip_until {
            Some(']') => {
                let body: String = chars.by_ref().take_while(|&c| c != ']').collect();
                if let Some(tag) = tag_pair(&body) {
                    tags.push(tag);
                }
            }
            Some(end) => {
                chars.by_ref().take_while(|&c| c != end).for_each(drop);
            }
            None => {
                let mut depth = 1;
                for c in chars.by_ref() {
                    match c {
                        '(' => depth += 1,
                        ')' => depth -= 1,
                        _ => {}
                    }
                    if depth == 0 {
                        break;
                    }
                }
            }
        }
    }
    flush(&mut word, &mut words);
    words
}

/// `12.` and `12...` prefixes go; `0-0` stays.
fn strip_move_number(word: &str) -> &str {
    let end = word
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(word.len());
    if word[..end].contains('.') { &word[end..] } else { word }
}

fn flush(word: &mut String, words: &mut Vec<String>) {
    if !word.is_empty() {
        words.push(std::mem::take(word));
    }
}

fn tag_pair(body: &str) -> Option<(String, String)> {
    let (name, value) = body.trim().split_once(char::is_whitespace)?;
    let value = value.trim().trim_matches('"');
    Some((name.to_string(), value.to_string()))
}
