use orchesstra::chess::{Board, Move, PieceKind, Square};
use orchesstra::orchestra::VoiceAllocator;
use orchesstra::{Error, PitchMap, Signal};

const SAMPLE_RATE: u32 = 44100;

fn sq(key: &str) -> Square {
    key.parse().unwrap()
}

/// Replays SAN moves through a fresh orchestra, one at a time.
struct Session {
    board: Board,
    orchestra: VoiceAllocator<SAMPLE_RATE>,
}

impl Session {
    fn new() -> Self {
        Self {
            board: Board::standard(),
            orchestra: VoiceAllocator::new(),
        }
    }

    fn play(&mut self, san: &str) -> Move {
        let mv = self.board.parse_san(san).unwrap();
        self.board.apply(&mv);
        self.orchestra.make_move(&mv).unwrap();
        mv
    }
}

#[test]
fn test_open_game_builds_four_voices() {
    let mut session = Session::new();

    session.play("e4");
    let pawn = session.orchestra.voice_at(sq("e4")).unwrap();
    assert_eq!(pawn.timbre().kind, PieceKind::Pawn);
    assert!(session.orchestra.voice_at(sq("e2")).is_none());

    session.play("e5");
    session.play("Nf3");
    let knight = session.orchestra.voice_at(sq("f3")).unwrap();
    assert_eq!(knight.timbre().kind, PieceKind::Knight);
    assert_eq!(knight.frequencies()[0], PitchMap::frequency(sq("f3")).as_f64());

    session.play("Nc6");
    assert_eq!(session.orchestra.voice_count(), 4);
}

#[test]
fn test_capture_releases_victim_and_moves_captor() {
    let mut session = Session::new();
    session.play("e4");
    session.play("d5");
    let captor = session.orchestra.voice_at(sq("e4")).unwrap().id();
    let victim = session.orchestra.voice_at(sq("d5")).unwrap().id();

    session.play("exd5");

    assert_eq!(session.orchestra.voice_count(), 1);
    let voice = session.orchestra.voice_at(sq("d5")).unwrap();
    assert_eq!(voice.id(), captor);
    assert_ne!(voice.id(), victim);
    assert_eq!(voice.timbre().kind, PieceKind::Pawn);
    assert!(session.orchestra.voice_at(sq("e4")).is_none());
}

#[test]
fn test_migration_preserves_identity_and_timbre() {
    let mut session = Session::new();
    session.play("Nf3");
    let id = session.orchestra.voice_at(sq("f3")).unwrap().id();
    session.play("e5");
    session.play("Nxe5");
    session.play("d6");
    session.play("Nc4");

    let voice = session.orchestra.voice_at(sq("c4")).unwrap();
    assert_eq!(voice.id(), id);
    assert_eq!(voice.timbre().kind, PieceKind::Knight);
    assert_eq!(voice.level(), 0.5);
    assert_eq!(voice.frequencies()[0], PitchMap::frequency(sq("c4")).as_f64());
    assert_eq!(session.orchestra.voice_count(), 2);
}

#[test]
fn test_castling_keeps_map_on_occupied_squares() {
    let mut session = Session::new();
    for san in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O"] {
        session.play(san);
    }
    let king = session.orchestra.voice_at(sq("g1")).unwrap();
    assert_eq!(king.timbre().kind, PieceKind::King);
    for (square, seat) in session.orchestra.seats() {
        let piece = session.board.piece_at(square).unwrap();
        assert_eq!(piece.color, seat.color());
        assert_eq!(piece.kind, seat.voice().timbre().kind);
    }
}

#[test]
fn test_en_passant_releases_taken_pawn() {
    let mut session = Session::new();
    for san in ["e4", "Nf6", "e5", "d5"] {
        session.play(san);
    }
    assert_eq!(session.orchestra.voice_count(), 3);

    let mv = session.play("exd6");
    assert!(mv.is_capture);
    assert!(session.orchestra.voice_at(sq("d5")).is_none());
    assert!(session.orchestra.voice_at(sq("d6")).is_some());
    assert_eq!(session.orchestra.voice_count(), 2);
}

#[test]
fn test_promoted_pawn_keeps_pawn_timbre() {
    let mut session = Session::new();
    for san in ["h4", "g5", "hxg5", "Nf6", "g6", "Ng8", "g7", "Nf6", "gxh8=Q"] {
        session.play(san);
    }
    let voice = session.orchestra.voice_at(sq("h8")).unwrap();
    assert_eq!(voice.timbre().kind, PieceKind::Pawn);
}

#[test]
fn test_mobility_levels_after_move() {
    let mut session = Session::new();
    session.play("e4");
    session.play("e5");
    session.play("Bc4");
    // The bishop just moved and is accented; the blocked e-pawn falls silent.
    assert_eq!(session.orchestra.voice_at(sq("c4")).unwrap().level(), 0.5);
    assert_eq!(session.orchestra.voice_at(sq("e4")).unwrap().level(), 0.0);

    session.play("Nf6");
    session.play("Qf3");
    // The bishop now has b3, b5, a6, d5, e6, d3, e2, f1 and takes on f7.
    let bishop = session.orchestra.voice_at(sq("c4")).unwrap();
    assert_eq!(bishop.level(), 0.5 + 0.25);
}

#[test]
fn test_shutup_is_idempotent() {
    let mut session = Session::new();
    session.play("d4");
    session.play("d5");
    session.orchestra.shutup();
    assert_eq!(session.orchestra.voice_count(), 0);
    session.orchestra.shutup();
    assert_eq!(session.orchestra.voice_count(), 0);
    assert_eq!(session.orchestra.next_sample(), 0.0);
}

#[test]
fn test_released_voice_rejects_control() {
    let mut voice = orchesstra::Voice::<SAMPLE_RATE>::new(
        orchesstra::synthesis::VoiceId(1),
        orchesstra::Timbre::for_piece(PieceKind::Queen),
    );
    voice.release().unwrap();
    assert!(matches!(voice.retune(440.0), Err(Error::UseAfterRelease(_))));
}

#[test]
fn test_bad_record_is_invalid_timbre() {
    let record = orchesstra::chess::MoveRecord {
        notation: "Zf3".to_string(),
        from: "g1".to_string(),
        to: "f3".to_string(),
        piece: 'z',
        color: 'w',
        is_capture: false,
        promotion: None,
    };
    let result = Move::try_from(record);
    assert!(matches!(result, Err(Error::InvalidTimbre('z'))));
}
