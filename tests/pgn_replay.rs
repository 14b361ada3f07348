use orchesstra::chess::{Board, Game, PieceKind};
use orchesstra::orchestra::VoiceAllocator;
use orchesstra::playback::PlaybackConfig;
use orchesstra::render::render_game;
use orchesstra::{OrchestraConfig, Signal};

const TAL_FISCHER: &str = r#"[Event "Bled-Zagreb-Belgrade Candidates"]
[Site "Bled, Zagreb & Belgrade YUG"]
[Date "1959.10.11"]
[EventDate "1959.09.07"]
[Round "20"]
[Result "1-0"]
[White "Mikhail Tal"]
[Black "Robert James Fischer"]
[ECO "E93"]
[WhiteElo "?"]
[BlackElo "?"]
[PlyCount "67"]

1. d4 Nf6 2. c4 g6 3. Nc3 Bg7 4. e4 d6 5. Be2 O-O 6. Nf3 e5
7. d5 Nbd7 8. Bg5 h6 9. Bh4 a6 10. O-O Qe8 11. Nd2 Nh7 12. b4
Bf6 13. Bxf6 Nhxf6 14. Nb3 Qe7 15. Qd2 Kh7 16. Qe3 Ng8 17. c5
f5 18. exf5 gxf5 19. f4 exf4 20. Qxf4 dxc5 21. Bd3 cxb4
22. Rae1 Qf6 23. Re6 Qxc3 24. Bxf5+ Rxf5 25. Qxf5+ Kh8 26. Rf3
Qb2 27. Re8 Nf6 28. Qxf6+ Qxf6 29. Rxf6 Kg7 30. Rff8 Ne7
31. Na5 h5 32. h4 Rb8 33. Nc4 b5 34. Ne5 1-0
"#;

#[test]
fn test_reads_tags_and_moves() {
    let game = Game::from_pgn(TAL_FISCHER).unwrap();
    assert_eq!(game.len(), 67);
    assert_eq!(game.result(), Some("1-0"));
    assert_eq!(game.tag("White"), Some("Mikhail Tal"));
    assert_eq!(game.tag("Black"), Some("Robert James Fischer"));
    assert_eq!(game.tag("PlyCount"), Some("67"));

    let last = game.moves().last().unwrap();
    assert_eq!(last.notation, "Ne5");
    assert_eq!(last.piece, PieceKind::Knight);
    assert_eq!(last.to, "e5".parse().unwrap());
}

#[test]
fn test_replay_keeps_voices_on_their_pieces() {
    let game = Game::from_pgn(TAL_FISCHER).unwrap();
    let mut board = Board::standard();
    let mut orchestra = VoiceAllocator::<8000>::new();

    for mv in game.moves() {
        orchestra.make_move(mv).unwrap();
        board.apply(mv);

        for (square, seat) in orchestra.seats() {
            let piece = board.piece_at(square).unwrap();
            assert_eq!(piece.color, seat.color(), "{} after {}", square, mv.notation);
            assert_eq!(piece.kind, seat.voice().timbre().kind, "{} after {}", square, mv.notation);
        }
        // Each voice peaks at its level times 4/3, and levels stay under 0.75.
        let ceiling = orchestra.voice_count() as f64 * orchestra.config().master_gain;
        assert!(orchestra.next_sample().abs() <= ceiling + 1e-9);
    }

    assert_eq!(&board, orchestra.position());
    assert_eq!(board, game.final_position());
}

#[test]
fn test_rendered_game_is_audible() {
    let game = Game::from_pgn(TAL_FISCHER).unwrap();
    let playback = PlaybackConfig::default().with_move_duration_ms(10.0);
    let samples = render_game::<4000>(game, OrchestraConfig::default(), playback);

    // 67 moves and four moves of grace at 40 samples a move.
    assert!(samples.len() >= 71 * 40);
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|s| *s != 0.0));
}
