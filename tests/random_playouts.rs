use std::collections::HashSet;

use orchesstra::chess::{Board, Square};
use orchesstra::orchestra::{OrchestraConfig, RelevelPolicy, VoiceAllocator};
use orchesstra::Signal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const SAMPLE_RATE: u32 = 8000;

/// Plays up to `plies` random legal moves, checking the voice map after
/// each one against the pieces that have moved so far.
fn playout(seed: u64, plies: usize, config: OrchestraConfig) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::standard();
    let mut orchestra = VoiceAllocator::<SAMPLE_RATE>::new().with_config(config);
    // Squares holding a piece that has moved at least once.
    let mut moved: HashSet<Square> = HashSet::new();

    for _ in 0..plies {
        let moves = board.legal_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        let effects = board.side_effects(mv);

        orchestra.make_move(mv).unwrap();
        board.apply(mv);

        moved.remove(&mv.from);
        moved.insert(mv.to);
        if let Some(victim) = effects.en_passant_victim {
            moved.remove(&victim);
        }
        if let Some((rook_from, rook_to)) = effects.rook_hop {
            if moved.remove(&rook_from) {
                moved.insert(rook_to);
            }
        }

        let keys: HashSet<Square> = orchestra.voices().map(|(square, _)| square).collect();
        assert_eq!(keys, moved, "after {}", mv.notation);

        for (square, seat) in orchestra.seats() {
            let piece = board.piece_at(square).expect("voice on an empty square");
            assert_eq!(piece.color, seat.color());
            let level = seat.voice().level();
            assert!((0.0..=0.75).contains(&level), "level {level} on {square}");
        }

        let mover = orchestra.voice_at(mv.to).unwrap();
        assert_eq!(mover.level(), 0.5);
        assert!(!mover.is_released());

        for _ in 0..16 {
            assert!(orchestra.next_sample().is_finite());
        }
    }
}

#[test]
fn test_random_playouts_keep_voice_map_consistent() {
    for seed in 0..8 {
        playout(seed, 200, OrchestraConfig::default());
    }
}

#[test]
fn test_random_playouts_with_all_voices_policy() {
    let config = OrchestraConfig::default().with_relevel(RelevelPolicy::AllVoices);
    for seed in 100..104 {
        playout(seed, 200, config);
    }
}
