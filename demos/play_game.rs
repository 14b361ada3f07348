//! Plays Tal vs Fischer, Bled 1959, through the default output device.
//!
//! ## Controls
//!
//! - R: Restart the game
//! - Q or ESC: Quit

mod common;

use anyhow::Result;
use common::{DemoAudioState, KeyAction, is_quit_key, run_interactive_demo};
use crossterm::{
    ExecutableCommand,
    cursor::MoveTo,
    event::KeyCode,
    terminal::{Clear, ClearType},
};
use orchesstra::chess::Game;
use orchesstra::{Performance, PlaybackConfig, Signal};
use std::io::stdout;

const SAMPLE_RATE: u32 = 44100;

const TAL_FISCHER: &str = r#"[Event "Bled-Zagreb-Belgrade Candidates"]
[Site "Bled, Zagreb & Belgrade YUG"]
[Date "1959.10.11"]
[Round "20"]
[Result "1-0"]
[White "Mikhail Tal"]
[Black "Robert James Fischer"]
[ECO "E93"]

1. d4 Nf6 2. c4 g6 3. Nc3 Bg7 4. e4 d6 5. Be2 O-O 6. Nf3 e5
7. d5 Nbd7 8. Bg5 h6 9. Bh4 a6 10. O-O Qe8 11. Nd2 Nh7 12. b4
Bf6 13. Bxf6 Nhxf6 14. Nb3 Qe7 15. Qd2 Kh7 16. Qe3 Ng8 17. c5
f5 18. exf5 gxf5 19. f4 exf4 20. Qxf4 dxc5 21. Bd3 cxb4
22. Rae1 Qf6 23. Re6 Qxc3 24. Bxf5+ Rxf5 25. Qxf5+ Kh8 26. Rf3
Qb2 27. Re8 Nf6 28. Qxf6+ Qxf6 29. Rxf6 Kg7 30. Rff8 Ne7
31. Na5 h5 32. h4 Rb8 33. Nc4 b5 34. Ne5 1-0
"#;

struct GameState {
    performance: Performance<SAMPLE_RATE>,
}

impl DemoAudioState for GameState {
    fn next_sample(&mut self) -> f64 {
        self.performance.next_sample()
    }
}

fn draw(state: &GameState, game: &Game) -> Result<()> {
    let performance = &state.performance;
    let mut lines = vec![
        format!(
            "{} vs {}",
            game.tag("White").unwrap_or("?"),
            game.tag("Black").unwrap_or("?")
        ),
        String::new(),
    ];
    lines.extend(performance.orchestra().position().ascii().lines().map(str::to_string));
    lines.push(String::new());

    let last = performance
        .current_move()
        .map_or_else(|| "-".to_string(), |mv| mv.notation.clone());
    lines.push(format!(
        "move {:>2}/{}  {:<8} voices {:>2}  {:>3.0}%",
        performance.driver().current_index().map_or(0, |i| i + 1),
        game.len(),
        last,
        performance.orchestra().voice_count(),
        performance.progress() * 100.0
    ));
    if performance.is_finished() {
        lines.push(format!("finished: {}", game.result().unwrap_or("*")));
    } else {
        lines.push(String::new());
    }
    lines.push(String::new());
    lines.push("R: restart   Q/ESC: quit".to_string());

    let mut out = stdout();
    out.execute(Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        out.execute(MoveTo(0, row as u16))?;
        print!("{line}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let game = Game::from_pgn(TAL_FISCHER)?;
    let playback = PlaybackConfig::default().with_move_duration_ms(600.0);
    let state = GameState {
        performance: Performance::new(game.clone()).with_playback_config(playback),
    };

    run_interactive_demo(
        state,
        |state| {
            let state = state.lock().unwrap();
            draw(&state, &game)
        },
        |state, key_event| {
            if is_quit_key(key_event.code) {
                return Ok(KeyAction::Exit);
            }
            if let KeyCode::Char('r') | KeyCode::Char('R') = key_event.code {
                state.lock().unwrap().performance.load(game.clone());
            }
            Ok(KeyAction::Continue)
        },
    )?;

    Ok(())
}
