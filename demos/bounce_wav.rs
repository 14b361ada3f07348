//! Renders a game to a WAV file.
//!
//! ```text
//! cargo run --example bounce_wav --features wav -- game.pgn out.wav
//! ```
//!
//! Without arguments the Opera Game (Morphy, Paris 1858) goes to
//! `opera_game.wav`.

use anyhow::{Context, Result};
use orchesstra::chess::Game;
use orchesstra::render::{render_game, write_wav};
use orchesstra::{OrchestraConfig, PlaybackConfig};

const SAMPLE_RATE: u32 = 44100;

const OPERA_GAME: &str = r#"[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6
7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7
12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8
17. Rd8# 1-0
"#;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let pgn = match args.next() {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => OPERA_GAME.to_string(),
    };
    let out = args.next().unwrap_or_else(|| "opera_game.wav".to_string());

    let game = Game::from_pgn(&pgn)?;
    println!(
        "{} vs {}: {} moves",
        game.tag("White").unwrap_or("?"),
        game.tag("Black").unwrap_or("?"),
        game.len()
    );

    let playback = PlaybackConfig::default().with_move_duration_ms(400.0);
    let samples = render_game::<SAMPLE_RATE>(game, OrchestraConfig::default(), playback);
    write_wav(&out, &samples, SAMPLE_RATE)?;

    println!(
        "wrote {:.1} s to {}",
        samples.len() as f64 / SAMPLE_RATE as f64,
        out
    );
    Ok(())
}
