//! Offline rendering of whole games.

use log::info;

use crate::chess::Game;
use crate::core::Signal;
use crate::orchestra::OrchestraConfig;
use crate::playback::{Performance, PlaybackConfig};

/// Renders `game` from the first move to the end of the grace period.
///
/// # Examples
///
/// ```
/// use orchesstra::chess::Game;
/// use orchesstra::orchestra::OrchestraConfig;
/// use orchesstra::playback::PlaybackConfig;
/// use orchesstra::render::render_game;
///
/// let game = Game::from_san(["e4"]).unwrap();
/// let playback = PlaybackConfig::default().with_move_duration_ms(50.0);
/// let samples = render_game::<8000>(game, OrchestraConfig::default(), playback);
///
/// // One move plus four moves of grace, give or take a control tick.
/// assert!(samples.len() >= 8 * 250);
/// assert!(samples.iter().any(|s| *s != 0.0));
/// ```
pub fn render_game<const SAMPLE_RATE: u32>(
    game: Game,
    orchestra: OrchestraConfig,
    playback: PlaybackConfig,
) -> Vec<f32> {
    let mut performance = Performance::<SAMPLE_RATE>::new(game)
        .with_orchestra_config(orchestra)
        .with_playback_config(playback);

    let mut samples = Vec::new();
    while !performance.is_finished() {
        samples.push(performance.next_sample() as f32);
    }
    info!(
        "rendered {} samples ({:.1} s)",
        samples.len(),
        samples.len() as f64 / SAMPLE_RATE as f64
    );
    samples
}

/// Encodes mono samples as a 32-bit float WAV file in memory.
#[cfg(feature = "wav")]
pub fn to_wav_bytes(samples: &[f32], sample_rate: u32) -> crate::Result<Vec<u8>> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, wav_spec(sample_rate))?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Writes mono samples to `path` as a 32-bit float WAV file.
#[cfg(feature = "wav")]
pub fn write_wav(
    path: impl AsRef<std::path::Path>,
    samples: &[f32],
    sample_rate: u32,
) -> crate::Result<()> {
    let mut writer = hound::WavWriter::create(path.as_ref(), wav_spec(sample_rate))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    info!("wrote {} samples to {}", samples.len(), path.as_ref().display());
    Ok(())
}

#[cfg(feature = "wav")]
fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> PlaybackConfig {
        PlaybackConfig::default().with_move_duration_ms(20.0)
    }

    #[test]
    fn test_render_length_covers_game_and_grace() {
        let game = Game::from_san(["e4", "e5", "Nf3"]).unwrap();
        let samples = render_game::<4000>(game, OrchestraConfig::default(), quick());
        // 3 moves + 4 moves of grace at 4 samples per ms.
        let expected = 7 * 20 * 4;
        assert!(samples.len() >= expected);
        assert!(samples.len() < expected + 2 * 4000 / 60 + 1);
    }

    #[test]
    fn test_render_stays_in_range() {
        let game = Game::from_san(["d4", "Nf6", "c4", "g6", "Nc3", "Bg7"]).unwrap();
        let samples = render_game::<4000>(game, OrchestraConfig::default(), quick());
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_empty_game_renders_grace_only() {
        let samples = render_game::<4000>(Game::default(), OrchestraConfig::default(), quick());
        assert!(samples.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_zero_control_rate_still_finishes() {
        let game = Game::from_san(["e4", "e5"]).unwrap();
        let samples = render_game::<4000>(
            game,
            OrchestraConfig::default(),
            quick().with_control_rate_hz(0.0),
        );
        // Ticks at the default 60 Hz instead.
        let expected = 6 * 20 * 4;
        assert!(samples.len() >= expected);
        assert!(samples.len() < expected + 2 * 4000 / 60 + 1);
    }

    #[cfg(feature = "wav")]
    #[test]
    fn test_wav_bytes_round_trip() {
        let samples = [0.0_f32, 0.25, -0.5];
        let bytes = to_wav_bytes(&samples, 4000).unwrap();
        let mut reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 4000);
        let back: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(back, samples);
    }
}
