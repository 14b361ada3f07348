use log::{error, info};

use super::{PlaybackConfig, PlaybackDriver, TickOutcome};
use crate::chess::{Game, Move};
use crate::core::Signal;
use crate::orchestra::{OrchestraConfig, VoiceAllocator};

/// A game turned into one endless sample stream.
///
/// Each sample advances a virtual clock. At the control rate the clock is
/// handed to the driver, which feeds due moves to the orchestra; the sample
/// itself comes from the orchestra. Once the grace period has passed the
/// stream is silent and [`is_finished`](Self::is_finished) reports `true`.
///
/// # Examples
///
/// ```
/// use orchesstra::chess::Game;
/// use orchesstra::playback::{Performance, PlaybackConfig};
/// use orchesstra::Signal;
///
/// let game = Game::from_san(["e4", "e5"]).unwrap();
/// let config = PlaybackConfig::default().with_move_duration_ms(10.0);
/// let mut performance = Performance::<8000>::new(game).with_playback_config(config);
///
/// let mut buffer = vec![0.0; 800];
/// performance.process(&mut buffer);
/// assert!(performance.is_finished());
/// ```
#[derive(Debug)]
pub struct Performance<const SAMPLE_RATE: u32> {
    orchestra: VoiceAllocator<SAMPLE_RATE>,
    driver: PlaybackDriver,
    orchestra_config: OrchestraConfig,
    samples: u64,
}

impl<const SAMPLE_RATE: u32> Performance<SAMPLE_RATE> {
    pub fn new(game: Game) -> Self {
        let orchestra_config = OrchestraConfig::default();
        Self {
            orchestra: VoiceAllocator::new().with_config(orchestra_config),
            driver: PlaybackDriver::new(game.into_moves(), PlaybackConfig::default()),
            orchestra_config,
            samples: 0,
        }
    }

    pub fn with_orchestra_config(mut self, config: OrchestraConfig) -> Self {
        self.orchestra_config = config;
        self.orchestra = VoiceAllocator::new().with_config(config);
        self
    }

    pub fn with_playback_config(mut self, config: PlaybackConfig) -> Self {
        let moves = std::mem::take(&mut self.driver).into_moves();
        self.driver = PlaybackDriver::new(moves, config);
        self
    }

    /// Swaps in another game: the current orchestra is silenced and playback
    /// restarts from the first move of `game`.
    pub fn load(&mut self, game: Game) {
        let config = *self.driver.config();
        info!("loading game with {} moves", game.len());
        self.orchestra.shutup();
        self.orchestra = VoiceAllocator::new().with_config(self.orchestra_config);
        self.driver = PlaybackDriver::new(game.into_moves(), config);
        self.samples = 0;
    }

    pub fn orchestra(&self) -> &VoiceAllocator<SAMPLE_RATE> {
        &self.orchestra
    }

    pub fn driver(&self) -> &PlaybackDriver {
        &self.driver
    }

    pub fn current_move(&self) -> Option<&Move> {
        self.driver.current_move()
    }

    /// Virtual time since the game started.
    pub fn elapsed_ms(&self) -> f64 {
        self.samples as f64 * 1000.0 / SAMPLE_RATE as f64
    }

    pub fn progress(&self) -> f64 {
        self.driver.progress(self.elapsed_ms())
    }

    pub fn is_finished(&self) -> bool {
        self.driver.is_finished()
    }

    fn samples_per_tick(&self) -> u64 {
        let rate = self.driver.config().control_rate_hz;
        ((SAMPLE_RATE as f64 / rate).round() as u64).max(1)
    }

    fn tick(&mut self) {
        let now = self.elapsed_ms();
        match self.driver.tick(now, &mut self.orchestra) {
            Ok(TickOutcome::Silenced) => info!("performance over after {now:.0} ms"),
            Ok(_) => {}
            Err(err) => {
                error!("stopping playback: {err}");
                self.orchestra.shutup();
                self.driver.stop();
            }
        }
    }
}

impl<const SAMPLE_RATE: u32> Signal for Performance<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        if !self.driver.is_finished() && self.samples % self.samples_per_tick() == 0 {
            self.tick();
        }
        self.samples += 1;
        self.orchestra.next_sample()
    }
}
