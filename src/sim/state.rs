//! Simulation state
//!
//! Owns the fixed set of bubbles and the seeded RNG. Nothing else mutates
//! the bubbles.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bubble::Bubble;
use super::viewport::Viewport;
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Complete simulation state (deterministic for a given seed and viewport)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Tuning in effect for this run
    pub config: SimConfig,
    /// Bubbles in iteration order (sorted by id)
    pub bubbles: Vec<Bubble>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// RNG used for spawning and degenerate-speed recovery
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Spawn `config.entity_count` bubbles inside `viewport`
    ///
    /// Fails if the config does not pass [`SimConfig::validate`].
    pub fn new(config: SimConfig, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let bubbles = (0..config.entity_count as u32)
            .map(|id| Bubble::spawn(id, viewport, config.radius, config.speed, &mut rng))
            .collect::<Vec<_>>();

        if !viewport.fits(config.radius) {
            log::warn!(
                "Viewport {}x{} is too small for radius {}, bubbles pinned to center",
                viewport.width,
                viewport.height,
                config.radius
            );
        }

        Ok(Self {
            seed,
            config,
            bubbles,
            time_ticks: 0,
            rng,
        })
    }

    /// Build a state around hand-placed bubbles (scenarios and tests)
    pub fn with_bubbles(config: SimConfig, bubbles: Vec<Bubble>, seed: u64) -> Self {
        let mut state = Self {
            seed,
            config,
            bubbles,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.normalize_order();
        state
    }

    /// Ensure bubbles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bubbles.sort_by_key(|b| b.id);
    }

    /// Mean speed across all bubbles
    pub fn mean_speed(&self) -> f32 {
        if self.bubbles.is_empty() {
            return 0.0;
        }
        self.bubbles.iter().map(Bubble::speed).sum::<f32>() / self.bubbles.len() as f32
    }
}
