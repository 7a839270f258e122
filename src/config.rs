//! Simulation configuration
//!
//! Read from LocalStorage on the web and from a JSON file natively.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Allowed band for a bubble's speed (pixels per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min: MIN_SPEED,
            max: MAX_SPEED,
        }
    }
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `speed` lies inside the band (inclusive)
    #[inline]
    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min && speed <= self.max
    }
}

/// Contact response tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Impulse magnitude pushed along the contact axis
    pub force: f32,
    /// Velocity scale applied after contacts and wall bounces
    pub damping: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            force: COLLISION_FORCE,
            damping: COLLISION_DAMPING,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub speed: SpeedRange,
    /// Uniform bubble radius (pixels)
    pub radius: f32,
    pub collision: CollisionConfig,
    /// Size of the fixed bubble set
    pub entity_count: usize,
    /// Run seed; `None` lets the host pick one (clock time)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed: SpeedRange::default(),
            radius: BUBBLE_RADIUS,
            collision: CollisionConfig::default(),
            entity_count: BUBBLE_COUNT,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let SpeedRange { min, max } = self.speed;
        for bound in [min, max] {
            if !bound.is_finite() || bound < 0.0 {
                return Err(ConfigError::InvalidSpeed(bound));
            }
        }
        if min > max {
            return Err(ConfigError::InvertedSpeedRange { min, max });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !self.collision.force.is_finite() {
            return Err(ConfigError::InvalidForce(self.collision.force));
        }
        let damping = self.collision.damping;
        if !damping.is_finite() || damping < 0.0 {
            return Err(ConfigError::InvalidDamping(damping));
        }
        if self.entity_count == 0 {
            return Err(ConfigError::EmptyScene);
        }
        Ok(())
    }

    /// Read a JSON config file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "bubble_drift_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} storage natively, using defaults", Self::STORAGE_KEY);
        Self::default()
    }
}
