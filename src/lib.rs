//! Bubble Drift - gradient bubbles drifting and bumping inside a viewport
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bubbles, collisions, viewport bounds)
//! - `driver`: Per-frame orchestration of step + render with a stop hook
//! - `renderer`: Render callback seam, gradient model and WebGPU pipeline
//! - `config`: Data-driven simulation tuning

pub mod config;
pub mod driver;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{CollisionConfig, SimConfig, SpeedRange};
pub use driver::{Driver, FrameOutcome, StopHandle};
pub use error::{ConfigError, RenderError};

/// Default simulation constants
pub mod consts {
    /// Slowest a bubble may drift (pixels per tick)
    pub const MIN_SPEED: f32 = 5.0;
    /// Fastest a bubble may drift (pixels per tick)
    pub const MAX_SPEED: f32 = 10.0;

    /// Uniform bubble radius (pixels)
    pub const BUBBLE_RADIUS: f32 = 80.0;
    /// Number of bubbles in a run
    pub const BUBBLE_COUNT: usize = 30;

    /// Magnitude of the repulsive impulse applied on contact
    pub const COLLISION_FORCE: f32 = 0.3;
    /// Velocity scale applied after a contact or wall bounce (1.0 = none)
    pub const COLLISION_DAMPING: f32 = 1.0;

    /// Nominal host refresh rate, used by the headless driver
    pub const FRAME_RATE_HZ: u32 = 60;
}
