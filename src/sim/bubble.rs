//! The bubble entity
//!
//! A bubble is a disk with a position, a velocity and a fixed radius. Its
//! speed is kept inside the configured [`SpeedRange`] by [`Bubble::normalize_speed`].

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::config::SpeedRange;

/// What [`Bubble::normalize_speed`] had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedFix {
    /// Speed already inside the band
    Unchanged,
    /// Too fast, scaled down to max
    Clamped,
    /// Too slow, scaled up to min
    Boosted,
    /// Zero or non-finite velocity, replaced by a random heading at min speed
    Redirected,
}

/// A drifting bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Bubble {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
        }
    }

    /// Spawn at a random spot where the whole disk is visible, heading in a
    /// random direction at a random speed from `speed`.
    ///
    /// An axis too short to hold the disk places the bubble at its middle.
    pub fn spawn(
        id: u32,
        viewport: Viewport,
        radius: f32,
        speed: SpeedRange,
        rng: &mut impl Rng,
    ) -> Self {
        let x = spawn_axis(viewport.width, radius, rng);
        let y = spawn_axis(viewport.height, radius, rng);
        let mut bubble = Self::new(id, Vec2::new(x, y), Vec2::ZERO, radius);
        bubble.randomize_velocity(speed, rng);
        bubble
    }

    /// Pick a fresh heading and a speed uniformly from the band
    pub fn randomize_velocity(&mut self, speed: SpeedRange, rng: &mut impl Rng) {
        let magnitude = speed.min + rng.random::<f32>() * (speed.max - speed.min);
        self.vel = random_heading(rng) * magnitude;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one tick (explicit Euler, unit timestep)
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Rescale velocity so its magnitude lies in `speed`
    pub fn normalize_speed(&mut self, speed: SpeedRange, rng: &mut impl Rng) -> SpeedFix {
        let current = self.speed();

        if !current.is_finite() || (current == 0.0 && speed.min > 0.0) {
            // No direction to keep
            self.vel = random_heading(rng) * speed.min;
            log::debug!("Bubble {} had degenerate velocity, redirected", self.id);
            return SpeedFix::Redirected;
        }

        if speed.contains(current) {
            SpeedFix::Unchanged
        } else if current > speed.max {
            self.vel *= speed.max / current;
            SpeedFix::Clamped
        } else {
            self.vel *= speed.min / current;
            SpeedFix::Boosted
        }
    }
}

fn spawn_axis(extent: f32, radius: f32, rng: &mut impl Rng) -> f32 {
    let free = extent - 2.0 * radius;
    if free > 0.0 {
        radius + rng.random::<f32>() * free
    } else {
        extent * 0.5
    }
}

/// Unit vector with angle uniform in `[0, 2π)`
pub fn random_heading(rng: &mut impl Rng) -> Vec2 {
    Vec2::from_angle(rng.random::<f32>() * TAU)
}
