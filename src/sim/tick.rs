//! Unit timestep simulation tick
//!
//! Advances every bubble once, in id order: integrate, resolve contacts
//! against every other bubble, then reflect off the viewport edges.
//!
//! Contacts are resolved from each bubble's own point of view, so every
//! overlapping pair is pushed twice per tick (once per side), and impulses
//! accumulate on velocities that earlier contacts in the same tick already
//! changed. This order-dependent approximation gives the drift its look and
//! is kept on purpose; it is not a momentum-conserving solver.

use std::ops::AddAssign;

use glam::Vec2;

use super::bubble::{Bubble, SpeedFix};
use super::collision::{circle_contact, reflect_off_walls, repulsion_impulse, wall_contact};
use super::state::SimState;
use super::viewport::Viewport;
use crate::config::CollisionConfig;

/// What happened during one or more ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Contacts resolved (each pair counts once per side)
    pub contacts: u32,
    /// Bubbles reflected off at least one edge
    pub wall_bounces: u32,
    /// Velocities rescaled back into the speed band
    pub speed_fixes: u32,
    /// Degenerate velocities replaced by a random heading
    pub redirects: u32,
}

impl TickReport {
    fn record(&mut self, fix: SpeedFix) {
        match fix {
            SpeedFix::Unchanged => {}
            SpeedFix::Clamped | SpeedFix::Boosted => self.speed_fixes += 1,
            SpeedFix::Redirected => self.redirects += 1,
        }
    }
}

impl AddAssign for TickReport {
    fn add_assign(&mut self, rhs: Self) {
        self.contacts += rhs.contacts;
        self.wall_bounces += rhs.wall_bounces;
        self.speed_fixes += rhs.speed_fixes;
        self.redirects += rhs.redirects;
    }
}

/// Advance the simulation by one tick inside `viewport`
pub fn tick(state: &mut SimState, viewport: Viewport) -> TickReport {
    let mut report = TickReport::default();
    let speed = state.config.speed;
    let collision = state.config.collision;
    let bubbles = &mut state.bubbles;
    let rng = &mut state.rng;

    for i in 0..bubbles.len() {
        bubbles[i].integrate();

        for j in 0..bubbles.len() {
            if i == j {
                continue;
            }
            let (this, other) = pair_mut(bubbles, i, j);
            if resolve_contact(this, other, collision).is_some() {
                report.contacts += 1;
                report.record(this.normalize_speed(speed, rng));
                report.record(other.normalize_speed(speed, rng));
            }
        }

        let bubble = &mut bubbles[i];
        let hit = wall_contact(bubble.pos, bubble.radius, viewport);
        if hit.any() {
            (bubble.pos, bubble.vel) = reflect_off_walls(
                bubble.pos,
                bubble.vel,
                bubble.radius,
                viewport,
                hit,
                collision.damping,
            );
            report.wall_bounces += 1;
        }
    }

    state.time_ticks += 1;
    report
}

/// Push two bubbles apart if they overlap or touch
///
/// `this` loses the impulse and `other` gains it, then both velocities are
/// scaled by the damping factor. Speeds are not renormalized here. Returns
/// the impulse applied, if any.
pub fn resolve_contact(
    this: &mut Bubble,
    other: &mut Bubble,
    collision: CollisionConfig,
) -> Option<Vec2> {
    let contact = circle_contact(this.pos, this.radius, other.pos, other.radius)?;
    let impulse = repulsion_impulse(&contact, collision.force);
    this.vel = (this.vel - impulse) * collision.damping;
    other.vel = (other.vel + impulse) * collision.damping;
    Some(impulse)
}

/// Borrow two distinct bubbles mutably
fn pair_mut(bubbles: &mut [Bubble], i: usize, j: usize) -> (&mut Bubble, &mut Bubble) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bubbles.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bubbles.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
