//! Contact detection and response for bubbles
//!
//! Two kinds of contact: bubble against bubble (a fixed-size repulsive
//! impulse along the line of centers) and bubble against the viewport edges
//! (per-axis reflection plus a position clamp).

use glam::Vec2;

use super::viewport::Viewport;

/// Overlap between two disks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first disk's center toward the second
    pub normal: Vec2,
    /// Squared center distance
    pub distance_sq: f32,
}

/// Check whether two disks overlap or touch
///
/// Coincident centers yield a +x normal.
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let distance_sq = delta.length_squared();
    let min_distance = a_radius + b_radius;

    if distance_sq > min_distance * min_distance {
        return None;
    }

    let angle = delta.y.atan2(delta.x);
    Some(Contact {
        normal: Vec2::from_angle(angle),
        distance_sq,
    })
}

/// Impulse pushed along the contact normal
///
/// Subtract it from the first bubble's velocity and add it to the second's.
#[inline]
pub fn repulsion_impulse(contact: &Contact, force: f32) -> Vec2 {
    contact.normal * force
}

/// Which viewport edges a disk has reached or crossed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    /// Left or right edge
    pub x: bool,
    /// Top or bottom edge
    pub y: bool,
}

impl WallHit {
    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Check a disk against the viewport edges (touching counts)
pub fn wall_contact(pos: Vec2, radius: f32, viewport: Viewport) -> WallHit {
    WallHit {
        x: pos.x <= radius || pos.x >= viewport.width - radius,
        y: pos.y <= radius || pos.y >= viewport.height - radius,
    }
}

/// Reflect a disk off the edges it hit
///
/// Each hit axis has its velocity negated and scaled by `damping`, and the
/// position is clamped back inside the viewport. An axis that was not hit is
/// already inside, so the clamp leaves it alone. Returns the new `(pos, vel)`.
pub fn reflect_off_walls(
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    viewport: Viewport,
    hit: WallHit,
    damping: f32,
) -> (Vec2, Vec2) {
    if !hit.any() {
        return (pos, vel);
    }
    let mut vel = vel;
    if hit.x {
        vel.x *= -damping;
    }
    if hit.y {
        vel.y *= -damping;
    }
    (viewport.clamp_center(pos, radius), vel)
}
