//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Unit timestep only
//! - Seeded RNG only
//! - Stable iteration order (by bubble ID)
//! - No rendering or platform dependencies

pub mod bubble;
pub mod collision;
pub mod state;
pub mod tick;
pub mod trace;
pub mod viewport;

pub use bubble::{Bubble, SpeedFix, random_heading};
pub use collision::{Contact, WallHit, circle_contact, reflect_off_walls, wall_contact};
pub use state::SimState;
pub use tick::{TickReport, resolve_contact, tick};
pub use trace::{Trace, TraceFrame};
pub use viewport::{Viewport, ViewportProvider, clamp_axis};
