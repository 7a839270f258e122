//! Viewport bounds and the provider seam
//!
//! The host owns the viewport and may resize it at any time; the simulation
//! samples it once at the start of every tick.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangular drawing area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a disk of `radius` fits along both axes
    pub fn fits(&self, radius: f32) -> bool {
        self.width > 2.0 * radius && self.height > 2.0 * radius
    }

    /// Clamp a disk center so the disk stays inside the viewport
    #[inline]
    pub fn clamp_center(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, self.width, radius),
            clamp_axis(pos.y, self.height, radius),
        )
    }
}

/// Clamp one coordinate to `[radius, extent - radius]`.
///
/// An axis too short to hold the disk pins it to the middle.
#[inline]
pub fn clamp_axis(value: f32, extent: f32, radius: f32) -> f32 {
    if extent < 2.0 * radius {
        extent * 0.5
    } else {
        value.clamp(radius, extent - radius)
    }
}

/// Anything the driver can sample the current viewport from
pub trait ViewportProvider {
    fn viewport(&self) -> Viewport;
}

impl ViewportProvider for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

/// Written by the host resize handler, read by the driver
impl ViewportProvider for Cell<Viewport> {
    fn viewport(&self) -> Viewport {
        self.get()
    }
}

impl<T: ViewportProvider + ?Sized> ViewportProvider for Rc<T> {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}
