//! Rendering
//!
//! The simulation only talks to [`BubbleRenderer`]. [`MeshBuilder`] turns each
//! bubble into a gradient-shaded triangle mesh; [`GpuRenderer`] feeds that
//! mesh to a WebGPU pipeline.

pub mod gradient;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use gradient::{ColorStop, RadialGradient};
pub use pipeline::{GpuRenderer, RenderState};
pub use vertex::Vertex;

use crate::error::RenderError;
use crate::sim::Viewport;

/// Tessellation defaults for one bubble
pub const DISC_SEGMENTS: u32 = 48;
pub const DISC_RINGS: u32 = 8;

/// Render callback driven once per frame
///
/// `clear` starts the frame, `draw_bubble` is called once per bubble after the
/// tick completes, and `present` finishes the frame.
pub trait BubbleRenderer {
    fn clear(&mut self, viewport: Viewport);
    fn draw_bubble(&mut self, center: Vec2, radius: f32);
    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Collects gradient-disc vertices for every bubble drawn this frame
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    pub gradient: RadialGradient,
    pub segments: u32,
    pub rings: u32,
    vertices: Vec<Vertex>,
    viewport: Viewport,
    bubbles_drawn: usize,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new(RadialGradient::bubble(), DISC_SEGMENTS, DISC_RINGS)
    }
}

impl MeshBuilder {
    pub fn new(gradient: RadialGradient, segments: u32, rings: u32) -> Self {
        Self {
            gradient,
            segments,
            rings,
            vertices: Vec::new(),
            viewport: Viewport::new(0.0, 0.0),
            bubbles_drawn: 0,
        }
    }

    /// Vertices in viewport pixel coordinates
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Viewport given to the last `clear`
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn bubbles_drawn(&self) -> usize {
        self.bubbles_drawn
    }
}

impl BubbleRenderer for MeshBuilder {
    fn clear(&mut self, viewport: Viewport) {
        self.vertices.clear();
        self.viewport = viewport;
        self.bubbles_drawn = 0;
    }

    fn draw_bubble(&mut self, center: Vec2, radius: f32) {
        self.vertices.extend(shapes::gradient_disc(
            center,
            radius,
            &self.gradient,
            self.segments,
            self.rings,
        ));
        self.bubbles_drawn += 1;
    }
}
