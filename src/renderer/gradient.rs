//! Two-circle radial gradient used to shade bubbles
//!
//! Follows the canvas `createRadialGradient` model: colors are interpolated
//! along a cone between a small focal circle and the outer circle. The
//! bubble look puts the focal circle up and to the left of the center, which
//! reads as a highlight.

use glam::Vec2;

/// A color at a gradient offset in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: [f32; 4],
}

impl ColorStop {
    pub const fn new(offset: f32, color: [f32; 4]) -> Self {
        Self { offset, color }
    }
}

/// Highlight offset of the focal circle, as a fraction of the radius
pub const FOCAL_OFFSET: f32 = -0.3;
/// Focal circle radius, as a fraction of the radius
pub const FOCAL_RADIUS: f32 = 0.1;

/// Translucent white stops of the bubble shading
pub const BUBBLE_STOPS: [ColorStop; 5] = [
    ColorStop::new(0.0, [1.0, 1.0, 1.0, 0.6]),
    ColorStop::new(0.2, [1.0, 1.0, 1.0, 0.4]),
    ColorStop::new(0.5, [1.0, 1.0, 1.0, 0.2]),
    ColorStop::new(0.8, [1.0, 1.0, 1.0, 0.1]),
    ColorStop::new(1.0, [1.0, 1.0, 1.0, 0.15]),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    /// Sorted by offset
    pub stops: Vec<ColorStop>,
    pub focal_offset: f32,
    pub focal_radius: f32,
}

impl Default for RadialGradient {
    fn default() -> Self {
        Self::bubble()
    }
}

impl RadialGradient {
    /// The standard bubble highlight
    pub fn bubble() -> Self {
        Self {
            stops: BUBBLE_STOPS.to_vec(),
            focal_offset: FOCAL_OFFSET,
            focal_radius: FOCAL_RADIUS,
        }
    }

    /// Color at gradient parameter `t`, padded outside `[0, 1]`
    pub fn color_at(&self, t: f32) -> [f32; 4] {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0.0; 4];
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let u = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return lerp_color(a.color, b.color, u);
            }
        }
        last.color
    }

    /// Gradient parameter for `point` on a bubble at `center` with `radius`
    ///
    /// Returns `None` where no circle of the cone passes through the point.
    pub fn parameter(&self, point: Vec2, center: Vec2, radius: f32) -> Option<f32> {
        let c0 = center + Vec2::splat(self.focal_offset * radius);
        let r0 = self.focal_radius * radius;
        let d = center - c0;
        let dr = radius - r0;
        let e = point - c0;

        // |e - t*d| = r0 + t*dr, solved for the largest t with a non-negative radius
        let a = d.length_squared() - dr * dr;
        let b = e.dot(d) + r0 * dr;
        let c = e.length_squared() - r0 * r0;

        let t = if a.abs() < f32::EPSILON {
            if b.abs() < f32::EPSILON {
                return None;
            }
            c / (2.0 * b)
        } else {
            let disc = b * b - a * c;
            if disc < 0.0 {
                return None;
            }
            let root = disc.sqrt();
            let t1 = (b + root) / a;
            let t2 = (b - root) / a;
            let valid = |t: f32| r0 + t * dr >= 0.0;
            match (valid(t1), valid(t2)) {
                (true, true) => t1.max(t2),
                (true, false) => t1,
                (false, true) => t2,
                (false, false) => return None,
            }
        };
        Some(t)
    }

    /// Shaded color for `point`, transparent where the gradient is undefined
    pub fn shade(&self, point: Vec2, center: Vec2, radius: f32) -> [f32; 4] {
        match self.parameter(point, center, radius) {
            Some(t) => self.color_at(t),
            None => [0.0; 4],
        }
    }
}

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}
