//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::gradient::RadialGradient;
use super::vertex::Vertex;

/// Generate vertices for a disc shaded by a radial gradient
///
/// The disc is cut into `rings` concentric bands of `segments` slices each;
/// every vertex takes its color from the gradient at its position.
pub fn gradient_disc(
    center: Vec2,
    radius: f32,
    gradient: &RadialGradient,
    segments: u32,
    rings: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let rings = rings.max(1);
    let mut vertices = Vec::with_capacity(disc_vertex_count(segments, rings));

    let point = |ring: u32, i: u32| -> Vec2 {
        let r = radius * ring as f32 / rings as f32;
        let theta = (i % segments) as f32 / segments as f32 * 2.0 * PI;
        center + Vec2::new(r * theta.cos(), r * theta.sin())
    };
    let vertex = |p: Vec2| {
        let color = gradient.shade(p, center, radius);
        Vertex::new(p.x, p.y, color)
    };

    let center_vertex = vertex(center);
    for i in 0..segments {
        // Center fan
        vertices.push(center_vertex);
        vertices.push(vertex(point(1, i)));
        vertices.push(vertex(point(1, i + 1)));
    }

    for ring in 1..rings {
        for i in 0..segments {
            let inner1 = vertex(point(ring, i));
            let outer1 = vertex(point(ring + 1, i));
            let inner2 = vertex(point(ring, i + 1));
            let outer2 = vertex(point(ring + 1, i + 1));

            // Two triangles per segment
            vertices.push(inner1);
            vertices.push(outer1);
            vertices.push(inner2);

            vertices.push(inner2);
            vertices.push(outer1);
            vertices.push(outer2);
        }
    }

    vertices
}

/// Number of vertices [`gradient_disc`] emits
pub fn disc_vertex_count(segments: u32, rings: u32) -> usize {
    let segments = segments.max(3) as usize;
    let rings = rings.max(1) as usize;
    segments * 3 + (rings - 1) * segments * 6
}
