//! Vertex generation for the two tunnel primitives.
//!
//! The tunnel runs along the Z axis. Rings lie in the XY plane and the
//! longitudinal lines run parallel to Z at a fixed radius.

use crate::constants::LONGITUDINAL_SAMPLES;
use glam::Vec3;
use std::f32::consts::TAU;

/// Closed circle outline with `detail + 1` vertices; the last repeats the first.
pub fn ring_outline(radius: f32, detail: u32) -> Vec<Vec3> {
    (0..=detail)
        .map(|i| {
            let angle = i as f32 / detail as f32 * TAU;
            Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
        })
        .collect()
}

/// Axial position of every ring, evenly tiling `[-length/2, length/2]`.
pub fn ring_positions(ring_count: u32, length: f32) -> Vec<f32> {
    (0..=ring_count)
        .map(|i| i as f32 / ring_count as f32 * length - length / 2.0)
        .collect()
}

/// Points sampled along one line parallel to the axis at `angle`.
pub fn longitudinal_samples(radius: f32, angle: f32, length: f32) -> Vec<Vec3> {
    let (sin, cos) = angle.sin_cos();
    let steps = LONGITUDINAL_SAMPLES - 1;
    (0..LONGITUDINAL_SAMPLES)
        .map(|i| {
            let z = -length / 2.0 + i as f32 / steps as f32 * length;
            Vec3::new(cos * radius, sin * radius, z)
        })
        .collect()
}

/// Segment list for all longitudinal lines: each consecutive pair of
/// vertices is one segment, and no segment joins two different angles.
pub fn longitudinal_lines(radius: f32, segments: u32, length: f32) -> Vec<Vec3> {
    let per_line = (LONGITUDINAL_SAMPLES as usize - 1) * 2;
    let mut out = Vec::with_capacity(segments as usize * per_line);
    for s in 0..segments {
        let angle = s as f32 / segments as f32 * TAU;
        let samples = longitudinal_samples(radius, angle, length);
        for pair in samples.windows(2) {
            out.push(pair[0]);
            out.push(pair[1]);
        }
    }
    out
}
