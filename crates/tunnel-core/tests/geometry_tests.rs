// Host-side tests for the vertex generators.

use tunnel_core::geometry::*;
use tunnel_core::LONGITUDINAL_SAMPLES;

#[test]
fn ring_outline_is_closed_circle_at_radius() {
    let ring = ring_outline(10.0, 256);
    assert_eq!(ring.len(), 257);
    let first = ring[0];
    let last = ring[ring.len() - 1];
    assert!((first - last).length() < 1e-3, "ring should close on itself");
    for v in &ring {
        assert!((v.truncate().length() - 10.0).abs() < 1e-3);
        assert_eq!(v.z, 0.0);
    }
}

#[test]
fn ring_outline_starts_on_positive_x() {
    let ring = ring_outline(3.0, 4);
    assert!((ring[0].x - 3.0).abs() < 1e-6);
    assert!(ring[0].y.abs() < 1e-6);
    // quarter turn
    assert!(ring[1].x.abs() < 1e-5);
    assert!((ring[1].y - 3.0).abs() < 1e-5);
}

#[test]
fn ring_positions_tile_the_length_centered_on_zero() {
    let z = ring_positions(60, 50.0);
    assert_eq!(z.len(), 61);
    assert!((z[0] + 25.0).abs() < 1e-5);
    assert!((z[60] - 25.0).abs() < 1e-4);
    assert!((z[30]).abs() < 1e-4);
    for w in z.windows(2) {
        assert!((w[1] - w[0] - 50.0 / 60.0).abs() < 1e-4);
    }
}

#[test]
fn ring_positions_stay_within_half_length_for_various_counts() {
    for count in [1u32, 2, 7, 60, 333] {
        for length in [1.0f32, 50.0, 1234.5] {
            let z = ring_positions(count, length);
            assert_eq!(z.len(), count as usize + 1);
            let half = length / 2.0;
            let eps = length * 1e-5;
            for p in z {
                assert!(p >= -half - eps && p <= half + eps, "{p} outside ±{half}");
            }
        }
    }
}

#[test]
fn longitudinal_samples_span_the_axis() {
    let samples = longitudinal_samples(10.0, 0.0, 50.0);
    assert_eq!(samples.len(), LONGITUDINAL_SAMPLES as usize);
    assert!((samples[0].z + 25.0).abs() < 1e-5);
    assert!((samples[samples.len() - 1].z - 25.0).abs() < 1e-4);
    for s in &samples {
        assert!((s.x - 10.0).abs() < 1e-5);
        assert!(s.y.abs() < 1e-5);
    }
}

#[test]
fn longitudinal_lines_never_join_two_angles() {
    let verts = longitudinal_lines(10.0, 72, 50.0);
    let per_line = (LONGITUDINAL_SAMPLES as usize - 1) * 2;
    assert_eq!(verts.len(), 72 * per_line);
    assert_eq!(verts.len() % 2, 0);
    for pair in verts.chunks(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5);
        assert!(b.z > a.z, "segments run toward +z");
        assert!((a.truncate().length() - 10.0).abs() < 1e-3);
    }
}
