use crate::constants::*;

/// Opacity for a drawable `distance` units from the camera.
///
/// Falls off as `1 - (d / (0.7 * length))^1.5`, then clamped to
/// \[`FADE_MIN_OPACITY`, `FADE_MAX_OPACITY`\] so near lines never go fully
/// opaque and far lines never vanish. Fog darkens them further on the GPU.
#[inline]
pub fn distance_opacity(distance: f32, tunnel_length: f32) -> f32 {
    let range = FADE_RANGE_FACTOR * tunnel_length;
    let falloff = (distance.abs() / range).powf(FADE_EXPONENT);
    (1.0 - falloff).clamp(FADE_MIN_OPACITY, FADE_MAX_OPACITY)
}
