//! Pointer / touch repulsion.

use crate::params::PointerParams;
use glam::Vec2;

/// Repulsion angle for a blade whose reach point is `reach`, or `None` when
/// the pointer is outside the influence radius.
///
/// Falloff is quadratic in `(radius - d) / radius`, so it is strongest right
/// under the pointer and reaches zero smoothly at the boundary. The push is
/// horizontal, away from the pointer.
pub fn repulsion(
    reach: Vec2,
    pointer: Vec2,
    scale: f32,
    reactivity: f32,
    params: &PointerParams,
) -> Option<f32> {
    if params.radius <= 0.0 {
        return None;
    }
    let distance = reach.distance(pointer);
    if !(distance < params.radius) {
        return None;
    }
    let falloff = (params.radius - distance) / params.radius;
    let direction = if reach.x >= pointer.x { 1.0 } else { -1.0 };
    Some(direction * params.max_angle * falloff * falloff * scale * reactivity)
}

/// Target angle with the pointer blended in; the ambient target passes
/// through unchanged when there is no pointer or it is out of range.
pub fn blend_target(
    ambient: f32,
    reach: Vec2,
    pointer: Option<Vec2>,
    scale: f32,
    reactivity: f32,
    params: &PointerParams,
) -> f32 {
    match pointer.and_then(|p| repulsion(reach, p, scale, reactivity, params)) {
        Some(push) => push + ambient * params.ambient_blend,
        None => ambient,
    }
}
