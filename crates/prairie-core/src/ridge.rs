//! Ground ridge geometry.
//!
//! The ridge is six cubic Bézier segments in a 1200×80 box. Rocks are
//! seated on it and the rock canvas draws it, both through
//! [`ridge_height_at`].

use crate::constants::RIDGE_VIEWBOX;
use glam::Vec2;

pub const RIDGE_START: Vec2 = Vec2::new(0.0, 55.0);

/// `(control 1, control 2, end)` per segment, in view-box units.
pub const RIDGE_SEGMENTS: [[Vec2; 3]; 6] = [
    [Vec2::new(80.0, 35.0), Vec2::new(120.0, 25.0), Vec2::new(200.0, 45.0)],
    [Vec2::new(280.0, 65.0), Vec2::new(320.0, 20.0), Vec2::new(400.0, 35.0)],
    [Vec2::new(480.0, 50.0), Vec2::new(520.0, 15.0), Vec2::new(600.0, 40.0)],
    [Vec2::new(680.0, 65.0), Vec2::new(720.0, 25.0), Vec2::new(800.0, 30.0)],
    [Vec2::new(880.0, 35.0), Vec2::new(920.0, 55.0), Vec2::new(1000.0, 25.0)],
    [Vec2::new(1080.0, 10.0), Vec2::new(1140.0, 35.0), Vec2::new(1200.0, 40.0)],
];

const BISECT_STEPS: usize = 24;

#[inline]
fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Ridge y (view-box units, down is positive) at normalized x in `[0, 1]`.
/// Out-of-range input is clamped.
pub fn ridge_height_at(nx: f32) -> f32 {
    let nx = if nx.is_finite() { nx.clamp(0.0, 1.0) } else { 0.0 };
    let x = nx * RIDGE_VIEWBOX.0;

    let mut start = RIDGE_START;
    for [c1, c2, end] in RIDGE_SEGMENTS {
        if x <= end.x {
            // Control points are x-monotone, so x(t) is too.
            let (mut lo, mut hi) = (0.0f32, 1.0f32);
            for _ in 0..BISECT_STEPS {
                let mid = 0.5 * (lo + hi);
                if cubic(start, c1, c2, end, mid).x < x {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            return cubic(start, c1, c2, end, 0.5 * (lo + hi)).y;
        }
        start = end;
    }
    start.y
}

/// Ridge y in canvas pixels for a canvas of `height`.
#[inline]
pub fn ridge_y_px(nx: f32, height: f32) -> f32 {
    ridge_height_at(nx) / RIDGE_VIEWBOX.1 * height
}

/// Start point and segments scaled to a `width × height` canvas.
pub fn ridge_path(width: f32, height: f32) -> (Vec2, [[Vec2; 3]; 6]) {
    let k = Vec2::new(width / RIDGE_VIEWBOX.0, height / RIDGE_VIEWBOX.1);
    let mut segments = RIDGE_SEGMENTS;
    for seg in segments.iter_mut() {
        for p in seg.iter_mut() {
            *p *= k;
        }
    }
    (RIDGE_START * k, segments)
}
