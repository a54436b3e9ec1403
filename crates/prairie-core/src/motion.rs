//! Spring-damper blade motion.
//!
//! The per-frame update is a pure function of the blade's generated
//! constants, its previous dynamic state and the frame inputs, so it can be
//! exercised without any canvas.

use crate::field::{BladeConstants, BladeInstance, BladeState};
use crate::noise::value_noise_1d;
use crate::params::{GustParams, PointerParams, SwayParams, WindParams};
use crate::pointer;
use glam::Vec2;
use std::f32::consts::TAU;

/// Inputs shared by every blade for one frame.
#[derive(Clone, Copy, Debug)]
pub struct MotionContext<'a> {
    /// Accumulated scene time in seconds.
    pub time: f32,
    /// Clamped frame delta in seconds.
    pub dt: f32,
    pub width: f32,
    /// Canvas y of the ground line.
    pub ground_y: f32,
    pub blade_height_px: f32,
    pub pointer: Option<Vec2>,
    pub wind: &'a WindParams,
    pub sway: &'a SwayParams,
    pub pointer_params: &'a PointerParams,
    pub gust: &'a GustParams,
}

/// Clamp a measured frame delta so a backgrounded tab cannot produce one
/// huge catch-up step.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, max_dt.max(0.0))
    } else {
        0.0
    }
}

/// Ambient wind contribution (before `base_gain`).
pub fn wind_effect(
    wind: &WindParams,
    x: f32,
    width: f32,
    t: f32,
    c: &BladeConstants,
    seed_head: bool,
    sway_boost: f32,
) -> f32 {
    let breathing = wind.breathing.at(t);
    let drift = value_noise_1d(t * wind.drift_rate, 7) * wind.drift_amplitude;
    let globals: f32 = wind.globals.iter().map(|s| s.at(t)).sum();
    let field = wind.field.sample(x, t, c.cohort_phase);
    let local = (t * c.time_scale * wind.local_rate + c.phase).sin() * wind.local_amplitude;
    let gradient = if width > 0.0 {
        (x / width - 0.5) * wind.gradient_amplitude
    } else {
        0.0
    };
    let local_noise = value_noise_1d(
        x * wind.local_noise_spatial + t * wind.local_noise_rate,
        c.wander_seed,
    ) * wind.local_noise_amplitude;

    let mut sum = breathing + drift + globals + field + local + gradient + local_noise;
    sum *= wind.breeze.multiplier() * (1.0 + sway_boost.max(0.0));
    if seed_head {
        sum *= wind.seed_head_attenuation;
    }
    sum
}

/// One fixed tick of the damped spring; returns `(angle, velocity)`.
///
/// Damping is applied after acceleration every tick, so with `damping < 1`
/// the step is stable regardless of frame timing.
#[inline]
pub fn spring_step(angle: f32, velocity: f32, target: f32, stiffness: f32, damping: f32) -> (f32, f32) {
    let mut v = velocity + stiffness * (target - angle);
    v *= damping;
    (angle + v, v)
}

/// First-order low-pass toward `target` with a hard slew limit.
///
/// The change per call never exceeds `max_rate * dt`.
#[inline]
pub fn slew_low_pass(prev: f32, target: f32, dt: f32, tau: f32, max_rate: f32) -> f32 {
    if dt <= 0.0 {
        return prev;
    }
    let alpha = if tau > 0.0 { 1.0 - (-dt / tau).exp() } else { 1.0 };
    let desired = (target - prev) * alpha;
    let limit = max_rate.max(0.0) * dt;
    prev + desired.clamp(-limit, limit)
}

/// Unfiltered passive-sway signal for a blade at time `t`.
pub fn passive_sway_target(sway: &SwayParams, c: &BladeConstants, t: f32) -> f32 {
    let wander = value_noise_1d(
        t * sway.wander_rate + c.wander_seed as f32 * 0.37,
        c.wander_seed,
    ) * sway.wander_amplitude;
    c.sway_amp * (TAU * c.sway_freq_hz * t + c.sway_phase + wander).sin()
}

/// Geometric decay that snaps to zero below `negligible`.
#[inline]
pub fn decay(value: f32, rate: f32, negligible: f32) -> f32 {
    let next = value * rate;
    if next.abs() < negligible {
        0.0
    } else {
        next
    }
}

/// Mid-height point used for the pointer distance test.
#[inline]
pub fn reach_point(blade: &BladeInstance, ctx: &MotionContext<'_>) -> Vec2 {
    let height = blade.height_px(ctx.blade_height_px);
    Vec2::new(
        blade.x,
        ctx.ground_y + blade.base_y - height * ctx.pointer_params.reach_height,
    )
}

/// Advance one blade by one frame.
pub fn step_blade(blade: &BladeInstance, ctx: &MotionContext<'_>) -> BladeState {
    let c = &blade.constants;
    let prev = blade.state;
    let gust_angle = decay(prev.gust_angle, c.gust_decay, ctx.gust.negligible);
    let sway_boost = decay(prev.sway_boost, c.boost_decay, ctx.gust.negligible);

    let wind = wind_effect(
        ctx.wind,
        blade.x,
        ctx.width,
        ctx.time,
        c,
        blade.has_seed_head(),
        sway_boost,
    );
    let ambient = wind * ctx.wind.base_gain + gust_angle;
    let target = pointer::blend_target(
        ambient,
        reach_point(blade, ctx),
        ctx.pointer,
        blade.scale * blade.layer_scale,
        c.reactivity,
        ctx.pointer_params,
    );

    let (angle, velocity) = spring_step(prev.angle, prev.velocity, target, c.stiffness, c.damping);

    let passive_sway = slew_low_pass(
        prev.passive_sway,
        passive_sway_target(ctx.sway, c, ctx.time),
        clamp_dt(ctx.dt, ctx.sway.max_frame_dt),
        ctx.sway.tau_sec,
        ctx.sway.max_rate,
    );

    BladeState {
        angle,
        velocity,
        target_angle: target,
        gust_angle,
        sway_boost,
        passive_sway,
    }
}

/// Static snapshot at `t = 0` for reduced motion: lean plus the passive-sway
/// value, no spring or gust.
pub fn static_state(blade: &BladeInstance, sway: &SwayParams) -> BladeState {
    BladeState {
        passive_sway: passive_sway_target(sway, &blade.constants, 0.0),
        ..BladeState::default()
    }
}

/// Angle the blade is drawn at.
#[inline]
pub fn rendered_rotation(blade: &BladeInstance) -> f32 {
    let s = &blade.state;
    s.angle + blade.lean + s.passive_sway + s.gust_angle
}
