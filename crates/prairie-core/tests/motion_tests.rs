// Host-side tests for the spring-damper blade model.

use glam::Vec2;
use prairie_core::constants::{DAMPING, STIFFNESS};
use prairie_core::*;

fn constants() -> BladeConstants {
    BladeConstants {
        stiffness: 0.04,
        damping: 0.9,
        gust_decay: 0.95,
        boost_decay: 0.97,
        time_scale: 1.0,
        phase: 0.3,
        cohort: 2,
        cohort_phase: 1.1,
        gust_jitter: 1.0,
        reactivity: 1.0,
        sway_freq_hz: 0.08,
        sway_phase: 0.5,
        sway_amp: 0.05,
        wander_seed: 77,
    }
}

fn blade(x: f32) -> BladeInstance {
    BladeInstance {
        x,
        base_y: 0.0,
        size: SizeClass::Medium,
        scale: 0.8,
        lean: 0.04,
        blade_sprite: "blade_green_01",
        seed_head_sprite: None,
        depth: Depth::Front,
        layer_scale: 1.0,
        opacity: 1.0,
        constants: constants(),
        state: BladeState::default(),
    }
}

/// Run a unit step response; returns the trajectory.
fn step_response(stiffness: f32, damping: f32, frames: usize) -> Vec<f32> {
    let (mut a, mut v) = (0.0, 0.0);
    (0..frames)
        .map(|_| {
            (a, v) = spring_step(a, v, 1.0, stiffness, damping);
            a
        })
        .collect()
}

#[test]
fn spring_converges_for_every_range_corner() {
    for k in [STIFFNESS.0, STIFFNESS.1] {
        for d in [DAMPING.0, DAMPING.1] {
            let path = step_response(k, d, 400);
            let settled = path.iter().rposition(|a| (a - 1.0).abs() > 0.01);
            let settled = settled.map_or(0, |i| i + 1);
            assert!(settled < 200, "k={k} d={d} settled after {settled} frames");
        }
    }
}

#[test]
fn spring_overshoots_shrink() {
    let path = step_response(0.04, 0.9, 400);
    let peaks: Vec<f32> = path
        .windows(3)
        .filter(|w| w[1] > 1.0 && w[1] >= w[0] && w[1] >= w[2])
        .map(|w| w[1] - 1.0)
        .collect();
    assert!(peaks.len() >= 2, "expected an underdamped response");
    assert!(peaks[0] < 1.0);
    assert!(peaks[1] < peaks[0]);
}

#[test]
fn slew_never_exceeds_max_rate() {
    let sway = SwayParams::default();
    let mut value = 0.0f32;
    for i in 0..2_000 {
        let target = if (i / 50) % 2 == 0 { 1.5 } else { -1.5 };
        let raw_dt = [0.016, 0.033, 0.2, 1.0][i % 4];
        let dt = clamp_dt(raw_dt, sway.max_frame_dt);
        let next = slew_low_pass(value, target, dt, sway.tau_sec, sway.max_rate);
        assert!((next - value).abs() <= sway.max_rate * dt + 1e-6);
        value = next;
    }
}

#[test]
fn slew_approaches_target() {
    let mut value = 0.0;
    for _ in 0..600 {
        value = slew_low_pass(value, 0.1, 1.0 / 60.0, 0.18, 0.5);
    }
    assert!((value - 0.1).abs() < 1e-3);
}

#[test]
fn passive_sway_is_bounded_by_amplitude() {
    let sway = SwayParams::default();
    let c = constants();
    for i in 0..5_000 {
        let v = passive_sway_target(&sway, &c, i as f32 * 0.05);
        assert!(v.abs() <= c.sway_amp + 1e-6);
    }
}

#[test]
fn wind_effect_is_bounded() {
    let wind = WindParams::default();
    let c = constants();
    let bound = (wind.breathing.amplitude
        + wind.drift_amplitude
        + wind.globals.iter().map(|s| s.amplitude.abs()).sum::<f32>()
        + wind.field.max_amplitude()
        + wind.local_amplitude
        + wind.gradient_amplitude * 0.5
        + wind.local_noise_amplitude)
        * wind.breeze.multiplier()
        + 1e-5;
    for i in 0..3_000 {
        let x = (i % 100) as f32 * 12.0;
        let w = wind_effect(&wind, x, 1200.0, i as f32 * 0.1, &c, false, 0.0);
        assert!(w.abs() <= bound, "wind {w} exceeds {bound}");
    }
}

#[test]
fn seed_heads_feel_half_the_wind() {
    let wind = WindParams::default();
    let c = constants();
    for i in 0..100 {
        let t = i as f32 * 0.7;
        let plain = wind_effect(&wind, 300.0, 1200.0, t, &c, false, 0.4);
        let pod = wind_effect(&wind, 300.0, 1200.0, t, &c, true, 0.4);
        assert!((pod - plain * wind.seed_head_attenuation).abs() < 1e-7);
    }
}

#[test]
fn breeze_scales_wind() {
    let c = constants();
    let calm = WindParams {
        breeze: BreezeIntensity::Calm,
        ..WindParams::default()
    };
    let gusty = WindParams {
        breeze: BreezeIntensity::Gusty,
        ..WindParams::default()
    };
    let a = wind_effect(&calm, 100.0, 800.0, 3.0, &c, false, 0.0);
    let b = wind_effect(&gusty, 100.0, 800.0, 3.0, &c, false, 0.0);
    let ratio = BreezeIntensity::Gusty.multiplier() / BreezeIntensity::Calm.multiplier();
    assert!((b - a * ratio).abs() < 1e-6);
}

fn context<'a>(params: &'a SceneConfig, pointer: Option<Vec2>) -> MotionContext<'a> {
    MotionContext {
        time: 1.0,
        dt: 1.0 / 60.0,
        width: 1000.0,
        ground_y: 200.0,
        blade_height_px: params.field.blade_height_px,
        pointer,
        wind: &params.wind,
        sway: &params.sway,
        pointer_params: &params.pointer,
        gust: &params.gust,
    }
}

#[test]
fn pointer_pushes_target_away() {
    let config = SceneConfig::default();
    let b = blade(500.0);
    let reach = reach_point(&b, &context(&config, None));
    let ambient = step_blade(&b, &context(&config, None)).target_angle;

    let left_of_blade = Some(reach - Vec2::new(20.0, 0.0));
    let pushed = step_blade(&b, &context(&config, left_of_blade)).target_angle;
    assert!(pushed > ambient * config.pointer.ambient_blend);
    assert!(pushed > 0.0);

    let far = Some(reach + Vec2::new(500.0, 0.0));
    let untouched = step_blade(&b, &context(&config, far)).target_angle;
    assert_eq!(untouched, ambient);
}

#[test]
fn step_decays_transients() {
    let config = SceneConfig::default();
    let mut b = blade(500.0);
    b.state.gust_angle = 0.4;
    b.state.sway_boost = 1.0;
    let next = step_blade(&b, &context(&config, None));
    assert!((next.gust_angle - 0.4 * b.constants.gust_decay).abs() < 1e-6);
    assert!((next.sway_boost - b.constants.boost_decay).abs() < 1e-6);
}

#[test]
fn rendered_rotation_sums_components() {
    let mut b = blade(0.0);
    b.state.angle = 0.1;
    b.state.passive_sway = 0.02;
    b.state.gust_angle = -0.05;
    assert!((rendered_rotation(&b) - (0.1 + 0.04 + 0.02 - 0.05)).abs() < 1e-6);
}

#[test]
fn static_state_is_lean_plus_sway_snapshot() {
    let sway = SwayParams::default();
    let mut b = blade(10.0);
    b.state.angle = 0.3;
    b.state.gust_angle = 0.2;
    b.state = static_state(&b, &sway);
    let expected = b.lean + passive_sway_target(&sway, &b.constants, 0.0);
    assert!((rendered_rotation(&b) - expected).abs() < 1e-6);
}
