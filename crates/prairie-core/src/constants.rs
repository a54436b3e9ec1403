//! Default tuning constants for the prairie animation.
//!
//! Every value here seeds a field of one of the parameter structs in
//! [`crate::params`]; nothing in the simulation reads these directly, so a
//! host can retune any of them without touching code paths.

use std::f32::consts::PI;

// ---------------------------------------------------------------------------
// Field generation
// ---------------------------------------------------------------------------

/// Density divisors (px between candidate blades) for back, mid, front.
pub const LAYER_DENSITY_PX: [f32; 3] = [11.0, 8.0, 6.5];
pub const LAYER_OPACITY: [f32; 3] = [0.55, 0.8, 1.0];
pub const LAYER_SCALE: [f32; 3] = [0.78, 0.9, 1.0];
/// Back layers sit slightly higher on the canvas to read as further away.
pub const LAYER_ANCHOR_OFFSET_PX: [f32; 3] = [-6.0, -3.0, 0.0];

pub const SKIP_PROBABILITY: f64 = 0.15;
pub const X_JITTER_FRACTION: f32 = 0.4;
/// Weights for short / medium / tall.
pub const SIZE_WEIGHTS: [f32; 3] = [0.40, 0.35, 0.25];

pub const BUD_TARGET_RATIO: f32 = 0.10;
/// How strongly the running deficit pulls the per-draw probability.
pub const BUD_CORRECTION_GAIN: f32 = 0.5;

pub const CLUSTER_COUNT_MIN: usize = 4;
pub const CLUSTER_COUNT_MAX: usize = 7;
pub const CLUSTER_RADIUS_PX: (f32, f32) = (5.0, 25.0);
pub const BASE_COUNT_MIN: usize = 2;
pub const BASE_COUNT_MAX: usize = 3;
pub const BASE_RADIUS_PX: (f32, f32) = (3.0, 8.0);

/// Viewport width at which density is not yet scaled down.
pub const REFERENCE_WIDTH_PX: f32 = 1440.0;
pub const MAX_WIDTH_FACTOR: f32 = 1.8;

/// Blade height in px at scale 1.0.
pub const BLADE_BASE_HEIGHT_PX: f32 = 72.0;
pub const BLADE_BASE_WIDTH_PX: f32 = 14.0;
pub const COHORT_WIDTH_PX: f32 = 160.0;

// Scale ranges. Seed-head blades use a strictly shorter range so the bud never
// reads as a tall blade's own foliage.
pub const SHORT_SCALE: (f32, f32) = (0.48, 0.66);
pub const MEDIUM_SCALE: (f32, f32) = (0.66, 0.86);
pub const TALL_SCALE: (f32, f32) = (0.86, 1.10);
pub const NONPOD_MAX: f32 = TALL_SCALE.1;
pub const POD_LEAF_MIN: f32 = 0.30;
pub const POD_LEAF_MAX: f32 = 0.44;
pub const CLUSTER_SCALE: (f32, f32) = (0.25, 0.60);
pub const BASE_SCALE: (f32, f32) = (0.14, 0.28);

pub const LEAN_RAD: (f32, f32) = (-0.08, 0.08);
pub const CLUSTER_LEAN_RAD: f32 = 0.12;

// Per-instance physical constants
pub const STIFFNESS: (f32, f32) = (0.025, 0.05);
pub const DAMPING: (f32, f32) = (0.86, 0.92);
pub const GUST_DECAY: (f32, f32) = (0.93, 0.965);
pub const BOOST_DECAY: (f32, f32) = (0.955, 0.98);
pub const TIME_SCALE: (f32, f32) = (0.8, 1.25);
pub const GUST_JITTER: (f32, f32) = (0.85, 1.15);
pub const VARIABILITY: (f32, f32) = (0.8, 1.2);
pub const SWAY_FREQ_HZ: (f32, f32) = (0.05, 0.12);
pub const SWAY_AMP_RAD: (f32, f32) = (0.03, 0.07);

// ---------------------------------------------------------------------------
// Wind
// ---------------------------------------------------------------------------

pub const WIND_BASE_GAIN: f32 = 6.0;
pub const BREATHING_AMP: f32 = 0.02;
pub const BREATHING_RATE: f32 = 0.15;
pub const DRIFT_AMP: f32 = 0.015;
pub const DRIFT_RATE: f32 = 0.03;
/// (amplitude, angular rate, phase) of the global sinusoids.
pub const GLOBAL_SINES: [(f32, f32, f32); 3] =
    [(0.012, 0.8, 0.0), (0.008, 1.3, 1.1), (0.004, 2.1, 2.3)];
pub const LOCAL_SINE_AMP: f32 = 0.01;
pub const LOCAL_SINE_RATE: f32 = 1.7;
pub const GRADIENT_AMP: f32 = 0.006;
pub const LOCAL_NOISE_AMP: f32 = 0.004;
pub const LOCAL_NOISE_SPATIAL: f32 = 0.01;
pub const LOCAL_NOISE_RATE: f32 = 0.4;
pub const SEED_HEAD_ATTENUATION: f32 = 0.5;

// ---------------------------------------------------------------------------
// Passive sway
// ---------------------------------------------------------------------------

pub const SWAY_TAU_SEC: f32 = 0.18;
pub const SWAY_MAX_RATE_RAD_PER_SEC: f32 = 28.0 * PI / 180.0;
pub const SWAY_WANDER_AMP: f32 = 0.6;
pub const SWAY_WANDER_RATE: f32 = 0.05;
/// Longest frame delta fed to any time-integrated filter.
pub const MAX_FRAME_DT_SEC: f32 = 0.05;

// ---------------------------------------------------------------------------
// Pointer
// ---------------------------------------------------------------------------

pub const POINTER_RADIUS_PX: f32 = 110.0;
pub const POINTER_MAX_ANGLE: f32 = 0.7;
pub const POINTER_AMBIENT_BLEND: f32 = 0.3;
pub const POINTER_REACH_HEIGHT: f32 = 0.5;

// ---------------------------------------------------------------------------
// Gusts
// ---------------------------------------------------------------------------

pub const GRASS_GUST_SIGMA_FRACTION: f32 = 0.18;
pub const GUST_ANGLE_GAIN: f32 = 0.35;
pub const SWAY_BOOST_GAIN: f32 = 0.8;
pub const GUST_ANGLE_MAX: f32 = 0.6;
pub const SWAY_BOOST_MAX: f32 = 2.0;
pub const GUST_NEGLIGIBLE: f32 = 1e-3;

/// Rocks: sigma as a fraction of width per layer; back layer is inert.
pub const ROCK_GUST_SIGMA_FRACTION: [f32; 3] = [0.0, 0.08, 0.12];
pub const ROCK_GUST_CUTOFF_SIGMAS: f32 = 3.0;
pub const ROCK_NUDGE_PX: [f32; 3] = [0.0, 2.5, 4.0];
pub const ROCK_LIFT_PX: f32 = 1.2;
pub const ROCK_GUST_DECAY: f32 = 0.9;
pub const ROCK_OFFSET_NEGLIGIBLE_PX: f32 = 0.05;
/// Largest gust displacement a rock can accumulate.
pub const ROCK_OFFSET_MAX_PX: f32 = 6.0;
/// Per-rock gust response, fixed at generation.
pub const ROCK_REACTIVITY: (f32, f32) = (0.75, 1.25);

// ---------------------------------------------------------------------------
// Ground ridge & rocks
// ---------------------------------------------------------------------------

/// Ridge path coordinate space.
pub const RIDGE_VIEWBOX: (f32, f32) = (1200.0, 80.0);
/// Fraction of a rock's height sunk below the ridge line.
pub const ROCK_SINK_FRACTION: f32 = 0.35;
pub const ROCK_BASE_HUE: f32 = 35.0;
/// Saturation / lightness (percent) per layer; back is paler.
pub const ROCK_SATURATION: [f32; 3] = [15.0, 20.0, 25.0];
pub const ROCK_LIGHTNESS: [f32; 3] = [48.0, 45.0, 42.0];
pub const ROCK_SHADOW_OFFSET_PX: (f32, f32) = (1.0, 1.5);

/// Drag physics, in pixels per frame.
pub const ROCK_GRAVITY_PX: f32 = 0.35;
pub const ROCK_FLOOR_BOUNCE: f32 = 0.45;
pub const ROCK_FLOOR_FRICTION: f32 = 0.98;
pub const ROCK_WALL_BOUNCE: f32 = 0.7;
/// Gap kept between a rock and the canvas sides; also the grab tolerance.
pub const ROCK_EDGE_MARGIN_PX: f32 = 6.0;
pub const ROCK_THROW_MAX_PX: f32 = 12.0;
/// A landed rock slower than this stops.
pub const ROCK_SETTLE_SPEED_PX: f32 = 0.5;

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

pub const CULL_PADDING_PX: f32 = 40.0;
pub const GROUND_OVERLAP_PX: f32 = 2.0;
pub const SEED_HEAD_HEIGHT_MULT: f32 = 1.6;
pub const SEED_HEAD_CANVAS_FRACTION: f32 = 0.55;
/// Alpha of the vector leaf drawn while a sprite is still loading.
pub const FALLBACK_ALPHA: f32 = 0.6;

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

pub const CAROUSEL_TRANSITION_MS: f64 = 560.0;
pub const CAROUSEL_GUST_DELAY_MS: f64 = 60.0;
pub const CAROUSEL_GUST_STRENGTH: f32 = 1.0;
/// 0 disables autoplay.
pub const CAROUSEL_AUTOPLAY_MS: f64 = 0.0;
/// Ring radius (px) the items are pushed out to.
pub const CAROUSEL_RADIUS_PX: f32 = 320.0;

pub const SWIPE_INTENT_PX: f32 = 8.0;
pub const SWIPE_TRIGGER_PX: f32 = 80.0;
pub const SWIPE_COOLDOWN_MS: f64 = 500.0;

pub const WHEEL_THRESHOLD_PX: f32 = 260.0;
pub const WHEEL_COOLDOWN_MS: f64 = 700.0;
pub const WHEEL_LINE_PX: f32 = 16.0;
