//! Tunable parameters for every stage of the simulation.
//!
//! Defaults come from [`crate::constants`]. Hosts override individual fields
//! (or parse a few presets from strings) and hand the structs to the scene.

use crate::constants::*;
use crate::noise::WindField;
use rand::Rng;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown breeze preset `{0}` (expected calm, gentle, breezy or gusty)")]
    UnknownBreeze(String),
    #[error("unknown wind field `{0}` (expected noise or sines)")]
    UnknownWindField(String),
    #[error("invalid number `{value}` for {key}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Closed interval sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn from_pair(pair: (f32, f32)) -> Self {
        Self::new(pair.0, pair.1)
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        self.min + (self.max - self.min) * rng.gen::<f32>()
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Global wind strength preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreezeIntensity {
    Calm,
    #[default]
    Gentle,
    Breezy,
    Gusty,
}

impl BreezeIntensity {
    pub fn multiplier(self) -> f32 {
        match self {
            Self::Calm => 0.5,
            Self::Gentle => 1.0,
            Self::Breezy => 1.5,
            Self::Gusty => 2.2,
        }
    }
}

impl FromStr for BreezeIntensity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calm" => Ok(Self::Calm),
            "gentle" => Ok(Self::Gentle),
            "breezy" => Ok(Self::Breezy),
            "gusty" => Ok(Self::Gusty),
            other => Err(ConfigError::UnknownBreeze(other.to_string())),
        }
    }
}

/// Parse a numeric config value, naming the key in the error.
pub fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerConfig {
    /// Pixels between candidate blades before width scaling.
    pub density_px: f32,
    pub opacity: f32,
    pub scale: f32,
    pub anchor_offset_px: f32,
}

/// Ranges for the per-blade physical constants drawn at generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsRanges {
    pub stiffness: Span,
    pub damping: Span,
    pub gust_decay: Span,
    pub boost_decay: Span,
    pub time_scale: Span,
    pub gust_jitter: Span,
    pub variability: Span,
    pub sway_freq_hz: Span,
    pub sway_amp_rad: Span,
}

impl Default for PhysicsRanges {
    fn default() -> Self {
        Self {
            stiffness: Span::from_pair(STIFFNESS),
            damping: Span::from_pair(DAMPING),
            gust_decay: Span::from_pair(GUST_DECAY),
            boost_decay: Span::from_pair(BOOST_DECAY),
            time_scale: Span::from_pair(TIME_SCALE),
            gust_jitter: Span::from_pair(GUST_JITTER),
            variability: Span::from_pair(VARIABILITY),
            sway_freq_hz: Span::from_pair(SWAY_FREQ_HZ),
            sway_amp_rad: Span::from_pair(SWAY_AMP_RAD),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub layers: [LayerConfig; 3],
    pub skip_probability: f64,
    pub jitter_fraction: f32,
    /// Short / medium / tall weights; need not sum to one.
    pub size_weights: [f32; 3],
    pub short_scale: Span,
    pub medium_scale: Span,
    pub tall_scale: Span,
    pub pod_scale: Span,
    pub cluster_scale: Span,
    pub base_scale: Span,
    pub lean: Span,
    pub cluster_lean: f32,
    pub bud_target_ratio: f32,
    pub bud_correction_gain: f32,
    pub cluster_count: (usize, usize),
    pub cluster_radius: Span,
    pub base_count: (usize, usize),
    pub base_radius: Span,
    pub reference_width: f32,
    pub max_width_factor: f32,
    pub blade_height_px: f32,
    pub blade_width_px: f32,
    pub cohort_width_px: f32,
    pub physics: PhysicsRanges,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let layer = |i: usize| LayerConfig {
            density_px: LAYER_DENSITY_PX[i],
            opacity: LAYER_OPACITY[i],
            scale: LAYER_SCALE[i],
            anchor_offset_px: LAYER_ANCHOR_OFFSET_PX[i],
        };
        Self {
            layers: [layer(0), layer(1), layer(2)],
            skip_probability: SKIP_PROBABILITY,
            jitter_fraction: X_JITTER_FRACTION,
            size_weights: SIZE_WEIGHTS,
            short_scale: Span::from_pair(SHORT_SCALE),
            medium_scale: Span::from_pair(MEDIUM_SCALE),
            tall_scale: Span::from_pair(TALL_SCALE),
            pod_scale: Span::new(POD_LEAF_MIN, POD_LEAF_MAX),
            cluster_scale: Span::from_pair(CLUSTER_SCALE),
            base_scale: Span::from_pair(BASE_SCALE),
            lean: Span::from_pair(LEAN_RAD),
            cluster_lean: CLUSTER_LEAN_RAD,
            bud_target_ratio: BUD_TARGET_RATIO,
            bud_correction_gain: BUD_CORRECTION_GAIN,
            cluster_count: (CLUSTER_COUNT_MIN, CLUSTER_COUNT_MAX),
            cluster_radius: Span::from_pair(CLUSTER_RADIUS_PX),
            base_count: (BASE_COUNT_MIN, BASE_COUNT_MAX),
            base_radius: Span::from_pair(BASE_RADIUS_PX),
            reference_width: REFERENCE_WIDTH_PX,
            max_width_factor: MAX_WIDTH_FACTOR,
            blade_height_px: BLADE_BASE_HEIGHT_PX,
            blade_width_px: BLADE_BASE_WIDTH_PX,
            cohort_width_px: COHORT_WIDTH_PX,
            physics: PhysicsRanges::default(),
        }
    }
}

/// Amplitude, angular rate and phase of one global sinusoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sinusoid {
    pub amplitude: f32,
    pub rate: f32,
    pub phase: f32,
}

impl Sinusoid {
    #[inline]
    pub fn at(&self, t: f32) -> f32 {
        (t * self.rate + self.phase).sin() * self.amplitude
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindParams {
    pub base_gain: f32,
    pub breathing: Sinusoid,
    pub drift_amplitude: f32,
    pub drift_rate: f32,
    pub globals: [Sinusoid; 3],
    pub local_amplitude: f32,
    pub local_rate: f32,
    pub gradient_amplitude: f32,
    pub local_noise_amplitude: f32,
    pub local_noise_spatial: f32,
    pub local_noise_rate: f32,
    pub seed_head_attenuation: f32,
    pub field: WindField,
    pub breeze: BreezeIntensity,
}

impl Default for WindParams {
    fn default() -> Self {
        let sine = |(amplitude, rate, phase): (f32, f32, f32)| Sinusoid {
            amplitude,
            rate,
            phase,
        };
        Self {
            base_gain: WIND_BASE_GAIN,
            breathing: sine((BREATHING_AMP, BREATHING_RATE, 0.0)),
            drift_amplitude: DRIFT_AMP,
            drift_rate: DRIFT_RATE,
            globals: [
                sine(GLOBAL_SINES[0]),
                sine(GLOBAL_SINES[1]),
                sine(GLOBAL_SINES[2]),
            ],
            local_amplitude: LOCAL_SINE_AMP,
            local_rate: LOCAL_SINE_RATE,
            gradient_amplitude: GRADIENT_AMP,
            local_noise_amplitude: LOCAL_NOISE_AMP,
            local_noise_spatial: LOCAL_NOISE_SPATIAL,
            local_noise_rate: LOCAL_NOISE_RATE,
            seed_head_attenuation: SEED_HEAD_ATTENUATION,
            field: WindField::default(),
            breeze: BreezeIntensity::default(),
        }
    }
}

/// Low-pass + slew-limited passive sway.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwayParams {
    pub tau_sec: f32,
    pub max_rate: f32,
    pub wander_amplitude: f32,
    pub wander_rate: f32,
    pub max_frame_dt: f32,
}

impl Default for SwayParams {
    fn default() -> Self {
        Self {
            tau_sec: SWAY_TAU_SEC,
            max_rate: SWAY_MAX_RATE_RAD_PER_SEC,
            wander_amplitude: SWAY_WANDER_AMP,
            wander_rate: SWAY_WANDER_RATE,
            max_frame_dt: MAX_FRAME_DT_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerParams {
    pub radius: f32,
    pub max_angle: f32,
    pub ambient_blend: f32,
    /// Fraction of blade height where the pointer distance is measured.
    pub reach_height: f32,
}

impl Default for PointerParams {
    fn default() -> Self {
        Self {
            radius: POINTER_RADIUS_PX,
            max_angle: POINTER_MAX_ANGLE,
            ambient_blend: POINTER_AMBIENT_BLEND,
            reach_height: POINTER_REACH_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GustParams {
    pub sigma_fraction: f32,
    pub angle_gain: f32,
    pub boost_gain: f32,
    pub angle_max: f32,
    pub boost_max: f32,
    pub negligible: f32,
}

impl Default for GustParams {
    fn default() -> Self {
        Self {
            sigma_fraction: GRASS_GUST_SIGMA_FRACTION,
            angle_gain: GUST_ANGLE_GAIN,
            boost_gain: SWAY_BOOST_GAIN,
            angle_max: GUST_ANGLE_MAX,
            boost_max: SWAY_BOOST_MAX,
            negligible: GUST_NEGLIGIBLE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    pub cull_padding: f32,
    pub ground_overlap: f32,
    pub seed_head_height_mult: f32,
    pub seed_head_canvas_fraction: f32,
    pub fallback_alpha: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            cull_padding: CULL_PADDING_PX,
            ground_overlap: GROUND_OVERLAP_PX,
            seed_head_height_mult: SEED_HEAD_HEIGHT_MULT,
            seed_head_canvas_fraction: SEED_HEAD_CANVAS_FRACTION,
            fallback_alpha: FALLBACK_ALPHA,
        }
    }
}

/// Everything a [`crate::scene::GrassScene`] needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneConfig {
    pub field: FieldConfig,
    pub wind: WindParams,
    pub sway: SwayParams,
    pub pointer: PointerParams,
    pub gust: GustParams,
    pub render: RenderParams,
}
