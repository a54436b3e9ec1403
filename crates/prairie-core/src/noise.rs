//! Deterministic 1D value noise and the wind field built on it.
//!
//! Everything in this module is a pure function of its arguments so that a
//! static (reduced-motion) frame and the unit tests see exactly the values the
//! animated loop would.

/// Integer avalanche hash (Wang-style).
#[inline]
fn hash(n: u32) -> u32 {
    let mut n = (n ^ 61) ^ (n >> 16);
    n = n.wrapping_add(n << 3);
    n ^= n >> 4;
    n = n.wrapping_mul(0x27d4_eb2d);
    n ^ (n >> 15)
}

/// Lattice value in [-1, 1].
#[inline]
fn lattice(n: i32) -> f32 {
    let h = hash(n as u32) & 0x7fff_ffff;
    (h as f64 / 0x7fff_ffff as f64 * 2.0 - 1.0) as f32
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Smooth 1D value noise in [-1, 1].
///
/// Lattice values are hashed from `floor(x) + seed * 1000` and blended with
/// [`smoothstep`], so the curve has no kinks at integer boundaries.
pub fn value_noise_1d(x: f32, seed: i32) -> f32 {
    let fx = x.floor();
    let frac = x - fx;
    let cell = (fx as i32).wrapping_add(seed.wrapping_mul(1000));
    let v0 = lattice(cell);
    let v1 = lattice(cell.wrapping_add(1));
    let t = smoothstep(frac);
    (v0 + (v1 - v0) * t).clamp(-1.0, 1.0)
}

/// One octave of the wind field: `noise(x * spatial + t * temporal, seed) * amplitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    pub spatial: f32,
    pub temporal: f32,
    pub seed: i32,
    pub amplitude: f32,
}

impl Octave {
    #[inline]
    pub fn sample(&self, x: f32, t: f32) -> f32 {
        value_noise_1d(x * self.spatial + t * self.temporal, self.seed) * self.amplitude
    }
}

/// Which field shape feeds the per-blade wind term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindFieldKind {
    #[default]
    Noise,
    /// Two travelling sines; cheaper and more regular.
    Sines,
}

impl std::str::FromStr for WindFieldKind {
    type Err = crate::params::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noise" => Ok(Self::Noise),
            "sines" | "sine" => Ok(Self::Sines),
            other => Err(crate::params::ConfigError::UnknownWindField(other.to_string())),
        }
    }
}

/// Spatiotemporal wind field: two noise octaves plus a cohort phase sinusoid.
#[derive(Clone, Debug, PartialEq)]
pub struct WindField {
    pub kind: WindFieldKind,
    pub octaves: [Octave; 2],
    pub cohort_amplitude: f32,
    pub cohort_rate: f32,
}

impl Default for WindField {
    fn default() -> Self {
        Self {
            kind: WindFieldKind::Noise,
            octaves: [
                Octave {
                    spatial: 0.003,
                    temporal: -0.15,
                    seed: 42,
                    amplitude: 0.005,
                },
                Octave {
                    spatial: 0.007,
                    temporal: 0.08,
                    seed: 137,
                    amplitude: 0.003,
                },
            ],
            cohort_amplitude: 0.001,
            cohort_rate: 0.1,
        }
    }
}

impl WindField {
    pub fn sample(&self, x: f32, t: f32, cohort_phase: f32) -> f32 {
        match self.kind {
            WindFieldKind::Noise => {
                let octaves: f32 = self.octaves.iter().map(|o| o.sample(x, t)).sum();
                octaves + (cohort_phase + t * self.cohort_rate).sin() * self.cohort_amplitude
            }
            WindFieldKind::Sines => sample_wind_field_sines(x, t, cohort_phase, 0.0),
        }
    }

    /// Upper bound on `|sample|` for any input.
    pub fn max_amplitude(&self) -> f32 {
        match self.kind {
            WindFieldKind::Noise => {
                self.octaves.iter().map(|o| o.amplitude.abs()).sum::<f32>()
                    + self.cohort_amplitude.abs()
            }
            WindFieldKind::Sines => SINES_AMPLITUDE.0 + SINES_AMPLITUDE.1,
        }
    }
}

/// Default wind field sample, roughly within ±0.009.
pub fn sample_wind_field(x: f32, t: f32, cohort_phase: f32) -> f32 {
    let octave1 = value_noise_1d(x * 0.003 - t * 0.15, 42) * 0.005;
    let octave2 = value_noise_1d(x * 0.007 + t * 0.08, 137) * 0.003;
    let cohort = (cohort_phase + t * 0.1).sin() * 0.001;
    octave1 + octave2 + cohort
}

const SINES_AMPLITUDE: (f32, f32) = (0.006, 0.004);

/// Sine-only alternative to [`sample_wind_field`].
pub fn sample_wind_field_sines(x: f32, t: f32, cohort_phase: f32, seed_phase: f32) -> f32 {
    let a = (x * 0.012 - t * 0.22 + cohort_phase).sin() * SINES_AMPLITUDE.0;
    let b = (x * 0.025 + t * 0.35 + seed_phase).sin() * SINES_AMPLITUDE.1;
    a + b
}
