//! Procedural blade placement.
//!
//! [`generate_blades`] walks each depth layer at its density interval and
//! produces a fully-initialized population: placement, size class, sprite
//! names and every per-instance physical constant. Nothing about a blade is
//! lazily derived later; the per-frame update only touches [`BladeState`].

use crate::params::{FieldConfig, LayerConfig, Span};
use crate::sprites::{BLADE_SPRITES, SEED_HEAD_SPRITES};
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

/// Depth bucket; also the draw order (back first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Depth {
    Back = 0,
    Mid = 1,
    Front = 2,
}

impl Depth {
    pub const ALL: [Depth; 3] = [Depth::Back, Depth::Mid, Depth::Front];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Short,
    Medium,
    Tall,
    /// Ring blade around a seed head.
    Cluster,
    /// Very short filler right at a seed head's foot.
    Base,
}

impl SizeClass {
    pub fn is_decorative(self) -> bool {
        matches!(self, SizeClass::Cluster | SizeClass::Base)
    }
}

/// Constants drawn once per blade at generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeConstants {
    pub stiffness: f32,
    pub damping: f32,
    pub gust_decay: f32,
    pub boost_decay: f32,
    pub time_scale: f32,
    pub phase: f32,
    pub cohort: u16,
    pub cohort_phase: f32,
    pub gust_jitter: f32,
    /// Height reactivity times variability.
    pub reactivity: f32,
    pub sway_freq_hz: f32,
    pub sway_phase: f32,
    pub sway_amp: f32,
    pub wander_seed: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BladeState {
    pub angle: f32,
    pub velocity: f32,
    pub target_angle: f32,
    pub gust_angle: f32,
    pub sway_boost: f32,
    pub passive_sway: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BladeInstance {
    pub x: f32,
    /// Offset from the canvas ground line (negative is higher).
    pub base_y: f32,
    pub size: SizeClass,
    pub scale: f32,
    pub lean: f32,
    pub blade_sprite: &'static str,
    pub seed_head_sprite: Option<&'static str>,
    pub depth: Depth,
    /// Layer size multiplier, applied on top of `scale` when drawing.
    pub layer_scale: f32,
    pub opacity: f32,
    pub constants: BladeConstants,
    pub state: BladeState,
}

impl BladeInstance {
    #[inline]
    pub fn has_seed_head(&self) -> bool {
        self.seed_head_sprite.is_some()
    }

    #[inline]
    pub fn height_px(&self, base_height: f32) -> f32 {
        base_height * self.scale * self.layer_scale
    }
}

/// Density interval for a layer at `width`, stretched on wide viewports.
pub fn effective_density(width: f32, layer: &LayerConfig, config: &FieldConfig) -> f32 {
    let factor = if config.reference_width > 0.0 {
        (width / config.reference_width).clamp(1.0, config.max_width_factor.max(1.0))
    } else {
        1.0
    };
    (layer.density_px * factor).max(1.0)
}

/// Number of candidate slots a layer gets before the random skip.
pub fn candidate_count(width: f32, layer: &LayerConfig, config: &FieldConfig) -> usize {
    let width = sanitize_width(width);
    if width <= 0.0 {
        return 0;
    }
    (width / effective_density(width, layer, config)).ceil() as usize
}

/// Total candidate slots across all layers.
pub fn total_candidates(width: f32, config: &FieldConfig) -> usize {
    config
        .layers
        .iter()
        .map(|l| candidate_count(width, l, config))
        .sum()
}

#[inline]
fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() {
        width.max(0.0)
    } else {
        0.0
    }
}

/// Running seed-head bookkeeping that steers the realized ratio toward the
/// target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BudTally {
    pub eligible: usize,
    pub buds: usize,
}

impl BudTally {
    /// Probability for the next eligible blade.
    pub fn probability(&self, target: f32, gain: f32) -> f32 {
        let expected = self.eligible as f32 * target;
        let deficit = expected - self.buds as f32;
        (target + deficit * gain).clamp(0.0, 1.0)
    }

    pub fn record(&mut self, bud: bool) {
        self.eligible += 1;
        if bud {
            self.buds += 1;
        }
    }

    pub fn ratio(&self) -> f32 {
        if self.eligible == 0 {
            0.0
        } else {
            self.buds as f32 / self.eligible as f32
        }
    }
}

/// Generate the whole blade population for a viewport `width`.
pub fn generate_blades<R: Rng + ?Sized>(
    width: f32,
    config: &FieldConfig,
    rng: &mut R,
) -> Vec<BladeInstance> {
    let mut tally = BudTally::default();
    generate_blades_with_tally(width, config, rng, &mut tally)
}

/// As [`generate_blades`], exposing the seed-head tally.
pub fn generate_blades_with_tally<R: Rng + ?Sized>(
    width: f32,
    config: &FieldConfig,
    rng: &mut R,
    tally: &mut BudTally,
) -> Vec<BladeInstance> {
    let width = sanitize_width(width);
    let mut blades = Vec::with_capacity(total_candidates(width, config) * 2);
    if width <= 0.0 {
        return blades;
    }

    for depth in Depth::ALL {
        let layer = &config.layers[depth.index()];
        let density = effective_density(width, layer, config);
        let slots = candidate_count(width, layer, config);
        for slot in 0..slots {
            if rng.gen_bool(config.skip_probability.clamp(0.0, 1.0)) {
                continue;
            }
            let jitter = (rng.gen::<f32>() * 2.0 - 1.0) * config.jitter_fraction * density;
            let x = slot as f32 * density + jitter;

            let p = tally.probability(config.bud_target_ratio, config.bud_correction_gain);
            let bud = rng.gen::<f32>() < p;
            tally.record(bud);

            if bud {
                let scale = config.pod_scale.sample(rng);
                let lean = config.lean.sample(rng);
                let parent = make_blade(
                    rng,
                    config,
                    depth,
                    x,
                    0.0,
                    SizeClass::Medium,
                    scale,
                    lean,
                    true,
                    width,
                );
                spawn_cluster(rng, config, &parent, width, &mut blades);
                blades.push(parent);
            } else {
                let size = pick_size(rng, &config.size_weights);
                let range = match size {
                    SizeClass::Short => config.short_scale,
                    SizeClass::Medium => config.medium_scale,
                    _ => config.tall_scale,
                };
                let scale = range.sample(rng);
                let lean = config.lean.sample(rng);
                blades.push(make_blade(
                    rng, config, depth, x, 0.0, size, scale, lean, false, width,
                ));
            }
        }
    }

    sort_for_overdraw(&mut blades);
    blades
}

/// Back layers first; within a layer seed-head blades go behind, then taller
/// behind shorter.
pub fn sort_for_overdraw(blades: &mut [BladeInstance]) {
    blades.sort_by(|a, b| {
        a.depth
            .cmp(&b.depth)
            .then_with(|| b.has_seed_head().cmp(&a.has_seed_head()))
            .then_with(|| b.scale.total_cmp(&a.scale))
    });
}

fn pick_size<R: Rng + ?Sized>(rng: &mut R, weights: &[f32; 3]) -> SizeClass {
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return SizeClass::Medium;
    }
    let mut roll = rng.gen::<f32>() * total;
    for (w, size) in weights
        .iter()
        .zip([SizeClass::Short, SizeClass::Medium, SizeClass::Tall])
    {
        let w = w.max(0.0);
        if roll < w {
            return size;
        }
        roll -= w;
    }
    SizeClass::Tall
}

fn spawn_cluster<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FieldConfig,
    parent: &BladeInstance,
    width: f32,
    out: &mut Vec<BladeInstance>,
) {
    let (lo, hi) = config.cluster_count;
    let count = rng.gen_range(lo.min(hi)..=hi.max(lo));
    let spin = rng.gen::<f32>() * TAU;
    for i in 0..count {
        let angle = spin + i as f32 / count.max(1) as f32 * TAU + rng.gen_range(-0.3..0.3);
        let radius = config.cluster_radius.sample(rng);
        let dx = angle.cos() * radius;
        // Ring is seen edge-on: depth shows as a small vertical offset.
        let dy = angle.sin() * radius * 0.15;
        let lean = dx.signum() * config.cluster_lean * rng.gen_range(0.5..1.5);
        let scale = config.cluster_scale.sample(rng);
        out.push(make_blade(
            rng,
            config,
            parent.depth,
            parent.x + dx,
            parent.base_y + dy,
            SizeClass::Cluster,
            scale,
            lean,
            false,
            width,
        ));
    }

    let (lo, hi) = config.base_count;
    let count = rng.gen_range(lo.min(hi)..=hi.max(lo));
    for _ in 0..count {
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let dx = side * config.base_radius.sample(rng);
        let scale = config.base_scale.sample(rng);
        let lean = config.lean.sample(rng);
        out.push(make_blade(
            rng,
            config,
            parent.depth,
            parent.x + dx,
            parent.base_y,
            SizeClass::Base,
            scale,
            lean,
            false,
            width,
        ));
    }
}

#[allow(clippy::too_many_arguments)]
fn make_blade<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FieldConfig,
    depth: Depth,
    x: f32,
    dy: f32,
    size: SizeClass,
    scale: f32,
    lean: f32,
    seed_head: bool,
    width: f32,
) -> BladeInstance {
    let layer = &config.layers[depth.index()];
    let constants = draw_constants(rng, config, x, scale * layer.scale, width);
    let blade_sprite = BLADE_SPRITES.choose(rng).copied().unwrap_or("blade_green_01");
    let seed_head_sprite = if seed_head && !size.is_decorative() {
        SEED_HEAD_SPRITES.choose(rng).copied()
    } else {
        None
    };
    BladeInstance {
        x,
        base_y: layer.anchor_offset_px + dy,
        size,
        scale,
        lean,
        blade_sprite,
        seed_head_sprite,
        depth,
        layer_scale: layer.scale,
        opacity: layer.opacity,
        constants,
        state: BladeState::default(),
    }
}

fn draw_constants<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FieldConfig,
    x: f32,
    scale: f32,
    width: f32,
) -> BladeConstants {
    let ranges = &config.physics;
    let cohort_width = config.cohort_width_px.max(1.0);
    let cohort = (x.max(0.0).min(width) / cohort_width).floor() as u16;
    // Golden-angle spacing keeps neighbouring cohorts out of phase.
    let cohort_phase = (cohort as f32 * 2.399_963).rem_euclid(TAU);
    let height_reactivity = 0.6 + 0.4 * scale.clamp(0.0, 1.2);
    BladeConstants {
        stiffness: ranges.stiffness.sample(rng),
        damping: ranges.damping.sample(rng).min(0.999),
        gust_decay: ranges.gust_decay.sample(rng).min(0.999),
        boost_decay: ranges.boost_decay.sample(rng).min(0.999),
        time_scale: ranges.time_scale.sample(rng),
        phase: Span::new(0.0, TAU).sample(rng),
        cohort,
        cohort_phase,
        gust_jitter: ranges.gust_jitter.sample(rng),
        reactivity: height_reactivity * ranges.variability.sample(rng),
        sway_freq_hz: ranges.sway_freq_hz.sample(rng),
        sway_phase: Span::new(0.0, TAU).sample(rng),
        sway_amp: ranges.sway_amp_rad.sample(rng),
        wander_seed: rng.gen_range(0..10_000),
    }
}
