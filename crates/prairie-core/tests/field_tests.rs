// Host-side tests for procedural blade generation.

use prairie_core::constants::{NONPOD_MAX, POD_LEAF_MAX, POD_LEAF_MIN};
use prairie_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field(width: f32, seed: u64) -> Vec<BladeInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_blades(width, &FieldConfig::default(), &mut rng)
}

#[test]
fn seed_head_scale_stays_in_pod_range() {
    let mut seen = 0usize;
    for seed in 0..40 {
        for blade in field(3000.0, seed).iter().filter(|b| b.has_seed_head()) {
            assert!(
                blade.scale >= POD_LEAF_MIN && blade.scale <= POD_LEAF_MAX,
                "seed-head scale {} out of range",
                blade.scale
            );
            assert!(blade.scale < NONPOD_MAX);
            seen += 1;
        }
    }
    assert!(seen >= 1000, "only {seen} seed-head blades sampled");
}

#[test]
fn pod_range_is_below_every_plain_range() {
    let config = FieldConfig::default();
    for span in [config.short_scale, config.medium_scale, config.tall_scale] {
        assert!(config.pod_scale.max < span.min);
    }
}

#[test]
fn plain_blades_use_their_size_range() {
    let config = FieldConfig::default();
    for blade in field(2000.0, 5) {
        let span = match blade.size {
            SizeClass::Short => config.short_scale,
            SizeClass::Medium if blade.has_seed_head() => config.pod_scale,
            SizeClass::Medium => config.medium_scale,
            SizeClass::Tall => config.tall_scale,
            SizeClass::Cluster => config.cluster_scale,
            SizeClass::Base => config.base_scale,
        };
        assert!(span.contains(blade.scale), "{:?} scale {}", blade.size, blade.scale);
    }
}

#[test]
fn decorative_blades_never_carry_seed_heads() {
    for seed in 0..10 {
        for blade in field(1800.0, seed) {
            if blade.size.is_decorative() {
                assert!(!blade.has_seed_head());
            }
        }
    }
}

#[test]
fn seed_head_ratio_tracks_target() {
    let config = FieldConfig::default();
    for seed in [1, 2, 3] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tally = BudTally::default();
        generate_blades_with_tally(6000.0, &config, &mut rng, &mut tally);
        assert!(tally.eligible >= 500, "only {} eligible", tally.eligible);
        let ratio = tally.ratio();
        assert!(
            (ratio - config.bud_target_ratio).abs() <= 0.03,
            "ratio {ratio} with seed {seed}"
        );
    }
}

#[test]
fn empty_for_degenerate_width() {
    for width in [0.0, -20.0, f32::NAN, f32::INFINITY] {
        assert!(field(width, 1).is_empty(), "width {width}");
    }
}

#[test]
fn same_seed_same_field() {
    assert_eq!(field(1200.0, 99), field(1200.0, 99));
    assert_ne!(field(1200.0, 99), field(1200.0, 100));
}

#[test]
fn sorted_for_overdraw() {
    let blades = field(2500.0, 11);
    for pair in blades.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.depth <= b.depth);
        if a.depth == b.depth {
            assert!(a.has_seed_head() >= b.has_seed_head());
            if a.has_seed_head() == b.has_seed_head() {
                assert!(a.scale >= b.scale);
            }
        }
    }
}

#[test]
fn candidate_count_follows_density() {
    let config = FieldConfig::default();
    let back = &config.layers[0];
    // At or below the reference width the density is unscaled.
    assert_eq!(candidate_count(1100.0, back, &config), (1100.0f32 / 11.0).ceil() as usize);
    // Wide viewports stretch the interval, capped at the max factor.
    let wide = candidate_count(10_000.0, back, &config);
    let expected = (10_000.0 / (back.density_px * config.max_width_factor)).ceil() as usize;
    assert_eq!(wide, expected);
    assert_eq!(candidate_count(0.0, back, &config), 0);
}

#[test]
fn skipped_slots_reduce_population() {
    let config = FieldConfig::default();
    let blades = field(1440.0, 3);
    let plain = blades
        .iter()
        .filter(|b| !b.size.is_decorative())
        .count();
    assert!(plain < total_candidates(1440.0, &config));
    assert!(plain > total_candidates(1440.0, &config) / 2);
}

#[test]
fn seed_heads_spawn_clusters() {
    let blades = field(3000.0, 21);
    let pods = blades.iter().filter(|b| b.has_seed_head()).count();
    let clusters = blades.iter().filter(|b| b.size == SizeClass::Cluster).count();
    let bases = blades.iter().filter(|b| b.size == SizeClass::Base).count();
    assert!(pods > 0);
    assert!(clusters >= pods * 4 && clusters <= pods * 7);
    assert!(bases >= pods * 2 && bases <= pods * 3);
}

#[test]
fn constants_are_within_ranges() {
    let ranges = PhysicsRanges::default();
    for blade in field(1500.0, 8) {
        let c = blade.constants;
        assert!(ranges.stiffness.contains(c.stiffness));
        assert!(c.damping < 1.0 && c.gust_decay < 1.0 && c.boost_decay < 1.0);
        assert!(ranges.sway_amp_rad.contains(c.sway_amp));
        assert!(c.reactivity > 0.0);
        assert_eq!(blade.state, BladeState::default());
    }
}

#[test]
fn layers_keep_their_opacity() {
    let config = FieldConfig::default();
    for blade in field(1000.0, 2) {
        assert_eq!(blade.opacity, config.layers[blade.depth.index()].opacity);
        assert_eq!(blade.layer_scale, config.layers[blade.depth.index()].scale);
    }
}
