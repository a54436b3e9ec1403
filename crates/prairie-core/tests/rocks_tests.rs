// Host-side tests for pebbles, the ground ridge and rock motion.

use prairie_core::constants::RIDGE_VIEWBOX;
use prairie_core::*;

#[test]
fn layout_has_five_six_six() {
    let count = |d: Depth| ROCK_LAYOUT.iter().filter(|r| r.depth == d).count();
    assert_eq!(count(Depth::Back), 5);
    assert_eq!(count(Depth::Mid), 6);
    assert_eq!(count(Depth::Front), 6);
    assert!(ROCK_LAYOUT.iter().all(|r| (0.0..=1.0).contains(&r.x)));
}

#[test]
fn pebbles_are_reproducible() {
    for spec in ROCK_LAYOUT {
        let a = pebble_vertices(spec.seed, spec.width, spec.height);
        let b = pebble_vertices(spec.seed, spec.width, spec.height);
        assert_eq!(a, b);
    }
}

#[test]
fn pebbles_have_five_to_seven_vertices_inside_ellipse() {
    for seed in 0..500u32 {
        let verts = pebble_vertices(seed, 30.0, 20.0);
        assert!((5..=7).contains(&verts.len()), "seed {seed}: {}", verts.len());
        for v in &verts {
            let e = (v.x / 15.0).powi(2) + (v.y / 10.0).powi(2);
            assert!(e <= 1.0 + 1e-4, "seed {seed} vertex outside: {v:?}");
            assert!(e >= 0.7 * 0.7 - 1e-4);
        }
    }
}

#[test]
fn vertex_counts_vary_across_seeds() {
    let counts: std::collections::BTreeSet<usize> =
        (0..200u32).map(|s| pebble_vertices(s, 10.0, 10.0).len()).collect();
    assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![5, 6, 7]);
}

#[test]
fn back_rocks_are_paler() {
    let back = rock_color(0.0, Depth::Back);
    let front = rock_color(0.0, Depth::Front);
    assert!(back.lightness > front.lightness);
    assert!(back.saturation < front.saturation);
    assert_eq!(rock_color(-5.0, Depth::Mid).hue, 30.0);
    assert_eq!(back.css(), "hsl(35, 15%, 48%)");
}

#[test]
fn ridge_matches_path_endpoints() {
    assert!((ridge_height_at(0.0) - 55.0).abs() < 0.01);
    assert!((ridge_height_at(1.0) - 40.0).abs() < 0.01);
    assert!((ridge_height_at(0.5) - 40.0).abs() < 0.05);
}

#[test]
fn ridge_stays_inside_view_box() {
    for i in 0..=1_000 {
        let y = ridge_height_at(i as f32 / 1_000.0);
        assert!(y > 0.0 && y < RIDGE_VIEWBOX.1, "y={y} at {i}");
    }
    assert_eq!(ridge_height_at(-1.0), ridge_height_at(0.0));
    assert_eq!(ridge_height_at(2.0), ridge_height_at(1.0));
}

#[test]
fn ridge_path_scales_to_canvas() {
    let (start, segments) = ridge_path(600.0, 40.0);
    assert_eq!(start, glam::Vec2::new(0.0, 27.5));
    assert_eq!(segments[5][2], glam::Vec2::new(600.0, 20.0));
}

#[test]
fn relayout_seats_rocks_on_ridge() {
    let mut field = RockField::new(RockParams::default());
    field.relayout(1200.0, 80.0);
    let sink = RockParams::default().sink_fraction;
    for rock in field.rocks() {
        let ridge = ridge_y_px(rock.spec.x, 80.0);
        let bottom = rock.position.y + rock.spec.height / 2.0;
        assert!((bottom - (ridge + rock.spec.height * sink)).abs() < 1e-3);
        assert!((rock.position.x - rock.spec.x * 1200.0).abs() < 1e-3);
    }
}

#[test]
fn gust_moves_only_nearby_mid_and_front_rocks() {
    let params = RockParams::default();
    let mut field = RockField::new(params);
    field.relayout(1000.0, 80.0);
    field.apply_gust(520.0, 1.0, GustDirection::Right);
    for rock in field.rocks() {
        let layer = rock.spec.depth.index();
        let sigma = 1000.0 * params.sigma_fraction[layer];
        let dx = (rock.position.x - 520.0).abs();
        if rock.spec.depth == Depth::Back || dx > params.cutoff_sigmas * sigma {
            assert_eq!(rock.offset, glam::Vec2::ZERO, "rock at {} moved", rock.spec.x);
        } else {
            assert!(rock.offset.x > 0.0);
            assert!(rock.offset.y < 0.0);
        }
    }
    // The mid rock at 0.52 sits right under the focus.
    assert!(field.rocks().iter().any(|r| r.offset != glam::Vec2::ZERO));
}

#[test]
fn rock_offsets_decay_to_rest() {
    let bus = GustBus::new();
    let mut field = RockField::new(RockParams::default());
    field.relayout(1000.0, 80.0);
    field.subscribe(bus.subscribe());
    bus.publish(GustEvent {
        focus_x: 410.0,
        strength: 1.0,
        direction: GustDirection::Left,
    });
    field.advance();
    let moved = field
        .rocks()
        .iter()
        .find(|r| r.offset != glam::Vec2::ZERO)
        .map(|r| r.offset);
    assert!(moved.is_some_and(|o| o.x < 0.0));
    for _ in 0..200 {
        field.advance();
    }
    assert!(field.rocks().iter().all(|r| r.offset == glam::Vec2::ZERO));
}

fn front(x: f32, seed: u32) -> RockSpec {
    RockSpec {
        x,
        depth: Depth::Front,
        width: 34.0,
        height: 26.0,
        hue: 0.0,
        seed,
    }
}

fn gust_at(focus_x: f32) -> GustEvent {
    GustEvent {
        focus_x,
        strength: 1.0,
        direction: GustDirection::Right,
    }
}

fn max_offset(field: &RockField) -> f32 {
    field.rocks().iter().map(|r| r.offset.length()).fold(0.0, f32::max)
}

#[test]
fn burst_of_queued_gusts_keeps_offsets_small() {
    let bus = GustBus::new();
    let mut field = RockField::new(RockParams::default());
    field.relayout(1000.0, 80.0);
    field.subscribe(bus.subscribe());
    for _ in 0..50 {
        bus.publish(gust_at(580.0));
    }
    field.advance();
    let max = max_offset(&field);
    assert!(max > 0.0);
    assert!(max <= RockParams::default().max_offset_px + 1e-4, "{max}");
}

#[test]
fn repeated_gusts_are_clamped() {
    let params = RockParams::default();
    let mut field = RockField::with_layout(&[front(0.5, 7)], params);
    field.relayout(1000.0, 80.0);
    for _ in 0..100 {
        field.apply_gust(500.0, 1.0, GustDirection::Left);
    }
    let offset = field.rocks()[0].offset;
    assert!(offset.x < 0.0);
    assert!((offset.length() - params.max_offset_px).abs() < 1e-3);
}

#[test]
fn discarded_gusts_never_move_rocks() {
    let bus = GustBus::new();
    let mut field = RockField::new(RockParams::default());
    field.relayout(1000.0, 80.0);
    field.subscribe(bus.subscribe());
    for _ in 0..20 {
        bus.publish(gust_at(580.0));
        field.discard_gusts();
    }
    field.advance();
    assert!(field.rocks().iter().all(|r| r.offset == glam::Vec2::ZERO));
}

#[test]
fn rock_reactivity_is_seeded_and_varied() {
    let a = generate_rocks(&ROCK_LAYOUT);
    let b = generate_rocks(&ROCK_LAYOUT);
    let (lo, hi) = prairie_core::constants::ROCK_REACTIVITY;
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.reactivity, y.reactivity);
        assert!((lo..=hi).contains(&x.reactivity), "{}", x.reactivity);
    }
    assert!(a.iter().any(|r| (r.reactivity - a[0].reactivity).abs() > 1e-3));
}

#[test]
fn equally_weighted_rocks_respond_by_reactivity() {
    let mut field = RockField::with_layout(&[front(0.4, 61), front(0.6, 29)], RockParams::default());
    field.relayout(1000.0, 80.0);
    field.apply_gust(500.0, 1.0, GustDirection::Right);
    let [a, b] = field.rocks() else {
        panic!("expected two rocks");
    };
    assert_ne!(a.reactivity, b.reactivity);
    assert_ne!(a.offset, b.offset);
    let ratio = a.offset.x / b.offset.x;
    assert!((ratio - a.reactivity / b.reactivity).abs() < 1e-3);
}

#[test]
fn grab_misses_open_ground() {
    let mut field = RockField::with_layout(&[front(0.5, 7)], RockParams::default());
    field.relayout(1000.0, 80.0);
    assert!(!field.begin_drag(glam::Vec2::new(100.0, 40.0)));
    assert!(!field.is_dragging());
    assert_eq!(field.rocks()[0].motion, RockMotion::Resting);
}

#[test]
fn grab_picks_the_nearest_rock() {
    let mut field =
        RockField::with_layout(&[front(0.48, 7), front(0.52, 8)], RockParams::default());
    field.relayout(1000.0, 80.0);
    let near = field.rocks()[1].position + glam::Vec2::new(-2.0, 0.0);
    assert!(field.begin_drag(near));
    assert_eq!(field.rocks()[0].motion, RockMotion::Resting);
    assert_eq!(field.rocks()[1].motion, RockMotion::Held);
}

#[test]
fn dropped_rock_falls_back_onto_its_seat() {
    let mut field = RockField::with_layout(&[front(0.5, 7)], RockParams::default());
    field.relayout(1000.0, 80.0);
    let seat = field.rocks()[0].position;
    assert!(field.begin_drag(seat));
    field.drag_to(seat - glam::Vec2::new(0.0, 30.0));
    field.advance();
    let held = &field.rocks()[0];
    assert_eq!(held.position, seat - glam::Vec2::new(0.0, 30.0));
    assert!(held.velocity.y < 0.0);
    assert!(held.velocity.length() <= RockParams::default().throw_max_px + 1e-4);

    field.end_drag();
    assert_eq!(field.rocks()[0].motion, RockMotion::Falling);
    for _ in 0..300 {
        field.advance();
    }
    let rock = &field.rocks()[0];
    assert_eq!(rock.motion, RockMotion::Resting);
    assert_eq!(rock.velocity, glam::Vec2::ZERO);
    assert!((rock.position - seat).length() < 1e-3, "{:?}", rock.position);
}

#[test]
fn thrown_rock_stays_between_the_walls() {
    let params = RockParams::default();
    let mut field = RockField::with_layout(&[front(0.5, 7)], params);
    field.relayout(1000.0, 80.0);
    let start = field.rocks()[0].position;
    assert!(field.begin_drag(start));
    field.drag_to(glam::Vec2::new(5_000.0, start.y));
    field.advance();
    field.end_drag();

    let r = field.rocks()[0].radius();
    let (lo, hi) = (params.edge_margin_px + r, 1000.0 - params.edge_margin_px - r);
    assert_eq!(field.rocks()[0].position.x, hi);
    assert!(field.rocks()[0].velocity.x < 0.0);
    for _ in 0..2_000 {
        field.advance();
        let x = field.rocks()[0].position.x;
        assert!(x >= lo - 1e-3 && x <= hi + 1e-3, "x={x}");
    }
    assert_eq!(field.rocks()[0].motion, RockMotion::Resting);
}

#[test]
fn held_rock_shoves_same_layer_neighbours_only() {
    let mid = RockSpec {
        depth: Depth::Mid,
        ..front(0.45, 9)
    };
    let mut field =
        RockField::with_layout(&[front(0.4, 7), front(0.45, 8), mid], RockParams::default());
    field.relayout(1000.0, 80.0);
    let mid_before = field.rocks()[2].position;
    let neighbour = field.rocks()[1].position;

    assert!(field.begin_drag(field.rocks()[0].position));
    field.drag_to(neighbour - glam::Vec2::new(10.0, 0.0));
    field.advance();

    let [held, pushed, other] = field.rocks() else {
        panic!("expected three rocks");
    };
    assert_eq!(held.motion, RockMotion::Held);
    assert_eq!(pushed.motion, RockMotion::Falling);
    let gap = held.position.distance(pushed.position);
    assert!(gap >= held.radius() + pushed.radius() - 1e-3, "gap={gap}");
    assert_eq!(other.motion, RockMotion::Resting);
    assert_eq!(other.position, mid_before);
}

#[test]
fn relayout_cancels_a_drag() {
    let mut field = RockField::new(RockParams::default());
    field.relayout(1000.0, 80.0);
    assert!(field.begin_drag(field.rocks()[12].position));
    field.relayout(800.0, 60.0);
    assert!(!field.is_dragging());
    assert!(field.rocks().iter().all(|r| r.motion == RockMotion::Resting));
}

#[test]
fn resting_rocks_stay_put() {
    let mut field = RockField::new(RockParams::default());
    field.relayout(600.0, 80.0);
    let before: Vec<_> = field.rocks().iter().map(|r| r.position).collect();
    for _ in 0..30 {
        field.advance();
    }
    let after: Vec<_> = field.rocks().iter().map(|r| r.position).collect();
    assert_eq!(before, after);
}
