// Host-side tests for the carousel state machine and gesture recognizers.

use glam::Vec2;
use prairie_core::*;

const SETTLE: f64 = 1_000.0;

fn carousel(items: usize) -> CarouselState {
    CarouselState::new(items, CarouselConfig::default())
}

#[test]
fn next_cycles_back_to_start() {
    for items in [2, 3, 5, 7] {
        let mut c = carousel(items);
        let mut now = 0.0;
        for _ in 0..items {
            assert!(c.next(now).is_some());
            now += SETTLE;
        }
        assert_eq!(c.index(), 0);
        let r = c.normalized_rotation();
        assert!(r.abs() < 1e-3 || (360.0 - r).abs() < 1e-3, "{items} items: {r}");
    }
}

#[test]
fn previous_wraps_and_turns_positive() {
    let mut c = carousel(5);
    let t = c.previous(0.0).expect("accepted");
    assert_eq!(c.index(), 4);
    assert_eq!(c.rotation(), 72.0);
    assert_eq!(t.direction, GustDirection::Left);
    assert_eq!((t.from, t.to), (0, 4));
}

#[test]
fn next_turns_negative() {
    let mut c = carousel(4);
    let t = c.next(0.0).expect("accepted");
    assert_eq!(c.rotation(), -90.0);
    assert_eq!(t.direction, GustDirection::Right);
}

#[test]
fn go_to_takes_shortest_path() {
    let mut c = carousel(5);
    let t = c.go_to(3, 0.0).expect("accepted");
    assert_eq!(t.direction.sign(), -1.0);
    assert_eq!(c.index(), 3);
    assert_eq!(c.rotation(), -3.0 * 72.0);

    let mut c = carousel(5);
    let t = c.go_to(2, 0.0).expect("accepted");
    assert_eq!(t.direction.sign(), 1.0);
}

#[test]
fn shortest_delta_prefers_direct_on_tie() {
    assert_eq!(shortest_delta(0, 3, 5), -2);
    assert_eq!(shortest_delta(0, 2, 5), 2);
    assert_eq!(shortest_delta(0, 2, 4), 2);
    assert_eq!(shortest_delta(4, 0, 5), 1);
    assert_eq!(shortest_delta(1, 1, 5), 0);
}

#[test]
fn input_during_transition_is_dropped() {
    let mut c = carousel(5);
    assert!(c.next(0.0).is_some());
    assert!(c.is_transitioning(100.0));
    assert!(c.next(100.0).is_none());
    assert!(c.previous(300.0).is_none());
    assert!(c.go_to(3, 500.0).is_none());
    assert_eq!(c.index(), 1);
    let transition_ms = c.config().transition_ms;
    assert!(!c.is_transitioning(transition_ms));
    assert!(c.next(transition_ms).is_some());
    assert_eq!(c.index(), 2);
}

#[test]
fn go_to_current_or_out_of_range_is_ignored() {
    let mut c = carousel(3);
    assert!(c.go_to(0, 0.0).is_none());
    assert!(c.go_to(3, 0.0).is_none());
    assert!(!c.is_transitioning(1.0));
}

#[test]
fn single_item_never_moves() {
    let mut c = carousel(1);
    assert!(c.next(0.0).is_none());
    assert!(c.previous(0.0).is_none());
    let mut empty = carousel(0);
    assert!(empty.next(0.0).is_none());
    assert_eq!(empty.step(), 0.0);
}

#[test]
fn commands_map_to_moves() {
    let mut c = carousel(6);
    assert_eq!(c.command(NavCommand::Last, 0.0).map(|t| t.to), Some(5));
    assert_eq!(c.command(NavCommand::First, SETTLE).map(|t| t.to), Some(0));
    assert_eq!(c.command(NavCommand::GoTo(2), 2.0 * SETTLE).map(|t| t.to), Some(2));
    assert_eq!(c.command(NavCommand::Previous, 3.0 * SETTLE).map(|t| t.to), Some(1));
    assert_eq!(c.command(NavCommand::Next, 4.0 * SETTLE).map(|t| t.to), Some(2));
}

#[test]
fn active_item_faces_front() {
    let mut c = carousel(5);
    let mut now = 0.0;
    for _ in 0..3 {
        c.next(now);
        now += SETTLE;
    }
    let angle = c.item_angle(c.index()).rem_euclid(360.0);
    assert!(angle.abs() < 1e-3 || (360.0 - angle).abs() < 1e-3);
}

#[test]
fn autoplay_advances_after_idle_interval() {
    let config = CarouselConfig {
        autoplay_ms: 3_000.0,
        ..CarouselConfig::default()
    };
    let mut c = CarouselState::new(4, config);
    assert!(c.autoplay_tick(1_000.0).is_none());
    assert!(c.autoplay_tick(3_000.0).is_some());
    assert_eq!(c.index(), 1);
    // Interval restarts from the last move.
    assert!(c.autoplay_tick(4_000.0).is_none());
    assert!(c.autoplay_tick(6_000.0).is_some());

    let mut off = carousel(4);
    assert!(off.autoplay_tick(1e9).is_none());
}

#[test]
fn swipe_fires_once_per_gesture() {
    let mut swipe = SwipeTracker::default();
    assert!(swipe.begin(Vec2::ZERO, 0.0));
    assert_eq!(swipe.update(Vec2::new(5.0, 0.0), 10.0), None);
    assert!(!swipe.is_capturing());
    assert_eq!(swipe.update(Vec2::new(50.0, 2.0), 20.0), None);
    assert!(swipe.is_capturing());
    assert_eq!(swipe.update(Vec2::new(100.0, 4.0), 30.0), Some(NavCommand::Previous));
    assert_eq!(swipe.update(Vec2::new(300.0, 4.0), 40.0), None);
    swipe.end();

    // Cooldown blocks the next gesture.
    assert!(!swipe.begin(Vec2::ZERO, 100.0));
    assert_eq!(swipe.update(Vec2::new(-200.0, 0.0), 110.0), None);

    assert!(swipe.begin(Vec2::ZERO, 1_000.0));
    assert_eq!(swipe.update(Vec2::new(0.0, -90.0), 1_010.0), Some(NavCommand::Next));
}

#[test]
fn swipe_axis_locks_on_intent() {
    let mut swipe = SwipeTracker::default();
    swipe.begin(Vec2::ZERO, 0.0);
    // Locks to Y; a later large X move does not fire.
    swipe.update(Vec2::new(1.0, 10.0), 1.0);
    assert_eq!(swipe.update(Vec2::new(150.0, 20.0), 2.0), None);
    assert_eq!(swipe.update(Vec2::new(150.0, 85.0), 3.0), Some(NavCommand::Previous));
}

#[test]
fn wheel_accumulates_to_threshold() {
    let mut wheel = WheelAccumulator::default();
    assert_eq!(wheel.feed(Vec2::new(0.0, 100.0), 0.0), None);
    assert_eq!(wheel.feed(Vec2::new(0.0, 100.0), 10.0), None);
    assert_eq!(wheel.feed(Vec2::new(0.0, 100.0), 20.0), Some(NavCommand::Next));
    // Cooldown swallows momentum.
    assert_eq!(wheel.feed(Vec2::new(0.0, 400.0), 100.0), None);
    assert_eq!(wheel.feed(Vec2::new(0.0, -400.0), 800.0), Some(NavCommand::Previous));
}

#[test]
fn wheel_direction_change_resets() {
    let mut wheel = WheelAccumulator::default();
    assert_eq!(wheel.feed(Vec2::new(200.0, 0.0), 0.0), None);
    assert_eq!(wheel.feed(Vec2::new(-100.0, 0.0), 1.0), None);
    assert_eq!(wheel.feed(Vec2::new(100.0, 0.0), 2.0), None);
    assert_eq!(wheel.feed(Vec2::new(-200.0, 0.0), 3.0), None);
    assert_eq!(wheel.feed(Vec2::new(-100.0, 0.0), 4.0), Some(NavCommand::Previous));
}

#[test]
fn wheel_primary_axis_is_larger_magnitude() {
    let mut wheel = WheelAccumulator::default();
    assert_eq!(wheel.feed(Vec2::new(-300.0, 50.0), 0.0), Some(NavCommand::Previous));
}

#[test]
fn wheel_delta_modes_normalize() {
    let d = Vec2::new(1.0, 3.0);
    assert_eq!(normalize_wheel_delta(d, DeltaMode::Pixel, 16.0, 900.0), d);
    assert_eq!(normalize_wheel_delta(d, DeltaMode::Line, 16.0, 900.0), Vec2::new(16.0, 48.0));
    assert_eq!(normalize_wheel_delta(d, DeltaMode::Page, 16.0, 900.0), Vec2::new(900.0, 2700.0));
    assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
    assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
    assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
    assert_eq!(DeltaMode::from_dom(9), DeltaMode::Pixel);
}

#[test]
fn fully_in_view_checks_both_edges() {
    assert!(fully_in_view(10.0, 500.0, 800.0));
    assert!(!fully_in_view(-1.0, 500.0, 800.0));
    assert!(!fully_in_view(10.0, 801.0, 800.0));
}
