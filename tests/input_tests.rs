// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use prairie_core::{NavCommand, Visibility};

#[test]
fn arrow_keys_navigate() {
    assert_eq!(command_for_key("ArrowRight"), Some(NavCommand::Next));
    assert_eq!(command_for_key("ArrowDown"), Some(NavCommand::Next));
    assert_eq!(command_for_key("ArrowLeft"), Some(NavCommand::Previous));
    assert_eq!(command_for_key("ArrowUp"), Some(NavCommand::Previous));
    assert_eq!(command_for_key("Home"), Some(NavCommand::First));
    assert_eq!(command_for_key("End"), Some(NavCommand::Last));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["a", "Enter", " ", "Tab", "arrowright", ""] {
        assert_eq!(command_for_key(key), None, "{key:?}");
    }
}

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(effective_pixel_ratio(3.0, 1.5), 1.5);
    assert_eq!(effective_pixel_ratio(1.25, 1.5), 1.25);
    assert_eq!(effective_pixel_ratio(0.0, 1.5), 1.0);
    assert_eq!(effective_pixel_ratio(f64::NAN, 1.5), 1.0);
}

#[test]
fn backing_size_scales_and_never_collapses() {
    assert_eq!(backing_size(800.0, 120.0, 1.5), (1200, 180));
    assert_eq!(backing_size(0.0, 0.0, 1.5), (1, 1));
    assert_eq!(backing_size(-10.0, 50.0, 1.0), (1, 50));
}

#[test]
fn client_points_are_localized() {
    let p = client_to_canvas(Vec2::new(150.0, 90.0), 100.0, 40.0);
    assert_eq!(p, Vec2::new(50.0, 50.0));
}

#[test]
fn item_transform_formats_ring_position() {
    assert_eq!(
        item_transform(72.0, 320.0),
        "rotateY(72.000deg) translateZ(320.0px)"
    );
    assert_eq!(
        item_transform(-144.0, 300.0),
        "rotateY(-144.000deg) translateZ(300.0px)"
    );
}

#[test]
fn sliver_in_view_counts_as_hidden() {
    assert_eq!(visibility_for_ratio(0.0, 0.1), Visibility::Hidden);
    assert_eq!(visibility_for_ratio(0.02, 0.1), Visibility::Hidden);
    assert_eq!(visibility_for_ratio(0.1, 0.1), Visibility::Visible);
    assert_eq!(visibility_for_ratio(1.0, 0.1), Visibility::Visible);
    assert_eq!(visibility_for_ratio(f64::NAN, 0.1), Visibility::Hidden);
}
