// Host-side tests for pointer gesture classification and wheel/pixel maths.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn press_and_release_in_place_is_a_click() {
    let mut g = PointerGesture::default();
    g.press(Vec2::new(100.0, 100.0));
    assert!(g.release(Vec2::new(100.0, 100.0)));
    assert!(!g.down);
}

#[test]
fn small_jitter_still_clicks() {
    let mut g = PointerGesture::default();
    g.press(Vec2::new(10.0, 10.0));
    let d = g.moved(Vec2::new(12.0, 11.0));
    assert_eq!(d, Some(Vec2::new(2.0, 1.0)));
    assert!(!g.dragging);
    assert!(g.release(Vec2::new(12.0, 11.0)));
}

#[test]
fn drag_never_clicks_even_when_returning() {
    let mut g = PointerGesture::default();
    g.press(Vec2::ZERO);
    g.moved(Vec2::new(50.0, 0.0));
    assert!(g.dragging);
    g.moved(Vec2::ZERO);
    assert!(!g.release(Vec2::ZERO));
}

#[test]
fn movement_deltas_are_relative_to_previous_event() {
    let mut g = PointerGesture::default();
    g.press(Vec2::ZERO);
    assert_eq!(g.moved(Vec2::new(10.0, 0.0)), Some(Vec2::new(10.0, 0.0)));
    assert_eq!(g.moved(Vec2::new(15.0, 5.0)), Some(Vec2::new(5.0, 5.0)));
}

#[test]
fn motion_without_press_is_ignored() {
    let mut g = PointerGesture::default();
    assert_eq!(g.moved(Vec2::new(10.0, 0.0)), None);
    assert!(!g.release(Vec2::ZERO));
}

#[test]
fn cancel_aborts_the_click() {
    let mut g = PointerGesture::default();
    g.press(Vec2::ZERO);
    g.cancel();
    assert!(!g.release(Vec2::ZERO));
}

#[test]
fn wheel_pixel_lines_and_pages() {
    assert!((wheel_notches(100.0, 0) - 1.0).abs() < 1e-6);
    assert!((wheel_notches(-250.0, 0) + 2.5).abs() < 1e-6);
    assert!((wheel_notches(3.0, 1) - 1.0).abs() < 1e-6);
    assert_eq!(wheel_notches(-7.0, 2), -1.0);
}

#[test]
fn css_points_scale_to_backing_pixels() {
    let p = css_to_backing(
        Vec2::new(50.0, 25.0),
        Vec2::new(100.0, 50.0),
        Vec2::new(200.0, 100.0),
    );
    assert_eq!(p, Vec2::new(100.0, 50.0));
}

#[test]
fn zero_sized_box_maps_to_origin() {
    let p = css_to_backing(Vec2::new(5.0, 5.0), Vec2::ZERO, Vec2::new(200.0, 100.0));
    assert_eq!(p, Vec2::ZERO);
}

#[test]
fn enter_submits_only_outside_composition() {
    assert!(is_submit_key("Enter", false, false));
    assert!(!is_submit_key("Enter", true, false));
    assert!(!is_submit_key("Enter", false, true));
    assert!(!is_submit_key("a", false, false));
}
