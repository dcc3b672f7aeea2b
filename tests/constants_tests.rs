// Host-side tests for web constants and their relationships to the scene.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use ripple_core::constants as scene;

#[test]
#[allow(clippy::assertions_on_constants)]
fn element_ids_are_distinct() {
    let ids = [CANVAS_ID, ECHO_ROOT_ID, HUD_ID, LABEL_LAYER_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn gesture_thresholds_are_positive() {
    assert!(CLICK_SLOP_PX > 0.0);
    assert!(WHEEL_PIXELS_PER_NOTCH > 0.0);
    assert!(WHEEL_LINES_PER_NOTCH > 0.0);
}

#[test]
fn clear_color_is_dark() {
    for c in CLEAR_RGB {
        assert!((0.0..=0.1).contains(&c));
    }
}

#[test]
fn light_points_down_into_the_scene() {
    let l = glam::Vec3::from_array(LIGHT_DIR);
    assert!(l.length() > 0.0);
    assert!(l.y < 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn label_overlay_tuning() {
    assert!(LABEL_LINE_SPACING >= 1.0);
    assert!(LABEL_MIN_PX > 0.0);
    assert!(DOT_SEGMENTS >= 3);
    assert!(!LABEL_FONT_FAMILY.is_empty());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_constants_are_consistent() {
    assert!(scene::CAMERA_NEAR > 0.0 && scene::CAMERA_NEAR < scene::CAMERA_FAR);
    assert!(scene::PLACEMENT_DISTANCE > scene::CAMERA_NEAR);
    assert!(scene::PLACEMENT_DISTANCE < scene::CAMERA_FAR);
    assert!(scene::ORBIT_MIN_RADIUS < scene::ORBIT_MAX_RADIUS);
    assert!(scene::ORBIT_MIN_POLAR > 0.0);
    assert!(scene::ORBIT_MAX_POLAR < std::f32::consts::PI);
    assert!(scene::PITCH_LIMIT < std::f32::consts::FRAC_PI_2);
    assert!(scene::SNAPSHOT_LIMIT <= scene::SNAPSHOT_LIMIT_MAX);
    assert!(scene::GHOST_OPACITY > 0.0 && scene::GHOST_OPACITY < 1.0);
    assert!(scene::GRID_ALPHA_MAX <= 1.0);
    assert_eq!(scene::ECHO_RESET_INTERVAL_MS, 86_400_000);
}
