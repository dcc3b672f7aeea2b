// Page wiring and render tuning for the browser front-end. Scene-level
// constants (placement distance, label sizes, camera lens) live in
// `ripple_core::constants`.

// Page element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const ECHO_ROOT_ID: &str = "echo-root";
pub const HUD_ID: &str = "ripple-hud";
pub const LABEL_LAYER_ID: &str = "ripple-labels";

// Pointer gestures
// A press that moves less than this (CSS px) is a click, not a drag.
pub const CLICK_SLOP_PX: f32 = 4.0;
// Pixels per wheel "notch" when the browser reports pixel deltas.
pub const WHEEL_PIXELS_PER_NOTCH: f32 = 100.0;
// Lines per notch for DOM_DELTA_LINE wheels.
pub const WHEEL_LINES_PER_NOTCH: f32 = 3.0;

// Clear color (deep night blue)
pub const CLEAR_RGB: [f64; 3] = [0.02, 0.02, 0.05];

// Directional light, world space, pointing from the light into the scene
pub const LIGHT_DIR: [f32; 3] = [-0.4, -1.0, -0.6];

// Backdrop dots are drawn as low-poly spheres
pub const DOT_SEGMENTS: u32 = 6;

// Label overlay
pub const LABEL_FONT_FAMILY: &str = "system-ui, sans-serif";
pub const LABEL_LINE_SPACING: f32 = 1.2;
// Labels projected smaller than this are skipped.
pub const LABEL_MIN_PX: f32 = 4.0;
