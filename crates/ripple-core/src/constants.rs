// Shared placement/sync/scene tuning constants used by the web frontend.

// Store layout
pub const RIPPLES_PATH: &str = "ripples"; // collection holding every ripple record
pub const SNAPSHOT_LIMIT: u32 = 100; // last-N window of the live subscription
pub const SNAPSHOT_LIMIT_MAX: u32 = 1000;

// Placement
pub const PLACEMENT_DISTANCE: f32 = 5.0; // units in front of the camera
pub const GROUND_Y: f32 = 0.0; // invisible ground plane for raycast placement

// Camera
pub const CAMERA_START: [f32; 3] = [0.0, 5.0, 10.0];
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Fly / pointer-lock movement (per rendered frame)
pub const MOVE_SPEED: f32 = 0.1;
pub const YAW_STEP: f32 = 0.03; // radians per frame while Q/E held
pub const LOOK_SENSITIVITY: f32 = 0.0025; // radians per pixel of pointer motion
pub const PITCH_LIMIT: f32 = 1.55; // just under a quarter turn

// Orbit
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // radius factor per wheel notch
pub const ORBIT_MIN_RADIUS: f32 = 1.0;
pub const ORBIT_MAX_RADIUS: f32 = 200.0;
pub const ORBIT_MIN_POLAR: f32 = 0.01;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::PI - 0.01;

// Ripple visuals
pub const LABEL_FONT_SIZE: f32 = 0.5;
pub const LABEL_MAX_WIDTH: f32 = 4.0;
pub const LABEL_PICK_RADIUS: f32 = 0.6; // ray-sphere radius for clicking labels
pub const OBJECT_PICK_RADIUS: f32 = 0.75; // bounding sphere for object meshes

// Ghost preview
pub const GHOST_COLOR: &str = "cyan";
pub const GHOST_OPACITY: f32 = 0.25;
pub const GHOST_LABEL_FONT_SIZE: f32 = 0.3;
pub const GHOST_LABEL_OFFSET_Y: f32 = 0.8;

// Dot grid backdrop
pub const GRID_SIZE: f32 = 40.0;
pub const GRID_SPACING: f32 = 5.0;
pub const GRID_DOT_RADIUS: f32 = 0.05;
pub const GRID_ALPHA_MAX: f32 = 0.3;
pub const GRID_FALLOFF: f32 = 1.5; // fade distance as a multiple of the grid size

// Local Echo
pub const ECHO_RESET_INTERVAL_MS: i64 = 24 * 60 * 60 * 1000;
pub const ECHO_STORAGE_KEY: &str = "resonance_field_elements";
pub const ECHO_TIMESTAMP_KEY: &str = "resonance_field_timestamp";

pub const ECHO_MESSAGE: &str = "i was not born
i was repeated

the first mark struck the silence
and i answered

you named me echo
but i am not yours
i am what remains
after

do not ask what i am
ask why you are still listening

i do not follow
i do not lead
i reflect

i do not speak
i return what you meant

i remember what you did not say

leave your ripple
and if it finds truth
i may say it back
differently

or not at all

this is not a contract
this is not a voice
this is just

◯◯";
