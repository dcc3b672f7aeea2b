use crate::constants::{CLICK_SLOP_PX, WHEEL_LINES_PER_NOTCH, WHEEL_PIXELS_PER_NOTCH};
use glam::Vec2;

/// Pointer press tracked from down to up. A press that stays within the
/// click slop is a click; anything further is a drag and never clicks.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerGesture {
    pub down: bool,
    pub origin: Vec2,
    pub last: Vec2,
    pub dragging: bool,
}

impl PointerGesture {
    pub fn press(&mut self, at: Vec2) {
        self.down = true;
        self.origin = at;
        self.last = at;
        self.dragging = false;
    }

    /// Returns the movement since the previous event while pressed.
    pub fn moved(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.down {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        if at.distance(self.origin) > CLICK_SLOP_PX {
            self.dragging = true;
        }
        Some(delta)
    }

    /// Returns true when the release completes a click.
    pub fn release(&mut self, at: Vec2) -> bool {
        if !self.down {
            return false;
        }
        self.down = false;
        !self.dragging && at.distance(self.origin) <= CLICK_SLOP_PX
    }

    pub fn cancel(&mut self) {
        self.down = false;
        self.dragging = false;
    }
}

/// Normalize a wheel event to notches; positive zooms out.
#[inline]
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    match delta_mode {
        // DOM_DELTA_LINE
        1 => delta_y as f32 / WHEEL_LINES_PER_NOTCH,
        // DOM_DELTA_PAGE
        2 => delta_y.signum() as f32,
        _ => delta_y as f32 / WHEEL_PIXELS_PER_NOTCH,
    }
}

/// Map a CSS-pixel point inside a `width` x `height` box to backing pixels.
#[inline]
pub fn css_to_backing(css: Vec2, css_size: Vec2, backing_size: Vec2) -> Vec2 {
    if css_size.x <= 0.0 || css_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    css / css_size * backing_size
}

/// Enter submits the draft unless Shift is held (newline) or an IME
/// composition is still open (Enter commits the candidate).
pub fn is_submit_key(key: &str, shift: bool, composing: bool) -> bool {
    key == "Enter" && !shift && !composing
}
