// Pure label layout helpers for the 2D overlay.

/// Pixels per world unit at view depth 1 for a vertical field of view.
#[inline]
pub fn focal_length_px(fovy_radians: f32, viewport_height: f32) -> f32 {
    viewport_height / (2.0 * (fovy_radians * 0.5).tan())
}

/// On-screen size of a world-space length seen at `depth`.
#[inline]
pub fn projected_size(world: f32, depth: f32, focal_px: f32) -> f32 {
    if depth <= 0.0 {
        return 0.0;
    }
    world * focal_px / depth
}

/// Greedy word wrap. Explicit newlines are kept; a single word wider than
/// `max_width` gets a line of its own rather than being split.
pub fn wrap_words(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", line, word);
            if measure(&candidate) > max_width {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}
