// CSS-ish color parsing for ripple materials. Total: unknown input is gray.

pub const GRAY: [f32; 3] = [0.502, 0.502, 0.502];

const NAMED: [(&str, [f32; 3]); 10] = [
    ("red", [1.0, 0.0, 0.0]),
    ("green", [0.0, 0.502, 0.0]),
    ("blue", [0.0, 0.0, 1.0]),
    ("gray", GRAY),
    ("grey", GRAY),
    ("cyan", [0.0, 1.0, 1.0]),
    ("white", [1.0, 1.0, 1.0]),
    ("black", [0.0, 0.0, 0.0]),
    ("yellow", [1.0, 1.0, 0.0]),
    ("magenta", [1.0, 0.0, 1.0]),
];

pub fn parse_color(input: &str) -> [f32; 3] {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(GRAY);
    }
    let lower = s.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(GRAY)
}

fn parse_hex(hex: &str) -> Option<[f32; 3]> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    let bytes = match digits.as_slice() {
        [r, g, b] => [r * 17, g * 17, b * 17],
        [r1, r0, g1, g0, b1, b0] => [r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0],
        _ => return None,
    };
    Some(bytes.map(|b| b as f32 / 255.0))
}
