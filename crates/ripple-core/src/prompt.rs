use crate::ripple::{Shape, DEFAULT_OBJECT_COLOR};

// Checked in order; the first keyword found in the prompt wins.
const COLOR_KEYWORDS: [&str; 3] = ["red", "blue", "green"];
const SHAPE_KEYWORDS: [(&str, Shape); 4] = [
    ("sphere", Shape::Sphere),
    ("cone", Shape::Cone),
    ("cylinder", Shape::Cylinder),
    ("torus", Shape::Torus),
];

/// Shape and color requested by an object-mode prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSpec {
    pub shape: Shape,
    pub color: &'static str,
}

/// Derive a procedural object from free text.
///
/// Naive case-insensitive substring matching, never fails: `"a shiny blue
/// torus"` is a blue torus, `"hello"` is a gray box. Substrings count, so
/// `"reddish"` is red and `"scone"` is a cone.
pub fn derive_object(prompt: &str) -> ObjectSpec {
    let lower = prompt.to_lowercase();
    let color = COLOR_KEYWORDS
        .iter()
        .copied()
        .find(|kw| lower.contains(kw))
        .unwrap_or(DEFAULT_OBJECT_COLOR);
    let shape = SHAPE_KEYWORDS
        .iter()
        .find(|(kw, _)| lower.contains(kw))
        .map(|(_, s)| *s)
        .unwrap_or(Shape::Box);
    ObjectSpec { shape, color }
}
