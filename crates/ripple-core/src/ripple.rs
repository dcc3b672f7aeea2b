//! Ripple records as stored in the shared collection.
//!
//! The wire shape is deliberately loose: every field except the key is
//! optional and decoding never fails on a single bad field. Records are only
//! ever created and deleted, never patched.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const KIND_TEXT: &str = "text";
pub const KIND_OBJECT: &str = "object";
pub const DEFAULT_OBJECT_COLOR: &str = "gray";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Box,
    Sphere,
    Cone,
    Cylinder,
    Torus,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Box,
        Shape::Sphere,
        Shape::Cone,
        Shape::Cylinder,
        Shape::Torus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Sphere => "sphere",
            Shape::Cone => "cone",
            Shape::Cylinder => "cylinder",
            Shape::Torus => "torus",
        }
    }

    /// Case-insensitive name lookup; anything unrecognised is a box.
    pub fn from_name(name: &str) -> Shape {
        match name.trim().to_ascii_lowercase().as_str() {
            "sphere" => Shape::Sphere,
            "cone" => Shape::Cone,
            "cylinder" => Shape::Cylinder,
            "torus" => Shape::Torus,
            _ => Shape::Box,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Store-assigned key of a ripple. The only stable handle for deletion.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RippleId(String);

impl RippleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RippleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RippleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RippleKind {
    Text { text: String },
    Object { shape: Shape, color: String },
}

/// Decoded ripple, as held by the feed and rendered by the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub id: RippleId,
    pub kind: RippleKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub created_at: Option<i64>,
}

impl Ripple {
    /// Lenient decode of one child of a snapshot. Missing or malformed
    /// fields fall back to defaults; a child that is not an object at all
    /// decodes as an empty text ripple at the origin.
    pub fn from_value(id: RippleId, value: &Value) -> Ripple {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or_else(|| {
            log::warn!("[ripple] {} is not an object, using defaults", id);
            &empty
        });
        let text = obj.get("text").and_then(Value::as_str);
        let shape = obj.get("shape").and_then(Value::as_str);
        let is_object = match obj.get("type").and_then(Value::as_str) {
            Some(KIND_OBJECT) => true,
            Some(_) => false,
            None => shape.is_some(),
        };
        let kind = if is_object {
            RippleKind::Object {
                shape: shape.map(Shape::from_name).unwrap_or_default(),
                color: obj
                    .get("color")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_OBJECT_COLOR)
                    .to_string(),
            }
        } else {
            RippleKind::Text {
                text: text.unwrap_or_default().to_string(),
            }
        };
        Ripple {
            id,
            kind,
            position: obj.get("position").map(vec3_lenient).unwrap_or(Vec3::ZERO),
            rotation: obj.get("rotation").map(vec3_lenient).unwrap_or(Vec3::ZERO),
            created_at: obj.get("createdAt").and_then(|v| {
                v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
            }),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            RippleKind::Text { text } => Some(text),
            RippleKind::Object { .. } => None,
        }
    }

    pub fn shape(&self) -> Option<Shape> {
        match &self.kind {
            RippleKind::Object { shape, .. } => Some(*shape),
            RippleKind::Text { .. } => None,
        }
    }
}

// Missing components are zero; non-numeric components are zero.
fn vec3_lenient(v: &Value) -> Vec3 {
    let mut out = [0.0_f32; 3];
    if let Some(arr) = v.as_array() {
        for (slot, item) in out.iter_mut().zip(arr.iter()) {
            *slot = item.as_f64().unwrap_or(0.0) as f32;
        }
    } else if let Some(obj) = v.as_object() {
        for (slot, key) in out.iter_mut().zip(["x", "y", "z"]) {
            *slot = obj.get(key).and_then(Value::as_f64).unwrap_or(0.0) as f32;
        }
    }
    Vec3::from_array(out)
}

/// Wire form written to the store on submit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RippleRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub position: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl RippleRecord {
    pub fn text(text: impl Into<String>, position: Vec3, rotation: Vec3, now_ms: i64) -> Self {
        Self {
            kind: KIND_TEXT.to_string(),
            text: Some(text.into()),
            position: position.to_array(),
            rotation: nonzero(rotation),
            created_at: Some(now_ms),
            ..Default::default()
        }
    }

    pub fn object(shape: Shape, color: &str, position: Vec3, rotation: Vec3, now_ms: i64) -> Self {
        Self {
            kind: KIND_OBJECT.to_string(),
            shape: Some(shape),
            color: Some(color.to_string()),
            position: position.to_array(),
            rotation: nonzero(rotation),
            created_at: Some(now_ms),
            ..Default::default()
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn nonzero(rotation: Vec3) -> Option<[f32; 3]> {
    (rotation != Vec3::ZERO).then(|| rotation.to_array())
}
