//! Declarative per-frame scene content handed to the renderer.

use crate::camera::{look_rotation, CameraPose};
use crate::color::parse_color;
use crate::constants::{
    GHOST_LABEL_FONT_SIZE, GHOST_LABEL_OFFSET_Y, GRID_DOT_RADIUS, LABEL_FONT_SIZE,
    LABEL_MAX_WIDTH, LABEL_PICK_RADIUS, OBJECT_PICK_RADIUS,
};
use crate::grid::DotGrid;
use crate::mesh::ghost_scale;
use crate::placement::{ray_sphere, GhostPreview, PickSphere};
use crate::ripple::{Ripple, RippleId, RippleKind, Shape};
use glam::{EulerRot, Quat, Vec3};

pub const LABEL_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Clone, Debug, PartialEq)]
pub enum Drawable {
    Mesh {
        shape: Shape,
        color: [f32; 3],
        opacity: f32,
        scale: f32,
    },
    Label {
        text: String,
        font_size: f32,
        max_width: f32,
        color: [f32; 3],
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneItem {
    /// Present for persisted ripples, absent for the ghost.
    pub id: Option<RippleId>,
    pub position: Vec3,
    pub orientation: Quat,
    pub drawable: Drawable,
}

/// Instanced backdrop dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub position: Vec3,
    pub radius: f32,
    pub gray: f32,
    pub alpha: f32,
}

#[derive(Clone, Debug, Default)]
pub struct SceneFrame {
    pub items: Vec<SceneItem>,
    pub dots: Vec<Dot>,
}

impl SceneFrame {
    pub fn meshes(&self) -> impl Iterator<Item = &SceneItem> {
        self.items
            .iter()
            .filter(|i| matches!(i.drawable, Drawable::Mesh { .. }))
    }

    pub fn labels(&self) -> impl Iterator<Item = &SceneItem> {
        self.items
            .iter()
            .filter(|i| matches!(i.drawable, Drawable::Label { .. }))
    }
}

/// Stored rotation when set, otherwise turned towards the viewer.
fn ripple_orientation(ripple: &Ripple, camera: &CameraPose) -> Quat {
    if ripple.rotation != Vec3::ZERO {
        let r = ripple.rotation;
        Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    } else {
        look_rotation(camera.position - ripple.position)
    }
}

pub fn build_scene(
    ripples: &[Ripple],
    ghost: &GhostPreview,
    camera: &CameraPose,
    grid: Option<&DotGrid>,
) -> SceneFrame {
    let mut items = Vec::with_capacity(ripples.len() + 2);
    for ripple in ripples {
        let orientation = ripple_orientation(ripple, camera);
        let drawable = match &ripple.kind {
            RippleKind::Text { text } => Drawable::Label {
                text: text.clone(),
                font_size: LABEL_FONT_SIZE,
                max_width: LABEL_MAX_WIDTH,
                color: LABEL_COLOR,
            },
            RippleKind::Object { shape, color } => Drawable::Mesh {
                shape: *shape,
                color: parse_color(color),
                opacity: 1.0,
                scale: 1.0,
            },
        };
        items.push(SceneItem {
            id: Some(ripple.id.clone()),
            position: ripple.position,
            orientation,
            drawable,
        });
    }

    if ghost.visible {
        items.push(SceneItem {
            id: None,
            position: ghost.position,
            orientation: ghost.orientation,
            drawable: Drawable::Mesh {
                shape: ghost.shape,
                color: parse_color(ghost.color),
                opacity: ghost.opacity,
                scale: ghost_scale(ghost.shape),
            },
        });
        if !ghost.text.is_empty() {
            items.push(SceneItem {
                id: None,
                position: ghost.position + ghost.orientation * Vec3::new(0.0, GHOST_LABEL_OFFSET_Y, 0.0),
                orientation: ghost.orientation,
                drawable: Drawable::Label {
                    text: ghost.text.clone(),
                    font_size: GHOST_LABEL_FONT_SIZE,
                    max_width: f32::INFINITY,
                    color: LABEL_COLOR,
                },
            });
        }
    }

    let dots = grid
        .map(|g| {
            g.shade(camera.position)
                .map(|d| Dot {
                    position: d.position,
                    radius: GRID_DOT_RADIUS,
                    gray: d.gray,
                    alpha: d.alpha,
                })
                .collect()
        })
        .unwrap_or_default();

    SceneFrame { items, dots }
}

/// Bounding spheres of object ripples, in feed order, for raycast placement.
pub fn object_pick_spheres(ripples: &[Ripple]) -> Vec<PickSphere> {
    ripples
        .iter()
        .filter(|r| matches!(r.kind, RippleKind::Object { .. }))
        .map(|r| PickSphere {
            center: r.position,
            radius: OBJECT_PICK_RADIUS,
        })
        .collect()
}

/// Text ripple under a ray, if its label is the nearest ripple hit.
pub fn pick_label(ripples: &[Ripple], ray_origin: Vec3, ray_dir: Vec3) -> Option<RippleId> {
    ripples
        .iter()
        .filter_map(|r| {
            let radius = match r.kind {
                RippleKind::Text { .. } => LABEL_PICK_RADIUS,
                RippleKind::Object { .. } => OBJECT_PICK_RADIUS,
            };
            ray_sphere(ray_origin, ray_dir, r.position, radius).map(|t| (t, r))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .and_then(|(_, r)| r.text().map(|_| r.id.clone()))
}
