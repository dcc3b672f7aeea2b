//! Where a new ripple lands.
//!
//! Placement is evaluated exactly once, when the user submits, and the
//! result is written to the store unchanged.

use crate::camera::{look_rotation, ndc_to_world_ray, CameraPose, Lens};
use crate::constants::{GHOST_COLOR, GHOST_OPACITY, GROUND_Y, PLACEMENT_DISTANCE};
use crate::ripple::Shape;
use glam::{Quat, Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Vec3,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Rotation stays zero; renderers turn the ripple towards the viewer.
    #[default]
    Zero,
    /// Camera orientation frozen as an Euler triple at submit time.
    CameraSnapshot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementStrategy {
    CameraOffset {
        distance: f32,
        orientation: Orientation,
    },
    Raycast {
        distance: f32,
    },
    Ghost {
        distance: f32,
    },
}

impl Default for PlacementStrategy {
    fn default() -> Self {
        PlacementStrategy::Ghost {
            distance: PLACEMENT_DISTANCE,
        }
    }
}

impl PlacementStrategy {
    pub fn from_name(name: &str) -> Option<PlacementStrategy> {
        let distance = PLACEMENT_DISTANCE;
        match name.to_ascii_lowercase().as_str() {
            "offset" | "camera" => Some(PlacementStrategy::CameraOffset {
                distance,
                orientation: Orientation::Zero,
            }),
            "snapshot" => Some(PlacementStrategy::CameraOffset {
                distance,
                orientation: Orientation::CameraSnapshot,
            }),
            "raycast" | "click" => Some(PlacementStrategy::Raycast { distance }),
            "ghost" | "preview" => Some(PlacementStrategy::Ghost { distance }),
            _ => None,
        }
    }

    pub fn distance(&self) -> f32 {
        match *self {
            PlacementStrategy::CameraOffset { distance, .. }
            | PlacementStrategy::Raycast { distance }
            | PlacementStrategy::Ghost { distance } => distance,
        }
    }

    pub fn uses_ghost(&self) -> bool {
        matches!(self, PlacementStrategy::Ghost { .. })
    }
}

/// Camera position plus its forward direction scaled by `distance`.
#[inline]
pub fn camera_offset(pose: &CameraPose, distance: f32) -> Vec3 {
    pose.position + pose.forward() * distance
}

/// A sphere that raycast placement can land on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickSphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitTarget {
    Ground,
    Mesh(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub target: HitTarget,
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

#[inline]
pub fn ray_ground(ray_origin: Vec3, ray_dir: Vec3, ground_y: f32) -> Option<f32> {
    if ray_dir.y.abs() <= 1e-6 {
        return None;
    }
    let t = (ground_y - ray_origin.y) / ray_dir.y;
    (t >= 0.0).then_some(t)
}

/// Nearest intersection of a ray with the meshes or the ground plane.
pub fn raycast(ray_origin: Vec3, ray_dir: Vec3, meshes: &[PickSphere]) -> Option<RayHit> {
    let mut hits: SmallVec<[RayHit; 8]> = SmallVec::new();
    for (i, m) in meshes.iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, m.center, m.radius) {
            hits.push(RayHit {
                point: ray_origin + ray_dir * t,
                distance: t,
                target: HitTarget::Mesh(i),
            });
        }
    }
    if let Some(t) = ray_ground(ray_origin, ray_dir, GROUND_Y) {
        hits.push(RayHit {
            point: ray_origin + ray_dir * t,
            distance: t,
            target: HitTarget::Ground,
        });
    }
    hits.into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Translucent stand-in for the ripple being composed.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostPreview {
    pub position: Vec3,
    pub orientation: Quat,
    pub shape: Shape,
    pub color: &'static str,
    pub opacity: f32,
    pub text: String,
    pub visible: bool,
}

impl Default for GhostPreview {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            shape: Shape::Box,
            color: GHOST_COLOR,
            opacity: GHOST_OPACITY,
            text: String::new(),
            visible: false,
        }
    }
}

impl GhostPreview {
    /// Called every rendered frame: sit `distance` ahead and face the viewer.
    pub fn track(&mut self, pose: &CameraPose, distance: f32) {
        self.position = camera_offset(pose, distance);
        self.orientation = look_rotation(pose.position - self.position);
    }
}

/// Placement state owned by the scene: the strategy, the last click anchor
/// and the ghost.
#[derive(Clone, Debug, Default)]
pub struct Placer {
    pub strategy: PlacementStrategy,
    pub ghost: GhostPreview,
    anchor: Option<Vec3>,
}

impl Placer {
    pub fn new(strategy: PlacementStrategy) -> Self {
        Self {
            strategy,
            ghost: GhostPreview::default(),
            anchor: None,
        }
    }

    /// Pointer click for raycast placement. A miss clears the anchor so the
    /// next submit falls back to the camera offset.
    pub fn click(
        &mut self,
        pose: &CameraPose,
        lens: &Lens,
        ndc: Vec2,
        meshes: &[PickSphere],
    ) -> Option<RayHit> {
        let (ro, rd) = ndc_to_world_ray(pose, lens, ndc);
        let hit = raycast(ro, rd, meshes);
        self.anchor = hit.map(|h| h.point);
        hit
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    pub fn frame(&mut self, pose: &CameraPose) {
        if self.strategy.uses_ghost() {
            let distance = self.strategy.distance();
            self.ghost.track(pose, distance);
        }
    }

    /// Evaluate the active strategy for a submit happening now.
    pub fn place(&self, pose: &CameraPose) -> Placement {
        match self.strategy {
            PlacementStrategy::CameraOffset {
                distance,
                orientation,
            } => Placement {
                position: camera_offset(pose, distance),
                rotation: match orientation {
                    Orientation::Zero => Vec3::ZERO,
                    Orientation::CameraSnapshot => pose.euler_xyz(),
                },
            },
            PlacementStrategy::Raycast { distance } => Placement {
                position: self
                    .anchor
                    .unwrap_or_else(|| camera_offset(pose, distance)),
                rotation: Vec3::ZERO,
            },
            PlacementStrategy::Ghost { .. } => Placement {
                position: self.ghost.position,
                rotation: Vec3::ZERO,
            },
        }
    }
}
