//! Camera pose and projection helpers shared by placement, picking and the
//! renderer. Conventions follow a right-handed, Y-up world where the camera
//! looks down its local -Z axis.

use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Position and orientation of the viewer at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `eye` looking towards `target` with world +Y as up.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            position: eye,
            orientation: look_rotation(target - eye),
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Orientation as an XYZ Euler triple (radians).
    pub fn euler_xyz(&self) -> Vec3 {
        let (x, y, z) = self.orientation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }
}

/// Rotation that turns the local -Z axis towards `dir`, keeping +Y up.
/// Degenerate directions (zero or vertical) fall back to a stable basis.
pub fn look_rotation(dir: Vec3) -> Quat {
    let f = dir.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = f.cross(Vec3::Y);
    if right.length_squared() < 1e-8 {
        right = Vec3::X;
    }
    let right = right.normalize();
    let up = right.cross(f);
    Quat::from_mat3(&Mat3::from_cols(right, up, -f)).normalize()
}

/// Perspective lens matching the scene camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Lens {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-3), self.znear, self.zfar)
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.projection_matrix() * pose.view_matrix()
    }
}

/// Normalized device coordinates of a pixel in a `width` x `height` viewport.
#[inline]
pub fn pixel_to_ndc(px: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (2.0 * px.x / width.max(1.0)) - 1.0,
        1.0 - (2.0 * px.y / height.max(1.0)),
    )
}

/// World-space ray through an NDC point. Returns `(origin, direction)`.
pub fn ndc_to_world_ray(pose: &CameraPose, lens: &Lens, ndc: Vec2) -> (Vec3, Vec3) {
    let inv = lens.view_projection(pose).inverse();
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = pose.position;
    let rd = (p1 - ro).normalize_or_zero();
    (ro, rd)
}

/// Project a world point to pixel coordinates. `None` when behind the camera.
/// The third component is the clip-space `w` (view depth).
pub fn world_to_pixel(
    view_proj: &Mat4,
    point: Vec3,
    width: f32,
    height: f32,
) -> Option<Vec3> {
    let clip = *view_proj * point.extend(1.0);
    if clip.w <= 1e-4 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec3::new(
        (ndc.x + 1.0) * 0.5 * width,
        (1.0 - ndc.y) * 0.5 * height,
        clip.w,
    ))
}
