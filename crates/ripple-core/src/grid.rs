use crate::constants::{GRID_ALPHA_MAX, GRID_FALLOFF};
use glam::Vec3;

/// Backdrop of faint dots on a cubic lattice spanning `[-size, size]` on
/// every axis. Dots fade with distance from the viewer.
#[derive(Clone, Debug, Default)]
pub struct DotGrid {
    size: f32,
    points: Vec<Vec3>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedDot {
    pub position: Vec3,
    pub alpha: f32,
    pub gray: f32,
}

impl DotGrid {
    pub fn new(size: f32, spacing: f32) -> Self {
        if !(size > 0.0 && spacing > 0.0) {
            return Self::default();
        }
        let steps = (2.0 * size / spacing + 1e-4).floor() as i32;
        let coords: Vec<f32> = (0..=steps).map(|k| -size + k as f32 * spacing).collect();
        let mut points = Vec::with_capacity(coords.len().pow(3));
        for &x in &coords {
            for &y in &coords {
                for &z in &coords {
                    points.push(Vec3::new(x, y, z));
                }
            }
        }
        Self { size, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn shade(&self, eye: Vec3) -> impl Iterator<Item = ShadedDot> + '_ {
        self.points.iter().map(move |p| {
            let alpha = dot_alpha(p.distance(eye), self.size);
            ShadedDot {
                position: *p,
                alpha,
                gray: dot_gray(alpha),
            }
        })
    }
}

#[inline]
pub fn dot_alpha(distance: f32, size: f32) -> f32 {
    (1.0 - distance / (size * GRID_FALLOFF)).clamp(0.0, 1.0) * GRID_ALPHA_MAX
}

#[inline]
pub fn dot_gray(alpha: f32) -> f32 {
    0.33 * (alpha + 0.2)
}
