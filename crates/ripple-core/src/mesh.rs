//! Procedural meshes for the five ripple shapes.
//!
//! Sizes match the scene's object meshes: box 1x1x1, sphere r 0.75,
//! cone r 0.7 h 1.2, cylinder r 0.5 h 1.2, torus R 0.5 r 0.2 (in the XY
//! plane). All are centred on the origin with outward per-vertex normals.

use crate::ripple::Shape;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push(&mut self, p: Vec3, n: Vec3) -> u32 {
        self.vertices.push(Vertex {
            position: p.to_array(),
            normal: n.normalize_or_zero().to_array(),
        });
        (self.vertices.len() - 1) as u32
    }

    fn tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Radius of the smallest origin-centred sphere containing the mesh.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| Vec3::from_array(v.position).length())
            .fold(0.0, f32::max)
    }
}

pub fn shape_mesh(shape: Shape) -> MeshData {
    match shape {
        Shape::Box => box_mesh(1.0),
        Shape::Sphere => sphere_mesh(0.75, 32, 32),
        Shape::Cone => frustum_mesh(0.0, 0.7, 1.2, 32),
        Shape::Cylinder => frustum_mesh(0.5, 0.5, 1.2, 32),
        Shape::Torus => torus_mesh(0.5, 0.2, 16, 100),
    }
}

/// Uniform scale that turns an object mesh into the smaller ghost version.
pub fn ghost_scale(shape: Shape) -> f32 {
    match shape {
        Shape::Sphere => 0.5 / 0.75,
        Shape::Cone => 0.5 / 0.7,
        _ => 1.0,
    }
}

pub fn box_mesh(size: f32) -> MeshData {
    let h = size * 0.5;
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let c = n * h;
        let a = mesh.push(c - u * h - v * h, n);
        let b = mesh.push(c + u * h - v * h, n);
        let d = mesh.push(c + u * h + v * h, n);
        let e = mesh.push(c - u * h + v * h, n);
        mesh.tri(a, b, d);
        mesh.tri(a, d, e);
    }
    mesh
}

pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let cols = width_segments.max(3);
    let rows = height_segments.max(2);
    for i in 0..=rows {
        let theta = i as f32 / rows as f32 * PI;
        for j in 0..=cols {
            let phi = j as f32 / cols as f32 * TAU;
            let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            mesh.push(n * radius, n);
        }
    }
    let stride = cols + 1;
    for i in 0..rows {
        for j in 0..cols {
            let a = i * stride + j;
            let b = a + stride;
            mesh.tri(a, b, a + 1);
            mesh.tri(a + 1, b, b + 1);
        }
    }
    mesh
}

/// Capped frustum along Y. A zero top radius makes a cone.
pub fn frustum_mesh(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let segs = segments.max(3);
    let hh = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(1e-6);

    let side_start = mesh.vertices.len() as u32;
    for j in 0..=segs {
        let phi = j as f32 / segs as f32 * TAU;
        let (s, c) = phi.sin_cos();
        let n = Vec3::new(c, slope, s);
        mesh.push(Vec3::new(radius_top * c, hh, radius_top * s), n);
        mesh.push(Vec3::new(radius_bottom * c, -hh, radius_bottom * s), n);
    }
    for j in 0..segs {
        let top = side_start + j * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        mesh.tri(top, next_top, bottom);
        mesh.tri(bottom, next_top, next_bottom);
    }

    for (radius, y, n) in [(radius_top, hh, Vec3::Y), (radius_bottom, -hh, Vec3::NEG_Y)] {
        if radius <= 0.0 {
            continue;
        }
        let center = mesh.push(Vec3::new(0.0, y, 0.0), n);
        let ring_start = mesh.vertices.len() as u32;
        for j in 0..=segs {
            let phi = j as f32 / segs as f32 * TAU;
            let (s, c) = phi.sin_cos();
            mesh.push(Vec3::new(radius * c, y, radius * s), n);
        }
        for j in 0..segs {
            let a = ring_start + j;
            if y > 0.0 {
                mesh.tri(center, a + 1, a);
            } else {
                mesh.tri(center, a, a + 1);
            }
        }
    }
    mesh
}

pub fn torus_mesh(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    for i in 0..=radial {
        let v = i as f32 / radial as f32 * TAU;
        for j in 0..=tubular {
            let u = j as f32 / tubular as f32 * TAU;
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            mesh.push(p, p - center);
        }
    }
    let stride = tubular + 1;
    for i in 0..radial {
        for j in 0..tubular {
            let a = i * stride + j;
            let b = a + stride;
            mesh.tri(a, b, a + 1);
            mesh.tri(a + 1, b, b + 1);
        }
    }
    mesh
}
