use glam::{Mat4, Quat, Vec3};
use ripple_core::mesh::{shape_mesh, sphere_mesh, MeshData};
use ripple_core::scene::{Drawable, SceneFrame};
use ripple_core::Shape;
use wgpu::util::DeviceExt;

use crate::constants::DOT_SEGMENTS;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: 1 lit, 0 flat.
    pub params: [f32; 4],
}

impl InstanceRaw {
    fn new(position: Vec3, orientation: Quat, scale: f32, color: [f32; 4], lit: bool) -> Self {
        Self {
            model: Mat4::from_scale_rotation_translation(Vec3::splat(scale), orientation, position)
                .to_cols_array_2d(),
            color,
            params: [if lit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

pub struct GpuMesh {
    pub vertex_buf: wgpu::Buffer,
    pub index_buf: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buf,
            index_buf,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// One mesh per shape (indexed by `Shape::index`) plus the backdrop dot.
pub struct MeshLibrary {
    pub shapes: Vec<GpuMesh>,
    pub dot: GpuMesh,
}

impl MeshLibrary {
    pub fn new(device: &wgpu::Device) -> Self {
        let shapes = Shape::ALL
            .iter()
            .map(|s| GpuMesh::upload(device, s.as_str(), &shape_mesh(*s)))
            .collect();
        let dot = GpuMesh::upload(
            device,
            "dot",
            &sphere_mesh(1.0, DOT_SEGMENTS, DOT_SEGMENTS),
        );
        Self { shapes, dot }
    }
}

/// Which mesh a draw range uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshRef {
    Shape(Shape),
    Dot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawRange {
    pub mesh: MeshRef,
    pub instances: std::ops::Range<u32>,
    pub translucent: bool,
}

/// All instances of a frame in one buffer, grouped into draw ranges:
/// opaque shapes first, then dots, then translucent shapes.
#[derive(Default)]
pub struct Batches {
    pub instances: Vec<InstanceRaw>,
    pub ranges: Vec<DrawRange>,
}

pub fn batch(frame: &SceneFrame) -> Batches {
    let mut opaque: [Vec<InstanceRaw>; Shape::ALL.len()] = std::array::from_fn(|_| Vec::new());
    let mut translucent: [Vec<InstanceRaw>; Shape::ALL.len()] = std::array::from_fn(|_| Vec::new());
    for item in frame.meshes() {
        if let Drawable::Mesh {
            shape,
            color,
            opacity,
            scale,
        } = &item.drawable
        {
            let raw = InstanceRaw::new(
                item.position,
                item.orientation,
                *scale,
                [color[0], color[1], color[2], *opacity],
                true,
            );
            if *opacity < 1.0 {
                translucent[shape.index()].push(raw);
            } else {
                opaque[shape.index()].push(raw);
            }
        }
    }
    let dots: Vec<InstanceRaw> = frame
        .dots
        .iter()
        .filter(|d| d.alpha > 0.0)
        .map(|d| {
            InstanceRaw::new(
                d.position,
                Quat::IDENTITY,
                d.radius,
                [d.gray, d.gray, d.gray, d.alpha],
                false,
            )
        })
        .collect();

    let mut out = Batches::default();
    let mut push = |mesh: MeshRef, list: Vec<InstanceRaw>, translucent: bool| {
        if list.is_empty() {
            return;
        }
        let start = out.instances.len() as u32;
        out.instances.extend(list);
        out.ranges.push(DrawRange {
            mesh,
            instances: start..out.instances.len() as u32,
            translucent,
        });
    };
    for (shape, list) in Shape::ALL.iter().zip(opaque) {
        push(MeshRef::Shape(*shape), list, false);
    }
    push(MeshRef::Dot, dots, true);
    for (shape, list) in Shape::ALL.iter().zip(translucent) {
        push(MeshRef::Shape(*shape), list, true);
    }
    out
}
