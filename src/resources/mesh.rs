//! Procedural primitives. All of them are centred on the local origin, use
//! counter-clockwise front faces and unit normals, and lay out vertices as
//! (segments + 1) rows so that the seams carry their own texture coordinates.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::{
    model::{Geometry, ModelVertex},
    scene_graph::MeshNode,
};

/// UV sphere.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        // Centre the texture at the poles
        let u_offset = if iy == 0 {
            0.5 / width_segments as f32
        } else if iy == height_segments {
            -0.5 / width_segments as f32
        } else {
            0.0
        };
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;
            let theta = v * PI;
            let position = Vector3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            vertices.push(ModelVertex {
                position: position.into(),
                tex_coords: [u + u_offset, v],
                normal: safe_normalize(position).into(),
            });
            row.push(vertices.len() as u32 - 1);
        }
        grid.push(row);
    }

    let mut indices = Vec::new();
    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            // The first and last rows collapse into the poles
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments as usize - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Geometry {
        name: "sphere".to_string(),
        vertices,
        indices,
    }
}

/// Axis aligned box with one quad per face.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Geometry {
    let mut geometry = Geometry {
        name: "box".to_string(),
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };
    // (u axis, v axis, w axis, u dir, v dir, extent along u, along v, along w)
    let faces: [(usize, usize, usize, f32, f32, f32, f32, f32); 6] = [
        (2, 1, 0, -1.0, -1.0, depth, height, width),
        (2, 1, 0, 1.0, -1.0, depth, height, -width),
        (0, 2, 1, 1.0, 1.0, width, depth, height),
        (0, 2, 1, 1.0, -1.0, width, depth, -height),
        (0, 1, 2, 1.0, -1.0, width, height, depth),
        (0, 1, 2, -1.0, -1.0, width, height, -depth),
    ];
    for (u, v, w, udir, vdir, extent_u, extent_v, extent_w) in faces {
        let start = geometry.vertices.len() as u32;
        for iy in 0..=1u32 {
            let y = iy as f32 * extent_v - extent_v / 2.0;
            for ix in 0..=1u32 {
                let x = ix as f32 * extent_u - extent_u / 2.0;
                let mut position = [0.0f32; 3];
                position[u] = x * udir;
                position[v] = y * vdir;
                position[w] = extent_w / 2.0;
                let mut normal = [0.0f32; 3];
                normal[w] = if extent_w > 0.0 { 1.0 } else { -1.0 };
                geometry.vertices.push(ModelVertex {
                    position,
                    tex_coords: [ix as f32, iy as f32],
                    normal,
                });
            }
        }
        let (a, b, c, d) = (start, start + 2, start + 3, start + 1);
        geometry.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
    geometry
}

/// Ring torus in the XY plane.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);
    let mut vertices =
        Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);

    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * 2.0 * PI;
            let v = j as f32 / radial_segments as f32 * 2.0 * PI;
            let position = Vector3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            vertices.push(ModelVertex {
                position: position.into(),
                tex_coords: [
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ],
                normal: safe_normalize(position - centre).into(),
            });
        }
    }

    let row = tubular_segments + 1;
    let mut indices = Vec::with_capacity((radial_segments * tubular_segments * 6) as usize);
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry {
        name: "torus".to_string(),
        vertices,
        indices,
    }
}

/// Single quad in the XY plane facing +Z.
pub fn plane(width: f32, height: f32) -> Geometry {
    let mut vertices = Vec::with_capacity(4);
    for iy in 0..=1u32 {
        let y = iy as f32 * height - height / 2.0;
        for ix in 0..=1u32 {
            let x = ix as f32 * width - width / 2.0;
            vertices.push(ModelVertex {
                position: [x, -y, 0.0],
                tex_coords: [ix as f32, iy as f32],
                normal: [0.0, 0.0, 1.0],
            });
        }
    }
    Geometry {
        name: "plane".to_string(),
        vertices,
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

fn safe_normalize(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > 0.0 {
        v.normalize()
    } else {
        Vector3::unit_y()
    }
}

/// GPU buffers of one mesh node. The instance buffer holds exactly one
/// [`InstanceRaw`](crate::data_structures::transform::InstanceRaw) and is
/// rewritten every frame.
#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

pub fn upload_mesh(device: &wgpu::Device, mesh: &MeshNode) -> GpuMesh {
    let name = &mesh.geometry.name;
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(&mesh.geometry.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(&mesh.geometry.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Instance Buffer", name)),
        contents: bytemuck::cast_slice(&[mesh.transform.to_raw()]),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    GpuMesh {
        name: name.clone(),
        vertex_buffer,
        index_buffer,
        instance_buffer,
        num_elements: mesh.geometry.indices.len() as u32,
    }
}
