use wgpu::util::DeviceExt;

use crate::data_structures::{
    light::{Light, LightKind},
    scene_graph::Scene,
};

/// Upper bound of lights the shader loops over.
pub const MAX_LIGHTS: usize = 8;

pub const KIND_AMBIENT: u32 = 0;
pub const KIND_HEMISPHERE: u32 = 1;
pub const KIND_DIRECTIONAL: u32 = 2;
pub const KIND_POINT: u32 = 3;
pub const KIND_RECT_AREA: u32 = 4;
pub const KIND_SPOT: u32 = 5;

/// One light as seen by `standard.wgsl`. Every vec3 is followed by a scalar
/// so that each row fills 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub kind: u32,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub color: [f32; 3],
    pub cone_cos: f32,
    pub position: [f32; 3],
    pub penumbra_cos: f32,
    pub direction: [f32; 3],
    pub width: f32,
    pub ground_color: [f32; 3],
    pub height: f32,
}

impl From<&Light> for GpuLight {
    fn from(light: &Light) -> Self {
        let mut raw: GpuLight = bytemuck::Zeroable::zeroed();
        raw.intensity = light.intensity();
        raw.color = light.color;
        if let Some(position) = light.position() {
            raw.position = position.into();
        }
        if let Some(direction) = light.direction() {
            raw.direction = direction.into();
        }
        match light.kind {
            LightKind::Ambient => raw.kind = KIND_AMBIENT,
            LightKind::Hemisphere { ground_color } => {
                raw.kind = KIND_HEMISPHERE;
                raw.ground_color = ground_color;
                raw.direction = [0.0, 1.0, 0.0];
            }
            LightKind::Directional { .. } => raw.kind = KIND_DIRECTIONAL,
            LightKind::Point {
                distance, decay, ..
            } => {
                raw.kind = KIND_POINT;
                raw.distance = distance;
                raw.decay = decay;
            }
            LightKind::RectArea { width, height, .. } => {
                raw.kind = KIND_RECT_AREA;
                raw.width = width;
                raw.height = height;
            }
            LightKind::Spot {
                distance,
                angle,
                penumbra,
                decay,
                ..
            } => {
                raw.kind = KIND_SPOT;
                raw.distance = distance;
                raw.decay = decay;
                raw.cone_cos = angle.0.cos();
                raw.penumbra_cos = (angle.0 * (1.0 - penumbra.clamp(0.0, 1.0))).cos();
            }
        }
        raw
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub lights: [GpuLight; MAX_LIGHTS],
    pub count: u32,
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: [u32; 3],
}

impl LightUniform {
    /// Packs the lights of `scene` in scene order.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut uniform: LightUniform = bytemuck::Zeroable::zeroed();
        for (slot, (_, light)) in scene.lights().enumerate() {
            if slot >= MAX_LIGHTS {
                log::warn!(
                    "Only {} lights are supported, {} is ignored.",
                    MAX_LIGHTS,
                    light.name
                );
                continue;
            }
            uniform.lights[slot] = light.into();
            uniform.count += 1;
        }
        uniform
    }
}

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(uniform: LightUniform, device: &wgpu::Device) -> Self {
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, uniform: LightUniform) {
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
