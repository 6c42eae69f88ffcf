//! Drawing the scene.
//!
//! [`Renderer`] is the seam between the frame loop and the GPU: the loop only
//! needs to size the drawing buffer and ask for a frame. [`GpuRenderer`] is the
//! wgpu implementation; tests drive the loop with a recording fake instead.

use std::iter;

use crate::{
    camera::PerspectiveCamera,
    context::Context,
    data_structures::scene_graph::{MeshId, Scene},
    pipelines::light::LightUniform,
    resources::mesh::{GpuMesh, upload_mesh},
    viewport::Viewport,
};

pub trait Renderer {
    /// Sizes the drawing buffer to `round(width * pixel_ratio)` by
    /// `round(height * pixel_ratio)` pixels. `width` and `height` are logical.
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32);

    /// Draws `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct GpuRenderer {
    ctx: Context,
    meshes: Vec<(MeshId, GpuMesh)>,
}

impl GpuRenderer {
    /// Uploads every mesh of `scene`. Meshes added afterwards are not drawn.
    pub fn new(ctx: Context, scene: &Scene) -> Self {
        let meshes = scene
            .meshes()
            .map(|(id, mesh)| (id, upload_mesh(&ctx.device, mesh)))
            .collect::<Vec<_>>();
        log::debug!("Uploaded {} meshes", meshes.len());
        Self { ctx, meshes }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn write_uniforms(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.ctx.camera.write(&self.ctx.queue, camera);
        self.ctx
            .light
            .write(&self.ctx.queue, LightUniform::from_scene(scene));
        for (id, gpu_mesh) in &self.meshes {
            if let Some(mesh) = scene.mesh(*id) {
                self.ctx.queue.write_buffer(
                    &gpu_mesh.instance_buffer,
                    0,
                    bytemuck::cast_slice(&[mesh.transform.to_raw()]),
                );
            }
        }
    }
}

impl Renderer for GpuRenderer {
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        let (width, height) =
            Viewport::new(width, height, pixel_ratio as f64).drawing_buffer_size();
        log::debug!("Drawing buffer resized to {}x{}", width, height);
        self.ctx.resize_surface(width, height);
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()> {
        self.write_uniforms(scene, camera);

        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            // Reconfigure the surface if it's lost or outdated and skip this frame
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.ctx.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the next frame");
                return Ok(());
            }
            Err(e) => return Err(anyhow::anyhow!("Unable to acquire the next frame: {}", e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.ctx.pipeline);
            render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
            render_pass.set_bind_group(1, &self.ctx.light.bind_group, &[]);
            for (id, gpu_mesh) in &self.meshes {
                let Some(mesh) = scene.mesh(*id) else {
                    continue;
                };
                let Some(material) = self.ctx.materials.get(mesh.material.0) else {
                    log::warn!("{} references an unknown material", gpu_mesh.name);
                    continue;
                };
                render_pass.set_bind_group(2, material, &[]);
                render_pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, gpu_mesh.instance_buffer.slice(..));
                render_pass
                    .set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..gpu_mesh.num_elements, 0, 0..1);
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        self.ctx.window.pre_present_notify();
        output.present();
        Ok(())
    }
}
