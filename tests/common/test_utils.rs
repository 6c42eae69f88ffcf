#![allow(dead_code)]

use scene_viewer::{
    camera::PerspectiveCamera,
    clock::Clock,
    config::ViewerConfig,
    data_structures::scene_graph::Scene,
    flow::{FrameScheduler, SceneContext},
    render::Renderer,
};

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: f32,
    pub reads: u32,
}

impl ManualClock {
    pub fn at(now: f32) -> Self {
        Self { now, reads: 0 }
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&mut self) -> f32 {
        self.reads += 1;
        self.now
    }
}

/// What a [`RecordingRenderer`] saw on one render call.
#[derive(Clone, Debug)]
pub struct Frame {
    pub camera: PerspectiveCamera,
    pub light_intensities: Vec<f32>,
    pub mesh_rotations: Vec<[f32; 3]>,
}

/// Renderer that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub sizes: Vec<(u32, u32, f32)>,
    pub frames: Vec<Frame>,
    pub fail: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Drawing buffer size implied by the last `set_size` call.
    pub fn drawing_buffer(&self) -> Option<(u32, u32)> {
        self.sizes.last().map(|(w, h, ratio)| {
            (
                (*w as f32 * ratio).round() as u32,
                (*h as f32 * ratio).round() as u32,
            )
        })
    }
}

impl Renderer for RecordingRenderer {
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.sizes.push((width, height, pixel_ratio));
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("device lost");
        }
        self.frames.push(Frame {
            camera: camera.clone(),
            light_intensities: scene.lights().map(|(_, l)| l.intensity()).collect(),
            mesh_rotations: scene
                .meshes()
                .map(|(_, m)| m.transform.rotation.into())
                .collect(),
        });
        Ok(())
    }
}

/// Counts frame requests.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    pub requests: u32,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

/// A scene context with the default configuration on an 800x600 viewport.
pub fn default_context() -> SceneContext {
    SceneContext::new(&ViewerConfig::default(), 800, 600, 1.0)
}
