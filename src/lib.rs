//! scene-viewer
//!
//! A minimal interactive 3D scene viewer on top of wgpu and winit, for native
//! and WASM targets. It shows a sphere, a cube and a torus slowly spinning
//! above a ground plane, lit by six kinds of lights whose intensities can be
//! edited live, with an orbit camera driven by the mouse.
//!
//! High-level modules
//! - `camera`: perspective camera and its uniform
//! - `clock`: elapsed-time sources for the render loop
//! - `config`: TOML configuration of window, camera, controls and lights
//! - `context`: GPU device, surface and the resources the renderer binds
//! - `controls`: orbit controls with inertial damping
//! - `data_structures`: scene graph, transforms, geometry and lights
//! - `flow`: the scene context, the frame loop and the winit host
//! - `panel`: keyboard driven light-intensity panel
//! - `pipelines`: the standard render pipeline and light packing
//! - `render`: the renderer seam and its wgpu implementation
//! - `resources`: procedural meshes and the default scene content
//! - `viewport`: viewport size and device pixel ratio handling
//!

pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod controls;
pub mod data_structures;
pub mod flow;
pub mod panel;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod viewport;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use winit::event::WindowEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    flow::run(config::ViewerConfig::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
