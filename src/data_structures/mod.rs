//! Viewer data structures: geometry, materials, lights, transforms and the scene.
//!
//! - `model` contains vertex, geometry and material definitions
//! - `light` holds the light types and the light rig
//! - `transform` holds per-node transformation data and its GPU layout
//! - `scene_graph` owns every node of the scene
//! - `texture` wraps the depth buffer

pub mod light;
pub mod model;
pub mod scene_graph;
pub mod texture;
pub mod transform;
