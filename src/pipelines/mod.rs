//! Render pipelines and the uniform resources they bind.
//!
//! - `basic`: the standard-material pipeline and its material bind group
//! - `light`: packing of the scene's lights into one uniform buffer

pub mod basic;
pub mod light;
