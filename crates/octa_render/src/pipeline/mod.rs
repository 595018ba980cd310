//! Rendering pipeline components
//!
//! This module contains the Phong render pipeline and the GPU-side data
//! types it is compiled against.

pub mod phong;
pub mod types;

// Re-export types
pub use types::{SceneUniforms, Vertex};

// Re-export the pipeline
pub use phong::{PhongPipeline, ShaderError, ShaderStage};
