//! Rendering library for the textured octahedron harness
//!
//! This crate provides the wgpu-based rendering stack: the device/surface
//! context, the fixed octahedron geometry, texture loading with mip
//! generation, and the two-stage Phong pipeline.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`geometry::Octahedron`] - the fixed six-vertex mesh data
//! - [`mesh::Mesh`] - vertex/index buffers on the GPU
//! - [`texture::Texture`] - image decode, upload, mip chain, sampler state
//! - [`pipeline::PhongPipeline`] - two-stage shader pipeline with lighting
//!
//! Resource creation order matters: the context first, then mesh, then
//! pipeline, then texture. Owners declare their fields so that Drop
//! releases later-created resources first, the context last.

pub mod context;
pub mod geometry;
pub mod lighting;
pub mod mesh;
pub mod mipmap;
pub mod pipeline;
pub mod texture;

// Re-export the types the frame driver works with
pub use context::{ContextError, RenderContext};
pub use geometry::Octahedron;
pub use mesh::Mesh;
pub use pipeline::{PhongPipeline, SceneUniforms, ShaderError, ShaderStage, Vertex};
pub use texture::{Texture, TextureError};
