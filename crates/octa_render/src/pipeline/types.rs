//! GPU-compatible data types for the Phong render pipeline
//!
//! These types are designed to match the WGSL shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// A mesh vertex with position, normal and texture coordinates
///
/// The interleaved layout is load-bearing: stride 32 bytes, attribute
/// offsets 0/12/24 at shader locations 0/1/2. The Phong vertex stage is
/// compiled against exactly this layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space (x, y, z)
    pub position: [f32; 3],
    /// Pre-baked unit surface normal
    pub normal: [f32; 3],
    /// Texture coordinates (u, v)
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Scene uniforms for the Phong render pass
/// Layout: 320 bytes total (must match SceneUniforms in phong_vert.wgsl
/// and phong_frag.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Model matrix (64 bytes)
    pub model: [[f32; 4]; 4],
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// Normal matrix, transpose of the inverse of model (64 bytes)
    pub normal: [[f32; 4]; 4],
    /// World-space light position + padding (16 bytes)
    pub light_pos: [f32; 3],
    pub _pad0: f32,
    /// World-space eye position used for the specular term + padding (16 bytes)
    pub view_pos: [f32; 3],
    pub _pad1: f32,
    /// Object base color + padding (16 bytes)
    pub object_color: [f32; 3],
    pub _pad2: f32,
    /// Light color + padding (16 bytes)
    pub light_color: [f32; 3],
    pub _pad3: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        let identity = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self {
            model: identity,
            view: identity,
            projection: identity,
            normal: identity,
            light_pos: [1.5, 1.5, 5.0],
            _pad0: 0.0,
            view_pos: [0.0, 0.0, 3.0],
            _pad1: 0.0,
            object_color: [1.0, 1.0, 1.0],
            _pad2: 0.0,
            light_color: [1.0, 1.0, 1.0],
            _pad3: 0.0,
        }
    }
}
