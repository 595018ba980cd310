//! GPU mesh upload
//!
//! Owns the vertex and index buffers for one piece of static geometry.
//! Buffers are written once at creation and released when the mesh drops.

use wgpu::util::DeviceExt;

use crate::geometry::Octahedron;

/// A static indexed mesh on the GPU
pub struct Mesh {
    /// Interleaved vertex buffer (position, normal, tex_coord)
    vertex_buffer: wgpu::Buffer,
    /// Triangle list index buffer, u32 indices
    index_buffer: wgpu::Buffer,
    /// Number of indices to draw
    index_count: u32,
}

impl Mesh {
    /// Upload the octahedron to the GPU
    ///
    /// Requires a live device, so a mesh can only exist inside an
    /// initialized render context.
    pub fn new(device: &wgpu::Device, geometry: &Octahedron) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Octahedron Vertex Buffer"),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Octahedron Index Buffer"),
            contents: bytemuck::cast_slice(geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.index_count() as u32,
        }
    }

    /// The interleaved vertex buffer
    #[inline]
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    /// The u32 index buffer
    #[inline]
    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    /// Number of indices to pass to draw_indexed
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}
