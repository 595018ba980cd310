//! Phong render pipeline
//!
//! Compiles the vertex and fragment stages as separate WGSL modules,
//! checks each one, then links them into a single render pipeline. All
//! compile and link failures surface as [`ShaderError`] so initialization
//! can abort instead of drawing with a broken program.

use std::fmt;

use wgpu::util::DeviceExt;

use super::types::{SceneUniforms, Vertex};
use crate::mesh::Mesh;
use crate::texture::Texture;

/// Vertex stage source, embedded at build time
const VERTEX_SHADER: &str = include_str!("../shaders/phong_vert.wgsl");

/// Fragment stage source, embedded at build time
const FRAGMENT_SHADER: &str = include_str!("../shaders/phong_frag.wgsl");

/// The two programmable stages of the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors from shader compilation or pipeline linking
#[derive(Debug)]
pub enum ShaderError {
    /// A stage failed validation when its module was created
    Compile {
        /// Which stage failed
        stage: ShaderStage,
        /// The validation message from the compiler
        log: String,
    },
    /// The compiled stages failed to link into a render pipeline
    Link {
        /// The validation message from pipeline creation
        log: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{} shader failed to compile: {}", stage, log)
            }
            ShaderError::Link { log } => {
                write!(f, "shader program failed to link: {}", log)
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Render pipeline for the textured, Phong-lit mesh
pub struct PhongPipeline {
    /// The linked render pipeline
    pipeline: wgpu::RenderPipeline,
    /// Bind group layout for the texture + sampler (group 1)
    texture_bind_group_layout: wgpu::BindGroupLayout,
    /// Uniform buffer holding one SceneUniforms block
    uniform_buffer: wgpu::Buffer,
    /// Bind group for the uniforms (group 0)
    uniform_bind_group: wgpu::BindGroup,
    /// Depth texture view
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl PhongPipeline {
    /// Compile both stages and link the render pipeline
    ///
    /// Each stage is created inside a validation error scope; a captured
    /// error means the stage did not compile and its message is the
    /// compiler log. Linking is checked the same way. Stage modules are
    /// dropped as soon as the pipeline exists.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let vertex_module =
            compile_stage(device, ShaderStage::Vertex, "Phong Vertex Shader", VERTEX_SHADER)?;
        let fragment_module = compile_stage(
            device,
            ShaderStage::Fragment,
            "Phong Fragment Shader",
            FRAGMENT_SHADER,
        )?;

        // Group 0: scene uniforms, visible to both stages
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Phong Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Group 1: the color texture and its sampler
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Phong Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Phong Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Link the two stages. A validation error here means the stage
        // interfaces or the vertex layout do not line up.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Phong Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The octahedron's faces wind clockwise seen from outside,
                // so back-face culling would drop all of them.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Link {
                log: error.to_string(),
            });
        }

        // Create uniform buffer
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Phong Uniform Buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Phong Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            pipeline,
            texture_bind_group_layout,
            uniform_buffer,
            uniform_bind_group,
            depth_texture: None,
            depth_size: (0, 0),
        })
    }

    /// Get the vertex buffer layout the pipeline is linked against
    ///
    /// Locations 0/1/2 must match the inputs of phong_vert.wgsl.
    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // tex_coord: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }
    }

    /// Create the bind group that puts a texture on group 1
    pub fn create_texture_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &Texture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Phong Texture Bind Group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        })
    }

    /// Push the whole uniform block for this frame
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Ensure depth texture exists and is the right size
    ///
    /// Zero-sized requests are ignored (minimized windows report 0x0).
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Depth32Float,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture =
                Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Record one frame: clear, bind, draw the full index range
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        texture_bind_group: &wgpu::BindGroup,
        clear_color: wgpu::Color,
    ) {
        let depth_view = self
            .depth_texture
            .as_ref()
            .expect("Depth texture not created. Call ensure_depth_texture first.");

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Phong Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_bind_group(1, texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
        render_pass.set_index_buffer(mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count(), 0, 0..1);
    }
}

/// Create one stage's shader module, treating any validation error as a
/// failed compile
fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(error) => Err(ShaderError::Compile {
            stage,
            log: error.to_string(),
        }),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_buffer_layout_stride() {
        let layout = PhongPipeline::vertex_buffer_layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<Vertex>() as u64);
        assert_eq!(layout.array_stride, 32);
    }

    #[test]
    fn test_vertex_buffer_layout_attributes() {
        // The shader reads position/normal/tex_coord at locations 0/1/2
        let layout = PhongPipeline::vertex_buffer_layout();
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[2].offset, 24);
        assert_eq!(layout.attributes[2].shader_location, 2);
        assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn test_shader_sources_declare_entry_points() {
        assert!(VERTEX_SHADER.contains("fn vs_main"));
        assert!(FRAGMENT_SHADER.contains("fn fs_main"));
    }

    #[test]
    fn test_shader_sources_share_uniform_block() {
        // Both stages declare the same uniform struct at group 0 binding 0
        assert!(VERTEX_SHADER.contains("struct SceneUniforms"));
        assert!(FRAGMENT_SHADER.contains("struct SceneUniforms"));
        assert!(VERTEX_SHADER.contains("@group(0) @binding(0)"));
        assert!(FRAGMENT_SHADER.contains("@group(0) @binding(0)"));
    }

    #[test]
    fn test_fragment_shader_lighting_constants() {
        assert!(FRAGMENT_SHADER.contains("const AMBIENT_STRENGTH: f32 = 0.3;"));
        assert!(FRAGMENT_SHADER.contains("const SPECULAR_STRENGTH: f32 = 0.5;"));
        assert!(FRAGMENT_SHADER.contains("const SHININESS: f32 = 32.0;"));
    }

    #[test]
    fn test_compile_error_display_names_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "unknown identifier".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("vertex shader"));
        assert!(msg.contains("unknown identifier"));

        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "type mismatch".to_string(),
        };
        assert!(err.to_string().contains("fragment shader"));
    }

    #[test]
    fn test_link_error_display() {
        let err = ShaderError::Link {
            log: "no matching entry point".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("link"));
        assert!(msg.contains("no matching entry point"));
    }
}
