//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Phong pipeline and octahedron mesh
//! - Texture upload
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use octa_render::{
    context::{ContextError, RenderContext},
    pipeline::{PhongPipeline, ShaderError},
    Mesh, Octahedron, Texture,
};
use crate::config::{RenderingConfig, SceneConfig};
use crate::scene::SceneState;

/// Errors that can occur while constructing the render system
#[derive(Debug)]
pub enum InitError {
    /// GPU context could not be created
    Context(ContextError),
    /// Shader compilation or linking failed
    Shader(ShaderError),
}

impl From<ContextError> for InitError {
    fn from(e: ContextError) -> Self {
        InitError::Context(e)
    }
}

impl From<ShaderError> for InitError {
    fn from(e: ShaderError) -> Self {
        InitError::Shader(e)
    }
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::Context(e) => write!(f, "Failed to initialize rendering: {}", e),
            InitError::Shader(e) => write!(f, "Failed to build pipeline: {}", e),
        }
    }
}

impl std::error::Error for InitError {}

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
///
/// Fields are declared so that GPU resources drop in reverse order of
/// creation, with the context released last.
pub struct RenderSystem {
    texture_bind_group: wgpu::BindGroup,
    /// Keeps the color texture alive for the lifetime of the bind group
    #[allow(dead_code)]
    texture: Texture,
    pipeline: PhongPipeline,
    mesh: Mesh,
    render_config: RenderingConfig,
    context: RenderContext,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// Fails if no GPU context can be established or the shaders do not
    /// build. A missing or unreadable texture is not fatal; rendering
    /// continues with a placeholder.
    pub fn new(
        window: Arc<Window>,
        scene_config: SceneConfig,
        render_config: RenderingConfig,
        vsync: bool,
    ) -> Result<Self, InitError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mesh = Mesh::new(&context.device, &Octahedron::new());

        let mut pipeline = PhongPipeline::new(&context.device, context.config.format)?;

        // Ensure depth texture exists
        pipeline.ensure_depth_texture(
            &context.device,
            context.size.width,
            context.size.height,
        );

        let texture = match Texture::load(
            &context.device,
            &context.queue,
            &scene_config.texture_path,
        ) {
            Ok(texture) => texture,
            Err(e) => {
                log::error!("{}. Using placeholder texture.", e);
                Texture::fallback(&context.device, &context.queue)
            }
        };
        let texture_bind_group = pipeline.create_texture_bind_group(&context.device, &texture);

        Ok(Self {
            texture_bind_group,
            texture,
            pipeline,
            mesh,
            render_config,
            context,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Render a single frame
    pub fn render_frame(&mut self, scene: &SceneState) -> Result<(), RenderError> {
        // Upload the frame's transforms and lighting
        self.pipeline
            .update_uniforms(&self.context.queue, &scene.uniforms());

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Create command encoder
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Render pass
        let bg = &self.render_config.background_color;
        self.pipeline.render(
            &mut encoder,
            &view,
            &self.mesh,
            &self.texture_bind_group,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
