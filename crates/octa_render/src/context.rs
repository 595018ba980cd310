//! Render context
//!
//! Owns the wgpu surface, device and queue for one window. Created once at
//! startup; every other GPU resource in the crate borrows the device from
//! here, so the context must outlive them all.

use std::fmt;
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Error type for render context creation
#[derive(Debug)]
pub enum ContextError {
    /// The window surface could not be created
    SurfaceCreation(String),
    /// No compatible graphics adapter was found
    AdapterNotFound,
    /// The adapter refused the device request
    DeviceRequest(String),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::SurfaceCreation(msg) => {
                write!(f, "Failed to create window surface: {}", msg)
            }
            ContextError::AdapterNotFound => {
                write!(f, "No compatible graphics adapter found")
            }
            ContextError::DeviceRequest(msg) => {
                write!(f, "Failed to acquire graphics device: {}", msg)
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// WGPU device, queue, and surface management
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context, choosing the present mode from the vsync flag
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window)
            .map_err(|err| ContextError::SurfaceCreation(err.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::AdapterNotFound)?;

        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Render Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|err| ContextError::DeviceRequest(err.to_string()))?;

        let capabilities = surface.get_capabilities(&adapter);
        // The fragment stage writes colors as-is; a non-srgb format keeps
        // the hardware from re-encoding them on present.
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(capabilities.formats[0]);

        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "Render context ready: {}x{}, format {:?}, present mode {:?}",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Reconfigure the surface for a new window size
    ///
    /// Zero-sized updates are ignored (minimized windows report 0x0).
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_not_found_display() {
        let err = ContextError::AdapterNotFound;
        assert!(err.to_string().contains("adapter"));
    }

    #[test]
    fn test_surface_creation_display() {
        let err = ContextError::SurfaceCreation("raw handle unavailable".to_string());
        let msg = err.to_string();
        assert!(msg.contains("surface"));
        assert!(msg.contains("raw handle unavailable"));
    }

    #[test]
    fn test_device_request_display() {
        let err = ContextError::DeviceRequest("limits exceeded".to_string());
        let msg = err.to_string();
        assert!(msg.contains("device"));
        assert!(msg.contains("limits exceeded"));
    }
}
