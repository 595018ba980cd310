//! Octa - Spinning textured octahedron
//!
//! Opens a window and renders an octahedron with Phong lighting and a
//! mipmapped texture, spinning at a fixed rate until Escape is pressed
//! or the window is closed.

mod config;
mod scene;
mod systems;

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use config::AppConfig;
use scene::SceneState;
use systems::{RenderError, RenderSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<Arc<Window>>,
    render: Option<RenderSystem>,
    scene: SceneState,
    /// Set when GPU setup fails so main can exit with a failure code
    init_failed: bool,
}

impl App {
    fn new() -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let scene = SceneState::new(&config);

        Self {
            config,
            window: None,
            render: None,
            scene,
            init_failed: false,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = Window::default_attributes()
                .with_title(&self.config.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ));

            let window = match event_loop.create_window(window_attributes) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    self.init_failed = true;
                    event_loop.exit();
                    return;
                }
            };

            let render = match RenderSystem::new(
                window.clone(),
                self.config.scene.clone(),
                self.config.rendering.clone(),
                self.config.window.vsync,
            ) {
                Ok(render) => render,
                Err(e) => {
                    log::error!("{}", e);
                    self.init_failed = true;
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.window = Some(window);
            self.render = Some(render);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(KeyCode::Escape) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        event_loop.exit();
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                // Spin the model one increment, then draw
                self.scene.advance_rotation();

                if let Some(render) = &mut self.render {
                    match render.render_frame(&self.scene) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => {
                            let (width, height) = render.size();
                            render.resize(width, height);
                        }
                        Err(RenderError::OutOfMemory) => {
                            log::error!("Out of GPU memory, exiting");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("Surface error: {}", e);
                        }
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Octa");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");

    if app.init_failed {
        std::process::exit(-1);
    }
}
