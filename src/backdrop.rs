//! Windowed backdrop runner.
//!
//! [`Backdrop`] is the batteries-included way to put a particle field on
//! screen: configure with method chaining, then call `.run()` to open a
//! window and drive the field until it is closed.
//!
//! ```ignore
//! use driftnet::{Backdrop, FieldConfig};
//!
//! fn main() -> Result<(), driftnet::BackdropError> {
//!     Backdrop::new()
//!         .with_title("constellation")
//!         .with_size(1280, 720)
//!         .with_config(FieldConfig::default())
//!         .run()
//! }
//! ```
//!
//! The frame loop is the winit redraw cycle: every `RedrawRequested` steps
//! the field once, records and presents the frame, and requests the next
//! redraw. Closing the window exits the event loop, which is the
//! cancellation path; no frame callback outlives the window.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::BackdropError;
use crate::field::{FieldConfig, ParticleField};
use crate::gpu::{Frame, GpuState};
use crate::time::Time;

/// A particle-field backdrop window builder.
pub struct Backdrop {
    title: String,
    width: u32,
    height: u32,
    seed: Option<u64>,
    config: FieldConfig,
}

impl Backdrop {
    /// Create a backdrop with default settings (1280x720, default field).
    pub fn new() -> Self {
        Self {
            title: "driftnet".to_string(),
            width: 1280,
            height: 720,
            seed: None,
            config: FieldConfig::default(),
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fix the spawn seed for a reproducible pool.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the field tuning configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Open the window and run until it is closed.
    ///
    /// Returns an error if the event loop or window cannot be created, or
    /// if the surface cannot provide a drawing context
    /// ([`BackdropError::SurfaceUnavailable`]); there is no silent
    /// fall-back to a dead window.
    pub fn run(self) -> Result<(), BackdropError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Backdrop,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: Option<ParticleField>,
    frame: Frame,
    time: Time,
    startup_error: Option<BackdropError>,
}

impl App {
    fn new(settings: Backdrop) -> Self {
        Self {
            settings,
            window: None,
            gpu: None,
            field: None,
            frame: Frame::new(),
            time: Time::new(),
            startup_error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.startup_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        // The field is sized to the real inner surface, not the requested
        // logical size, so simulation space equals pixel space.
        let size = window.inner_size();
        let field = match self.settings.seed {
            Some(seed) => ParticleField::with_seed(
                size.width as f32,
                size.height as f32,
                self.settings.config.clone(),
                seed,
            ),
            None => ParticleField::new(
                size.width as f32,
                size.height as f32,
                self.settings.config.clone(),
            ),
        };

        match pollster::block_on(GpuState::new(window.clone(), field.particle_count())) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.field = Some(field);
                self.window = Some(window);
            }
            Err(e) => {
                self.startup_error = Some(e.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                // Surface tracks the window; the pool is left alone and
                // stranded particles reflect back in on their own.
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(field) = &mut self.field {
                    field.resize(physical_size.width as f32, physical_size.height as f32);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                // Window coordinates are surface-local: the drawing
                // surface spans the whole window.
                if let Some(field) = &mut self.field {
                    field.set_pointer(Vec2::new(position.x as f32, position.y as f32));
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(gpu), Some(field)) = (&mut self.gpu, &mut self.field) {
                    field.step();
                    field.render(&mut self.frame);

                    match gpu.render(&self.frame) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                            gpu.resize(winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }

                if let Some(window) = &self.window {
                    if self.time.update() {
                        window.set_title(&format!(
                            "{} ({:.0} fps)",
                            self.settings.title,
                            self.time.fps()
                        ));
                    }
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
