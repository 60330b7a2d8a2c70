//! GPU presentation layer.
//!
//! [`Frame`] implements the [`Painter`] capability by accumulating
//! per-instance data; [`GpuState`] owns the wgpu surface and turns a
//! recorded frame into two instanced draws (discs, then link lines on
//! top). Simulation space equals pixel space through a y-down orthographic
//! projection, so the field needs no knowledge of any of this.

mod circles;
mod lines;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::SurfaceError;
use crate::painter::Painter;

pub use circles::CircleInstance;
pub use lines::LineInstance;

/// Backdrop clear color behind particles and links.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

/// One frame of recorded draw calls.
///
/// The field paints into this through the [`Painter`] trait; the instance
/// vectors are then uploaded verbatim. Capacity is retained across frames,
/// so steady-state recording does not allocate.
#[derive(Default)]
pub struct Frame {
    circles: Vec<CircleInstance>,
    lines: Vec<LineInstance>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded disc instances, in draw order.
    pub fn circles(&self) -> &[CircleInstance] {
        &self.circles
    }

    /// Recorded line instances, in draw order.
    pub fn lines(&self) -> &[LineInstance] {
        &self.lines
    }
}

impl Painter for Frame {
    fn clear(&mut self) {
        self.circles.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32) {
        self.circles.push(CircleInstance {
            center: center.to_array(),
            radius,
            opacity: alpha,
            color: color.to_array(),
        });
    }

    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Vec3, alpha: f32) {
        self.lines.push(LineInstance {
            a: a.to_array(),
            b: b.to_array(),
            color: color.to_array(),
            alpha,
            width,
        });
    }
}

/// GPU resources for one backdrop window.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    circle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    circle_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    circle_capacity: usize,
    line_capacity: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl GpuState {
    /// Bring up the drawing surface for a window.
    ///
    /// `particle_count` fixes the instance buffer sizes for the lifetime
    /// of the state: `n` discs and the worst-case `n(n-1)/2` lines.
    pub async fn new(window: Arc<Window>, particle_count: usize) -> Result<Self, SurfaceError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(SurfaceError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let circle_capacity = particle_count.max(1);
        let line_capacity = (particle_count * particle_count.saturating_sub(1) / 2).max(1);

        let circle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Circle Instance Buffer"),
            size: (circle_capacity * std::mem::size_of::<CircleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Line Instance Buffer"),
            size: (line_capacity * std::mem::size_of::<LineInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniforms = Uniforms {
            view_proj: surface_projection(config.width, config.height).to_cols_array_2d(),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let circle_pipeline =
            circles::create_pipeline(&device, &uniform_bind_group_layout, config.format);
        let line_pipeline =
            lines::create_pipeline(&device, &uniform_bind_group_layout, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            circle_pipeline,
            line_pipeline,
            circle_buffer,
            line_buffer,
            circle_capacity,
            line_capacity,
            uniform_buffer,
            uniform_bind_group,
        })
    }

    /// Match the surface to new window dimensions. Zero-sized windows
    /// (minimized) are ignored; the last valid configuration stays live.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let uniforms = Uniforms {
                view_proj: surface_projection(self.config.width, self.config.height)
                    .to_cols_array_2d(),
            };
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
    }

    /// Upload a recorded frame and present it.
    pub fn render(&mut self, frame: &Frame) -> Result<(), wgpu::SurfaceError> {
        let circle_count = frame.circles().len().min(self.circle_capacity);
        let line_count = frame.lines().len().min(self.line_capacity);

        if circle_count > 0 {
            self.queue.write_buffer(
                &self.circle_buffer,
                0,
                bytemuck::cast_slice(&frame.circles()[..circle_count]),
            );
        }
        if line_count > 0 {
            self.queue.write_buffer(
                &self.line_buffer,
                0,
                bytemuck::cast_slice(&frame.lines()[..line_count]),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if circle_count > 0 {
                render_pass.set_pipeline(&self.circle_pipeline);
                render_pass.set_vertex_buffer(0, self.circle_buffer.slice(..));
                render_pass.draw(0..6, 0..circle_count as u32);
            }

            if line_count > 0 {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                render_pass.draw(0..6, 0..line_count as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Orthographic projection mapping surface coordinates (origin top-left,
/// y down, one unit per pixel) to clip space.
fn surface_projection(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_records_in_order() {
        let mut frame = Frame::new();
        frame.clear();
        frame.fill_circle(Vec2::new(10.0, 20.0), 2.0, Vec3::ONE, 0.5);
        frame.fill_circle(Vec2::new(30.0, 40.0), 3.0, Vec3::ONE, 0.6);
        frame.stroke_line(Vec2::ZERO, Vec2::ONE, 1.0, Vec3::ONE, 0.1);

        assert_eq!(frame.circles().len(), 2);
        assert_eq!(frame.circles()[0].center, [10.0, 20.0]);
        assert_eq!(frame.lines().len(), 1);

        frame.clear();
        assert!(frame.circles().is_empty());
        assert!(frame.lines().is_empty());
    }

    #[test]
    fn test_projection_maps_corners() {
        let proj = surface_projection(800, 600);

        // Top-left pixel maps to clip (-1, 1), bottom-right to (1, -1).
        let tl = proj * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let br = proj * glam::Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((tl.x - (-1.0)).abs() < 1e-6 && (tl.y - 1.0).abs() < 1e-6);
        assert!((br.x - 1.0).abs() < 1e-6 && (br.y - (-1.0)).abs() < 1e-6);
    }
}
