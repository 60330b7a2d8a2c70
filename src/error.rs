//! Error types for driftnet.
//!
//! Construction is the only thing that can fail: if the host cannot
//! provide a drawing surface there is no field to run. The steady-state
//! frame loop has no error paths of its own.

use std::fmt;

/// Reasons the host surface could not produce a drawing context.
#[derive(Debug)]
pub enum SurfaceError {
    /// Failed to create a surface for rendering.
    Creation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Creation(e) => write!(f, "Failed to create drawing surface: {}", e),
            SurfaceError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with Vulkan/Metal/DX12 support."),
            SurfaceError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurfaceError::Creation(e) => Some(e),
            SurfaceError::DeviceCreation(e) => Some(e),
            SurfaceError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for SurfaceError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        SurfaceError::Creation(e)
    }
}

impl From<wgpu::RequestDeviceError> for SurfaceError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        SurfaceError::DeviceCreation(e)
    }
}

/// Errors that can occur while bringing up or running a backdrop window.
#[derive(Debug)]
pub enum BackdropError {
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// The host surface cannot provide a drawing context. Fatal to the
    /// backdrop only; the caller decides whether to carry on without it.
    SurfaceUnavailable(SurfaceError),
}

impl fmt::Display for BackdropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackdropError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            BackdropError::Window(e) => write!(f, "Failed to create window: {}", e),
            BackdropError::SurfaceUnavailable(e) => write!(f, "Drawing surface unavailable: {}", e),
        }
    }
}

impl std::error::Error for BackdropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackdropError::EventLoop(e) => Some(e),
            BackdropError::Window(e) => Some(e),
            BackdropError::SurfaceUnavailable(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for BackdropError {
    fn from(e: winit::error::EventLoopError) -> Self {
        BackdropError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for BackdropError {
    fn from(e: winit::error::OsError) -> Self {
        BackdropError::Window(e)
    }
}

impl From<SurfaceError> for BackdropError {
    fn from(e: SurfaceError) -> Self {
        BackdropError::SurfaceUnavailable(e)
    }
}
