//! Error types
//!
//! Geometry and scene construction cannot fail; everything here comes from
//! the GPU, the windowing system or an invalid time reading.

use thiserror::Error;

/// Failures while bringing up or driving the renderer and window
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("unrecoverable surface error: {0}")]
    Surface(wgpu::SurfaceError),

    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// A time reading that doesn't fit a 12-hour dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("hour {0} out of range (0-23)")]
    HourOutOfRange(u32),

    #[error("minute {0} out of range (0-59)")]
    MinuteOutOfRange(u32),

    #[error("second {0} out of range (0-59)")]
    SecondOutOfRange(u32),
}
