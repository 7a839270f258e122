//! Error types for the crate edges
//!
//! The simulation itself never fails; errors only come from loading
//! configuration and from the GPU surface.

/// Errors from parsing or validating a [`crate::SimConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("speed range is inverted: min {min} > max {max}")]
    InvertedSpeedRange { min: f32, max: f32 },
    #[error("speed bound must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),
    #[error("bubble radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
    #[error("collision force must be finite, got {0}")]
    InvalidForce(f32),
    #[error("damping must be finite and non-negative, got {0}")]
    InvalidDamping(f32),
    #[error("entity count must be at least 1")]
    EmptyScene,
}

/// Errors from setting up the GPU or presenting a frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("renderer not ready")]
    NotReady,
}
