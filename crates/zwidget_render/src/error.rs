//! Render error types

use thiserror::Error;

/// Failures reported by a drawing surface at the end of a frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The device behind the surface is gone; resources must be recreated
    #[error("Drawing device lost")]
    Lost,

    /// The frame could not be completed, but the device is still usable
    #[error("Draw failed: {0}")]
    Draw(String),
}

/// Renderer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No device resources; recreate them before drawing
    #[error("Renderer not ready: device resources are not created")]
    NotReady,

    /// `begin_draw` while a frame is already open
    #[error("A frame is already being drawn")]
    AlreadyDrawing,

    /// The device was lost at the end of the frame
    #[error("Drawing device lost; resources released")]
    DeviceLost,

    /// The frame failed for another reason; dirty regions were kept
    #[error("Frame failed: {0}")]
    Draw(String),
}

impl From<SurfaceError> for RenderError {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::Lost => RenderError::DeviceLost,
            SurfaceError::Draw(message) => RenderError::Draw(message),
        }
    }
}

/// Result type for render operations
pub type Result<T> = std::result::Result<T, RenderError>;
