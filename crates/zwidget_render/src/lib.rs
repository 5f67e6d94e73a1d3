//! zwidget Rendering
//!
//! The back half of the zwidget pipeline: damage accumulates in a
//! [`DirtyRegionTracker`], and a [`Renderer`] turns it into frames on a
//! [`DrawSurface`], repainting only the regions that changed.
//!
//! # Surfaces
//!
//! - [`PixelSurface`] - CPU framebuffer with a clip stack
//! - [`RecordingSurface`] - records [`DrawCommand`]s; used for headless runs
//!   and tests
//!
//! # Example
//!
//! ```
//! use zwidget_platform::{Rect, Size};
//! use zwidget_render::prelude::*;
//!
//! let size = Size::new(64, 64);
//! let mut renderer = Renderer::new(PixelSurface::new(size), size);
//! renderer.render(|canvas| canvas.clear(Color::WHITE)).unwrap();
//!
//! renderer.invalidate(Rect::new(8, 8, 16, 16));
//! let frame = renderer
//!     .render(|canvas| canvas.fill_rect(Rect::new(0, 0, 64, 64), Color::BLUE))
//!     .unwrap();
//! assert_eq!(frame, Frame::Partial(1));
//! ```

mod color;
pub mod dirty;
mod error;
mod pixel;
mod recording;
mod renderer;
mod surface;

pub use color::Color;
pub use dirty::{DirtyRegionTracker, MAX_DIRTY_REGIONS};
pub use error::{RenderError, Result, SurfaceError};
pub use pixel::PixelSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{Frame, RenderState, Renderer};
pub use surface::{Canvas, DrawSurface};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::dirty::DirtyRegionTracker;
    pub use crate::error::{RenderError, SurfaceError};
    pub use crate::pixel::PixelSurface;
    pub use crate::recording::{DrawCommand, RecordingSurface};
    pub use crate::renderer::{Frame, RenderState, Renderer};
    pub use crate::surface::{Canvas, DrawSurface};
}
