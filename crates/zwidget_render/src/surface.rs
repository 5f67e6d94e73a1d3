//! Drawing contracts
//!
//! [`Canvas`] is the minimal set of primitives a paint callback draws with.
//! [`DrawSurface`] adds the frame and device-resource lifecycle the
//! [`Renderer`](crate::Renderer) drives.

use crate::color::Color;
use crate::error::SurfaceError;
use zwidget_platform::{Point, Rect, Size};

/// Drawing primitives available to paint callbacks
///
/// All drawing is subject to the surface's current clip.
pub trait Canvas {
    /// Current surface size in pixels
    fn size(&self) -> Size;

    /// Fill the whole clip with `color`
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline `rect` with a border `width` pixels thick, drawn inside the rect
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32);

    /// One-pixel line, both endpoints included
    fn draw_line(&mut self, from: Point, to: Point, color: Color);
}

/// A canvas with a frame and device lifecycle
pub trait DrawSurface: Canvas {
    /// Open a frame
    fn begin_draw(&mut self);

    /// Close the frame and present it
    ///
    /// [`SurfaceError::Lost`] means the device went away and every device
    /// resource must be recreated before the next frame.
    fn end_draw(&mut self) -> Result<(), SurfaceError>;

    /// Restrict drawing to `rect` intersected with the current clip
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    /// Resize the backing store
    fn resize(&mut self, size: Size);

    /// Drop device-dependent resources
    fn release_device_resources(&mut self);

    /// (Re)create device-dependent resources at `size`
    fn recreate_device_resources(&mut self, size: Size) -> Result<(), SurfaceError>;

    /// Whether device resources exist
    fn is_ready(&self) -> bool;
}
