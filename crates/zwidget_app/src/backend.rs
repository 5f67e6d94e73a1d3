//! Window-system backend contract

use zwidget_platform::{NotificationSource, Result, Size, WindowConfig, WindowHandle};
use zwidget_render::DrawSurface;

/// A window system the application can run on
///
/// The backend is also the application's notification source: everything
/// it reports about its windows arrives as raw notifications, including the
/// consequences of the calls below (a destroyed window produces a destroy
/// notification, a redraw request produces a paint notification).
pub trait Backend: NotificationSource {
    /// Drawing surface created for each window
    type Surface: DrawSurface;

    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Create a native window and return its handle
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowHandle>;

    /// Create the drawing surface for `handle` at `size`
    fn create_surface(&mut self, handle: WindowHandle, size: Size) -> Result<Self::Surface>;

    /// Destroy the native window; a destroy notification follows
    fn destroy_window(&mut self, handle: WindowHandle);

    /// Current client area size, zero for unknown windows
    fn client_size(&self, handle: WindowHandle) -> Size;

    /// Ask for a paint notification for `handle`
    fn request_redraw(&mut self, handle: WindowHandle);

    /// Ask the notification source to report quit
    fn post_quit(&mut self, exit_code: i32);
}
