//! Application windows
//!
//! An [`AppWindow`] ties a platform handle to its renderer, its paint
//! callback and its lifecycle flags. The application owns every window
//! strongly; the registry only holds weak references.

use bitflags::bitflags;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use zwidget_platform::{Rect, Size, Window, WindowHandle};
use zwidget_render::{Canvas, DrawSurface, Frame, RenderError, Renderer};

bitflags! {
    /// Window lifecycle flags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowState: u32 {
        const ACTIVE = 1 << 0;
        const VISIBLE = 1 << 1;
        const MINIMIZED = 1 << 2;
        const MAXIMIZED = 1 << 3;
        const FOCUSED = 1 << 4;
        const REGISTERED = 1 << 5;
        const UNREGISTERED = 1 << 6;
        const DESTROYED = 1 << 7;
        const CLOSE_REQUESTED = 1 << 8;
    }
}

/// Paint callback; draws the whole window content
pub type PaintFn = Box<dyn FnMut(&mut dyn Canvas) + Send>;

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A window managed by the application
pub struct AppWindow<S: DrawSurface> {
    handle: WindowHandle,
    title: String,
    state: AtomicU32,
    renderer: Mutex<Renderer<S>>,
    painter: Mutex<Option<PaintFn>>,
    redraw_pending: AtomicBool,
}

impl<S: DrawSurface> AppWindow<S> {
    pub fn new(handle: WindowHandle, title: impl Into<String>, renderer: Renderer<S>) -> Self {
        Self {
            handle,
            title: title.into(),
            state: AtomicU32::new(WindowState::empty().bits()),
            renderer: Mutex::new(renderer),
            painter: Mutex::new(None),
            redraw_pending: AtomicBool::new(false),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> WindowState {
        WindowState::from_bits_truncate(self.state.load(Ordering::Acquire))
    }

    pub fn has_state(&self, flags: WindowState) -> bool {
        self.state().contains(flags)
    }

    pub fn insert_state(&self, flags: WindowState) {
        self.state.fetch_or(flags.bits(), Ordering::AcqRel);
    }

    pub fn remove_state(&self, flags: WindowState) {
        self.state.fetch_and(!flags.bits(), Ordering::AcqRel);
    }

    /// Install the paint callback
    ///
    /// The callback runs while the renderer is locked; it must not call back
    /// into this window.
    pub fn set_painter(&self, painter: impl FnMut(&mut dyn Canvas) + Send + 'static) {
        *lock(&self.painter) = Some(Box::new(painter));
        self.request_redraw();
    }

    pub fn clear_painter(&self) {
        *lock(&self.painter) = None;
    }

    /// Run `f` with exclusive access to the renderer
    pub fn with_renderer<R>(&self, f: impl FnOnce(&mut Renderer<S>) -> R) -> R {
        f(&mut lock(&self.renderer))
    }

    /// Current renderer size
    pub fn size(&self) -> Size {
        lock(&self.renderer).size()
    }

    pub fn needs_redraw(&self) -> bool {
        lock(&self.renderer).needs_redraw()
    }

    /// Schedule a paint notification
    pub fn request_redraw(&self) {
        self.redraw_pending.store(true, Ordering::Release);
    }

    /// Consume a pending redraw request
    pub fn take_redraw_request(&self) -> bool {
        self.redraw_pending.swap(false, Ordering::AcqRel)
    }

    /// Render whatever is dirty through the paint callback
    pub fn paint(&self) -> Result<Frame, RenderError> {
        let mut painter = lock(&self.painter);
        let mut renderer = lock(&self.renderer);
        match painter.as_mut() {
            Some(paint) => renderer.render(|canvas| paint(canvas)),
            None => renderer.render(|_| {}),
        }
    }

    /// Recreate drawing resources at `size` after device loss
    pub fn recreate_device_resources(&self, size: Size) -> Result<(), RenderError> {
        lock(&self.renderer).recreate_device_resources(size)
    }
}

impl<S: DrawSurface> Window for AppWindow<S> {
    fn handle(&self) -> WindowHandle {
        self.handle
    }

    fn invalidate(&self, region: Rect) {
        lock(&self.renderer).invalidate(region);
        self.request_redraw();
    }

    fn resize(&self, size: Size) {
        lock(&self.renderer).resize(size);
        self.request_redraw();
    }
}

impl<S: DrawSurface> std::fmt::Debug for AppWindow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppWindow")
            .field("handle", &self.handle)
            .field("title", &self.title)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zwidget_render::{Color, DrawCommand, RecordingSurface};

    fn window() -> AppWindow<RecordingSurface> {
        let size = Size::new(100, 100);
        AppWindow::new(
            WindowHandle::new(1),
            "test",
            Renderer::new(RecordingSurface::new(size), size),
        )
    }

    #[test]
    fn test_state_flags() {
        let window = window();
        assert_eq!(window.state(), WindowState::empty());

        window.insert_state(WindowState::ACTIVE | WindowState::FOCUSED);
        assert!(window.has_state(WindowState::FOCUSED));

        window.remove_state(WindowState::FOCUSED);
        assert_eq!(window.state(), WindowState::ACTIVE);
    }

    #[test]
    fn test_invalidate_schedules_redraw() {
        let window = window();
        window.paint().unwrap();
        assert!(!window.needs_redraw());

        window.invalidate(Rect::new(0, 0, 10, 10));
        assert!(window.needs_redraw());
        assert!(window.take_redraw_request());
        assert!(!window.take_redraw_request());
    }

    #[test]
    fn test_paint_runs_callback() {
        let window = window();
        window.set_painter(|canvas| canvas.clear(Color::BLUE));
        assert_eq!(window.paint(), Ok(Frame::Full));

        let clears = window.with_renderer(|r| {
            r.surface()
                .count(|c| matches!(c, DrawCommand::Clear(color) if *color == Color::BLUE))
        });
        assert_eq!(clears, 1);
    }

    #[test]
    fn test_resize_goes_to_renderer() {
        let window = window();
        window.resize(Size::new(300, 200));
        assert_eq!(window.size(), Size::new(300, 200));
        assert!(window.take_redraw_request());
    }
}
