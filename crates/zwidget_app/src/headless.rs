//! Headless backend
//!
//! Runs the application without a window system. Windows are plain handles
//! with a remembered client size, surfaces are [`RecordingSurface`]s, and
//! every backend call that would make a real platform report something
//! posts the matching notification to an in-memory [`ScriptedSource`].

use crate::backend::Backend;
use rustc_hash::FxHashMap;
use zwidget_platform::notification::{SIZE_MAXIMIZED, SIZE_MINIMIZED, SIZE_RESTORED};
use zwidget_platform::{
    Delivery, NotificationSource, PlatformError, RawNotification, Result, ScriptedSource, Size,
    WindowConfig, WindowHandle,
};
use zwidget_render::RecordingSurface;

/// Window placement for [`HeadlessBackend::resize_window`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Restored,
    Minimized,
    Maximized,
}

/// In-memory backend for tests, tools and CI
#[derive(Debug)]
pub struct HeadlessBackend {
    source: ScriptedSource,
    windows: FxHashMap<WindowHandle, Size>,
    next_handle: u64,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            source: ScriptedSource::new(),
            windows: FxHashMap::default(),
            next_handle: 1,
        }
    }

    /// Queue a raw notification as if the platform had reported it
    pub fn post(&mut self, raw: RawNotification) {
        self.source.post(raw);
    }

    /// Change a window's client size and report it
    pub fn resize_window(&mut self, handle: WindowHandle, size: Size, placement: Placement) {
        let Some(current) = self.windows.get_mut(&handle) else {
            return;
        };
        *current = size;
        let placement = match placement {
            Placement::Restored => SIZE_RESTORED,
            Placement::Minimized => SIZE_MINIMIZED,
            Placement::Maximized => SIZE_MAXIMIZED,
        };
        let clamp = |v: i32| v.clamp(0, u16::MAX as i32) as u16;
        self.source.post(RawNotification::size(
            handle,
            placement,
            clamp(size.width),
            clamp(size.height),
        ));
    }

    /// Handles of live windows
    pub fn window_handles(&self) -> Vec<WindowHandle> {
        self.windows.keys().copied().collect()
    }

    /// Notifications not yet pulled
    pub fn pending(&self) -> usize {
        self.source.pending()
    }

    /// Notifications routed so far, in order
    pub fn dispatched(&self) -> &[RawNotification] {
        self.source.dispatched()
    }
}

impl NotificationSource for HeadlessBackend {
    fn peek(&mut self) -> Option<RawNotification> {
        self.source.peek()
    }

    fn wait(&mut self) -> Result<Delivery> {
        self.source.wait()
    }

    fn dispatch(&mut self, raw: &RawNotification) {
        self.source.dispatch(raw);
    }
}

impl Backend for HeadlessBackend {
    type Surface = RecordingSurface;

    fn name(&self) -> &str {
        "headless"
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowHandle> {
        let handle = WindowHandle::new(self.next_handle);
        self.next_handle += 1;
        self.windows.insert(handle, config.client_size());
        tracing::debug!(%handle, title = %config.title, "headless window created");
        Ok(handle)
    }

    fn create_surface(&mut self, handle: WindowHandle, size: Size) -> Result<RecordingSurface> {
        if !self.windows.contains_key(&handle) {
            return Err(PlatformError::UnknownWindow(handle.raw()));
        }
        Ok(RecordingSurface::uninitialized(size))
    }

    fn destroy_window(&mut self, handle: WindowHandle) {
        if self.windows.remove(&handle).is_some() {
            self.source.post(RawNotification::destroy(handle));
        }
    }

    fn client_size(&self, handle: WindowHandle) -> Size {
        self.windows.get(&handle).copied().unwrap_or(Size::ZERO)
    }

    fn request_redraw(&mut self, handle: WindowHandle) {
        if self.windows.contains_key(&handle) {
            self.source.post(RawNotification::paint(handle));
        }
    }

    fn post_quit(&mut self, exit_code: i32) {
        self.source.post_quit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zwidget_platform::Message;

    #[test]
    fn test_handles_are_unique_and_non_null() {
        let mut backend = HeadlessBackend::new();
        let a = backend.create_window(&WindowConfig::default()).unwrap();
        let b = backend.create_window(&WindowConfig::default()).unwrap();
        assert_ne!(a, b);
        assert!(!a.is_null() && !b.is_null());
    }

    #[test]
    fn test_destroy_posts_notification_once() {
        let mut backend = HeadlessBackend::new();
        let handle = backend.create_window(&WindowConfig::default()).unwrap();
        backend.destroy_window(handle);
        backend.destroy_window(handle);

        assert_eq!(backend.peek(), Some(RawNotification::destroy(handle)));
        assert_eq!(backend.peek(), None);
        assert_eq!(backend.client_size(handle), Size::ZERO);
    }

    #[test]
    fn test_surface_for_unknown_window_fails() {
        let mut backend = HeadlessBackend::new();
        let err = backend
            .create_surface(WindowHandle::new(99), Size::new(1, 1))
            .unwrap_err();
        assert_eq!(err, PlatformError::UnknownWindow(99));
    }

    #[test]
    fn test_resize_window_reports_size() {
        let mut backend = HeadlessBackend::new();
        let handle = backend
            .create_window(&WindowConfig::default().size(320, 240))
            .unwrap();
        assert_eq!(backend.client_size(handle), Size::new(320, 240));

        backend.resize_window(handle, Size::new(640, 480), Placement::Maximized);
        assert_eq!(backend.client_size(handle), Size::new(640, 480));

        let raw = backend.peek().unwrap();
        assert_eq!(raw.message, Message::Size);
        assert_eq!(raw.wparam, SIZE_MAXIMIZED);
    }

    #[test]
    fn test_post_quit_is_delivered_by_wait() {
        let mut backend = HeadlessBackend::new();
        backend.post_quit(4);
        assert_eq!(backend.wait(), Ok(Delivery::Quit { exit_code: 4 }));
    }
}
