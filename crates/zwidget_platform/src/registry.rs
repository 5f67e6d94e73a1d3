//! Window registry: platform handle to live window
//!
//! The registry holds `Weak` references only. Ownership of windows stays with
//! whoever created them, and a lookup can never hand out a window that has
//! already been dropped: a dead entry reads exactly like a missing one.

use crate::window::{Window, WindowHandle};
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// Resolve a raw handle to a live window identity
///
/// This is the slice of the registry the event dispatcher depends on.
pub trait WindowLookup {
    /// `Some(handle)` when `handle` names a live registered window
    fn resolve(&self, handle: WindowHandle) -> Option<WindowHandle>;
}

/// Lookup that never resolves anything
///
/// Useful when events should be produced with no window identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoWindows;

impl WindowLookup for NoWindows {
    fn resolve(&self, _handle: WindowHandle) -> Option<WindowHandle> {
        None
    }
}

/// Thread-safe map from window handle to window
///
/// Reads run concurrently; inserts and removes are exclusive. Lock poisoning
/// is recovered from rather than propagated, so no operation panics.
pub struct WindowRegistry<W: ?Sized> {
    windows: RwLock<FxHashMap<WindowHandle, Weak<W>>>,
}

impl<W: ?Sized + Window> WindowRegistry<W> {
    pub fn new() -> Self {
        Self {
            windows: RwLock::new(FxHashMap::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<WindowHandle, Weak<W>>> {
        self.windows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<WindowHandle, Weak<W>>> {
        self.windows.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or overwrite the mapping for `handle`
    ///
    /// No-op for the null handle.
    pub fn register(&self, handle: WindowHandle, window: &Arc<W>) {
        if handle.is_null() {
            return;
        }
        let previous = self.write().insert(handle, Arc::downgrade(window));
        if previous.is_some() {
            tracing::debug!(%handle, "window registration replaced");
        } else {
            tracing::trace!(%handle, "window registered");
        }
    }

    /// Remove the mapping for `handle`, if present
    pub fn unregister(&self, handle: WindowHandle) {
        if handle.is_null() {
            return;
        }
        if self.write().remove(&handle).is_some() {
            tracing::trace!(%handle, "window unregistered");
        }
    }

    /// The live window registered under `handle`
    pub fn lookup(&self, handle: WindowHandle) -> Option<Arc<W>> {
        if handle.is_null() {
            return None;
        }
        self.read().get(&handle).and_then(Weak::upgrade)
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.lookup(handle).is_some()
    }

    /// Number of registered windows that are still alive
    pub fn len(&self) -> usize {
        self.read()
            .values()
            .filter(|window| window.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handles of every live registered window
    pub fn handles(&self) -> Vec<WindowHandle> {
        self.read()
            .iter()
            .filter(|(_, window)| window.strong_count() > 0)
            .map(|(handle, _)| *handle)
            .collect()
    }

    /// Snapshot of every live registered window
    pub fn windows(&self) -> Vec<Arc<W>> {
        self.read().values().filter_map(Weak::upgrade).collect()
    }

    /// Drop entries whose windows no longer exist
    pub fn prune(&self) -> usize {
        let mut windows = self.write();
        let before = windows.len();
        windows.retain(|_, window| window.strong_count() > 0);
        before - windows.len()
    }

    pub fn clear(&self) {
        self.write().clear();
    }
}

impl<W: ?Sized + Window> Default for WindowRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ?Sized + Window> WindowLookup for WindowRegistry<W> {
    fn resolve(&self, handle: WindowHandle) -> Option<WindowHandle> {
        self.contains(handle).then_some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};
    use std::sync::Mutex;
    use std::thread;

    struct TestWindow {
        handle: WindowHandle,
        invalidated: Mutex<Vec<Rect>>,
    }

    impl TestWindow {
        fn new(raw: u64) -> Arc<Self> {
            Arc::new(Self {
                handle: WindowHandle::new(raw),
                invalidated: Mutex::new(Vec::new()),
            })
        }
    }

    impl Window for TestWindow {
        fn handle(&self) -> WindowHandle {
            self.handle
        }

        fn invalidate(&self, region: Rect) {
            self.invalidated.lock().unwrap().push(region);
        }

        fn resize(&self, _size: Size) {}
    }

    #[test]
    fn test_register_lookup_unregister() {
        let registry = WindowRegistry::new();
        let window = TestWindow::new(1);
        let handle = window.handle();

        registry.register(handle, &window);
        let found = registry.lookup(handle).expect("registered window");
        assert!(Arc::ptr_eq(&found, &window));

        registry.unregister(handle);
        assert!(registry.lookup(handle).is_none());
    }

    #[test]
    fn test_unknown_handle_is_not_found() {
        let registry: WindowRegistry<TestWindow> = WindowRegistry::new();
        assert!(registry.lookup(WindowHandle::new(42)).is_none());
        registry.unregister(WindowHandle::new(42));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_null_handle_is_ignored() {
        let registry = WindowRegistry::new();
        let window = TestWindow::new(1);
        registry.register(WindowHandle::NULL, &window);
        assert!(registry.is_empty());
        assert!(registry.lookup(WindowHandle::NULL).is_none());
    }

    #[test]
    fn test_dropped_window_is_never_returned() {
        let registry = WindowRegistry::new();
        let window = TestWindow::new(3);
        registry.register(window.handle(), &window);
        drop(window);

        assert!(registry.lookup(WindowHandle::new(3)).is_none());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.prune(), 1);
    }

    #[test]
    fn test_register_overwrites() {
        let registry = WindowRegistry::new();
        let first = TestWindow::new(5);
        let second = TestWindow::new(5);
        registry.register(WindowHandle::new(5), &first);
        registry.register(WindowHandle::new(5), &second);

        let found = registry.lookup(WindowHandle::new(5)).unwrap();
        assert!(Arc::ptr_eq(&found, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_resolves_identity() {
        let registry = WindowRegistry::new();
        let window = TestWindow::new(9);
        registry.register(window.handle(), &window);
        assert_eq!(
            registry.resolve(WindowHandle::new(9)),
            Some(WindowHandle::new(9))
        );
        assert_eq!(registry.resolve(WindowHandle::new(10)), None);
    }

    #[test]
    fn test_trait_object_registry() {
        let registry: WindowRegistry<dyn Window> = WindowRegistry::new();
        let window: Arc<dyn Window> = TestWindow::new(11);
        registry.register(window.handle(), &window);
        registry
            .lookup(WindowHandle::new(11))
            .unwrap()
            .invalidate(Rect::new(0, 0, 1, 1));
    }

    #[test]
    fn test_concurrent_access() {
        let registry = Arc::new(WindowRegistry::<TestWindow>::new());
        let windows: Vec<_> = (1..=64).map(TestWindow::new).collect();

        let writers: Vec<_> = windows
            .chunks(16)
            .map(|chunk| {
                let registry = Arc::clone(&registry);
                let chunk = chunk.to_vec();
                thread::spawn(move || {
                    for window in &chunk {
                        registry.register(window.handle(), window);
                    }
                    for window in &chunk {
                        assert!(registry.lookup(window.handle()).is_some());
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(registry.len(), 64);
    }
}
