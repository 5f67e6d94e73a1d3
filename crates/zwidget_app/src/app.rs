//! The application service object
//!
//! [`Application`] owns the backend, the window table, the registry and the
//! event dispatcher. Every notification the dispatcher pulls is first
//! translated into an event and then run through the window procedure, which
//! keeps window state, renderers and the window table in step with the
//! platform.

use crate::backend::Backend;
use crate::config::{AppConfig, EventMode};
use crate::error::Result;
use crate::window::{AppWindow, WindowState};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use zwidget_platform::notification::{hiword, loword, SIZE_MAXIMIZED, SIZE_MINIMIZED};
use zwidget_platform::{
    ControlFlow, Delivery, Event, EventDispatcher, Message, NotificationSource, PlatformError,
    RawNotification, Size, Window, WindowConfig, WindowHandle, WindowRegistry,
};
use zwidget_render::{DrawSurface, RenderError, Renderer};

/// Registry type used by an application over backend `B`
pub type AppRegistry<B> = WindowRegistry<AppWindow<<B as Backend>::Surface>>;

/// Windows owned by the application plus loop state
struct WindowTable<S: DrawSurface> {
    windows: FxHashMap<WindowHandle, Arc<AppWindow<S>>>,
    registry: Arc<WindowRegistry<AppWindow<S>>>,
    running: bool,
    exit_code: i32,
}

impl<S: DrawSurface> WindowTable<S> {
    fn note_quit(&mut self, exit_code: i32) {
        self.running = false;
        self.exit_code = exit_code;
    }

    /// Platform-side handling of one notification
    fn window_proc<B>(&mut self, backend: &mut B, raw: &RawNotification)
    where
        B: Backend<Surface = S>,
    {
        let Some(window) = self.windows.get(&raw.window).cloned() else {
            return;
        };

        match raw.message {
            Message::Size => {
                let packed = raw.lparam as usize;
                let size = Size::new(loword(packed) as i32, hiword(packed) as i32);
                match raw.wparam {
                    SIZE_MINIMIZED => {
                        window.insert_state(WindowState::MINIMIZED);
                        window.remove_state(WindowState::MAXIMIZED);
                    }
                    SIZE_MAXIMIZED => {
                        window.insert_state(WindowState::MAXIMIZED);
                        window.remove_state(WindowState::MINIMIZED);
                    }
                    _ => window.remove_state(WindowState::MINIMIZED | WindowState::MAXIMIZED),
                }
                if raw.wparam != SIZE_MINIMIZED && !size.is_empty() {
                    window.resize(size);
                }
            }
            Message::Close => {
                tracing::debug!(handle = %raw.window, "close requested");
                window.insert_state(WindowState::CLOSE_REQUESTED);
            }
            Message::SetFocus => window.insert_state(WindowState::FOCUSED),
            Message::KillFocus => window.remove_state(WindowState::FOCUSED),
            Message::Destroy => {
                self.registry.unregister(raw.window);
                self.windows.remove(&raw.window);
                window.remove_state(
                    WindowState::ACTIVE
                        | WindowState::VISIBLE
                        | WindowState::FOCUSED
                        | WindowState::REGISTERED,
                );
                window.insert_state(WindowState::UNREGISTERED | WindowState::DESTROYED);
                tracing::debug!(handle = %raw.window, remaining = self.windows.len(), "window destroyed");

                if self.windows.is_empty() && self.running {
                    tracing::debug!("last window destroyed, posting quit");
                    self.running = false;
                    backend.post_quit(0);
                }
            }
            Message::Paint => Self::paint(&window, backend),
            _ => {}
        }
    }

    fn paint<B>(window: &AppWindow<S>, backend: &mut B)
    where
        B: Backend<Surface = S>,
    {
        match window.paint() {
            Ok(frame) => tracing::trace!(handle = %window.handle(), ?frame, "window painted"),
            Err(RenderError::DeviceLost | RenderError::NotReady) => {
                let size = backend.client_size(window.handle());
                tracing::warn!(handle = %window.handle(), "recreating device resources");
                match window.recreate_device_resources(size) {
                    Ok(()) => window.request_redraw(),
                    Err(err) => {
                        tracing::error!(handle = %window.handle(), error = %err, "device resources could not be recreated")
                    }
                }
            }
            Err(err) => tracing::warn!(handle = %window.handle(), error = %err, "paint failed"),
        }
    }
}

/// Notification source seen by the dispatcher: the backend, with the window
/// procedure run after the backend's own routing
struct Routed<'a, B: Backend> {
    backend: &'a mut B,
    table: &'a mut WindowTable<B::Surface>,
}

impl<B: Backend> NotificationSource for Routed<'_, B> {
    fn peek(&mut self) -> Option<RawNotification> {
        let raw = self.backend.peek()?;
        if raw.message == Message::Quit {
            self.table.note_quit(raw.exit_code());
        }
        Some(raw)
    }

    fn wait(&mut self) -> zwidget_platform::Result<Delivery> {
        let delivery = self.backend.wait()?;
        if let Delivery::Quit { exit_code } = delivery {
            self.table.note_quit(exit_code);
        }
        Ok(delivery)
    }

    fn dispatch(&mut self, raw: &RawNotification) {
        self.backend.dispatch(raw);
        self.table.window_proc(self.backend, raw);
    }
}

/// Application over a window-system backend
pub struct Application<B: Backend> {
    backend: B,
    config: AppConfig,
    table: WindowTable<B::Surface>,
    dispatcher: Arc<EventDispatcher>,
}

impl<B: Backend> Application<B> {
    pub fn new(backend: B, config: AppConfig) -> Self {
        tracing::debug!(app = %config.name, backend = backend.name(), "application created");
        Self {
            backend,
            config,
            table: WindowTable {
                windows: FxHashMap::default(),
                registry: Arc::new(WindowRegistry::new()),
                running: true,
                exit_code: 0,
            },
            dispatcher: Arc::new(EventDispatcher::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    pub fn registry(&self) -> &Arc<AppRegistry<B>> {
        &self.table.registry
    }

    /// False once quit has been requested or observed
    pub fn is_running(&self) -> bool {
        self.table.running
    }

    /// Exit code of the last observed quit request
    pub fn exit_code(&self) -> i32 {
        self.table.exit_code
    }

    pub fn window(&self, handle: WindowHandle) -> Option<Arc<AppWindow<B::Surface>>> {
        self.table.windows.get(&handle).cloned()
    }

    pub fn window_count(&self) -> usize {
        self.table.windows.len()
    }

    pub fn window_handles(&self) -> Vec<WindowHandle> {
        self.table.windows.keys().copied().collect()
    }

    /// Create the window described by the application config
    pub fn create_main_window(&mut self) -> Result<Arc<AppWindow<B::Surface>>> {
        let config = self.config.window.clone();
        self.create_window(&config)
    }

    /// Create a window, its surface and renderer, and register it
    pub fn create_window(&mut self, config: &WindowConfig) -> Result<Arc<AppWindow<B::Surface>>> {
        let handle = self.backend.create_window(config)?;
        let mut size = self.backend.client_size(handle);
        if size.is_empty() {
            size = config.client_size();
        }

        let surface = match self.backend.create_surface(handle, size) {
            Ok(surface) => surface,
            Err(err) => {
                self.backend.destroy_window(handle);
                return Err(err.into());
            }
        };

        let window = Arc::new(AppWindow::new(
            handle,
            config.title.clone(),
            Renderer::new(surface, size),
        ));
        self.table.registry.register(handle, &window);
        self.table.windows.insert(handle, Arc::clone(&window));
        window.insert_state(WindowState::ACTIVE | WindowState::VISIBLE | WindowState::REGISTERED);
        window.request_redraw();

        tracing::debug!(%handle, title = %config.title, width = size.width, height = size.height, "window created");
        Ok(window)
    }

    /// Ask the backend to destroy a window
    ///
    /// The window leaves the table when its destroy notification is
    /// processed.
    pub fn destroy_window(&mut self, handle: WindowHandle) -> Result<()> {
        if !self.table.windows.contains_key(&handle) {
            return Err(PlatformError::UnknownWindow(handle.raw()).into());
        }
        self.backend.destroy_window(handle);
        Ok(())
    }

    /// Request quit; the run loop ends when the quit event comes through
    pub fn quit(&mut self, exit_code: i32) {
        self.backend.post_quit(exit_code);
    }

    fn flush_redraws(&mut self) {
        for window in self.table.windows.values() {
            if window.take_redraw_request() {
                self.backend.request_redraw(window.handle());
            }
        }
    }

    /// Next event without blocking
    pub fn poll_event(&mut self) -> Option<Event> {
        self.flush_redraws();
        let registry = Arc::clone(&self.table.registry);
        let mut source = Routed {
            backend: &mut self.backend,
            table: &mut self.table,
        };
        self.dispatcher.poll(&mut source, &*registry)
    }

    /// Next event, blocking until the backend has something
    ///
    /// `Ok(None)` means a notification was handled that produced no event.
    pub fn wait_event(&mut self) -> Result<Option<Event>> {
        self.flush_redraws();
        let registry = Arc::clone(&self.table.registry);
        let mut source = Routed {
            backend: &mut self.backend,
            table: &mut self.table,
        };
        Ok(self.dispatcher.wait(&mut source, &*registry)?)
    }

    /// Run until a quit event arrives or `handler` returns [`ControlFlow::Exit`]
    ///
    /// Returns the exit code of the quit request, or 0 on `Exit`.
    pub fn run<F>(&mut self, mut handler: F) -> Result<i32>
    where
        F: FnMut(&mut Self, Event) -> ControlFlow,
    {
        tracing::debug!(mode = ?self.config.event_mode, "entering run loop");
        loop {
            let next = match self.config.event_mode {
                EventMode::Wait => self.wait_event()?,
                EventMode::Poll => self.poll_event(),
            };
            let Some(event) = next else {
                if self.config.event_mode == EventMode::Poll {
                    std::thread::yield_now();
                }
                continue;
            };

            if event.is_quit() {
                tracing::debug!(exit_code = self.table.exit_code, "quit event, leaving run loop");
                return Ok(self.table.exit_code);
            }
            if handler(self, event) == ControlFlow::Exit {
                tracing::debug!("handler requested exit");
                return Ok(0);
            }
        }
    }

    /// Destroy every window, drop all queued events and post quit
    pub fn shutdown(&mut self) {
        let windows: Vec<_> = self.table.windows.drain().map(|(_, w)| w).collect();
        for window in &windows {
            self.backend.destroy_window(window.handle());
            window.remove_state(WindowState::ACTIVE | WindowState::VISIBLE | WindowState::REGISTERED);
            window.insert_state(WindowState::UNREGISTERED | WindowState::DESTROYED);
        }
        self.table.registry.clear();
        self.dispatcher.clear();
        if self.table.running {
            self.table.running = false;
            self.backend.post_quit(0);
        }
        tracing::debug!(destroyed = windows.len(), "application shut down");
    }
}
