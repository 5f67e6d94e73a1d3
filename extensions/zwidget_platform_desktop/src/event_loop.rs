//! Desktop backend driving winit by pumping
//!
//! The application pulls notifications instead of handing control to winit,
//! so the event loop is pumped from inside `peek` and `wait`. Each pump
//! converts the winit events it sees into raw notifications and queues them.
//! Windows are created from inside a pump callback, as winit requires.

use crate::input;
use crate::surface::DesktopSurface;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent as WinitWindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop as WinitEventLoop};
use winit::keyboard::{ModifiersState, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as WinitWindow, WindowAttributes, WindowId, WindowLevel};
use zwidget_app::Backend;
use zwidget_platform::{
    Delivery, Message, NotificationSource, PlatformError, RawNotification, Result, Size,
    WindowConfig, WindowHandle,
};

/// Pumps allowed for a window creation request to be served
const CREATE_ATTEMPTS: usize = 8;

/// A live native window
struct NativeWindow {
    window: Arc<WinitWindow>,
    cursor: (i32, i32),
}

/// winit callbacks: turns events into notifications
struct PumpHandler {
    windows: FxHashMap<WindowHandle, NativeWindow>,
    ids: FxHashMap<WindowId, WindowHandle>,
    queue: VecDeque<RawNotification>,
    modifiers: ModifiersState,
    /// `MK_*` bits of the mouse buttons currently held
    buttons: usize,
    resumed: bool,
    pending: Option<(WindowHandle, WindowAttributes)>,
    created: Option<std::result::Result<Arc<WinitWindow>, String>>,
}

impl PumpHandler {
    fn new() -> Self {
        Self {
            windows: FxHashMap::default(),
            ids: FxHashMap::default(),
            queue: VecDeque::new(),
            modifiers: ModifiersState::empty(),
            buttons: 0,
            resumed: false,
            pending: None,
            created: None,
        }
    }

    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        if !self.resumed {
            return;
        }
        let Some((handle, attrs)) = self.pending.take() else {
            return;
        };
        let result = event_loop.create_window(attrs).map(Arc::new);
        self.created = Some(match result {
            Ok(window) => {
                self.ids.insert(window.id(), handle);
                self.windows.insert(
                    handle,
                    NativeWindow {
                        window: Arc::clone(&window),
                        cursor: (0, 0),
                    },
                );
                Ok(window)
            }
            Err(err) => Err(err.to_string()),
        });
    }

    fn key_state(&self) -> usize {
        input::key_state(self.modifiers, self.buttons)
    }

    fn push(&mut self, raw: RawNotification) {
        tracing::trace!(handle = %raw.window, message = ?raw.message, "native notification");
        self.queue.push_back(raw);
    }
}

impl ApplicationHandler for PumpHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.resumed = true;
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WinitWindowEvent,
    ) {
        let Some(&handle) = self.ids.get(&window_id) else {
            return;
        };

        match event {
            WinitWindowEvent::CloseRequested => self.push(RawNotification::close(handle)),

            WinitWindowEvent::Resized(size) => {
                let Some(native) = self.windows.get(&handle) else {
                    return;
                };
                let placement = input::size_placement(
                    native.window.is_minimized(),
                    native.window.is_maximized(),
                );
                self.push(RawNotification::size(
                    handle,
                    placement,
                    input::clamp_extent(size.width),
                    input::clamp_extent(size.height),
                ));
            }

            WinitWindowEvent::Focused(focused) => {
                self.push(RawNotification::focus(handle, focused));
            }

            WinitWindowEvent::RedrawRequested => self.push(RawNotification::paint(handle)),

            WinitWindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = input::convert_key_code(code) else {
                    tracing::trace!(?code, "key without a virtual key");
                    return;
                };
                let message = input::key_message(event.state, self.modifiers);
                self.push(RawNotification::key(handle, message, key.virtual_key()));
            }

            WinitWindowEvent::CursorMoved { position, .. } => {
                let point = (position.x.round() as i32, position.y.round() as i32);
                if let Some(native) = self.windows.get_mut(&handle) {
                    native.cursor = point;
                }
                let key_state = self.key_state();
                self.push(RawNotification::mouse_move(handle, point.0, point.1, key_state));
            }

            WinitWindowEvent::MouseInput { state, button, .. } => {
                let bit = input::button_bit(button);
                match state {
                    ElementState::Pressed => self.buttons |= bit,
                    ElementState::Released => self.buttons &= !bit,
                }
                let Some((message, xbutton)) = input::button_message(button, state) else {
                    return;
                };
                let (x, y) = self
                    .windows
                    .get(&handle)
                    .map(|native| native.cursor)
                    .unwrap_or_default();
                let key_state = self.key_state();
                self.push(RawNotification::button(handle, message, xbutton, x, y, key_state));
            }

            WinitWindowEvent::MouseWheel { delta, .. } => {
                let key_state = self.key_state();
                self.push(RawNotification::mouse_wheel(
                    handle,
                    input::wheel_delta(delta),
                    key_state,
                ));
            }

            _ => {}
        }
    }
}

/// Backend for macOS, Windows and Linux (X11 and Wayland)
pub struct DesktopBackend {
    handler: PumpHandler,
    event_loop: WinitEventLoop<()>,
    next_handle: u64,
    quit: Option<i32>,
}

impl DesktopBackend {
    /// Create the backend; only one may exist per process
    pub fn new() -> Result<Self> {
        let event_loop =
            WinitEventLoop::new().map_err(|e| PlatformError::InitFailed(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        Ok(Self {
            handler: PumpHandler::new(),
            event_loop,
            next_handle: 1,
            quit: None,
        })
    }

    /// The winit window behind `handle`
    pub fn winit_window(&self, handle: WindowHandle) -> Option<&Arc<WinitWindow>> {
        self.handler.windows.get(&handle).map(|native| &native.window)
    }

    fn pump(&mut self, timeout: Option<Duration>) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(timeout, &mut self.handler)
        {
            tracing::debug!(code, "winit event loop exited");
            self.quit.get_or_insert(code);
        }
    }

    fn next_queued(&mut self) -> Option<RawNotification> {
        if let Some(raw) = self.handler.queue.pop_front() {
            return Some(raw);
        }
        // Quit is reported only once nothing else is pending
        self.quit.take().map(RawNotification::quit)
    }
}

impl NotificationSource for DesktopBackend {
    fn peek(&mut self) -> Option<RawNotification> {
        if self.handler.queue.is_empty() {
            self.pump(Some(Duration::ZERO));
        }
        self.next_queued()
    }

    fn wait(&mut self) -> Result<Delivery> {
        loop {
            if let Some(raw) = self.next_queued() {
                return Ok(match raw.message {
                    Message::Quit => Delivery::Quit {
                        exit_code: raw.exit_code(),
                    },
                    _ => Delivery::Notification(raw),
                });
            }
            self.pump(None);
        }
    }

    fn dispatch(&mut self, raw: &RawNotification) {
        if raw.message == Message::Destroy {
            tracing::trace!(handle = %raw.window, "native window released");
        }
    }
}

impl Backend for DesktopBackend {
    type Surface = DesktopSurface;

    fn name(&self) -> &str {
        "desktop"
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowHandle> {
        let mut attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable)
            .with_decorations(config.decorations)
            .with_transparent(config.transparent);
        if config.always_on_top {
            attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        let handle = WindowHandle::new(self.next_handle);
        self.next_handle += 1;
        self.handler.pending = Some((handle, attrs));

        for _ in 0..CREATE_ATTEMPTS {
            self.pump(Some(Duration::ZERO));
            if let Some(result) = self.handler.created.take() {
                return match result {
                    Ok(window) => {
                        tracing::debug!(%handle, id = ?window.id(), title = %config.title, "native window created");
                        Ok(handle)
                    }
                    Err(err) => Err(PlatformError::WindowCreation(err)),
                };
            }
        }

        self.handler.pending = None;
        Err(PlatformError::WindowCreation(
            "event loop never became ready for window creation".to_string(),
        ))
    }

    fn create_surface(&mut self, handle: WindowHandle, size: Size) -> Result<DesktopSurface> {
        let window = self
            .winit_window(handle)
            .cloned()
            .ok_or(PlatformError::UnknownWindow(handle.raw()))?;

        let raw = window
            .window_handle()
            .map_err(|e| PlatformError::SurfaceCreation(e.to_string()))?;
        let display_handle = self
            .event_loop
            .display_handle()
            .map_err(|e| PlatformError::SurfaceCreation(e.to_string()))?;
        tracing::debug!(%handle, window = ?raw.as_raw(), display = ?display_handle.as_raw(), "creating surface");

        DesktopSurface::new(self.event_loop.owned_display_handle(), window, size)
    }

    fn destroy_window(&mut self, handle: WindowHandle) {
        let Some(native) = self.handler.windows.remove(&handle) else {
            return;
        };
        self.handler.ids.remove(&native.window.id());
        // The surface keeps its own reference; hide now, close on last drop
        native.window.set_visible(false);
        self.handler.queue.push_back(RawNotification::destroy(handle));
    }

    fn client_size(&self, handle: WindowHandle) -> Size {
        self.winit_window(handle)
            .map(|window| {
                let size = window.inner_size();
                Size::new(
                    i32::from(input::clamp_extent(size.width)),
                    i32::from(input::clamp_extent(size.height)),
                )
            })
            .unwrap_or(Size::ZERO)
    }

    fn request_redraw(&mut self, handle: WindowHandle) {
        if let Some(window) = self.winit_window(handle) {
            window.request_redraw();
        }
    }

    fn post_quit(&mut self, exit_code: i32) {
        self.quit = Some(exit_code);
    }
}

impl std::fmt::Debug for DesktopBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopBackend")
            .field("windows", &self.handler.windows.len())
            .field("pending", &self.handler.queue.len())
            .field("quit", &self.quit)
            .finish_non_exhaustive()
    }
}
