//! Typed event model
//!
//! An [`Event`] is a validated, `Copy` value carrying the originating window
//! and one of four payloads. Malformed payload combinations never produce a
//! deliverable event: the validating constructors collapse them to the
//! sentinel none event, which producers drop instead of enqueueing.

use crate::geometry::Size;
use crate::input::{KeyboardEvent, MouseEvent, MouseEventKind};
use crate::window::WindowHandle;

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue running the event loop
    #[default]
    Continue,
    /// Exit the event loop
    Exit,
}

/// Window event subtype
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    /// Window close was requested (e.g., close button clicked)
    Close,
    /// Window gained keyboard focus
    FocusGained,
    /// Window lost keyboard focus
    FocusLost,
    /// Client area changed size
    Resize,
    /// Window was minimized
    Minimize,
    /// Window was maximized
    Maximize,
    /// Window returned to its normal placement
    Restored,
}

impl WindowEventKind {
    /// Kinds that must carry a non-empty size
    pub const fn carries_size(self) -> bool {
        matches!(
            self,
            WindowEventKind::Resize
                | WindowEventKind::Minimize
                | WindowEventKind::Maximize
                | WindowEventKind::Restored
        )
    }
}

/// Window event payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowEvent {
    kind: WindowEventKind,
    size: Size,
}

impl WindowEvent {
    /// Payload without a size
    pub const fn new(kind: WindowEventKind) -> Self {
        Self {
            kind,
            size: Size::ZERO,
        }
    }

    /// Payload with a size
    pub const fn with_size(kind: WindowEventKind, size: Size) -> Self {
        Self { kind, size }
    }

    pub const fn kind(&self) -> WindowEventKind {
        self.kind
    }

    pub const fn size(&self) -> Size {
        self.size
    }
}

/// Event type tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Sentinel: no event / rejected construction
    None,
    Window,
    Mouse,
    Keyboard,
    Quit,
}

/// Event payload
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventData {
    /// Sentinel payload, never delivered
    #[default]
    None,
    Window(WindowEvent),
    Mouse(MouseEvent),
    Keyboard(KeyboardEvent),
    Quit,
}

/// A typed, validated event
///
/// Only the constructors below can build one, so every non-none event
/// satisfies the payload invariants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Event {
    window: Option<WindowHandle>,
    data: EventData,
}

impl Event {
    /// The sentinel none event
    pub const fn none() -> Self {
        Self {
            window: None,
            data: EventData::None,
        }
    }

    /// Window event; none if the size does not match the kind
    pub fn window(window: Option<WindowHandle>, event: WindowEvent) -> Self {
        let has_size = !event.size().is_empty();
        if event.kind().carries_size() != has_size {
            return Self::none();
        }
        Self {
            window,
            data: EventData::Window(event),
        }
    }

    /// Mouse event; none if scroll carries a position or anything else lacks one
    pub fn mouse(window: Option<WindowHandle>, event: MouseEvent) -> Self {
        let is_scroll = event.kind() == MouseEventKind::Scroll;
        let has_position = event.position().is_some();
        if is_scroll == has_position {
            return Self::none();
        }
        Self {
            window,
            data: EventData::Mouse(event),
        }
    }

    /// Keyboard event; always valid
    pub const fn keyboard(window: Option<WindowHandle>, event: KeyboardEvent) -> Self {
        Self {
            window,
            data: EventData::Keyboard(event),
        }
    }

    /// Quit event; carries no window
    pub const fn quit() -> Self {
        Self {
            window: None,
            data: EventData::Quit,
        }
    }

    /// Originating window, if it resolved when the event was produced
    pub const fn window_handle(&self) -> Option<WindowHandle> {
        self.window
    }

    pub const fn data(&self) -> &EventData {
        &self.data
    }

    pub const fn kind(&self) -> EventKind {
        match self.data {
            EventData::None => EventKind::None,
            EventData::Window(_) => EventKind::Window,
            EventData::Mouse(_) => EventKind::Mouse,
            EventData::Keyboard(_) => EventKind::Keyboard,
            EventData::Quit => EventKind::Quit,
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self.data, EventData::None)
    }

    pub const fn is_quit(&self) -> bool {
        matches!(self.data, EventData::Quit)
    }

    pub const fn as_window(&self) -> Option<&WindowEvent> {
        match &self.data {
            EventData::Window(event) => Some(event),
            _ => None,
        }
    }

    pub const fn as_mouse(&self) -> Option<&MouseEvent> {
        match &self.data {
            EventData::Mouse(event) => Some(event),
            _ => None,
        }
    }

    pub const fn as_keyboard(&self) -> Option<&KeyboardEvent> {
        match &self.data {
            EventData::Keyboard(event) => Some(event),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::input::{Key, MouseButton};

    fn handle() -> Option<WindowHandle> {
        Some(WindowHandle::new(7))
    }

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }

    #[test]
    fn test_default_event_is_none() {
        assert!(Event::default().is_none());
        assert_eq!(Event::default().kind(), EventKind::None);
    }

    #[test]
    fn test_resize_without_size_is_rejected() {
        let event = Event::window(handle(), WindowEvent::new(WindowEventKind::Resize));
        assert!(event.is_none());
    }

    #[test]
    fn test_every_size_kind_requires_size() {
        for kind in [
            WindowEventKind::Resize,
            WindowEventKind::Minimize,
            WindowEventKind::Maximize,
            WindowEventKind::Restored,
        ] {
            assert!(Event::window(handle(), WindowEvent::new(kind)).is_none());
            let sized = WindowEvent::with_size(kind, Size::new(10, 10));
            assert_eq!(Event::window(handle(), sized).kind(), EventKind::Window);
        }
    }

    #[test]
    fn test_close_with_size_is_rejected() {
        let event = Event::window(
            handle(),
            WindowEvent::with_size(WindowEventKind::Close, Size::new(800, 600)),
        );
        assert!(event.is_none());
    }

    #[test]
    fn test_close_without_size_is_valid() {
        let event = Event::window(handle(), WindowEvent::new(WindowEventKind::Close));
        assert_eq!(event.kind(), EventKind::Window);
        assert_eq!(event.window_handle(), handle());
        assert_eq!(
            event.as_window().map(WindowEvent::kind),
            Some(WindowEventKind::Close)
        );
    }

    #[test]
    fn test_focus_events_reject_size() {
        for kind in [WindowEventKind::FocusGained, WindowEventKind::FocusLost] {
            assert!(!Event::window(handle(), WindowEvent::new(kind)).is_none());
            let sized = WindowEvent::with_size(kind, Size::new(1, 1));
            assert!(Event::window(handle(), sized).is_none());
        }
    }

    #[test]
    fn test_scroll_with_position_is_rejected() {
        let bad = MouseEvent::new(
            MouseEventKind::Scroll,
            MouseButton::None,
            Some(Point::new(1, 1)),
            1,
        );
        assert!(Event::mouse(handle(), bad).is_none());
        assert_eq!(
            Event::mouse(handle(), MouseEvent::scroll(1)).kind(),
            EventKind::Mouse
        );
    }

    #[test]
    fn test_positional_mouse_events_require_position() {
        for kind in [
            MouseEventKind::Move,
            MouseEventKind::ButtonPress,
            MouseEventKind::ButtonRelease,
        ] {
            let bad = MouseEvent::new(kind, MouseButton::Left, None, 0);
            assert!(Event::mouse(handle(), bad).is_none());
        }
    }

    #[test]
    fn test_origin_is_a_valid_position() {
        let event = Event::mouse(handle(), MouseEvent::moved(Point::ZERO));
        assert_eq!(event.kind(), EventKind::Mouse);
    }

    #[test]
    fn test_quit_has_no_window() {
        let quit = Event::quit();
        assert!(quit.is_quit());
        assert_eq!(quit.window_handle(), None);
    }

    #[test]
    fn test_keyboard_event_accessors() {
        let event = Event::keyboard(handle(), KeyboardEvent::pressed(Key::Escape));
        assert_eq!(event.as_keyboard().map(|k| k.key()), Some(Key::Escape));
        assert!(event.as_mouse().is_none());
    }
}
