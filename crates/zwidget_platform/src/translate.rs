//! Notification → event translation
//!
//! Pure mapping from one [`RawNotification`] to one [`Event`]. Anything the
//! pipeline does not model (destroy, paint, unknown messages) and anything
//! that fails event validation comes out as the none event.

use crate::event::{Event, WindowEvent, WindowEventKind};
use crate::geometry::{Point, Size};
use crate::input::{
    Key, KeyEventKind, KeyboardEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crate::notification::{
    hiword, loword, wheel_delta_from_wparam, x_from_lparam, y_from_lparam, Message,
    RawNotification, MK_CONTROL, MK_SHIFT, SIZE_MAXIMIZED, SIZE_MINIMIZED, WHEEL_DELTA, XBUTTON1,
};
use crate::window::WindowHandle;

/// Translate one notification
///
/// `window` is the already-resolved identity of the target window, or
/// `None` when the handle did not resolve.
pub fn translate(window: Option<WindowHandle>, raw: &RawNotification) -> Event {
    match raw.message {
        Message::Close => Event::window(window, WindowEvent::new(WindowEventKind::Close)),
        Message::SetFocus => Event::window(window, WindowEvent::new(WindowEventKind::FocusGained)),
        Message::KillFocus => Event::window(window, WindowEvent::new(WindowEventKind::FocusLost)),
        Message::Size => translate_size(window, raw),
        Message::MouseMove => Event::mouse(
            window,
            MouseEvent::moved(position(raw)).with_modifiers(modifiers(raw.wparam)),
        ),
        Message::MouseWheel => {
            // integer division truncates toward zero
            let notches = wheel_delta_from_wparam(raw.wparam) / WHEEL_DELTA;
            Event::mouse(
                window,
                MouseEvent::scroll(notches).with_modifiers(modifiers(raw.wparam)),
            )
        }
        Message::LButtonDown
        | Message::RButtonDown
        | Message::MButtonDown
        | Message::XButtonDown => translate_button(window, raw, MouseEventKind::ButtonPress),
        Message::LButtonUp | Message::RButtonUp | Message::MButtonUp | Message::XButtonUp => {
            translate_button(window, raw, MouseEventKind::ButtonRelease)
        }
        Message::KeyDown | Message::SysKeyDown => translate_key(window, raw, KeyEventKind::Press),
        Message::KeyUp | Message::SysKeyUp => translate_key(window, raw, KeyEventKind::Release),
        Message::Quit => Event::quit(),
        Message::Destroy | Message::Paint | Message::Other(_) => Event::none(),
    }
}

fn translate_size(window: Option<WindowHandle>, raw: &RawNotification) -> Event {
    let kind = match raw.wparam {
        SIZE_MINIMIZED => WindowEventKind::Minimize,
        SIZE_MAXIMIZED => WindowEventKind::Maximize,
        _ => WindowEventKind::Restored,
    };
    let packed = raw.lparam as usize;
    let size = Size::new(loword(packed) as i32, hiword(packed) as i32);
    Event::window(window, WindowEvent::with_size(kind, size))
}

fn translate_button(window: Option<WindowHandle>, raw: &RawNotification, kind: MouseEventKind) -> Event {
    let button = match raw.message {
        Message::LButtonDown | Message::LButtonUp => MouseButton::Left,
        Message::RButtonDown | Message::RButtonUp => MouseButton::Right,
        Message::MButtonDown | Message::MButtonUp => MouseButton::Middle,
        _ if hiword(raw.wparam) == XBUTTON1 => MouseButton::X1,
        _ => MouseButton::X2,
    };
    let event = MouseEvent::new(kind, button, Some(position(raw)), 0)
        .with_modifiers(modifiers(raw.wparam));
    Event::mouse(window, event)
}

fn translate_key(window: Option<WindowHandle>, raw: &RawNotification, kind: KeyEventKind) -> Event {
    let key = Key::from_virtual_key(raw.wparam as u16);
    Event::keyboard(window, KeyboardEvent::new(kind, key))
}

fn position(raw: &RawNotification) -> Point {
    Point::new(x_from_lparam(raw.lparam), y_from_lparam(raw.lparam))
}

fn modifiers(wparam: usize) -> Modifiers {
    let state = loword(wparam) as usize;
    Modifiers {
        shift: state & MK_SHIFT != 0,
        ctrl: state & MK_CONTROL != 0,
        alt: false,
        meta: false,
    }
}
