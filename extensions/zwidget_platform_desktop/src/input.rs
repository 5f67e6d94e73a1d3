//! Desktop input conversion (winit -> raw notifications)
//!
//! winit reports typed events; the pipeline consumes packed notifications.
//! These helpers produce the pieces of each notification (message kind,
//! virtual key, button-state bits, wheel units) so the event loop only has
//! to assemble them.

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, ModifiersState};
use zwidget_platform::notification::{
    MK_CONTROL, MK_LBUTTON, MK_MBUTTON, MK_RBUTTON, MK_SHIFT, SIZE_MAXIMIZED, SIZE_MINIMIZED,
    SIZE_RESTORED, WHEEL_DELTA, XBUTTON1, XBUTTON2,
};
use zwidget_platform::{Key, Message};

/// Pixel scroll distance treated as one wheel notch
pub const PIXELS_PER_NOTCH: f64 = 40.0;

/// Convert a physical key code to the virtual key it produces on a US layout
pub fn convert_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        // Letters
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        // Number row
        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,

        // Control and navigation
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Pause => Key::Pause,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::End => Key::End,
        KeyCode::Home => Key::Home,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,

        // Modifiers are reported unsided, like native key messages do
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Ctrl,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft => Key::LeftMeta,
        KeyCode::SuperRight => Key::RightMeta,
        KeyCode::ContextMenu => Key::Menu,

        // Numeric keypad
        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        KeyCode::NumpadMultiply => Key::NumpadMultiply,
        KeyCode::NumpadAdd => Key::NumpadAdd,
        KeyCode::NumpadComma => Key::NumpadSeparator,
        KeyCode::NumpadSubtract => Key::NumpadSubtract,
        KeyCode::NumpadDecimal => Key::NumpadDecimal,
        KeyCode::NumpadDivide => Key::NumpadDivide,
        KeyCode::NumLock => Key::NumLock,
        KeyCode::ScrollLock => Key::ScrollLock,

        // Function keys
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::F13 => Key::F13,
        KeyCode::F14 => Key::F14,
        KeyCode::F15 => Key::F15,
        KeyCode::F16 => Key::F16,
        KeyCode::F17 => Key::F17,
        KeyCode::F18 => Key::F18,
        KeyCode::F19 => Key::F19,
        KeyCode::F20 => Key::F20,
        KeyCode::F21 => Key::F21,
        KeyCode::F22 => Key::F22,
        KeyCode::F23 => Key::F23,
        KeyCode::F24 => Key::F24,

        // Punctuation
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Equal => Key::Equals,
        KeyCode::Comma => Key::Comma,
        KeyCode::Minus => Key::Minus,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Backquote => Key::Grave,
        KeyCode::BracketLeft => Key::LeftBracket,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::BracketRight => Key::RightBracket,
        KeyCode::Quote => Key::Quote,

        _ => return None,
    };
    Some(key)
}

/// Key message for a transition; keys pressed with Alt held are system keys
pub fn key_message(state: ElementState, modifiers: ModifiersState) -> Message {
    match (state, modifiers.alt_key()) {
        (ElementState::Pressed, false) => Message::KeyDown,
        (ElementState::Released, false) => Message::KeyUp,
        (ElementState::Pressed, true) => Message::SysKeyDown,
        (ElementState::Released, true) => Message::SysKeyUp,
    }
}

/// `MK_*` bit for a held mouse button
pub fn button_bit(button: WinitMouseButton) -> usize {
    match button {
        WinitMouseButton::Left => MK_LBUTTON,
        WinitMouseButton::Right => MK_RBUTTON,
        WinitMouseButton::Middle => MK_MBUTTON,
        _ => 0,
    }
}

/// Button-state word: held buttons plus the shift and control modifiers
pub fn key_state(modifiers: ModifiersState, buttons: usize) -> usize {
    let mut state = buttons;
    if modifiers.shift_key() {
        state |= MK_SHIFT;
    }
    if modifiers.control_key() {
        state |= MK_CONTROL;
    }
    state
}

/// Button message and X-button selector; `None` for buttons with no message
pub fn button_message(button: WinitMouseButton, state: ElementState) -> Option<(Message, u16)> {
    let pressed = state == ElementState::Pressed;
    let pick = |down: Message, up: Message| if pressed { down } else { up };
    match button {
        WinitMouseButton::Left => Some((pick(Message::LButtonDown, Message::LButtonUp), 0)),
        WinitMouseButton::Right => Some((pick(Message::RButtonDown, Message::RButtonUp), 0)),
        WinitMouseButton::Middle => Some((pick(Message::MButtonDown, Message::MButtonUp), 0)),
        WinitMouseButton::Back => Some((pick(Message::XButtonDown, Message::XButtonUp), XBUTTON1)),
        WinitMouseButton::Forward => {
            Some((pick(Message::XButtonDown, Message::XButtonUp), XBUTTON2))
        }
        WinitMouseButton::Other(_) => None,
    }
}

/// Vertical wheel movement in raw wheel units
pub fn wheel_delta(delta: MouseScrollDelta) -> i16 {
    let notches = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_NOTCH,
    };
    (notches * f64::from(WHEEL_DELTA))
        .round()
        .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// `SIZE_*` placement for a resize
pub fn size_placement(minimized: Option<bool>, maximized: bool) -> usize {
    if minimized == Some(true) {
        SIZE_MINIMIZED
    } else if maximized {
        SIZE_MAXIMIZED
    } else {
        SIZE_RESTORED
    }
}

/// Clamp a pixel extent into a notification size word
pub fn clamp_extent(extent: u32) -> u16 {
    extent.min(u32::from(u16::MAX)) as u16
}
