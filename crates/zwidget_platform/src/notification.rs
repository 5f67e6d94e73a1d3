//! Raw platform notifications
//!
//! A [`RawNotification`] is the record every backend produces: a message
//! kind, the window it targets, and two opaque parameter words. The words use
//! the classic desktop packing (two 16-bit halves, coordinates as signed
//! 16-bit values) so a native message can be forwarded as-is and other
//! backends can encode into the same shape with the builders below.

use crate::window::WindowHandle;

pub const SIZE_RESTORED: usize = 0;
pub const SIZE_MINIMIZED: usize = 1;
pub const SIZE_MAXIMIZED: usize = 2;

/// Wheel rotation reported for one notch
pub const WHEEL_DELTA: i16 = 120;

pub const XBUTTON1: u16 = 0x0001;
pub const XBUTTON2: u16 = 0x0002;

/// Button-state bits carried in the low word of mouse `wparam`
pub const MK_LBUTTON: usize = 0x0001;
pub const MK_RBUTTON: usize = 0x0002;
pub const MK_SHIFT: usize = 0x0004;
pub const MK_CONTROL: usize = 0x0008;
pub const MK_MBUTTON: usize = 0x0010;

/// Message kind of a raw notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Message {
    Destroy,
    Size,
    SetFocus,
    KillFocus,
    Paint,
    Close,
    Quit,
    KeyDown,
    KeyUp,
    SysKeyDown,
    SysKeyUp,
    MouseMove,
    LButtonDown,
    LButtonUp,
    RButtonDown,
    RButtonUp,
    MButtonDown,
    MButtonUp,
    MouseWheel,
    XButtonDown,
    XButtonUp,
    /// Any message the pipeline does not recognize
    Other(u32),
}

impl Message {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0x0002 => Message::Destroy,
            0x0005 => Message::Size,
            0x0007 => Message::SetFocus,
            0x0008 => Message::KillFocus,
            0x000F => Message::Paint,
            0x0010 => Message::Close,
            0x0012 => Message::Quit,
            0x0100 => Message::KeyDown,
            0x0101 => Message::KeyUp,
            0x0104 => Message::SysKeyDown,
            0x0105 => Message::SysKeyUp,
            0x0200 => Message::MouseMove,
            0x0201 => Message::LButtonDown,
            0x0202 => Message::LButtonUp,
            0x0204 => Message::RButtonDown,
            0x0205 => Message::RButtonUp,
            0x0207 => Message::MButtonDown,
            0x0208 => Message::MButtonUp,
            0x020A => Message::MouseWheel,
            0x020B => Message::XButtonDown,
            0x020C => Message::XButtonUp,
            other => Message::Other(other),
        }
    }

    pub const fn to_raw(self) -> u32 {
        match self {
            Message::Destroy => 0x0002,
            Message::Size => 0x0005,
            Message::SetFocus => 0x0007,
            Message::KillFocus => 0x0008,
            Message::Paint => 0x000F,
            Message::Close => 0x0010,
            Message::Quit => 0x0012,
            Message::KeyDown => 0x0100,
            Message::KeyUp => 0x0101,
            Message::SysKeyDown => 0x0104,
            Message::SysKeyUp => 0x0105,
            Message::MouseMove => 0x0200,
            Message::LButtonDown => 0x0201,
            Message::LButtonUp => 0x0202,
            Message::RButtonDown => 0x0204,
            Message::RButtonUp => 0x0205,
            Message::MButtonDown => 0x0207,
            Message::MButtonUp => 0x0208,
            Message::MouseWheel => 0x020A,
            Message::XButtonDown => 0x020B,
            Message::XButtonUp => 0x020C,
            Message::Other(raw) => raw,
        }
    }
}

/// Low 16 bits of a parameter word
pub const fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

/// Bits 16..32 of a parameter word
pub const fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/// Pack two 16-bit halves into a parameter word
pub const fn make_long(low: u16, high: u16) -> usize {
    (low as usize) | ((high as usize) << 16)
}

/// Signed x coordinate packed in `lparam`
pub const fn x_from_lparam(lparam: isize) -> i32 {
    loword(lparam as usize) as i16 as i32
}

/// Signed y coordinate packed in `lparam`
pub const fn y_from_lparam(lparam: isize) -> i32 {
    hiword(lparam as usize) as i16 as i32
}

/// Signed wheel rotation packed in the high word of `wparam`
pub const fn wheel_delta_from_wparam(wparam: usize) -> i16 {
    hiword(wparam) as i16
}

/// Pack a signed coordinate pair into `lparam`
pub const fn point_to_lparam(x: i32, y: i32) -> isize {
    make_long(x as i16 as u16, y as i16 as u16) as isize
}

/// One platform notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawNotification {
    /// Target window; null for thread-level messages such as quit
    pub window: WindowHandle,
    pub message: Message,
    pub wparam: usize,
    pub lparam: isize,
}

impl RawNotification {
    pub const fn new(window: WindowHandle, message: Message, wparam: usize, lparam: isize) -> Self {
        Self {
            window,
            message,
            wparam,
            lparam,
        }
    }

    /// Close button or equivalent
    pub const fn close(window: WindowHandle) -> Self {
        Self::new(window, Message::Close, 0, 0)
    }

    /// The platform window is gone
    pub const fn destroy(window: WindowHandle) -> Self {
        Self::new(window, Message::Destroy, 0, 0)
    }

    /// Window needs painting
    pub const fn paint(window: WindowHandle) -> Self {
        Self::new(window, Message::Paint, 0, 0)
    }

    /// Thread-level quit request
    pub const fn quit(exit_code: i32) -> Self {
        Self::new(WindowHandle::NULL, Message::Quit, exit_code as usize, 0)
    }

    /// Client area change; `placement` is one of the `SIZE_*` constants
    pub const fn size(window: WindowHandle, placement: usize, width: u16, height: u16) -> Self {
        Self::new(
            window,
            Message::Size,
            placement,
            make_long(width, height) as isize,
        )
    }

    pub const fn focus(window: WindowHandle, gained: bool) -> Self {
        let message = if gained {
            Message::SetFocus
        } else {
            Message::KillFocus
        };
        Self::new(window, message, 0, 0)
    }

    /// Pointer move; `key_state` holds `MK_*` bits
    pub const fn mouse_move(window: WindowHandle, x: i32, y: i32, key_state: usize) -> Self {
        Self::new(window, Message::MouseMove, key_state, point_to_lparam(x, y))
    }

    /// Wheel rotation in raw units (`WHEEL_DELTA` per notch)
    pub const fn mouse_wheel(window: WindowHandle, delta: i16, key_state: usize) -> Self {
        Self::new(
            window,
            Message::MouseWheel,
            make_long(loword(key_state), delta as u16),
            0,
        )
    }

    /// Button press or release
    ///
    /// `message` must be one of the button messages; for the X button
    /// messages `xbutton` selects `XBUTTON1` or `XBUTTON2`.
    pub const fn button(
        window: WindowHandle,
        message: Message,
        xbutton: u16,
        x: i32,
        y: i32,
        key_state: usize,
    ) -> Self {
        Self::new(
            window,
            message,
            make_long(loword(key_state), xbutton),
            point_to_lparam(x, y),
        )
    }

    /// Key transition; `message` is one of the four key messages
    pub const fn key(window: WindowHandle, message: Message, virtual_key: u16) -> Self {
        Self::new(window, message, virtual_key as usize, 0)
    }

    /// Exit code carried by a quit notification
    pub const fn exit_code(&self) -> i32 {
        self.wparam as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_codes_round_trip() {
        for message in [
            Message::Destroy,
            Message::Size,
            Message::Close,
            Message::Quit,
            Message::MouseWheel,
            Message::XButtonUp,
            Message::SysKeyDown,
        ] {
            assert_eq!(Message::from_raw(message.to_raw()), message);
        }
        assert_eq!(Message::from_raw(0x0113), Message::Other(0x0113));
    }

    #[test]
    fn test_word_packing() {
        let word = make_long(0x1234, 0xABCD);
        assert_eq!(loword(word), 0x1234);
        assert_eq!(hiword(word), 0xABCD);
    }

    #[test]
    fn test_negative_coordinates_survive_packing() {
        let lparam = point_to_lparam(-5, -300);
        assert_eq!(x_from_lparam(lparam), -5);
        assert_eq!(y_from_lparam(lparam), -300);
    }

    #[test]
    fn test_wheel_delta_packing() {
        let n = RawNotification::mouse_wheel(WindowHandle::new(1), -240, MK_SHIFT);
        assert_eq!(wheel_delta_from_wparam(n.wparam), -240);
        assert_eq!(loword(n.wparam) as usize, MK_SHIFT);
    }

    #[test]
    fn test_quit_exit_code() {
        assert_eq!(RawNotification::quit(3).exit_code(), 3);
        assert!(RawNotification::quit(0).window.is_null());
    }
}
