//! Input event payloads for mouse and keyboard

use crate::geometry::Point;
use std::hash::{Hash, Hasher};

// ============================================================================
// Mouse Events
// ============================================================================

/// Mouse event subtype
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Wheel rotation; carries a delta and no position
    Scroll,
    /// Pointer moved
    Move,
    /// Button pressed
    ButtonPress,
    /// Button released
    ButtonRelease,
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// No button involved (moves and scrolls)
    #[default]
    None,
    /// Left mouse button
    Left,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Right mouse button
    Right,
    /// First extended button (usually "back")
    X1,
    /// Second extended button (usually "forward")
    X2,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Check if only shift is held
    pub fn shift_only(&self) -> bool {
        self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Check if only ctrl is held
    pub fn ctrl_only(&self) -> bool {
        !self.shift && self.ctrl && !self.alt && !self.meta
    }
}

/// Mouse event payload
///
/// Built unchecked; the position/scroll pairing rules are enforced when
/// the payload is wrapped by [`Event::mouse`](crate::Event::mouse).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    kind: MouseEventKind,
    button: MouseButton,
    position: Option<Point>,
    scroll_delta: i16,
    modifiers: Modifiers,
}

impl MouseEvent {
    /// Raw constructor, no pairing checks
    pub const fn new(
        kind: MouseEventKind,
        button: MouseButton,
        position: Option<Point>,
        scroll_delta: i16,
    ) -> Self {
        Self {
            kind,
            button,
            position,
            scroll_delta,
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
                meta: false,
            },
        }
    }

    /// Pointer moved to `position`
    pub const fn moved(position: Point) -> Self {
        Self::new(MouseEventKind::Move, MouseButton::None, Some(position), 0)
    }

    /// `button` pressed at `position`
    pub const fn pressed(button: MouseButton, position: Point) -> Self {
        Self::new(MouseEventKind::ButtonPress, button, Some(position), 0)
    }

    /// `button` released at `position`
    pub const fn released(button: MouseButton, position: Point) -> Self {
        Self::new(MouseEventKind::ButtonRelease, button, Some(position), 0)
    }

    /// Wheel turned by `delta` notches (positive away from the user)
    pub const fn scroll(delta: i16) -> Self {
        Self::new(MouseEventKind::Scroll, MouseButton::None, None, delta)
    }

    /// Attach modifier state
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub const fn kind(&self) -> MouseEventKind {
        self.kind
    }

    pub const fn button(&self) -> MouseButton {
        self.button
    }

    pub const fn position(&self) -> Option<Point> {
        self.position
    }

    pub const fn scroll_delta(&self) -> i16 {
        self.scroll_delta
    }

    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event subtype
///
/// Plain and "system" key notifications collapse onto these two kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    /// Key went down (auto-repeat included)
    Press,
    /// Key went up
    Release,
}

/// Keyboard event payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyboardEvent {
    kind: KeyEventKind,
    key: Key,
}

impl KeyboardEvent {
    pub const fn new(kind: KeyEventKind, key: Key) -> Self {
        Self { kind, key }
    }

    pub const fn pressed(key: Key) -> Self {
        Self::new(KeyEventKind::Press, key)
    }

    pub const fn released(key: Key) -> Self {
        Self::new(KeyEventKind::Release, key)
    }

    pub const fn kind(&self) -> KeyEventKind {
        self.kind
    }

    pub const fn key(&self) -> Key {
        self.key
    }
}

macro_rules! virtual_keys {
    ($($(#[$meta:meta])* $name:ident = $code:literal,)*) => {
        /// Virtual key codes
        ///
        /// Discriminants follow the classic desktop virtual-key numbering, so
        /// the raw key word of a notification maps onto this enum directly.
        /// Keys compare and hash by that code, so `Key::Other(65)` equals
        /// `Key::A`.
        #[derive(Clone, Copy, Debug)]
        pub enum Key {
            $($(#[$meta])* $name,)*
            /// A key code with no named variant
            ///
            /// [`Key::from_virtual_key`] only produces this for unnamed codes.
            Other(u16),
        }

        impl Key {
            /// Decode a virtual key code
            pub const fn from_virtual_key(code: u16) -> Key {
                match code {
                    $($code => Key::$name,)*
                    other => Key::Other(other),
                }
            }

            /// Encode back to the virtual key code
            pub const fn virtual_key(self) -> u16 {
                match self {
                    $(Key::$name => $code,)*
                    Key::Other(code) => code,
                }
            }
        }
    };
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.virtual_key() == other.virtual_key()
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.virtual_key().hash(state);
    }
}

virtual_keys! {
    // Control and navigation
    Backspace = 8,
    Tab = 9,
    Enter = 13,
    Shift = 16,
    Ctrl = 17,
    Alt = 18,
    Pause = 19,
    CapsLock = 20,
    Escape = 27,
    Space = 32,
    PageUp = 33,
    PageDown = 34,
    End = 35,
    Home = 36,
    Left = 37,
    Up = 38,
    Right = 39,
    Down = 40,
    Insert = 45,
    Delete = 46,

    // Number row
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,

    // Letters
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,

    // System keys
    LeftMeta = 91,
    RightMeta = 92,
    Menu = 93,

    // Numeric keypad
    Numpad0 = 96,
    Numpad1 = 97,
    Numpad2 = 98,
    Numpad3 = 99,
    Numpad4 = 100,
    Numpad5 = 101,
    Numpad6 = 102,
    Numpad7 = 103,
    Numpad8 = 104,
    Numpad9 = 105,
    NumpadMultiply = 106,
    NumpadAdd = 107,
    NumpadSeparator = 108,
    NumpadSubtract = 109,
    NumpadDecimal = 110,
    NumpadDivide = 111,

    // Function keys
    F1 = 112,
    F2 = 113,
    F3 = 114,
    F4 = 115,
    F5 = 116,
    F6 = 117,
    F7 = 118,
    F8 = 119,
    F9 = 120,
    F10 = 121,
    F11 = 122,
    F12 = 123,
    F13 = 124,
    F14 = 125,
    F15 = 126,
    F16 = 127,
    F17 = 128,
    F18 = 129,
    F19 = 130,
    F20 = 131,
    F21 = 132,
    F22 = 133,
    F23 = 134,
    F24 = 135,
    NumLock = 144,
    ScrollLock = 145,

    // Sided modifiers
    LeftShift = 160,
    RightShift = 161,
    LeftCtrl = 162,
    RightCtrl = 163,
    LeftAlt = 164,
    RightAlt = 165,

    // Punctuation (US layout positions)
    Semicolon = 186,
    Equals = 187,
    Comma = 188,
    Minus = 189,
    Period = 190,
    Slash = 191,
    Grave = 192,
    LeftBracket = 219,
    Backslash = 220,
    RightBracket = 221,
    Quote = 222,
}

impl Key {
    /// True for the modifier keys themselves (either side)
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::Shift
                | Key::Ctrl
                | Key::Alt
                | Key::LeftMeta
                | Key::RightMeta
                | Key::LeftShift
                | Key::RightShift
                | Key::LeftCtrl
                | Key::RightCtrl
                | Key::LeftAlt
                | Key::RightAlt
        )
    }
}
