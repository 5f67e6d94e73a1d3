//! Window identity, the window contract, and window configuration

use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque platform-issued window handle
///
/// `WindowHandle::NULL` is never issued to a live window.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(u64);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowHandle({:#x})", self.0)
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// What the event pipeline needs from a logical window
///
/// The pipeline never calls into widget logic; it only needs a stable
/// identity and the two invalidation entry points. Thread-safety is left to
/// the implementor: a registry of `Send + Sync` windows is itself shareable.
pub trait Window {
    /// Stable identity token
    fn handle(&self) -> WindowHandle;

    /// Queue `region` for repaint
    fn invalidate(&self, region: Rect);

    /// The client area changed size; everything must be repainted
    fn resize(&self, size: Size);
}

/// Window configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial client width in pixels
    pub width: u32,
    /// Initial client height in pixels
    pub height: u32,
    /// Whether the window can be resized
    pub resizable: bool,
    /// Whether to show window decorations (title bar, borders)
    pub decorations: bool,
    /// Whether the window should be transparent
    pub transparent: bool,
    /// Whether the window should always be on top
    pub always_on_top: bool,
    /// Whether to start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "zwidget".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            decorations: true,
            transparent: false,
            always_on_top: false,
            fullscreen: false,
        }
    }
}

impl WindowConfig {
    /// Create a new window configuration with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the client size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set whether the window is resizable
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether to show window decorations
    pub fn decorations(mut self, decorations: bool) -> Self {
        self.decorations = decorations;
        self
    }

    /// Set whether the window is transparent
    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set whether the window is always on top
    pub fn always_on_top(mut self, always_on_top: bool) -> Self {
        self.always_on_top = always_on_top;
        self
    }

    /// Set whether to start in fullscreen
    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Initial client size, clamped into the signed pixel range
    pub fn client_size(&self) -> Size {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Size::new(clamp(self.width), clamp(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle() {
        assert!(WindowHandle::NULL.is_null());
        assert!(!WindowHandle::new(1).is_null());
        assert_eq!(format!("{:?}", WindowHandle::new(255)), "WindowHandle(0xff)");
    }

    #[test]
    fn test_builder() {
        let config = WindowConfig::new("Demo").size(320, 240).resizable(false);
        assert_eq!(config.title, "Demo");
        assert_eq!(config.client_size(), Size::new(320, 240));
        assert!(!config.resizable);
        assert!(config.decorations);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: WindowConfig = toml::from_str("title = \"Tools\"\nwidth = 1024").unwrap();
        assert_eq!(config.title, "Tools");
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
    }
}
