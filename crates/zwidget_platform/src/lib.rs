//! zwidget Platform Layer
//!
//! This crate owns the front half of the zwidget event pipeline: the window
//! registry, the typed event model, translation of raw platform
//! notifications into events, and the FIFO dispatcher that drives the
//! poll/wait loop.
//!
//! # Architecture
//!
//! - [`WindowRegistry`] - handle → live window map (weak references only)
//! - [`NotificationSource`] - pull-style source of [`RawNotification`]s,
//!   implemented by each backend
//! - [`translate`] - pure notification → [`Event`] mapping
//! - [`EventDispatcher`] - event queue plus `poll`/`wait`
//!
//! Backends live in separate crates (`zwidget_platform_desktop`); the
//! in-memory [`ScriptedSource`] serves headless runs and tests.
//!
//! # Example
//!
//! ```
//! use zwidget_platform::prelude::*;
//!
//! let dispatcher = EventDispatcher::new();
//! let mut source = ScriptedSource::new();
//! source.post(RawNotification::close(WindowHandle::new(1)));
//! source.post_quit(0);
//!
//! while let Some(event) = dispatcher.poll(&mut source, &NoWindows) {
//!     if event.is_quit() {
//!         break;
//!     }
//! }
//! ```

mod dispatcher;
mod error;
mod event;
pub mod geometry;
mod input;
pub mod notification;
mod registry;
mod scripted;
mod source;
mod translate;
mod window;

// Re-export all public types
pub use dispatcher::EventDispatcher;
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventData, EventKind, WindowEvent, WindowEventKind};
pub use geometry::{Point, Rect, Size};
pub use input::{
    Key, KeyEventKind, KeyboardEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use notification::{Message, RawNotification};
pub use registry::{NoWindows, WindowLookup, WindowRegistry};
pub use scripted::ScriptedSource;
pub use source::{Delivery, NotificationSource};
pub use translate::translate;
pub use window::{Window, WindowConfig, WindowHandle};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dispatcher::EventDispatcher;
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, EventData, EventKind, WindowEvent, WindowEventKind};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::input::{
        Key, KeyEventKind, KeyboardEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    pub use crate::notification::{Message, RawNotification};
    pub use crate::registry::{NoWindows, WindowLookup, WindowRegistry};
    pub use crate::scripted::ScriptedSource;
    pub use crate::source::{Delivery, NotificationSource};
    pub use crate::window::{Window, WindowConfig, WindowHandle};
}
