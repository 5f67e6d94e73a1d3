//! zwidget Application Framework
//!
//! Window lifecycle, the window procedure and the run loop on top of the
//! platform and render crates.
//!
//! # Example (Headless)
//!
//! ```
//! use zwidget_app::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut app = Application::new(HeadlessBackend::new(), AppConfig::default());
//!     let window = app.create_main_window()?;
//!     window.set_painter(|canvas| canvas.clear(Color::WHITE));
//!
//!     // The first poll paints the window; closing it ends the loop.
//!     app.backend_mut().post(RawNotification::close(window.handle()));
//!     let code = app.run(|app, event| {
//!         if let Some(WindowEventKind::Close) = event.as_window().map(|w| w.kind()) {
//!             if let Some(handle) = event.window_handle() {
//!                 let _ = app.destroy_window(handle);
//!             }
//!         }
//!         ControlFlow::Continue
//!     })?;
//!     assert_eq!(code, 0);
//!     Ok(())
//! }
//! ```

mod app;
mod backend;
mod config;
mod error;
mod headless;
pub mod logging;
mod window;


pub use app::{AppRegistry, Application};
pub use backend::Backend;
pub use config::{AppConfig, EventMode};
pub use error::{AppError, Result};
pub use headless::{HeadlessBackend, Placement};
pub use window::{AppWindow, PaintFn, WindowState};

// Re-export the pipeline crates for convenience
pub use zwidget_platform;
pub use zwidget_render;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::backend::Backend;
    pub use crate::config::{AppConfig, EventMode};
    pub use crate::error::{AppError, Result};
    pub use crate::headless::{HeadlessBackend, Placement};
    pub use crate::window::{AppWindow, WindowState};

    pub use zwidget_platform::prelude::*;
    pub use zwidget_render::prelude::*;
}
