//! zwidget Desktop Platform
//!
//! Windowing, input and presentation for macOS, Windows, and Linux using
//! winit and softbuffer.
//!
//! This crate implements the `zwidget_app` [`Backend`](zwidget_app::Backend)
//! contract: winit events become raw notifications for the dispatcher, and
//! each window draws into a CPU framebuffer presented with softbuffer.
//!
//! # Example
//!
//! ```ignore
//! use zwidget_app::prelude::*;
//! use zwidget_platform_desktop::DesktopBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = Application::new(DesktopBackend::new()?, AppConfig::default());
//!     let window = app.create_main_window()?;
//!     window.set_painter(|canvas| canvas.clear(Color::WHITE));
//!
//!     let code = app.run(|app, event| {
//!         if event.as_window().map(|w| w.kind()) == Some(WindowEventKind::Close) {
//!             if let Some(handle) = event.window_handle() {
//!                 let _ = app.destroy_window(handle);
//!             }
//!         }
//!         ControlFlow::Continue
//!     })?;
//!     std::process::exit(code);
//! }
//! ```

pub mod event_loop;
pub mod input;
pub mod surface;

pub use event_loop::DesktopBackend;
pub use surface::DesktopSurface;
