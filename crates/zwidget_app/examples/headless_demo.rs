//! Headless Pipeline Demo
//!
//! Drives the whole event and rendering pipeline without a window system:
//! scripted notifications go through translation, the dispatcher and the
//! window procedure, and frames are recorded instead of drawn.
//!
//! Features demonstrated:
//! - Loading an `AppConfig` from TOML
//! - Partial repaints of invalidated regions
//! - Resize, device loss recovery and quit on last window destroyed
//!
//! Run with: RUST_LOG=debug cargo run -p zwidget_app --example headless_demo

use anyhow::Context;
use zwidget_app::logging;
use zwidget_app::prelude::*;

const CONFIG: &str = r#"
name = "headless-demo"
log_filter = "zwidget_app=debug,info"

[window]
title = "Headless Demo"
width = 640
height = 480
"#;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_toml_str(CONFIG).context("demo config")?;
    logging::init(&config.log_filter)?;

    let mut app = Application::new(HeadlessBackend::new(), config);
    let window = app.create_main_window()?;
    let handle = window.handle();

    window.set_painter(|canvas| {
        let bounds = canvas.size().to_rect();
        canvas.clear(Color::rgb(0x20, 0x20, 0x28));
        canvas.stroke_rect(bounds, Color::WHITE, 2);
        canvas.draw_line(Point::new(0, 0), Point::new(bounds.right(), bounds.bottom()), Color::RED);
    });

    // Some damage before the first paint, and user input
    window.invalidate(Rect::new(10, 10, 40, 40));
    window.invalidate(Rect::new(300, 200, 20, 20));
    let backend = app.backend_mut();
    backend.post(RawNotification::mouse_move(handle, 32, 48, 0));
    backend.post(RawNotification::key(handle, Message::KeyDown, 0x41));
    backend.resize_window(handle, Size::new(800, 600), Placement::Maximized);

    // A lost device on the next frame, then close
    window.with_renderer(|r| r.surface_mut().fail_next_frame(SurfaceError::Lost));
    window.invalidate(Rect::new(0, 0, 8, 8));
    app.backend_mut().post(RawNotification::close(handle));

    let code = app.run(|app, event| {
        tracing::info!(kind = ?event.kind(), window = ?event.window_handle(), "event");
        if event.as_window().map(|w| w.kind()) == Some(WindowEventKind::Close) {
            if let Err(err) = app.destroy_window(handle) {
                tracing::warn!(error = %err, "destroy failed");
            }
        }
        ControlFlow::Continue
    })?;

    let frames = window.with_renderer(|r| r.surface().frame_count());
    tracing::info!(code, frames, state = ?window.state(), "demo finished");
    Ok(())
}
