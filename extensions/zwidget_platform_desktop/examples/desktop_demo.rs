//! Desktop Demo
//!
//! Opens a window, paints a grid and highlights the cell under the pointer.
//! Only the two cells that change are invalidated on each move, so every
//! frame after the first is a partial repaint.
//!
//! Controls:
//! - Move the mouse to highlight cells
//! - Wheel to change the cell size
//! - Escape or close the window to quit
//!
//! Run with: cargo run -p zwidget_platform_desktop --example desktop_demo

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use zwidget_app::prelude::*;
use zwidget_platform_desktop::DesktopBackend;

/// Grid state shared between the event handler and the painter
struct Grid {
    cell: AtomicI32,
    hover_x: AtomicI32,
    hover_y: AtomicI32,
}

impl Grid {
    fn cell_rect(&self, col: i32, row: i32) -> Rect {
        let cell = self.cell.load(Ordering::Relaxed);
        Rect::new(col * cell, row * cell, cell, cell)
    }

    fn hovered(&self) -> (i32, i32) {
        (
            self.hover_x.load(Ordering::Relaxed),
            self.hover_y.load(Ordering::Relaxed),
        )
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AppConfig {
        name: "desktop-demo".to_string(),
        window: WindowConfig::new("zwidget desktop demo").size(640, 480),
        ..Default::default()
    };
    let mut app = Application::new(DesktopBackend::new()?, config);
    let window = app.create_main_window()?;

    let grid = Arc::new(Grid {
        cell: AtomicI32::new(32),
        hover_x: AtomicI32::new(-1),
        hover_y: AtomicI32::new(-1),
    });

    let painter_grid = Arc::clone(&grid);
    window.set_painter(move |canvas| {
        let size = canvas.size();
        let cell = painter_grid.cell.load(Ordering::Relaxed).max(4);
        let (hx, hy) = painter_grid.hovered();

        canvas.clear(Color::from_hex(0x1E1E24));
        for row in 0..=size.height / cell {
            for col in 0..=size.width / cell {
                let rect = painter_grid.cell_rect(col, row).inset(1, 1);
                let color = if (col, row) == (hx, hy) {
                    Color::from_hex(0x4A90D9)
                } else {
                    Color::from_hex(0x2C2C34)
                };
                canvas.fill_rect(rect, color);
            }
        }
        canvas.stroke_rect(size.to_rect(), Color::GRAY, 1);
    });

    let code = app.run(|app, event| {
        if let Some(keyboard) = event.as_keyboard() {
            if keyboard.key() == Key::Escape {
                return ControlFlow::Exit;
            }
        }

        if let Some(window_event) = event.as_window() {
            if window_event.kind() == WindowEventKind::Close {
                if let Some(handle) = event.window_handle() {
                    if let Err(err) = app.destroy_window(handle) {
                        tracing::warn!(error = %err, "destroy failed");
                    }
                }
            }
            return ControlFlow::Continue;
        }

        let (Some(mouse), Some(handle)) = (event.as_mouse(), event.window_handle()) else {
            return ControlFlow::Continue;
        };
        let Some(window) = app.window(handle) else {
            return ControlFlow::Continue;
        };

        if mouse.kind() == MouseEventKind::Scroll {
            let cell = grid.cell.load(Ordering::Relaxed);
            let step = if mouse.scroll_delta() > 0 { 4 } else { -4 };
            grid.cell.store((cell + step).clamp(8, 128), Ordering::Relaxed);
            window.invalidate(window.size().to_rect());
        } else if let Some(position) = mouse.position() {
            let cell = grid.cell.load(Ordering::Relaxed);
            let next = (position.x / cell, position.y / cell);
            let previous = grid.hovered();
            if next != previous {
                grid.hover_x.store(next.0, Ordering::Relaxed);
                grid.hover_y.store(next.1, Ordering::Relaxed);
                if previous.0 >= 0 {
                    window.invalidate(grid.cell_rect(previous.0, previous.1));
                }
                window.invalidate(grid.cell_rect(next.0, next.1));
            }
        }
        ControlFlow::Continue
    })?;

    tracing::info!(code, "demo finished");
    app.shutdown();
    Ok(())
}
