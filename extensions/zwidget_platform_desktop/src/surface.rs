//! Software-presented window surface
//!
//! Drawing goes to a [`PixelSurface`]; `end_draw` copies the framebuffer to
//! the window through softbuffer, reporting the clipped regions of the frame
//! as damage so compositors only refresh what changed.

use std::num::NonZeroU32;
use std::sync::Arc;
use winit::event_loop::OwnedDisplayHandle;
use winit::window::Window as WinitWindow;
use zwidget_platform::{PlatformError, Point, Rect, Size};
use zwidget_render::{Canvas, Color, DrawSurface, PixelSurface, SurfaceError};

type BufferSurface = softbuffer::Surface<OwnedDisplayHandle, Arc<WinitWindow>>;

/// Window surface backed by a CPU framebuffer
pub struct DesktopSurface {
    // Fields drop in declaration order: the buffer surface goes before its context
    surface: Option<BufferSurface>,
    context: softbuffer::Context<OwnedDisplayHandle>,
    window: Arc<WinitWindow>,
    pixels: PixelSurface,
    /// Top-level clips of the frame in progress
    damage: Vec<Rect>,
    clip_depth: usize,
    /// Size the presentation buffer was last configured for
    buffer_size: Option<Size>,
}

impl DesktopSurface {
    /// Surface for `window`; presentation resources are created by the first
    /// `recreate_device_resources`
    pub fn new(
        display: OwnedDisplayHandle,
        window: Arc<WinitWindow>,
        size: Size,
    ) -> Result<Self, PlatformError> {
        let context = softbuffer::Context::new(display)
            .map_err(|err| PlatformError::SurfaceCreation(err.to_string()))?;
        let mut pixels = PixelSurface::new(size).with_background(Color::BLACK);
        pixels.release_device_resources();

        Ok(Self {
            surface: None,
            context,
            window,
            pixels,
            damage: Vec::new(),
            clip_depth: 0,
            buffer_size: None,
        })
    }

    pub fn window(&self) -> &Arc<WinitWindow> {
        &self.window
    }

    /// The framebuffer drawing goes to
    pub fn pixels(&self) -> &PixelSurface {
        &self.pixels
    }

    fn present(&mut self, damage: &[Rect]) -> Result<(), SurfaceError> {
        let size = self.pixels.size();
        let (Some(width), Some(height)) = (extent(size.width), extent(size.height)) else {
            // nothing to show for an empty client area
            return Ok(());
        };
        let Some(surface) = self.surface.as_mut() else {
            return Err(SurfaceError::Lost);
        };

        if self.buffer_size != Some(size) {
            surface.resize(width, height).map_err(|err| {
                tracing::warn!(error = %err, "presentation buffer resize failed");
                SurfaceError::Lost
            })?;
            self.buffer_size = Some(size);
        }

        let mut buffer = surface.buffer_mut().map_err(|err| {
            tracing::warn!(error = %err, "presentation buffer unavailable");
            SurfaceError::Lost
        })?;
        for (dst, src) in buffer.iter_mut().zip(self.pixels.pixels()) {
            *dst = Color::from_argb(*src).to_xrgb();
        }

        let rects = damage_rects(damage, size);
        let result = if rects.is_empty() {
            buffer.present()
        } else {
            buffer.present_with_damage(&rects)
        };
        result.map_err(|err| SurfaceError::Draw(err.to_string()))
    }
}

fn extent(value: i32) -> Option<NonZeroU32> {
    u32::try_from(value).ok().and_then(NonZeroU32::new)
}

/// Damage rectangles clamped to the surface; empty means the whole surface
fn damage_rects(damage: &[Rect], size: Size) -> Vec<softbuffer::Rect> {
    let bounds = size.to_rect();
    damage
        .iter()
        .filter_map(|rect| rect.intersection(&bounds))
        .filter_map(|rect| {
            Some(softbuffer::Rect {
                x: u32::try_from(rect.x).ok()?,
                y: u32::try_from(rect.y).ok()?,
                width: extent(rect.width)?,
                height: extent(rect.height)?,
            })
        })
        .collect()
}

impl Canvas for DesktopSurface {
    fn size(&self) -> Size {
        self.pixels.size()
    }

    fn clear(&mut self, color: Color) {
        self.pixels.clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.pixels.fill_rect(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        self.pixels.stroke_rect(rect, color, width);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.pixels.draw_line(from, to, color);
    }
}

impl DrawSurface for DesktopSurface {
    fn begin_draw(&mut self) {
        self.damage.clear();
        self.clip_depth = 0;
        self.pixels.begin_draw();
    }

    fn end_draw(&mut self) -> Result<(), SurfaceError> {
        let damage = std::mem::take(&mut self.damage);
        self.clip_depth = 0;
        self.pixels.end_draw()?;
        self.present(&damage)
    }

    fn push_clip(&mut self, rect: Rect) {
        if self.clip_depth == 0 {
            self.damage.push(rect);
        }
        self.clip_depth += 1;
        self.pixels.push_clip(rect);
    }

    fn pop_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.pixels.pop_clip();
    }

    fn resize(&mut self, size: Size) {
        self.pixels.resize(size);
    }

    fn release_device_resources(&mut self) {
        self.surface = None;
        self.buffer_size = None;
        self.pixels.release_device_resources();
    }

    fn recreate_device_resources(&mut self, size: Size) -> Result<(), SurfaceError> {
        let surface = softbuffer::Surface::new(&self.context, Arc::clone(&self.window))
            .map_err(|err| SurfaceError::Draw(err.to_string()))?;
        self.surface = Some(surface);
        self.buffer_size = None;
        self.pixels.recreate_device_resources(size)?;
        tracing::debug!(
            window = ?self.window.id(),
            width = size.width,
            height = size.height,
            "presentation surface created"
        );
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.surface.is_some() && self.pixels.is_ready()
    }
}

impl std::fmt::Debug for DesktopSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopSurface")
            .field("window", &self.window.id())
            .field("size", &self.pixels.size())
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}
