//! CPU framebuffer surface
//!
//! [`PixelSurface`] rasterizes the canvas primitives into a row-major buffer
//! of packed ARGB pixels. It has no device of its own: presenting the buffer
//! is left to whoever owns it (the desktop backend copies it to the window).

use crate::color::Color;
use crate::error::SurfaceError;
use crate::surface::{Canvas, DrawSurface};
use zwidget_platform::{Point, Rect, Size};

/// Software framebuffer with a clip stack
#[derive(Clone, Debug)]
pub struct PixelSurface {
    size: Size,
    pixels: Vec<u32>,
    /// Effective clips: each entry is already intersected with its parent
    clips: Vec<Rect>,
    background: Color,
    ready: bool,
    drawing: bool,
    frames: u64,
}

impl PixelSurface {
    /// Surface with its buffer allocated and cleared to black
    pub fn new(size: Size) -> Self {
        let mut surface = Self {
            size,
            pixels: Vec::new(),
            clips: Vec::new(),
            background: Color::BLACK,
            ready: false,
            drawing: false,
            frames: 0,
        };
        surface.allocate(size);
        surface
    }

    /// Color newly allocated pixels start with
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self.pixels.fill(background.to_argb());
        self
    }

    fn allocate(&mut self, size: Size) {
        self.size = size;
        let len = if size.is_empty() {
            0
        } else {
            size.width as usize * size.height as usize
        };
        self.pixels = vec![self.background.to_argb(); len];
        self.ready = true;
    }

    fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Current effective clip
    pub fn clip(&self) -> Rect {
        self.clips.last().copied().unwrap_or_else(|| self.bounds())
    }

    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    /// Row-major `0xAARRGGBB` pixels; empty while released
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, point: Point) -> Option<Color> {
        if !self.bounds().contains(point) {
            return None;
        }
        self.pixels
            .get(self.index(point.x, point.y))
            .map(|argb| Color::from_argb(*argb))
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Frames completed since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Pixels drawing may touch: the clip, limited to the buffer
    fn visible(&self) -> Option<Rect> {
        self.clip().intersection(&self.bounds())
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    fn fill_clipped(&mut self, rect: Rect, color: Color) {
        if !self.ready {
            return;
        }
        let Some(area) = self.visible().and_then(|visible| rect.intersection(&visible)) else {
            return;
        };
        let argb = color.to_argb();
        for y in area.y..area.bottom() {
            let start = self.index(area.x, y);
            let end = start + area.width as usize;
            self.pixels[start..end].fill(argb);
        }
    }

    fn plot(&mut self, x: i32, y: i32, argb: u32) {
        if self.visible().is_some_and(|visible| visible.contains(Point::new(x, y))) {
            let index = self.index(x, y);
            self.pixels[index] = argb;
        }
    }
}

/// Part of the segment inside `area` (Liang-Barsky), endpoints snapped to
/// pixels of `area`
fn clip_line(from: Point, to: Point, area: Rect) -> Option<(Point, Point)> {
    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let dx = f64::from(to.x) - x0;
    let dy = f64::from(to.y) - y0;
    let (left, top) = (f64::from(area.x), f64::from(area.y));
    let right = f64::from(area.right() - 1);
    let bottom = f64::from(area.bottom() - 1);

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0 - left), (dx, right - x0), (-dy, y0 - top), (dy, bottom - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    let at = |t: f64| {
        Point::new(
            (x0 + t * dx).round().clamp(left, right) as i32,
            (y0 + t * dy).round().clamp(top, bottom) as i32,
        )
    };
    Some((at(t0), at(t1)))
}

impl Canvas for PixelSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        let clip = self.clip();
        self.fill_clipped(clip, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_clipped(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        let width = width.max(1);
        if rect.is_degenerate() {
            return;
        }
        let doubled = width.saturating_mul(2);
        if doubled >= rect.width || doubled >= rect.height {
            self.fill_clipped(rect, color);
            return;
        }
        let inner_y = rect.y.saturating_add(width);
        let inner_height = rect.height - doubled;
        self.fill_clipped(Rect::new(rect.x, rect.y, rect.width, width), color);
        self.fill_clipped(
            Rect::new(rect.x, rect.bottom() - width, rect.width, width),
            color,
        );
        self.fill_clipped(Rect::new(rect.x, inner_y, width, inner_height), color);
        self.fill_clipped(
            Rect::new(rect.right() - width, inner_y, width, inner_height),
            color,
        );
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        if !self.ready {
            return;
        }
        let Some((from, to)) = self.visible().and_then(|area| clip_line(from, to, area)) else {
            return;
        };
        let argb = color.to_argb();
        let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));
        let (end_x, end_y) = (i64::from(to.x), i64::from(to.y));
        let dx = (end_x - x).abs();
        let dy = -(end_y - y).abs();
        let step_x = if x < end_x { 1 } else { -1 };
        let step_y = if y < end_y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            // clipped endpoints keep every step inside the visible area
            self.plot(x as i32, y as i32, argb);
            if x == end_x && y == end_y {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }
}

impl DrawSurface for PixelSurface {
    fn begin_draw(&mut self) {
        self.drawing = true;
    }

    fn end_draw(&mut self) -> Result<(), SurfaceError> {
        self.drawing = false;
        if !self.clips.is_empty() {
            tracing::warn!(depth = self.clips.len(), "frame ended with clips still pushed");
            self.clips.clear();
        }
        if !self.ready {
            return Err(SurfaceError::Lost);
        }
        self.frames += 1;
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) {
        let clip = rect.intersection(&self.clip()).unwrap_or(Rect::ZERO);
        self.clips.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        if self.ready {
            self.allocate(size);
        } else {
            self.size = size;
        }
    }

    fn release_device_resources(&mut self) {
        self.pixels = Vec::new();
        self.clips.clear();
        self.ready = false;
    }

    fn recreate_device_resources(&mut self, size: Size) -> Result<(), SurfaceError> {
        self.allocate(size);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(surface: &PixelSurface, color: Color) -> usize {
        surface
            .pixels()
            .iter()
            .filter(|p| **p == color.to_argb())
            .count()
    }

    #[test]
    fn test_new_surface_is_ready_and_black() {
        let surface = PixelSurface::new(Size::new(4, 3));
        assert!(surface.is_ready());
        assert_eq!(surface.pixels().len(), 12);
        assert_eq!(count(&surface, Color::BLACK), 12);
    }

    #[test]
    fn test_fill_rect_is_clipped_to_bounds() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.fill_rect(Rect::new(8, 8, 5, 5), Color::RED);
        assert_eq!(count(&surface, Color::RED), 4);
        assert_eq!(surface.pixel(Point::new(9, 9)), Some(Color::RED));
        assert_eq!(surface.pixel(Point::new(10, 10)), None);
    }

    #[test]
    fn test_clip_stack_intersects() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.push_clip(Rect::new(0, 0, 6, 6));
        surface.push_clip(Rect::new(4, 4, 6, 6));
        assert_eq!(surface.clip(), Rect::new(4, 4, 2, 2));

        surface.clear(Color::WHITE);
        assert_eq!(count(&surface, Color::WHITE), 4);

        surface.pop_clip();
        surface.fill_rect(Rect::new(0, 0, 10, 10), Color::BLUE);
        assert_eq!(count(&surface, Color::BLUE), 36);

        surface.pop_clip();
        assert_eq!(surface.clip(), Rect::new(0, 0, 10, 10));
    }

    #[test]
    fn test_disjoint_clip_blocks_drawing() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.push_clip(Rect::new(0, 0, 2, 2));
        surface.push_clip(Rect::new(5, 5, 2, 2));
        surface.clear(Color::RED);
        assert_eq!(count(&surface, Color::RED), 0);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.stroke_rect(Rect::new(0, 0, 10, 10), Color::GREEN, 1);
        assert_eq!(count(&surface, Color::GREEN), 36);
        assert_eq!(surface.pixel(Point::new(5, 5)), Some(Color::BLACK));
    }

    #[test]
    fn test_draw_line_includes_endpoints() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.draw_line(Point::new(0, 0), Point::new(9, 9), Color::YELLOW);
        assert_eq!(count(&surface, Color::YELLOW), 10);
        assert_eq!(surface.pixel(Point::new(9, 9)), Some(Color::YELLOW));

        surface.draw_line(Point::new(2, 0), Point::new(2, -5), Color::CYAN);
        assert_eq!(count(&surface, Color::CYAN), 1);
    }

    #[test]
    fn test_far_line_is_clipped_to_the_surface() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.draw_line(
            Point::new(-1_500_000_000, 0),
            Point::new(1_500_000_000, 0),
            Color::RED,
        );
        assert_eq!(count(&surface, Color::RED), 10);
        assert_eq!(surface.pixel(Point::new(9, 0)), Some(Color::RED));

        surface.draw_line(
            Point::new(-1_000_000_000, -1_000_000_000),
            Point::new(1_000_000_000, 1_000_000_000),
            Color::BLUE,
        );
        assert_eq!(surface.pixel(Point::new(0, 0)), Some(Color::BLUE));
        assert_eq!(surface.pixel(Point::new(9, 9)), Some(Color::BLUE));

        surface.draw_line(Point::new(20, 0), Point::new(i32::MAX, 5), Color::GREEN);
        assert_eq!(count(&surface, Color::GREEN), 0);
    }

    #[test]
    fn test_huge_stroke_width_fills_the_rect() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.stroke_rect(Rect::new(0, 0, 10, 10), Color::GREEN, i32::MAX);
        assert_eq!(count(&surface, Color::GREEN), 100);
    }

    #[test]
    fn test_clip_pushed_before_shrink_stays_in_buffer() {
        let mut surface = PixelSurface::new(Size::new(10, 10));
        surface.push_clip(Rect::new(0, 0, 10, 10));
        surface.resize(Size::new(4, 4));

        surface.fill_rect(Rect::new(0, 0, 10, 10), Color::RED);
        assert_eq!(count(&surface, Color::RED), 16);

        surface.draw_line(Point::new(0, 0), Point::new(9, 9), Color::BLUE);
        assert_eq!(count(&surface, Color::BLUE), 4);
        assert_eq!(surface.pixel(Point::new(3, 3)), Some(Color::BLUE));
        assert_eq!(surface.pixels().len(), 16);
    }

    #[test]
    fn test_released_surface_reports_lost() {
        let mut surface = PixelSurface::new(Size::new(2, 2));
        surface.release_device_resources();
        assert!(!surface.is_ready());
        surface.begin_draw();
        surface.fill_rect(Rect::new(0, 0, 2, 2), Color::RED);
        assert_eq!(surface.end_draw(), Err(SurfaceError::Lost));

        surface.recreate_device_resources(Size::new(3, 3)).unwrap();
        assert_eq!(surface.pixels().len(), 9);
        surface.begin_draw();
        assert_eq!(surface.end_draw(), Ok(()));
        assert_eq!(surface.frame_count(), 1);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut surface = PixelSurface::new(Size::new(2, 2)).with_background(Color::GRAY);
        surface.resize(Size::new(5, 4));
        assert_eq!(surface.size(), Size::new(5, 4));
        assert_eq!(count(&surface, Color::GRAY), 20);
    }
}
