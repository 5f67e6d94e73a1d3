//! Frame orchestration
//!
//! The [`Renderer`] owns one drawing surface and its dirty-region tracker.
//! A frame repaints either everything (once, unclipped) or each tracked
//! region under its own clip. Device loss at the end of a frame releases the
//! surface's resources and leaves the renderer waiting for
//! [`Renderer::recreate_device_resources`].
//!
//! ```text
//! Uninitialized --recreate--> Ready --begin_draw--> Drawing
//!       ^                       ^                      |
//!       |                       +---- end_draw ok -----+
//!       +------------------ end_draw lost -------------+
//! ```

use crate::dirty::DirtyRegionTracker;
use crate::error::{RenderError, Result, SurfaceError};
use crate::surface::{Canvas, DrawSurface};
use zwidget_platform::{Rect, Size};

/// Renderer lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// No device resources
    Uninitialized,
    /// Resources exist, no frame open
    Ready,
    /// Between `begin_draw` and `end_draw`
    Drawing,
}

/// What a call to [`Renderer::render`] painted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Nothing was dirty
    Skipped,
    /// The whole surface was repainted in one pass
    Full,
    /// This many regions were repainted, each under its own clip
    Partial(usize),
}

/// Dirty-region driven renderer over a [`DrawSurface`]
#[derive(Debug)]
pub struct Renderer<S: DrawSurface> {
    surface: S,
    tracker: DirtyRegionTracker,
    state: RenderState,
    size: Size,
}

impl<S: DrawSurface> Renderer<S> {
    /// Create the surface's device resources at `size` and schedule a full paint
    ///
    /// If the resources cannot be created the renderer starts out
    /// uninitialized; call [`recreate_device_resources`](Self::recreate_device_resources)
    /// to retry.
    pub fn new(surface: S, size: Size) -> Self {
        let mut renderer = Self {
            surface,
            tracker: DirtyRegionTracker::new(),
            state: RenderState::Uninitialized,
            size,
        };
        if let Err(err) = renderer.recreate_device_resources(size) {
            tracing::warn!(error = %err, "initial device resource creation failed");
        }
        renderer.tracker.mark_full_dirty();
        renderer
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn tracker(&self) -> &DirtyRegionTracker {
        &self.tracker
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Queue `rect` for repaint
    pub fn invalidate(&mut self, rect: Rect) {
        self.tracker.mark_dirty(rect);
    }

    /// Queue the whole surface for repaint
    pub fn invalidate_full(&mut self) {
        self.tracker.mark_full_dirty();
    }

    pub fn needs_redraw(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Resize the surface; everything must be repainted afterwards
    pub fn resize(&mut self, size: Size) {
        if size != self.size {
            tracing::debug!(width = size.width, height = size.height, "renderer resized");
        }
        self.size = size;
        self.surface.resize(size);
        self.tracker.mark_full_dirty();
    }

    /// Drop the surface's device resources
    pub fn release_device_resources(&mut self) {
        self.surface.release_device_resources();
        self.state = RenderState::Uninitialized;
    }

    /// (Re)create device resources at `size`
    ///
    /// On success the renderer is ready and fully dirty. On failure it stays
    /// uninitialized.
    pub fn recreate_device_resources(&mut self, size: Size) -> Result<()> {
        if self.state == RenderState::Drawing {
            return Err(RenderError::AlreadyDrawing);
        }
        match self.surface.recreate_device_resources(size) {
            Ok(()) => {
                self.size = size;
                self.state = RenderState::Ready;
                self.tracker.mark_full_dirty();
                tracing::debug!(width = size.width, height = size.height, "device resources created");
                Ok(())
            }
            Err(err) => {
                self.state = RenderState::Uninitialized;
                Err(err.into())
            }
        }
    }

    /// Open a frame
    pub fn begin_draw(&mut self) -> Result<()> {
        match self.state {
            RenderState::Uninitialized => Err(RenderError::NotReady),
            RenderState::Drawing => Err(RenderError::AlreadyDrawing),
            RenderState::Ready if !self.surface.is_ready() => {
                self.state = RenderState::Uninitialized;
                Err(RenderError::NotReady)
            }
            RenderState::Ready => {
                self.surface.begin_draw();
                self.state = RenderState::Drawing;
                Ok(())
            }
        }
    }

    /// Close the frame
    ///
    /// Success clears the tracker. Device loss releases resources, leaves the
    /// renderer uninitialized and fully dirty. Any other failure keeps the
    /// tracked regions so the next frame repaints them.
    pub fn end_draw(&mut self) -> Result<()> {
        if self.state != RenderState::Drawing {
            return Err(RenderError::NotReady);
        }
        match self.surface.end_draw() {
            Ok(()) => {
                self.state = RenderState::Ready;
                self.tracker.clear();
                Ok(())
            }
            Err(SurfaceError::Lost) => {
                tracing::warn!("drawing device lost, releasing device resources");
                self.release_device_resources();
                self.tracker.mark_full_dirty();
                Err(RenderError::DeviceLost)
            }
            Err(SurfaceError::Draw(message)) => {
                tracing::warn!(%message, "frame failed");
                self.state = RenderState::Ready;
                Err(RenderError::Draw(message))
            }
        }
    }

    /// Repaint whatever is dirty
    ///
    /// A clean renderer skips the frame whatever its state.
    /// `paint` draws the whole scene. When only some regions are dirty it is
    /// called once per region with the surface clipped to that region.
    pub fn render<F>(&mut self, mut paint: F) -> Result<Frame>
    where
        F: FnMut(&mut dyn Canvas),
    {
        if !self.tracker.is_dirty() {
            return Ok(Frame::Skipped);
        }
        match self.state {
            RenderState::Uninitialized => return Err(RenderError::NotReady),
            RenderState::Drawing => return Err(RenderError::AlreadyDrawing),
            RenderState::Ready => {}
        }

        self.begin_draw()?;
        let frame = if self.tracker.is_full_dirty() {
            paint(&mut self.surface);
            Frame::Full
        } else {
            for region in self.tracker.regions() {
                self.surface.push_clip(*region);
                paint(&mut self.surface);
                self.surface.pop_clip();
            }
            Frame::Partial(self.tracker.region_count())
        };
        self.end_draw()?;

        tracing::trace!(?frame, "frame presented");
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::recording::{DrawCommand, RecordingSurface};

    fn renderer() -> Renderer<RecordingSurface> {
        Renderer::new(RecordingSurface::new(Size::new(100, 100)), Size::new(100, 100))
    }

    fn fill(canvas: &mut dyn Canvas) {
        canvas.fill_rect(Rect::new(0, 0, 100, 100), Color::WHITE);
    }

    #[test]
    fn test_new_renderer_is_ready_and_full_dirty() {
        let renderer = renderer();
        assert_eq!(renderer.state(), RenderState::Ready);
        assert!(renderer.tracker().is_full_dirty());
        assert_eq!(
            renderer.surface().commands(),
            &[DrawCommand::RecreateResources(Size::new(100, 100))]
        );
    }

    #[test]
    fn test_failed_initialization_leaves_renderer_uninitialized() {
        let mut surface = RecordingSurface::uninitialized(Size::new(10, 10));
        surface.fail_next_recreate(SurfaceError::Lost);
        let mut renderer = Renderer::new(surface, Size::new(10, 10));
        assert_eq!(renderer.state(), RenderState::Uninitialized);
        assert_eq!(renderer.render(fill), Err(RenderError::NotReady));

        renderer.recreate_device_resources(Size::new(10, 10)).unwrap();
        assert_eq!(renderer.render(fill), Ok(Frame::Full));
    }

    #[test]
    fn test_full_frame_paints_once_unclipped() {
        let mut renderer = renderer();
        let mut calls = 0;
        let frame = renderer.render(|canvas| {
            calls += 1;
            fill(canvas);
        });
        assert_eq!(frame, Ok(Frame::Full));
        assert_eq!(calls, 1);
        assert_eq!(
            renderer
                .surface()
                .count(|c| matches!(c, DrawCommand::PushClip(_))),
            0
        );
        assert!(!renderer.needs_redraw());
    }

    #[test]
    fn test_clean_renderer_skips_frame() {
        let mut renderer = renderer();
        renderer.render(fill).unwrap();
        renderer.surface_mut().clear_commands();

        assert_eq!(renderer.render(fill), Ok(Frame::Skipped));
        assert!(renderer.surface().commands().is_empty());
    }

    #[test]
    fn test_clean_renderer_skips_frame_without_resources() {
        let mut renderer = renderer();
        renderer.render(fill).unwrap();
        renderer.release_device_resources();
        assert!(!renderer.needs_redraw());

        assert_eq!(renderer.render(|_| {}), Ok(Frame::Skipped));
        assert_eq!(renderer.state(), RenderState::Uninitialized);

        renderer.invalidate(Rect::new(0, 0, 5, 5));
        assert_eq!(renderer.render(fill), Err(RenderError::NotReady));
    }

    #[test]
    fn test_partial_frame_clips_each_region() {
        let mut renderer = renderer();
        renderer.render(fill).unwrap();
        renderer.surface_mut().clear_commands();

        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(50, 50, 10, 10);
        renderer.invalidate(a);
        renderer.invalidate(b);

        let mut calls = 0;
        let frame = renderer.render(|canvas| {
            calls += 1;
            fill(canvas);
        });
        assert_eq!(frame, Ok(Frame::Partial(2)));
        assert_eq!(calls, 2);

        let white = Color::WHITE;
        let full = Rect::new(0, 0, 100, 100);
        assert_eq!(
            renderer.surface().commands(),
            &[
                DrawCommand::BeginDraw,
                DrawCommand::PushClip(a),
                DrawCommand::FillRect { rect: full, color: white },
                DrawCommand::PopClip,
                DrawCommand::PushClip(b),
                DrawCommand::FillRect { rect: full, color: white },
                DrawCommand::PopClip,
                DrawCommand::EndDraw,
            ]
        );
        assert!(!renderer.needs_redraw());
    }

    #[test]
    fn test_reentrant_begin_draw_is_rejected() {
        let mut renderer = renderer();
        renderer.begin_draw().unwrap();
        assert_eq!(renderer.begin_draw(), Err(RenderError::AlreadyDrawing));
        assert_eq!(renderer.render(fill), Err(RenderError::AlreadyDrawing));
        renderer.end_draw().unwrap();
        assert_eq!(renderer.state(), RenderState::Ready);
    }

    #[test]
    fn test_end_draw_without_frame_fails() {
        let mut renderer = renderer();
        assert_eq!(renderer.end_draw(), Err(RenderError::NotReady));
    }

    #[test]
    fn test_device_loss_and_recovery() {
        let mut renderer = renderer();
        renderer.render(fill).unwrap();
        renderer.invalidate(Rect::new(0, 0, 5, 5));
        renderer.surface_mut().fail_next_frame(SurfaceError::Lost);

        assert_eq!(renderer.render(fill), Err(RenderError::DeviceLost));
        assert_eq!(renderer.state(), RenderState::Uninitialized);
        assert!(renderer.tracker().is_full_dirty());
        assert!(!renderer.surface().is_ready());
        assert_eq!(
            renderer.surface().commands().last(),
            Some(&DrawCommand::ReleaseResources)
        );

        assert_eq!(renderer.begin_draw(), Err(RenderError::NotReady));

        renderer.recreate_device_resources(Size::new(80, 60)).unwrap();
        assert_eq!(renderer.state(), RenderState::Ready);
        assert_eq!(renderer.size(), Size::new(80, 60));
        assert_eq!(renderer.render(fill), Ok(Frame::Full));
    }

    #[test]
    fn test_draw_failure_keeps_regions() {
        let mut renderer = renderer();
        renderer.render(fill).unwrap();
        let dirty = Rect::new(10, 10, 5, 5);
        renderer.invalidate(dirty);
        renderer
            .surface_mut()
            .fail_next_frame(SurfaceError::Draw("flush failed".into()));

        assert_eq!(
            renderer.render(fill),
            Err(RenderError::Draw("flush failed".into()))
        );
        assert_eq!(renderer.state(), RenderState::Ready);
        assert_eq!(renderer.tracker().regions(), &[dirty]);

        assert_eq!(renderer.render(fill), Ok(Frame::Partial(1)));
    }

    #[test]
    fn test_resize_marks_full_dirty() {
        let mut renderer = renderer();
        renderer.render(fill).unwrap();
        renderer.resize(Size::new(200, 150));

        assert!(renderer.tracker().is_full_dirty());
        assert_eq!(renderer.size(), Size::new(200, 150));
        assert_eq!(renderer.surface().size(), Size::new(200, 150));
    }

    #[test]
    fn test_external_loss_is_detected_at_begin_draw() {
        let mut renderer = renderer();
        renderer.surface_mut().release_device_resources();
        assert_eq!(renderer.begin_draw(), Err(RenderError::NotReady));
        assert_eq!(renderer.state(), RenderState::Uninitialized);
    }
}
