//! Recording surface
//!
//! [`RecordingSurface`] draws nothing. It records every call as a
//! [`DrawCommand`] so frames can be inspected after the fact, and it can be
//! told to fail upcoming frames to exercise device-loss handling.

use crate::color::Color;
use crate::error::SurfaceError;
use crate::surface::{Canvas, DrawSurface};
use std::collections::VecDeque;
use zwidget_platform::{Point, Rect, Size};

/// A recorded surface call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    // Frame lifecycle
    BeginDraw,
    EndDraw,

    // State
    PushClip(Rect),
    PopClip,

    // Drawing
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: i32,
    },
    DrawLine {
        from: Point,
        to: Point,
        color: Color,
    },

    // Resources
    Resize(Size),
    ReleaseResources,
    RecreateResources(Size),
}

/// Surface that records calls instead of drawing
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    size: Size,
    ready: bool,
    clip_depth: usize,
    frames: u64,
    /// Results handed out by upcoming `end_draw` calls, in order
    failures: VecDeque<SurfaceError>,
    recreate_failures: VecDeque<SurfaceError>,
}

impl RecordingSurface {
    /// Surface with resources already created at `size`
    pub fn new(size: Size) -> Self {
        Self {
            commands: Vec::new(),
            size,
            ready: true,
            clip_depth: 0,
            frames: 0,
            failures: VecDeque::new(),
            recreate_failures: VecDeque::new(),
        }
    }

    /// Surface that needs `recreate_device_resources` before drawing
    pub fn uninitialized(size: Size) -> Self {
        Self {
            ready: false,
            ..Self::new(size)
        }
    }

    /// Queue a failure for an upcoming `end_draw`; queued failures are used in order
    pub fn fail_next_frame(&mut self, error: SurfaceError) {
        self.failures.push_back(error);
    }

    /// Make the next `recreate_device_resources` return `error`
    pub fn fail_next_recreate(&mut self, error: SurfaceError) {
        self.recreate_failures.push_back(error);
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear all recorded commands
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Frames that ended successfully
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Number of recorded commands matching `predicate`
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Canvas for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::DrawLine { from, to, color });
    }
}

impl DrawSurface for RecordingSurface {
    fn begin_draw(&mut self) {
        self.commands.push(DrawCommand::BeginDraw);
    }

    fn end_draw(&mut self) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::EndDraw);
        self.clip_depth = 0;
        if let Some(error) = self.failures.pop_front() {
            if error == SurfaceError::Lost {
                self.ready = false;
            }
            return Err(error);
        }
        if !self.ready {
            return Err(SurfaceError::Lost);
        }
        self.frames += 1;
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::PushClip(rect));
        self.clip_depth += 1;
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
        self.clip_depth = self.clip_depth.saturating_sub(1);
    }

    fn resize(&mut self, size: Size) {
        self.commands.push(DrawCommand::Resize(size));
        self.size = size;
    }

    fn release_device_resources(&mut self) {
        self.commands.push(DrawCommand::ReleaseResources);
        self.ready = false;
    }

    fn recreate_device_resources(&mut self, size: Size) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::RecreateResources(size));
        if let Some(error) = self.recreate_failures.pop_front() {
            return Err(error);
        }
        self.size = size;
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(Size::new(10, 10));
        surface.begin_draw();
        surface.push_clip(Rect::new(0, 0, 5, 5));
        surface.clear(Color::WHITE);
        surface.pop_clip();
        surface.end_draw().unwrap();

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::BeginDraw,
                DrawCommand::PushClip(Rect::new(0, 0, 5, 5)),
                DrawCommand::Clear(Color::WHITE),
                DrawCommand::PopClip,
                DrawCommand::EndDraw,
            ]
        );
        assert_eq!(surface.frame_count(), 1);
    }

    #[test]
    fn test_injected_failures_are_consumed_in_order() {
        let mut surface = RecordingSurface::new(Size::new(1, 1));
        surface.fail_next_frame(SurfaceError::Draw("flush".into()));
        surface.fail_next_frame(SurfaceError::Lost);

        assert_eq!(surface.end_draw(), Err(SurfaceError::Draw("flush".into())));
        assert!(surface.is_ready());
        assert_eq!(surface.end_draw(), Err(SurfaceError::Lost));
        assert!(!surface.is_ready());

        surface.recreate_device_resources(Size::new(2, 2)).unwrap();
        assert_eq!(surface.end_draw(), Ok(()));
    }

    #[test]
    fn test_take_commands_empties_the_log() {
        let mut surface = RecordingSurface::new(Size::new(1, 1));
        surface.fill_rect(Rect::new(0, 0, 1, 1), Color::RED);
        assert_eq!(surface.take_commands().len(), 1);
        assert!(surface.commands().is_empty());
    }
}
