//! Capabilities the host provides to a stroke session
//!
//! The core never touches a canvas directly. A host adapter implements
//! [`StrokeSurface`] for live feedback and [`GeometrySink`] for finished
//! strokes, and registers whatever types it needs with its own framework.

use crate::smooth::QuadSegment;
use crate::stroke::Stroke;
use crate::types::PressurePoint;

/// Live drawing target used while a stroke is being captured.
///
/// Calls are synchronous and must not re-enter the session.
pub trait StrokeSurface {
    /// Draw one new smoothed segment
    fn draw_quadratic(&mut self, segment: &QuadSegment);

    /// Redraw the whole in-progress stroke after its points were rewritten
    fn redraw(&mut self, points: &[PressurePoint], segments: &[QuadSegment]);

    /// Remove any in-progress drawing
    fn clear(&mut self);
}

/// Owner of committed strokes (persistence, markup export, compositing)
pub trait GeometrySink {
    /// Take ownership of a finished stroke
    fn persist_geometry(&mut self, stroke: Stroke);
}

/// Surface for headless sessions; ignores every call
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl StrokeSurface for NullSurface {
    fn draw_quadratic(&mut self, _segment: &QuadSegment) {}

    fn redraw(&mut self, _points: &[PressurePoint], _segments: &[QuadSegment]) {}

    fn clear(&mut self) {}
}
