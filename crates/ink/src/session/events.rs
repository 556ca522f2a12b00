//! Events emitted over a stroke session's lifecycle.

use crate::stroke::Stroke;
use crate::types::PressurePoint;

/// Events emitted over a stroke session's lifecycle.
///
/// Listeners run synchronously inside the triggering call and must not
/// mutate the session.
#[derive(Debug, Clone)]
pub enum StrokeEvent {
    /// Capture began at `point`.
    Started {
        timestamp_ms: u64,
        point: PressurePoint,
    },
    /// Real pressure arrived and earlier floored points were widened.
    Corrected { pressure: f64, point_count: usize },
    /// A stroke was committed to the geometry sink.
    PathCreated { stroke: Stroke },
    /// The session ended without geometry (degenerate or cancelled).
    Discarded { point_count: usize },
}
