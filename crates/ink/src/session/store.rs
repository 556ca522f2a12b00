//! Append-only in-memory stroke storage.

use crate::stroke::Stroke;
use crate::surface::GeometrySink;

/// Append-only in-memory storage for committed strokes.
///
/// Serves hosts without persistence of their own. Strokes are kept in
/// commit order.
#[derive(Debug, Default, Clone)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Total number of points across every stored stroke
    pub fn total_points(&self) -> usize {
        self.strokes.iter().map(Stroke::complexity).sum()
    }
}

impl GeometrySink for StrokeStore {
    fn persist_geometry(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }
}
