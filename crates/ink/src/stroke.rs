//! Committed stroke record, its bounds and width-per-segment SVG export

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::smooth::{fmt_num, QuadSegment, Segment, StrokeGeometry};
use crate::types::PressurePoint;

/// Axis-aligned bounding box of a stroke's centerline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Bounds of every segment, including the extrema of quadratic pieces.
    ///
    /// Empty input gives a zero box at the origin.
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut extent: Option<(DVec2, DVec2)> = None;
        let mut include = |point: DVec2| {
            extent = Some(match extent {
                Some((min, max)) => (min.min(point), max.max(point)),
                None => (point, point),
            });
        };

        for segment in segments {
            match segment {
                Segment::Line(line) => {
                    include(line.from);
                    include(line.to);
                }
                Segment::Quadratic(quad) => {
                    include(quad.from);
                    include(quad.to);
                    for t in quad_extrema(quad) {
                        include(quad.eval(t));
                    }
                }
            }
        }

        let Some((min, max)) = extent else {
            return Self::default();
        };
        Self {
            left: min.x,
            top: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Parameters in (0, 1) where the curve turns around on either axis
fn quad_extrema(quad: &QuadSegment) -> impl Iterator<Item = f64> {
    let numerator = quad.from - quad.ctrl;
    let denominator = quad.from - quad.ctrl * 2.0 + quad.to;
    [
        (numerator.x, denominator.x),
        (numerator.y, denominator.y),
    ]
    .into_iter()
    .filter(|&(_, d)| d != 0.0)
    .map(|(n, d)| n / d)
    .filter(|&t| t > 0.0 && t < 1.0)
}

/// A finished stroke as handed to the geometry sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<PressurePoint>,
    pub geometry: StrokeGeometry,
    /// Width at pressure 1.0
    pub base_width: f64,
    pub start_time_ms: u64,
    pub end_time_ms: u64,
    pub bounds: Bounds,
}

impl Stroke {
    pub fn new(
        points: Vec<PressurePoint>,
        geometry: StrokeGeometry,
        base_width: f64,
        start_time_ms: u64,
        end_time_ms: u64,
    ) -> Self {
        let bounds = Bounds::from_segments(&geometry.segments);
        Self {
            points,
            geometry,
            base_width,
            start_time_ms,
            end_time_ms,
            bounds,
        }
    }

    /// Number of points in the stroke
    pub fn complexity(&self) -> usize {
        self.points.len()
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// SVG group with one round-capped `<line>` per point pair.
    ///
    /// Each line's width is its first point's pressure times the base width.
    /// The group is translated so the stroke's bounds are centered on the origin.
    pub fn to_svg(&self) -> String {
        let center = self.bounds.center();
        let mut svg = format!(
            "<g transform=\"translate({},{})\">\n",
            fmt_num(-center.x),
            fmt_num(-center.y)
        );

        for pair in self.points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            svg.push_str(&format!(
                concat!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" ",
                    "stroke-width=\"{}\" stroke-linecap=\"round\" />\n",
                ),
                fmt_num(p1.x),
                fmt_num(p1.y),
                fmt_num(p2.x),
                fmt_num(p2.y),
                fmt_num(p1.pressure * self.base_width)
            ));
        }

        svg.push_str("</g>\n");
        svg
    }
}
