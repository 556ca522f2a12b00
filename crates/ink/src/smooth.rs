//! Pressure-weighted midpoint-quadratic smoothing
//!
//! Raw points are never joined by straight segments. Each rendered piece runs
//! from the midpoint of the previous pair to the midpoint of the current pair
//! with the shared raw point as quadratic control, and its width is the
//! control point's pressure times the base width.
//!
//! Segment `i` depends only on `points[i - 2..=i]`, so drawing the newest
//! segment during capture and redrawing the whole buffer give identical
//! geometry.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{CAP_OFFSET_DIVISOR, DEGENERATE_PATH};
use crate::types::PressurePoint;

/// Quadratic Bezier piece with a constant stroke width
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
#[repr(C)]
pub struct QuadSegment {
    pub from: DVec2,
    pub ctrl: DVec2,
    pub to: DVec2,
    pub width: f64,
}

impl QuadSegment {
    /// Point on the curve at parameter `t` in [0, 1]
    pub fn eval(&self, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        self.from * (mt * mt) + self.ctrl * (2.0 * mt * t) + self.to * (t * t)
    }
}

/// Straight piece with a constant stroke width
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
#[repr(C)]
pub struct LineSegment {
    pub from: DVec2,
    pub to: DVec2,
    pub width: f64,
}

/// One renderable piece of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Line(LineSegment),
    Quadratic(QuadSegment),
}

impl Segment {
    pub fn width(&self) -> f64 {
        match self {
            Segment::Line(line) => line.width,
            Segment::Quadratic(quad) => quad.width,
        }
    }

    /// Same curve expressed as a quadratic (a line gets its chord midpoint as control)
    pub fn to_quadratic(&self) -> QuadSegment {
        match *self {
            Segment::Line(line) => QuadSegment {
                from: line.from,
                ctrl: (line.from + line.to) * 0.5,
                to: line.to,
                width: line.width,
            },
            Segment::Quadratic(quad) => quad,
        }
    }
}

/// Final renderable form of a stroke: segments plus the path description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeGeometry {
    pub segments: Vec<Segment>,
    pub path_data: String,
}

impl StrokeGeometry {
    /// Geometry of a stroke that collapsed to nothing
    pub fn degenerate() -> Self {
        Self {
            segments: Vec::new(),
            path_data: DEGENERATE_PATH.to_string(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.segments.is_empty() || self.path_data == DEGENERATE_PATH
    }

    /// Segments as quadratics, ready for a GPU buffer
    pub fn quad_segments(&self) -> Vec<QuadSegment> {
        self.segments.iter().map(Segment::to_quadratic).collect()
    }

    /// Raw bytes of [`StrokeGeometry::quad_segments`]
    pub fn upload_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice::<QuadSegment, u8>(&self.quad_segments()).to_vec()
    }
}

/// Shortest float form: no trailing `.0`, no negative zero
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// -1, 0 or 1 depending on whether `to` lies below, at or above `from`
fn direction_sign(from: f64, to: f64) -> f64 {
    if to < from {
        -1.0
    } else if to == from {
        0.0
    } else {
        1.0
    }
}

/// Turns point sequences into pressure-weighted smooth geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSmoother {
    base_width: f64,
}

impl CurveSmoother {
    pub fn new(base_width: f64) -> Self {
        Self { base_width }
    }

    pub fn base_width(&self) -> f64 {
        self.base_width
    }

    /// Segment ending at the midpoint of `points[index - 1]` and `points[index]`.
    ///
    /// Returns `None` for `index == 0` or past the end.
    pub fn segment(&self, points: &[PressurePoint], index: usize) -> Option<QuadSegment> {
        if index == 0 || index >= points.len() {
            return None;
        }

        let ctrl = points[index - 1];
        let from = if index == 1 {
            points[0].position()
        } else {
            points[index - 2].midpoint_from(&ctrl).position()
        };

        Some(QuadSegment {
            from,
            ctrl: ctrl.position(),
            to: ctrl.midpoint_from(&points[index]).position(),
            width: ctrl.pressure * self.base_width,
        })
    }

    /// The newest segment, drawn incrementally while capturing
    pub fn latest_segment(&self, points: &[PressurePoint]) -> Option<QuadSegment> {
        self.segment(points, points.len().saturating_sub(1))
    }

    /// Every segment of the live rendering, in order
    pub fn segments(&self, points: &[PressurePoint]) -> Vec<QuadSegment> {
        (1..points.len())
            .filter_map(|index| self.segment(points, index))
            .collect()
    }

    /// Final geometry with the tap and two-point special cases applied
    pub fn geometry(&self, points: &[PressurePoint]) -> StrokeGeometry {
        if points.len() < 2 {
            return StrokeGeometry::degenerate();
        }

        let segments = match points {
            [a, b] if a.same_position(b) => {
                let offset = a.pressure * self.base_width / CAP_OFFSET_DIVISOR;
                let dot = [a.offset_x(-offset), b.offset_x(offset)];
                self.segments(&dot)
                    .into_iter()
                    .map(Segment::Quadratic)
                    .collect()
            }
            [a, b] => vec![Segment::Line(LineSegment {
                from: a.position(),
                to: b.position(),
                width: self.base_width,
            })],
            _ => self
                .segments(points)
                .into_iter()
                .map(Segment::Quadratic)
                .collect(),
        };

        StrokeGeometry {
            segments,
            path_data: self.path_data(points),
        }
    }

    /// Path description (`M`/`Q`/`L` commands) of the smoothed stroke.
    ///
    /// The first move and the final line are nudged by a width-derived
    /// offset in the direction the stroke leaves and enters, so the outline
    /// closes without overlapping itself.
    pub fn path_data(&self, points: &[PressurePoint]) -> String {
        let len = points.len();
        if len < 2 {
            return DEGENERATE_PATH.to_string();
        }

        let offset = self.base_width / CAP_OFFSET_DIVISOR;
        let many_points = len > 2;
        let mut p1 = points[0];
        let mut p2 = points[1];
        let mut mid = p1.position();

        let (mut sign_x, mut sign_y) = if many_points {
            (
                direction_sign(p2.x, points[2].x),
                direction_sign(p2.y, points[2].y),
            )
        } else {
            (1.0, 1.0)
        };

        let mut path = String::new();
        for i in 1..len {
            path.push_str(&format!(
                "M {} {} ",
                fmt_num(mid.x - sign_x * offset),
                fmt_num(mid.y - sign_y * offset)
            ));
            if !p1.same_position(&p2) {
                mid = p1.midpoint_from(&p2).position();
                path.push_str(&format!(
                    "Q {} {} {} {} ",
                    fmt_num(p1.x),
                    fmt_num(p1.y),
                    fmt_num(mid.x),
                    fmt_num(mid.y)
                ));
            }
            p1 = points[i];
            if i + 1 < len {
                p2 = points[i + 1];
            }
        }

        if many_points {
            let before = points[len - 2];
            sign_x = direction_sign(before.x, p1.x);
            sign_y = direction_sign(before.y, p1.y);
        }

        path.push_str(&format!(
            "L {} {}",
            fmt_num(p1.x + sign_x * offset),
            fmt_num(p1.y + sign_y * offset)
        ));
        path
    }
}
