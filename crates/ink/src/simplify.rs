//! Polyline simplification in pressure-augmented space
//!
//! Two passes over an ordered point sequence:
//! 1. a radial-distance prefilter that drops points closer than the tolerance
//!    to the last kept point (skipped in highest-quality mode)
//! 2. Douglas-Peucker with an explicit work stack
//!
//! Distances come from a [`DistanceMetric`]. [`Euclidean`] measures x/y only;
//! [`PressureWeighted`] adds pressure as a third, scaled axis so that a sharp
//! pressure change survives simplification even on a straight line.
//!
//! Worst case (tolerance 0 on a very long stroke) every point is kept, which
//! costs O(n) stack entries and O(n^2) time.

use glam::{DVec2, DVec3};
use pressure_ink_config::SimplifyConfig;
use tracing::{debug, warn};

use crate::constants::DEFAULT_TOLERANCE;
use crate::types::PressurePoint;

/// Squared-distance metric used by the simplifier
pub trait DistanceMetric {
    /// Squared distance between two points
    fn square_distance(&self, a: &PressurePoint, b: &PressurePoint) -> f64;

    /// Squared distance from `p` to the segment `[start, end]`
    fn square_segment_distance(
        &self,
        p: &PressurePoint,
        start: &PressurePoint,
        end: &PressurePoint,
    ) -> f64;
}

/// Plain x/y distance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn square_distance(&self, a: &PressurePoint, b: &PressurePoint) -> f64 {
        a.position().distance_squared(b.position())
    }

    fn square_segment_distance(
        &self,
        p: &PressurePoint,
        start: &PressurePoint,
        end: &PressurePoint,
    ) -> f64 {
        let origin = start.position();
        let d = end.position() - origin;
        let mut closest = origin;

        if d != DVec2::ZERO {
            let t = (p.position() - origin).dot(d) / d.length_squared();
            if t > 1.0 {
                closest = end.position();
            } else if t > 0.0 {
                closest = origin + d * t;
            }
        }

        p.position().distance_squared(closest)
    }
}

/// x/y distance plus `coefficient * dpressure^2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureWeighted {
    pub coefficient: f64,
}

impl Default for PressureWeighted {
    fn default() -> Self {
        Self {
            coefficient: pressure_ink_config::DEFAULT_PRESSURE_COEFFICIENT,
        }
    }
}

impl PressureWeighted {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }

    #[inline]
    fn weights(&self) -> DVec3 {
        DVec3::new(1.0, 1.0, self.coefficient)
    }

    #[inline]
    fn weighted_dot(&self, a: DVec3, b: DVec3) -> f64 {
        a.dot(b * self.weights())
    }
}

impl DistanceMetric for PressureWeighted {
    fn square_distance(&self, a: &PressurePoint, b: &PressurePoint) -> f64 {
        let d = a.to_dvec3() - b.to_dvec3();
        self.weighted_dot(d, d)
    }

    fn square_segment_distance(
        &self,
        p: &PressurePoint,
        start: &PressurePoint,
        end: &PressurePoint,
    ) -> f64 {
        let origin = start.to_dvec3();
        let d = end.to_dvec3() - origin;
        let mut closest = origin;

        // Zero with coefficient 0 and a pure pressure change; treat as a point.
        let denominator = self.weighted_dot(d, d);
        if denominator > 0.0 {
            let t = self.weighted_dot(p.to_dvec3() - origin, d) / denominator;
            if t > 1.0 {
                closest = end.to_dvec3();
            } else if t > 0.0 {
                closest = origin + d * t;
            }
        }

        let offset = p.to_dvec3() - closest;
        self.weighted_dot(offset, offset)
    }
}

/// Radial-distance + Douglas-Peucker simplifier over a pluggable metric
#[derive(Debug, Clone)]
pub struct Simplifier<M: DistanceMetric> {
    metric: M,
    tolerance: f64,
    sq_tolerance: f64,
}

/// Simplifier measuring in (x, y, scaled pressure)
pub type PressureSimplifier = Simplifier<PressureWeighted>;

impl<M: DistanceMetric + Default> Default for Simplifier<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl PressureSimplifier {
    /// Pressure-aware simplifier with the given pressure coefficient
    pub fn pressure_aware(coefficient: f64) -> Self {
        Self::new(PressureWeighted::new(coefficient))
    }

    pub fn from_config(config: &SimplifyConfig) -> Self {
        let mut simplifier = Self::pressure_aware(config.pressure_coefficient);
        if config.is_enabled() {
            simplifier.set_tolerance(config.tolerance);
        }
        simplifier
    }

    pub fn pressure_coefficient(&self) -> f64 {
        self.metric.coefficient
    }

    pub fn set_pressure_coefficient(&mut self, coefficient: f64) {
        self.metric.coefficient = coefficient;
    }
}

impl<M: DistanceMetric> Simplifier<M> {
    /// Create a simplifier with the default tolerance of 1
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            tolerance: DEFAULT_TOLERANCE,
            sq_tolerance: DEFAULT_TOLERANCE * DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Set the tolerance and refresh the cached square.
    ///
    /// Non-finite or negative values reset to the default.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        let tolerance = if tolerance.is_finite() && tolerance >= 0.0 {
            tolerance
        } else {
            warn!(
                "Simplifier: invalid tolerance {}, using {}",
                tolerance, DEFAULT_TOLERANCE
            );
            DEFAULT_TOLERANCE
        };
        self.tolerance = tolerance;
        self.sq_tolerance = tolerance * tolerance;
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Single pass keeping points farther than the tolerance from the last kept one.
    ///
    /// The first and last input points are always kept.
    pub fn radial_distance(&self, points: &[PressurePoint]) -> Vec<PressurePoint> {
        let Some(first) = points.first() else {
            return Vec::new();
        };

        let mut kept = vec![*first];
        let mut prev_index = 0;

        for (i, point) in points.iter().enumerate().skip(1) {
            if self.metric.square_distance(point, &points[prev_index]) > self.sq_tolerance {
                kept.push(*point);
                prev_index = i;
            }
        }

        let last_index = points.len() - 1;
        if prev_index != last_index {
            kept.push(points[last_index]);
        }

        kept
    }

    /// Douglas-Peucker reduction with an explicit stack of index ranges
    pub fn douglas_peucker(&self, points: &[PressurePoint]) -> Vec<PressurePoint> {
        let len = points.len();
        if len <= 2 {
            return points.to_vec();
        }

        let mut markers = vec![false; len];
        markers[0] = true;
        markers[len - 1] = true;

        let mut stack = vec![(0, len - 1)];

        while let Some((first, last)) = stack.pop() {
            let mut max_sq_dist = 0.0;
            let mut index = first;

            for i in first + 1..last {
                let sq_dist =
                    self.metric
                        .square_segment_distance(&points[i], &points[first], &points[last]);
                if sq_dist > max_sq_dist {
                    index = i;
                    max_sq_dist = sq_dist;
                }
            }

            if max_sq_dist > self.sq_tolerance {
                markers[index] = true;
                stack.push((first, index));
                stack.push((index, last));
            }
        }

        points
            .iter()
            .zip(&markers)
            .filter(|&(_, keep)| *keep)
            .map(|(&p, _)| p)
            .collect()
    }

    /// Run the prefilter (unless `highest_quality`) and then Douglas-Peucker.
    ///
    /// Sequences of two points or fewer come back unchanged.
    pub fn simplify(&self, points: &[PressurePoint], highest_quality: bool) -> Vec<PressurePoint> {
        if points.len() <= 2 {
            return points.to_vec();
        }

        let simplified = if highest_quality {
            self.douglas_peucker(points)
        } else {
            self.douglas_peucker(&self.radial_distance(points))
        };

        debug!(
            "Simplifier: {} -> {} points (tolerance {}, highest_quality {})",
            points.len(),
            simplified.len(),
            self.tolerance,
            highest_quality
        );

        simplified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, pressure: f64) -> PressurePoint {
        PressurePoint::new(x, y, pressure)
    }

    #[test]
    fn test_two_points_pass_through() {
        let simplifier = PressureSimplifier::pressure_aware(100.0).with_tolerance(1000.0);
        let points = vec![p(0.0, 0.0, 0.1), p(0.1, 0.0, 0.9)];
        assert_eq!(simplifier.simplify(&points, false), points);
        assert_eq!(simplifier.simplify(&points, true), points);
    }

    #[test]
    fn test_empty_and_single_point() {
        let simplifier = Simplifier::new(Euclidean);
        assert!(simplifier.simplify(&[], false).is_empty());
        assert!(simplifier.radial_distance(&[]).is_empty());
        let single = vec![p(1.0, 1.0, 0.5)];
        assert_eq!(simplifier.simplify(&single, false), single);
        assert_eq!(simplifier.radial_distance(&single), single);
    }

    #[test]
    fn test_points_within_tolerance_collapse_to_endpoints() {
        let simplifier = PressureSimplifier::pressure_aware(100.0).with_tolerance(0.5);
        let points: Vec<_> = (0..20)
            .map(|i| p(i as f64, if i % 2 == 0 { 0.1 } else { -0.1 }, 0.5))
            .collect();

        for highest_quality in [false, true] {
            let simplified = simplifier.simplify(&points, highest_quality);
            assert_eq!(simplified, vec![points[0], points[19]]);
        }
    }

    #[test]
    fn test_corner_is_preserved() {
        let simplifier = Simplifier::new(Euclidean).with_tolerance(0.5);
        let points = vec![
            p(0.0, 0.0, 0.5),
            p(5.0, 0.0, 0.5),
            p(10.0, 0.0, 0.5),
            p(10.0, 5.0, 0.5),
            p(10.0, 10.0, 0.5),
        ];
        let simplified = simplifier.simplify(&points, true);
        assert_eq!(simplified, vec![points[0], points[2], points[4]]);
    }

    #[test]
    fn test_pressure_spike_survives_on_straight_line() {
        let points = vec![
            p(0.0, 0.0, 0.2),
            p(5.0, 0.0, 0.2),
            p(10.0, 0.0, 0.9),
            p(15.0, 0.0, 0.2),
            p(20.0, 0.0, 0.2),
        ];

        let spatial = Simplifier::new(Euclidean).with_tolerance(1.0);
        assert_eq!(spatial.simplify(&points, true).len(), 2);

        let pressure_aware = PressureSimplifier::pressure_aware(100.0).with_tolerance(1.0);
        let simplified = pressure_aware.simplify(&points, true);
        assert!(simplified.contains(&points[2]));
    }

    #[test]
    fn test_pressure_metric_reduces_to_euclidean() {
        let weighted = PressureWeighted::new(0.0);
        let a = p(1.0, 2.0, 0.5);
        let b = p(4.0, 6.0, 0.5);
        let c = p(3.0, -1.0, 0.5);

        assert_eq!(weighted.square_distance(&a, &b), Euclidean.square_distance(&a, &b));
        assert!(
            (weighted.square_segment_distance(&c, &a, &b)
                - Euclidean.square_segment_distance(&c, &a, &b))
            .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_segment_distance_clamps_projection() {
        let start = p(0.0, 0.0, 0.5);
        let end = p(10.0, 0.0, 0.5);

        // before the start, beyond the end, and within the segment
        assert_eq!(Euclidean.square_segment_distance(&p(-3.0, 4.0, 0.5), &start, &end), 25.0);
        assert_eq!(Euclidean.square_segment_distance(&p(13.0, 4.0, 0.5), &start, &end), 25.0);
        assert_eq!(Euclidean.square_segment_distance(&p(5.0, 2.0, 0.5), &start, &end), 4.0);

        // zero-length segment degrades to point distance
        assert_eq!(Euclidean.square_segment_distance(&p(3.0, 4.0, 0.5), &start, &start), 25.0);
    }

    #[test]
    fn test_pressure_segment_distance_on_line() {
        let metric = PressureWeighted::new(100.0);
        let start = p(0.0, 0.0, 0.2);
        let end = p(10.0, 0.0, 0.2);
        // 0.5 above the interpolated pressure, on the line in x/y
        let d = metric.square_segment_distance(&p(5.0, 0.0, 0.7), &start, &end);
        assert!((d - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_pure_pressure_segment_with_zero_coefficient() {
        let metric = PressureWeighted::new(0.0);
        let start = p(0.0, 0.0, 0.1);
        let end = p(0.0, 0.0, 0.9);
        assert_eq!(metric.square_segment_distance(&p(3.0, 4.0, 0.5), &start, &end), 25.0);
    }

    #[test]
    fn test_radial_distance_keeps_last_point() {
        let simplifier = Simplifier::new(Euclidean).with_tolerance(2.0);
        let points = vec![
            p(0.0, 0.0, 0.5),
            p(0.5, 0.0, 0.5),
            p(3.0, 0.0, 0.5),
            p(3.5, 0.0, 0.5),
        ];
        let filtered = simplifier.radial_distance(&points);
        assert_eq!(filtered, vec![points[0], points[2], points[3]]);
    }

    #[test]
    fn test_zero_tolerance_keeps_everything_off_the_chord() {
        let simplifier = Simplifier::new(Euclidean).with_tolerance(0.0);
        let points = vec![p(0.0, 0.0, 0.5), p(1.0, 0.1, 0.5), p(2.0, -0.1, 0.5), p(3.0, 0.0, 0.5)];
        assert_eq!(simplifier.simplify(&points, false), points);
    }

    #[test]
    fn test_invalid_tolerance_resets_to_default() {
        let mut simplifier = Simplifier::new(Euclidean);
        simplifier.set_tolerance(f64::NAN);
        assert_eq!(simplifier.tolerance(), DEFAULT_TOLERANCE);
        simplifier.set_tolerance(-2.0);
        assert_eq!(simplifier.tolerance(), DEFAULT_TOLERANCE);
        simplifier.set_tolerance(3.0);
        assert_eq!(simplifier.tolerance(), 3.0);
    }

    #[test]
    fn test_from_config() {
        let config = SimplifyConfig {
            tolerance: 2.0,
            pressure_coefficient: 50.0,
            highest_quality: true,
        };
        let simplifier = PressureSimplifier::from_config(&config);
        assert_eq!(simplifier.tolerance(), 2.0);
        assert_eq!(simplifier.pressure_coefficient(), 50.0);
    }
}
