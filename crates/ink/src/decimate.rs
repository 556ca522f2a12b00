//! Minimum-spacing point decimation

use crate::types::PressurePoint;

/// Drop interior points closer than `distance` (in x/y) to the last kept point.
///
/// The first and last points always survive; sequences of two points or
/// fewer are returned unchanged.
pub fn decimate(points: &[PressurePoint], distance: f64) -> Vec<PressurePoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let sq_distance = distance * distance;
    let last = points.len() - 1;
    let mut last_kept = points[0];
    let mut kept = vec![last_kept];

    for point in &points[1..last] {
        if point.position().distance_squared(last_kept.position()) >= sq_distance {
            last_kept = *point;
            kept.push(last_kept);
        }
    }

    kept.push(points[last]);
    kept
}
