//! Per-stroke pressure normalization
//!
//! [`PressureSampler`] turns device-reported pressure into a value the curve
//! smoother can trust. It handles the "no pressure data" sentinel, forces the
//! floor during the start-of-stroke ignorance window, and retroactively
//! widens already-captured points once real pressure shows up.

use pressure_ink_config::BrushConfig;
use tracing::debug;

use crate::constants::{MIN_PRESSURE, NO_PRESSURE_SENTINEL};
use crate::input::{extract_pressure, InputSample};
use crate::types::PressurePoint;

/// Result of normalizing one mid-stroke sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureReading {
    /// Pressure to assign to the new point
    pub pressure: f64,
    /// True if the points passed in were rewritten by retroactive correction
    pub corrected: bool,
}

/// Pressure state machine for one stroke at a time
#[derive(Debug, Clone)]
pub struct PressureSampler {
    fallback: f64,
    ignorance_ms: Option<u64>,
    start_time_ms: u64,
}

impl PressureSampler {
    pub fn new(fallback: f64, ignorance_ms: Option<u64>) -> Self {
        Self {
            fallback,
            ignorance_ms,
            start_time_ms: 0,
        }
    }

    pub fn from_config(config: &BrushConfig) -> Self {
        Self::new(config.fallback_pressure, config.pressure_ignorance_ms)
    }

    /// Timestamp of the sample that started the current stroke
    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    /// Pressure for the first sample of a stroke.
    ///
    /// Records the stroke start time. The sentinel maps to the floor rather
    /// than the fallback since the first point anchors the stroke width.
    pub fn on_session_start(&mut self, sample: &InputSample) -> f64 {
        self.start_time_ms = sample.timestamp_ms;
        let pressure = extract_pressure(sample, self.fallback);
        if pressure == NO_PRESSURE_SENTINEL {
            MIN_PRESSURE
        } else {
            pressure.clamp(MIN_PRESSURE, 1.0)
        }
    }

    /// Whether `sample` falls inside the start-of-stroke ignorance window
    pub fn is_ignoring(&self, sample: &InputSample) -> bool {
        let elapsed = sample.timestamp_ms.saturating_sub(self.start_time_ms);
        self.ignorance_ms.is_some_and(|window| window > elapsed)
    }

    /// Pressure for a mid-stroke sample.
    ///
    /// `points` is the stroke captured so far. If every earlier point sat on
    /// the floor and real pressure has just arrived, each of them is raised to
    /// at least the new pressure and `corrected` is set; the caller must then
    /// redraw the whole stroke.
    pub fn on_session_sample(
        &self,
        sample: &InputSample,
        points: &mut [PressurePoint],
    ) -> PressureReading {
        let pressure = extract_pressure(sample, self.fallback);
        let ignore = self.is_ignoring(sample);
        let last_pressure = points.last().map_or(MIN_PRESSURE, |p| p.pressure);

        let updated = if ignore {
            MIN_PRESSURE
        } else if pressure == NO_PRESSURE_SENTINEL {
            last_pressure
        } else {
            pressure.clamp(MIN_PRESSURE, 1.0)
        };

        let corrected = !ignore
            && !points.is_empty()
            && last_pressure == MIN_PRESSURE
            && updated != MIN_PRESSURE;

        if corrected {
            debug!(
                "PressureSampler: real pressure {:.4} arrived, raising {} floored points",
                updated,
                points.len()
            );
            for point in points.iter_mut() {
                point.pressure = point.pressure.max(updated);
            }
        }

        PressureReading {
            pressure: updated,
            corrected,
        }
    }

    /// End of stroke. Nothing to reset yet.
    pub fn on_session_end(&mut self) {}
}
