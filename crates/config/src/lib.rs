//! Shared configuration for pressure-ink
//!
//! This crate provides the typed settings a brush instance carries into a
//! stroke session: base stroke width, pressure fallbacks, the start-of-stroke
//! pressure ignorance window, decimation and simplification parameters.
//! Every value is per instance; nothing here is process-global.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default base stroke width (width at pressure 1.0)
pub const DEFAULT_BASE_WIDTH: f64 = 1.0;

/// Pressure used when a device reports no pressure signal at all
pub const DEFAULT_FALLBACK_PRESSURE: f64 = 0.1;

/// Weight of the pressure axis relative to the spatial axes
pub const DEFAULT_PRESSURE_COEFFICIENT: f64 = 100.0;

/// Brush-level simplification tolerance (0 disables simplification)
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid simplify tolerance: {0} (must be finite and >= 0)")]
    InvalidTolerance(f64),
    #[error("Invalid pressure coefficient: {0} (must be finite and >= 0)")]
    InvalidPressureCoefficient(f64),
    #[error("Invalid base width: {0} (must be finite and >= 0)")]
    InvalidBaseWidth(f64),
    #[error("Invalid fallback pressure: {0} (must be in (0, 1])")]
    InvalidFallbackPressure(f64),
    #[error("Invalid decimation distance: {0} (must be finite and > 0)")]
    InvalidDecimation(f64),
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Parameters for the pressure-aware simplification pass run when a stroke ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Maximum deviation kept out of the final geometry. 0 disables the pass.
    pub tolerance: f64,
    /// Scales the pressure axis against x/y when measuring distance
    pub pressure_coefficient: f64,
    /// Skip the radial-distance prefilter and run Douglas-Peucker on every point
    pub highest_quality: bool,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            pressure_coefficient: DEFAULT_PRESSURE_COEFFICIENT,
            highest_quality: false,
        }
    }
}

impl SimplifyConfig {
    /// Whether the simplification pass runs at all
    pub fn is_enabled(&self) -> bool {
        self.tolerance > 0.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !non_negative(self.tolerance) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if !non_negative(self.pressure_coefficient) {
            return Err(ConfigError::InvalidPressureCoefficient(
                self.pressure_coefficient,
            ));
        }
        Ok(())
    }
}

/// Configuration of one brush instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Stroke width at pressure 1.0
    pub base_width: f64,
    /// Pressure substituted when the device provides none
    pub fallback_pressure: f64,
    /// Milliseconds after stroke start during which pressure is forced to the floor.
    /// `None` disables the window.
    pub pressure_ignorance_ms: Option<u64>,
    /// Minimum spacing between kept points before simplification. `None` disables it.
    pub decimate: Option<f64>,
    pub simplify: SimplifyConfig,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            base_width: DEFAULT_BASE_WIDTH,
            fallback_pressure: DEFAULT_FALLBACK_PRESSURE,
            pressure_ignorance_ms: None,
            decimate: None,
            simplify: SimplifyConfig::default(),
        }
    }
}

impl BrushConfig {
    /// Create a brush config with the given base width and defaults elsewhere
    pub fn with_width(base_width: f64) -> Self {
        Self {
            base_width,
            ..Default::default()
        }
    }

    /// Check every field, reporting the first invalid one
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !non_negative(self.base_width) {
            return Err(ConfigError::InvalidBaseWidth(self.base_width));
        }
        if !(self.fallback_pressure > 0.0 && self.fallback_pressure <= 1.0) {
            return Err(ConfigError::InvalidFallbackPressure(self.fallback_pressure));
        }
        if let Some(distance) = self.decimate {
            if !(distance.is_finite() && distance > 0.0) {
                return Err(ConfigError::InvalidDecimation(distance));
            }
        }
        self.simplify.validate()
    }
}
