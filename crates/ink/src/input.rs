//! Raw input samples and the pressure extraction rule

use serde::{Deserialize, Serialize};

/// Kind of pointer that produced a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    Mouse,
    Pen,
    Touch,
}

/// One contact of a multi-touch sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub force: f64,
}

/// A pointer sample as delivered by the host's input plumbing.
///
/// Only the fields the pressure rule reads are modelled. Missing fields are
/// legal and degrade to the fallback pressure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSample {
    pub x: f64,
    pub y: f64,
    /// Sample time in milliseconds, used for the pressure ignorance window
    pub timestamp_ms: u64,
    #[serde(default)]
    pub touches: Vec<Touch>,
    #[serde(default)]
    pub pointer_type: Option<PointerType>,
    #[serde(default)]
    pub pressure: Option<f64>,
}

impl InputSample {
    /// Sample at a position with no pointer or pressure information
    pub fn at(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            x,
            y,
            timestamp_ms,
            ..Default::default()
        }
    }

    pub fn with_pointer(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = Some(pointer_type);
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_touch(mut self, force: f64) -> Self {
        self.touches.push(Touch { force });
        self
    }

    /// Pen sample with a reported pressure
    pub fn pen(x: f64, y: f64, pressure: f64, timestamp_ms: u64) -> Self {
        Self::at(x, y, timestamp_ms)
            .with_pointer(PointerType::Pen)
            .with_pressure(pressure)
    }
}

/// Read the pressure a sample reports, substituting `fallback` where the
/// device cannot be trusted.
///
/// - multi-touch data wins: the first touch's force is used
/// - mouse pointers and non-numeric pressure give `fallback`
/// - touch pointers reporting exactly 0 give `fallback` (0 means "unsupported")
/// - anything else is returned verbatim
pub fn extract_pressure(sample: &InputSample, fallback: f64) -> f64 {
    if let Some(touch) = sample.touches.first() {
        return if touch.force.is_finite() {
            touch.force
        } else {
            fallback
        };
    }

    let pressure = match sample.pressure {
        Some(p) if p.is_finite() => p,
        _ => return fallback,
    };

    match sample.pointer_type {
        Some(PointerType::Mouse) => fallback,
        Some(PointerType::Touch) if pressure == 0.0 => fallback,
        _ => pressure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: f64 = 0.1;

    #[test]
    fn test_touch_force_is_used() {
        let sample = InputSample::at(0.0, 0.0, 0)
            .with_touch(0.73)
            .with_pointer(PointerType::Touch)
            .with_pressure(0.0);
        assert_eq!(extract_pressure(&sample, FALLBACK), 0.73);
    }

    #[test]
    fn test_mouse_pressure_is_ignored() {
        let sample = InputSample::at(0.0, 0.0, 0)
            .with_pointer(PointerType::Mouse)
            .with_pressure(0.4);
        assert_eq!(extract_pressure(&sample, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_touch_zero_pressure_falls_back() {
        let sample = InputSample::at(0.0, 0.0, 0)
            .with_pointer(PointerType::Touch)
            .with_pressure(0.0);
        assert_eq!(extract_pressure(&sample, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_missing_or_nan_pressure_falls_back() {
        let missing = InputSample::at(0.0, 0.0, 0).with_pointer(PointerType::Pen);
        assert_eq!(extract_pressure(&missing, FALLBACK), FALLBACK);

        let nan = InputSample::pen(0.0, 0.0, f64::NAN, 0);
        assert_eq!(extract_pressure(&nan, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_pen_pressure_is_verbatim() {
        let sample = InputSample::pen(0.0, 0.0, 0.0, 0);
        assert_eq!(extract_pressure(&sample, FALLBACK), 0.0);

        let unknown = InputSample::at(0.0, 0.0, 0).with_pressure(0.35);
        assert_eq!(extract_pressure(&unknown, FALLBACK), 0.35);
    }

    #[test]
    fn test_sample_deserializes_with_missing_fields() {
        let json = r#"{ "x": 3.0, "y": 4.0, "timestamp_ms": 16, "pointer_type": "pen" }"#;
        let sample: InputSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.pointer_type, Some(PointerType::Pen));
        assert!(sample.touches.is_empty());
        assert_eq!(sample.pressure, None);
    }
}
