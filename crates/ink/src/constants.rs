/// Pressure floor. Never exactly 0 so a floored point stays distinguishable from "unset".
pub const MIN_PRESSURE: f64 = 0.0001;

/// Pressure some pen hardware reports when it has no real pressure data.
/// Compatibility value, keep it bit-exact.
pub const NO_PRESSURE_SENTINEL: f64 = 0.07999999821186066;

/// Default simplification tolerance for a bare [`crate::Simplifier`].
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Divides the base width to get the end-cap / dot offset.
pub const CAP_OFFSET_DIVISOR: f64 = 1000.0;

/// Path description produced for a stroke that collapsed to nothing.
pub const DEGENERATE_PATH: &str = "M 0 0 Q 0 0 0 0 L 0 0";
