//! pressure-ink - pressure-aware stroke capture
//!
//! This crate turns raw pointer samples into smooth, variable-width strokes:
//! - [`pressure`] - per-stroke pressure normalization with retroactive correction
//! - [`simplify`] - radial-distance + Douglas-Peucker reduction in (x, y, pressure) space
//! - [`decimate`] - minimum-spacing point thinning
//! - [`smooth`] - midpoint-quadratic smoothing with pressure-derived widths
//! - [`session`] - the capture state machine tying the above together
//! - [`surface`] - capabilities the host provides (live drawing, persistence)
//! - [`stroke`] - the committed stroke record, bounds and SVG line export

pub mod constants;
pub mod decimate;
pub mod input;
pub mod pressure;
pub mod session;
pub mod simplify;
pub mod smooth;
pub mod stroke;
pub mod surface;
pub mod types;

pub use constants::*;
pub use decimate::*;
pub use input::*;
pub use pressure::*;
pub use session::*;
pub use simplify::*;
pub use smooth::*;
pub use stroke::*;
pub use surface::*;
pub use types::*;

pub use pressure_ink_config::{BrushConfig, ConfigError, SimplifyConfig};
