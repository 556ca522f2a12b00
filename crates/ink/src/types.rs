use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// A captured stroke sample: position plus normalized pressure.
///
/// Equality compares all three components. Use [`PressurePoint::same_position`]
/// to ignore pressure.
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
pub struct PressurePoint {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
}

impl PressurePoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    /// Position as a 2D vector
    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Position with pressure as the third axis
    #[inline]
    pub fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.pressure)
    }

    /// True if both points sit at the same x/y, whatever their pressure
    #[inline]
    pub fn same_position(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Component-wise average, pressure included
    pub fn midpoint_from(&self, other: &Self) -> Self {
        let mid = (self.position() + other.position()) * 0.5;
        Self::new(mid.x, mid.y, (self.pressure + other.pressure) / 2.0)
    }

    /// Copy of this point shifted along x
    pub fn offset_x(&self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y, self.pressure)
    }
}
