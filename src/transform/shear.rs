//! Shear pre-transform applied to normalized coordinates before generator evaluation.

use crate::foundation::core::Coord;

/// Axis a shear displaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShearAxis {
    /// `(x + m·y, y)`.
    X,
    /// `(x, y + m·x)`.
    Y,
}

/// Integer shear along one axis. `amount == 0` is the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shear {
    /// Displaced axis.
    pub axis: ShearAxis,
    /// Shear multiplier.
    pub amount: i32,
}

impl Shear {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        axis: ShearAxis::X,
        amount: 0,
    };

    /// Construct a shear.
    pub fn new(axis: ShearAxis, amount: i32) -> Self {
        Self { axis, amount }
    }

    /// Whether this shear leaves every coordinate unchanged.
    pub fn is_identity(self) -> bool {
        self.amount == 0
    }

    #[inline]
    /// Apply the shear to a coordinate.
    pub fn apply(self, c: Coord) -> Coord {
        if self.amount == 0 {
            return c;
        }
        let m = f64::from(self.amount);
        match self.axis {
            ShearAxis::X => shear_x(c, m),
            ShearAxis::Y => shear_y(c, m),
        }
    }
}

impl Default for Shear {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[inline]
/// `(x + m·y, y)`.
pub fn shear_x(c: Coord, m: f64) -> Coord {
    Coord::new(c.x + m * c.y, c.y)
}

#[inline]
/// `(x, y + m·x)`.
pub fn shear_y(c: Coord, m: f64) -> Coord {
    Coord::new(c.x, c.y + m * c.x)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/shear.rs"]
mod tests;
