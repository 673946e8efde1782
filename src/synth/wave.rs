use std::f64::consts::PI;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::core::{Coord, Size};
use crate::foundation::error::{FormwaveError, FormwaveResult};
use crate::foundation::math::{floor_mod, sawtooth, triangle};
use crate::transform::shear::{Shear, ShearAxis};

/// Base periodic function of a [`WaveFunction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveKind {
    /// `sin`, natural range `π`.
    Sin,
    /// `cos`, natural range `π`.
    Cos,
    /// Triangle wave, natural range `1`.
    Triangle,
    /// Sawtooth wave, natural range `1`.
    Sawtooth,
}

impl WaveKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [Self::Sin, Self::Cos, Self::Triangle, Self::Sawtooth];

    /// Lowercase name used in provenance text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Triangle => "triangle",
            Self::Sawtooth => "sawtooth",
        }
    }

    fn natural_range(self) -> f64 {
        match self {
            Self::Sin | Self::Cos => PI,
            Self::Triangle | Self::Sawtooth => 1.0,
        }
    }

    #[inline]
    fn apply(self, t: f64) -> f64 {
        match self {
            Self::Sin => t.sin(),
            Self::Cos => t.cos(),
            Self::Triangle => triangle(t),
            Self::Sawtooth => sawtooth(t),
        }
    }
}

/// Coordinate component a [`WaveFunction`] varies along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveAxis {
    /// `x`.
    X,
    /// `y`.
    Y,
    /// The product `x·y`.
    Xy,
}

impl WaveAxis {
    /// Name used in provenance text.
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Xy => "xy",
        }
    }

    #[inline]
    fn select(self, c: Coord) -> f64 {
        match self {
            Self::X => c.x,
            Self::Y => c.y,
            Self::Xy => c.x * c.y,
        }
    }
}

/// A periodic function of one coordinate component.
///
/// Stateless and total: every finite input maps into `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveFunction {
    /// Base function.
    pub kind: WaveKind,
    /// Coordinate component.
    pub axis: WaveAxis,
    /// Whole periods across the `[-1, 1]` span. Must be `>= 1`.
    pub frequency: u32,
    /// Static phase offset, added to the phase supplied at evaluation time.
    #[serde(default)]
    pub phase: f64,
    /// Shear multiplier applied along this wave's own axis before evaluation.
    #[serde(default)]
    pub shear: i32,
}

impl WaveFunction {
    /// Create an unsheared wave with zero static phase.
    pub fn new(kind: WaveKind, axis: WaveAxis, frequency: u32) -> FormwaveResult<Self> {
        let wave = Self {
            kind,
            axis,
            frequency,
            phase: 0.0,
            shear: 0,
        };
        wave.validate()?;
        Ok(wave)
    }

    /// Set the static phase offset.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Set the shear multiplier.
    pub fn with_shear(mut self, shear: i32) -> Self {
        self.shear = shear;
        self
    }

    /// Check the frequency and phase fields.
    pub fn validate(&self) -> FormwaveResult<()> {
        if self.frequency == 0 {
            return Err(FormwaveError::configuration(
                "wave frequency must be >= 1",
            ));
        }
        if !self.phase.is_finite() {
            return Err(FormwaveError::configuration("wave phase must be finite"));
        }
        Ok(())
    }

    /// The shear pre-transform implied by `shear`. `xy` waves shear along `x`.
    pub fn pretransform(&self) -> Shear {
        let axis = match self.axis {
            WaveAxis::X | WaveAxis::Xy => ShearAxis::X,
            WaveAxis::Y => ShearAxis::Y,
        };
        Shear::new(axis, self.shear)
    }

    /// Evaluate at an already-sheared coordinate.
    #[inline]
    pub fn evaluate(&self, c: Coord, phase: f64) -> f64 {
        let v = self.axis.select(c);
        let freq = f64::from(self.frequency);
        let phased = floor_mod(
            floor_mod(freq * (v + 1.0), 2.0) + 2.0 * (self.phase + phase),
            2.0,
        ) - 1.0;
        self.kind.apply(self.kind.natural_range() / 2.0 * phased)
    }

    /// Draw a random wave suited to a raster of `size`.
    ///
    /// Frequency is bounded by an eighth of the shorter side; the shear multiplier never exceeds
    /// the frequency.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: Size) -> Self {
        let kind = *WaveKind::ALL.choose(rng).unwrap_or(&WaveKind::Sin);
        let axis = if rng.gen_bool(0.5) {
            WaveAxis::X
        } else {
            WaveAxis::Y
        };
        let shorter = f64::from(size.width.min(size.height));
        let upper = ((shorter / 8.0).round() as u32).max(2);
        let frequency = rng.gen_range(1..upper);
        let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
        let shear = rng.gen_range(0..=frequency as i32) * sign;
        Self {
            kind,
            axis,
            frequency,
            phase: rng.r#gen::<f64>(),
            shear,
        }
    }
}

impl fmt::Display for WaveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})/freq={}/phase={:.3}/shear={}",
            self.kind.name(),
            self.axis.name(),
            self.frequency,
            self.phase,
            self.shear
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/wave.rs"]
mod tests;
