//! Phase direction and loop-safe phase easing.

use std::f64::consts::PI;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::error::FormwaveError;

/// Signed direction in which a phase advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum PhaseDirection {
    /// `-1`.
    Backward,
    /// `0`.
    Still,
    /// `+1`.
    Forward,
}

impl PhaseDirection {
    /// Signed value as `f64`.
    #[inline]
    pub fn signum(self) -> f64 {
        match self {
            Self::Backward => -1.0,
            Self::Still => 0.0,
            Self::Forward => 1.0,
        }
    }

    /// Single-character glyph used in provenance text: `<`, `=`, `>`.
    pub fn glyph(self) -> char {
        match self {
            Self::Backward => '<',
            Self::Still => '=',
            Self::Forward => '>',
        }
    }

    /// Uniform over `{-1, 1}`.
    pub fn random_moving<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// Uniform over `{-1, 0, 1}`.
    pub fn random_any<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => Self::Backward,
            1 => Self::Still,
            _ => Self::Forward,
        }
    }
}

impl From<PhaseDirection> for i8 {
    fn from(d: PhaseDirection) -> Self {
        match d {
            PhaseDirection::Backward => -1,
            PhaseDirection::Still => 0,
            PhaseDirection::Forward => 1,
        }
    }
}

impl TryFrom<i8> for PhaseDirection {
    type Error = FormwaveError;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            -1 => Ok(Self::Backward),
            0 => Ok(Self::Still),
            1 => Ok(Self::Forward),
            other => Err(FormwaveError::configuration(format!(
                "phase direction must be -1, 0 or 1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for PhaseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i8::from(*self))
    }
}

/// Reshapes a channel's phase before evaluation.
///
/// Every easing is continuous on `[0, 1]` and satisfies `ease(1) - ease(0) ∈ ℤ`. Generators are
/// 1-periodic in phase, so easing never introduces a seam at the loop point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEasing {
    /// `p`.
    #[default]
    Linear,
    /// `(cos(π + πp) + 1) / 2`: slow at both ends of the loop.
    HalfCosine,
    /// `sin(pπ/2)`: fast start, slow finish.
    QuarterSine,
    /// `(cos(π + 2πp) + 1) / 2`: there and back within one loop.
    FullCosine,
}

impl PhaseEasing {
    /// Every easing, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::HalfCosine,
        Self::QuarterSine,
        Self::FullCosine,
    ];

    /// Apply to a phase in `[0, 1)`.
    #[inline]
    pub fn apply(self, p: f64) -> f64 {
        match self {
            Self::Linear => p,
            Self::HalfCosine => ((PI + p * PI).cos() + 1.0) / 2.0,
            Self::QuarterSine => (p * (PI / 2.0)).sin(),
            Self::FullCosine => ((PI + 2.0 * PI * p).cos() + 1.0) / 2.0,
        }
    }

    /// Name used in provenance text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::HalfCosine => "half_cosine",
            Self::QuarterSine => "quarter_sine",
            Self::FullCosine => "full_cosine",
        }
    }

    /// Uniform over [`PhaseEasing::ALL`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Self::Linear)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/phase.rs"]
mod tests;
