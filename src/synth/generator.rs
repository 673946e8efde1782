use std::fmt;

use rand::Rng;

use crate::foundation::core::{Coord, Size};
use crate::foundation::error::FormwaveResult;
use crate::synth::expr::ExprNode;
use crate::synth::wave::WaveFunction;
use crate::transform::shear::Shear;

/// Which family of generator to draw at random.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// [`WaveFunction`].
    Wave,
    /// [`ExprNode`] tree.
    #[default]
    Expression,
}

/// Anything a channel can be rendered from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generator {
    /// Single periodic wave.
    Wave(WaveFunction),
    /// Random expression tree.
    Expression(ExprNode),
}

impl Generator {
    /// Draw a random generator of the given family.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: Size, kind: GeneratorKind) -> Self {
        match kind {
            GeneratorKind::Wave => Self::Wave(WaveFunction::random(rng, size)),
            GeneratorKind::Expression => Self::Expression(ExprNode::random_tree(rng)),
        }
    }

    /// Family of this generator.
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Wave(_) => GeneratorKind::Wave,
            Self::Expression(_) => GeneratorKind::Expression,
        }
    }

    /// Shear applied to normalized coordinates before [`Generator::evaluate`].
    pub fn pretransform(&self) -> Shear {
        match self {
            Self::Wave(w) => w.pretransform(),
            Self::Expression(_) => Shear::IDENTITY,
        }
    }

    /// Evaluate at an already-sheared coordinate. Output lies in `[-1, 1]`.
    #[inline]
    pub fn evaluate(&self, c: Coord, phase: f64) -> f64 {
        match self {
            Self::Wave(w) => w.evaluate(c, phase),
            Self::Expression(e) => e.evaluate(c, phase),
        }
    }

    /// Shear then evaluate an unsheared normalized coordinate.
    #[inline]
    pub fn sample(&self, c: Coord, phase: f64) -> f64 {
        self.evaluate(self.pretransform().apply(c), phase)
    }

    /// Check generator parameters.
    pub fn validate(&self) -> FormwaveResult<()> {
        match self {
            Self::Wave(w) => w.validate(),
            Self::Expression(e) => e.validate(),
        }
    }
}

impl From<WaveFunction> for Generator {
    fn from(w: WaveFunction) -> Self {
        Self::Wave(w)
    }
}

impl From<ExprNode> for Generator {
    fn from(e: ExprNode) -> Self {
        Self::Expression(e)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wave(w) => fmt::Display::fmt(w, f),
            Self::Expression(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// Evaluate any generator at a sheared coordinate.
pub fn evaluate(generator: &Generator, c: Coord, phase: f64) -> f64 {
    generator.evaluate(c, phase)
}
