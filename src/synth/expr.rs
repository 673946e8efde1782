//! Random expression trees over two variables.
//!
//! A tree is a closed [`ExprNode`] variant: terminal [`ExprNode::Variable`] leaves, unary
//! [`ExprNode::Trig`] nodes, and binary [`ExprNode::Product`] nodes. Trees are built once by
//! [`build_expression`] from an explicit RNG and evaluated bottom-up by [`ExprNode::evaluate`].

use std::f64::consts::{PI, TAU};
use std::fmt;

use rand::Rng;

use crate::foundation::core::Coord;
use crate::foundation::error::{FormwaveError, FormwaveResult};
use crate::foundation::math::floor_mod;
use crate::synth::phase::PhaseDirection;

/// Recursion depth past which the builder always emits a leaf.
///
/// With `probability < 1` the quadratic decay ends the recursion long before this; the cap only
/// matters for `probability >= 1`.
pub const MAX_TREE_DEPTH: u32 = 24;

/// Variable a leaf reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarAxis {
    /// `x`.
    X,
    /// `y`.
    Y,
}

impl VarAxis {
    fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Trigonometric function of a [`ExprNode::Trig`] node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrigKind {
    /// `sin`.
    Sin,
    /// `cos`.
    Cos,
}

impl TrigKind {
    fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
        }
    }
}

/// One node of an expression tree. Immutable after construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "node", rename_all = "snake_case", deny_unknown_fields)]
pub enum ExprNode {
    /// Arity 0: a scaled, shifted coordinate folded into `[-1, 1)`.
    Variable {
        /// Coordinate read.
        axis: VarAxis,
        /// Offset in `[0, 1)`.
        phase_offset: f64,
        /// Direction glyph; shifts by a whole period so it only shows in provenance.
        phase_direction: PhaseDirection,
        /// Multiplier, `>= 1`.
        frequency: u32,
    },
    /// Arity 1: `sin`/`cos` of the child scaled by `π·frequency`, shifted by the animated phase.
    Trig {
        /// Function applied.
        kind: TrigKind,
        /// Argument subtree.
        child: Box<ExprNode>,
        /// Offset in `[0, 1)`.
        phase_offset: f64,
        /// Animation direction; `Still` freezes the node.
        phase_direction: PhaseDirection,
        /// Multiplier, `>= 1`.
        frequency: u32,
    },
    /// Arity 2: product of two subtrees.
    Product {
        /// Left and right operands.
        operands: Box<[ExprNode; 2]>,
    },
}

impl ExprNode {
    /// Evaluate at an already-sheared coordinate.
    ///
    /// `Variable` leaves ignore `phase`; only `Trig` nodes animate.
    pub fn evaluate(&self, c: Coord, phase: f64) -> f64 {
        match self {
            Self::Variable {
                axis,
                phase_offset,
                phase_direction,
                frequency,
            } => {
                let v = match axis {
                    VarAxis::X => c.x,
                    VarAxis::Y => c.y,
                };
                let shifted = (v + 1.0) + (phase_direction.signum() + phase_offset) * 2.0;
                floor_mod(shifted * f64::from(*frequency), 2.0) - 1.0
            }
            Self::Trig {
                kind,
                child,
                phase_offset,
                phase_direction,
                frequency,
            } => {
                let inner = child.evaluate(c, phase);
                let dir = phase_direction.signum();
                let phase_term = dir * floor_mod(TAU * (phase + phase_offset), TAU);
                let arg = PI * inner * f64::from(*frequency) + dir * phase_term;
                match kind {
                    TrigKind::Sin => arg.sin(),
                    TrigKind::Cos => arg.cos(),
                }
            }
            Self::Product { operands } => {
                operands[0].evaluate(c, phase) * operands[1].evaluate(c, phase)
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Variable { .. } => 1,
            Self::Trig { child, .. } => 1 + child.node_count(),
            Self::Product { operands } => 1 + operands[0].node_count() + operands[1].node_count(),
        }
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        match self {
            Self::Variable { .. } => 1,
            Self::Trig { child, .. } => 1 + child.depth(),
            Self::Product { operands } => 1 + operands[0].depth().max(operands[1].depth()),
        }
    }

    /// Whether this node is a leaf.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Variable { .. })
    }

    /// Check frequencies and offsets throughout the tree.
    pub fn validate(&self) -> FormwaveResult<()> {
        match self {
            Self::Variable {
                phase_offset,
                frequency,
                ..
            } => validate_leaf_params(*phase_offset, *frequency),
            Self::Trig {
                child,
                phase_offset,
                frequency,
                ..
            } => {
                validate_leaf_params(*phase_offset, *frequency)?;
                child.validate()
            }
            Self::Product { operands } => {
                operands[0].validate()?;
                operands[1].validate()
            }
        }
    }

    /// Draw a tree with build probability uniform in `[0.95, 0.99]`.
    pub fn random_tree<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let probability = rng.gen_range(0.95..=0.99);
        build_expression(rng, probability)
    }
}

fn validate_leaf_params(phase_offset: f64, frequency: u32) -> FormwaveResult<()> {
    if frequency == 0 {
        return Err(FormwaveError::configuration(
            "expression frequency must be >= 1",
        ));
    }
    if !phase_offset.is_finite() {
        return Err(FormwaveError::configuration(
            "expression phase offset must be finite",
        ));
    }
    Ok(())
}

/// Build a random expression tree.
///
/// With chance `probability` the root is a function node (uniform over `sin`, `cos`, product)
/// whose children are built with `probability²`; otherwise it is a leaf. `probability <= 0`
/// always yields a single [`ExprNode::Variable`].
pub fn build_expression<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> ExprNode {
    build(rng, probability, 0, 0)
}

fn build<R: Rng + ?Sized>(rng: &mut R, probability: f64, level: i32, depth: u32) -> ExprNode {
    if depth < MAX_TREE_DEPTH && rng.r#gen::<f64>() < probability {
        let child_probability = probability * probability;
        match rng.gen_range(0..3) {
            choice @ (0 | 1) => {
                let level = level + 1;
                let child = build(rng, child_probability, level, depth + 1);
                let phase_direction = if level == 1 {
                    PhaseDirection::random_moving(rng)
                } else {
                    PhaseDirection::Still
                };
                ExprNode::Trig {
                    kind: if choice == 0 {
                        TrigKind::Sin
                    } else {
                        TrigKind::Cos
                    },
                    child: Box::new(child),
                    phase_offset: rng.r#gen(),
                    phase_direction,
                    frequency: exponential_frequency(rng),
                }
            }
            // Products do not advance the level.
            _ => {
                let left = build(rng, child_probability, level, depth + 1);
                let right = build(rng, child_probability, level, depth + 1);
                ExprNode::Product {
                    operands: Box::new([left, right]),
                }
            }
        }
    } else {
        ExprNode::Variable {
            axis: if rng.gen_bool(0.5) {
                VarAxis::X
            } else {
                VarAxis::Y
            },
            phase_offset: rng.r#gen(),
            phase_direction: PhaseDirection::random_any(rng),
            frequency: exponential_frequency(rng),
        }
    }
}

/// `ceil(Exp(1))`, floored at 1.
fn exponential_frequency<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let u: f64 = rng.r#gen();
    let e = -(1.0 - u).ln();
    (e.ceil() as u32).max(1)
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable {
                axis,
                phase_offset,
                phase_direction,
                frequency,
            } => write!(
                f,
                "{}(phase={:.3}{}, freq={})",
                axis.name(),
                phase_offset,
                phase_direction.glyph(),
                frequency
            ),
            Self::Trig {
                kind,
                child,
                phase_offset,
                phase_direction,
                frequency,
            } => write!(
                f,
                "{}((pi * {} * {}) + phase({:.3}{}))",
                kind.name(),
                child,
                frequency,
                phase_offset,
                phase_direction.glyph()
            ),
            Self::Product { operands } => write!(f, "{} * {}", operands[0], operands[1]),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/expr.rs"]
mod tests;
