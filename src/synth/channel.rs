use std::fmt;

use rand::Rng;

use crate::foundation::core::Size;
use crate::foundation::error::{FormwaveError, FormwaveResult};
use crate::foundation::math::wrap_unit;
use crate::synth::generator::{Generator, GeneratorKind};
use crate::synth::phase::{PhaseDirection, PhaseEasing};

/// Everything needed to render one channel of every frame in a sequence.
///
/// Fixed for the lifetime of a sequence; only the phase passed at evaluation time changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSpec {
    /// Source of channel values. Carries its own shear pre-transform.
    pub generator: Generator,
    /// Phase of frame 0, in `[0, 1)`.
    pub base_phase: f64,
    /// Direction the phase advances across the sequence. Never `Still`.
    pub phase_direction: PhaseDirection,
    /// Reshaping applied to the phase before evaluation.
    #[serde(default)]
    pub easing: PhaseEasing,
}

impl ChannelSpec {
    /// A forward-moving, linearly eased channel starting at `base_phase`.
    pub fn new(generator: impl Into<Generator>, base_phase: f64) -> Self {
        Self {
            generator: generator.into(),
            base_phase,
            phase_direction: PhaseDirection::Forward,
            easing: PhaseEasing::Linear,
        }
    }

    /// Set the phase direction.
    pub fn with_direction(mut self, phase_direction: PhaseDirection) -> Self {
        self.phase_direction = phase_direction;
        self
    }

    /// Set the phase easing.
    pub fn with_easing(mut self, easing: PhaseEasing) -> Self {
        self.easing = easing;
        self
    }

    /// Draw a random channel: generator, base phase, direction, and easing.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: Size, kind: GeneratorKind) -> Self {
        let generator = Generator::random(rng, size, kind);
        Self {
            generator,
            base_phase: rng.r#gen(),
            phase_direction: PhaseDirection::random_moving(rng),
            easing: PhaseEasing::random(rng),
        }
    }

    /// Reject static directions and non-finite phases.
    pub fn validate(&self) -> FormwaveResult<()> {
        if self.phase_direction == PhaseDirection::Still {
            return Err(FormwaveError::configuration(
                "channel phase direction must be -1 or 1",
            ));
        }
        if !self.base_phase.is_finite() {
            return Err(FormwaveError::configuration(
                "channel base phase must be finite",
            ));
        }
        self.generator.validate()
    }

    /// Phase of frame `index` in a loop of `frame_count` frames, in `[0, 1)`.
    ///
    /// `phase_at(frame_count, frame_count) == phase_at(0, frame_count)`.
    pub fn phase_at(&self, index: u64, frame_count: u64) -> f64 {
        let n = frame_count.max(1);
        let step = (index % n) as f64 / n as f64;
        wrap_unit(self.base_phase + step * self.phase_direction.signum())
    }

    /// Eased phase handed to the generator for frame `index`.
    pub fn effective_phase(&self, index: u64, frame_count: u64) -> f64 {
        self.easing.apply(self.phase_at(index, frame_count))
    }
}

impl fmt::Display for ChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{:.3}/{}/{}",
            self.generator,
            self.base_phase,
            self.phase_direction,
            self.easing.name()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/channel.rs"]
mod tests;
