//! Formwave generates procedural imagery from periodic waves and random expression trees, animates
//! it as a seamless loop, and optionally remaps each frame through a log-polar "form constant"
//! transform.
//!
//! # Pipeline overview
//!
//! 1. **Synthesize**: a [`Generator`] ([`WaveFunction`] or [`ExprNode`] tree) maps a normalized
//!    coordinate and a phase to a value in `[-1, 1]`.
//! 2. **Render**: [`render_channel`] samples a generator over every pixel into a [`ChannelBuffer`].
//! 3. **Composite**: [`composite`] stacks channel buffers in a [`Colorspace`] and converts to RGB.
//! 4. **Remap** (optional): [`remap_log_polar`] resamples the frame in log-polar coordinates.
//! 5. **Animate**: a [`Sequence`] steps each channel's phase by `1 / frame_count` per frame, so
//!    the last frame flows back into the first.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit randomness**: random constructors take `&mut impl Rng`; see [`seeded_rng`].
//! - **Deterministic rendering**: a sequence renders the same pixels sequentially, in parallel,
//!   or after a JSON round-trip through [`SequenceDoc`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod foundation;
mod render;
mod sequence;
mod synth;
mod transform;

pub use crate::config::doc::SequenceDoc;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Coord, FrameIndex, Size};
pub use crate::foundation::error::{FormwaveError, FormwaveResult};
pub use crate::foundation::random::seeded_rng;
pub use crate::render::channel::render_channel;
pub use crate::render::colorspace::Colorspace;
pub use crate::render::composite::{
    composite, composite_with_provenance, provenance_comment, truncate_comment,
};
pub use crate::render::frame::{ChannelBuffer, FrameRgb};
pub use crate::render::threading::RenderThreading;
pub use crate::sequence::animator::{Sequence, SequenceFrames, SequenceStats, generate_sequence};
pub use crate::synth::channel::ChannelSpec;
pub use crate::synth::expr::{ExprNode, MAX_TREE_DEPTH, TrigKind, VarAxis, build_expression};
pub use crate::synth::generator::{Generator, GeneratorKind, evaluate};
pub use crate::synth::phase::{PhaseDirection, PhaseEasing};
pub use crate::synth::wave::{WaveAxis, WaveFunction, WaveKind};
pub use crate::transform::log_polar::{
    BilinearSample, bilinear_sample, log_polar_source, remap_log_polar, sample_rgb,
};
pub use crate::transform::shear::{Shear, ShearAxis, shear_x, shear_y};
