use std::collections::HashMap;
use std::sync::mpsc;

use rand::Rng;
use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Size};
use crate::foundation::error::{FormwaveError, FormwaveResult};
use crate::render::channel::render_channel;
use crate::render::colorspace::Colorspace;
use crate::render::composite::{composite, provenance_comment};
use crate::render::frame::FrameRgb;
use crate::render::threading::RenderThreading;
use crate::synth::channel::ChannelSpec;
use crate::synth::generator::GeneratorKind;
use crate::transform::log_polar::remap_log_polar;

/// A looping animation: per-channel specs fixed at construction, one phase step per frame.
///
/// Frame `i` of `n` renders channel `c` at `specs[c].phase_at(i, n)`, so frame `n` would equal
/// frame `0` and the sequence loops without a seam.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    size: Size,
    frame_count: u64,
    colorspace: Colorspace,
    channels: Vec<ChannelSpec>,
    log_polar: bool,
    comment: String,
}

/// Counters from [`Sequence::render_into`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    /// Frames delivered to the sink.
    pub frames_total: u64,
    /// Render batches scheduled.
    pub chunks: u64,
}

impl Sequence {
    /// Validate and assemble a sequence.
    pub fn new(
        size: Size,
        frame_count: u64,
        colorspace: Colorspace,
        channels: Vec<ChannelSpec>,
        log_polar: bool,
    ) -> FormwaveResult<Self> {
        size.validate()?;
        if frame_count == 0 {
            return Err(FormwaveError::configuration("frame count must be >= 1"));
        }
        if channels.len() != colorspace.channel_count() {
            return Err(FormwaveError::configuration(format!(
                "{} takes {} channels, got {}",
                colorspace,
                colorspace.channel_count(),
                channels.len()
            )));
        }
        for (i, spec) in channels.iter().enumerate() {
            spec.validate()
                .map_err(|e| FormwaveError::configuration(format!("channel {i}: {e}")))?;
        }
        let comment = provenance_comment(colorspace, &channels);
        Ok(Self {
            size,
            frame_count,
            colorspace,
            channels,
            log_polar,
            comment,
        })
    }

    /// Draw a random sequence. `colorspace` and `log_polar` are drawn when `None`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        size: Size,
        frame_count: u64,
        colorspace: Option<Colorspace>,
        kind: GeneratorKind,
        log_polar: Option<bool>,
    ) -> FormwaveResult<Self> {
        size.validate()?;
        let colorspace = colorspace.unwrap_or_else(|| Colorspace::random_multichannel(rng));
        let channels = (0..colorspace.channel_count())
            .map(|_| ChannelSpec::random(rng, size, kind))
            .collect();
        let log_polar = log_polar.unwrap_or_else(|| rng.gen_bool(0.5));
        Self::new(size, frame_count, colorspace, channels, log_polar)
    }

    /// Frame dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of frames in one loop.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Colorspace the channels are composed in.
    pub fn colorspace(&self) -> Colorspace {
        self.colorspace
    }

    /// Per-channel specs.
    pub fn channels(&self) -> &[ChannelSpec] {
        &self.channels
    }

    /// Whether frames are passed through [`remap_log_polar`].
    pub fn log_polar(&self) -> bool {
        self.log_polar
    }

    /// Provenance text attached to every frame.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Un-eased phase of every channel at frame `index`.
    pub fn phases(&self, index: FrameIndex) -> Vec<f64> {
        self.channels
            .iter()
            .map(|c| c.phase_at(index.0, self.frame_count))
            .collect()
    }

    /// Render one frame. Indices past the end wrap around the loop.
    #[tracing::instrument(level = "debug", skip(self), fields(frame = index.0))]
    pub fn render_frame(&self, index: FrameIndex) -> FormwaveResult<FrameRgb> {
        let buffers = self
            .channels
            .iter()
            .map(|spec| {
                let phase = spec.effective_phase(index.0, self.frame_count);
                render_channel(self.size, &spec.generator, phase)
            })
            .collect::<Vec<_>>();
        let frame = composite(self.colorspace, &buffers)?.with_comment(self.comment.clone());
        Ok(if self.log_polar {
            remap_log_polar(&frame)?
        } else {
            frame
        })
    }

    /// Consume the sequence as a lazy, forward-only stream of `frame_count` frames.
    pub fn frames(self) -> SequenceFrames {
        SequenceFrames {
            seq: self,
            next: 0,
        }
    }

    /// Render every frame into memory, in index order.
    #[tracing::instrument(skip(self), fields(frames = self.frame_count, parallel = threading.parallel))]
    pub fn render_all(&self, threading: &RenderThreading) -> FormwaveResult<Vec<FrameRgb>> {
        if !threading.parallel {
            return (0..self.frame_count)
                .map(|i| self.render_frame(FrameIndex(i)))
                .collect();
        }
        let pool = threading.build_pool()?;
        pool.install(|| {
            (0..self.frame_count)
                .into_par_iter()
                .map(|i| self.render_frame(FrameIndex(i)))
                .collect()
        })
    }

    /// Stream every frame into `sink` in strictly increasing index order.
    ///
    /// A scoped sink thread drains a bounded channel and reorders by index, so parallel workers
    /// can finish out of order without the sink noticing.
    #[tracing::instrument(skip(self, sink), fields(frames = self.frame_count, parallel = threading.parallel))]
    pub fn render_into(
        &self,
        sink: &mut dyn FrameSink,
        threading: &RenderThreading,
    ) -> FormwaveResult<SequenceStats> {
        let cfg = SinkConfig {
            size: self.size,
            frame_count: self.frame_count,
            comment: Some(self.comment.clone()),
        };
        let cap = threading.channel_capacity.max(1);
        let chunk_size = threading.normalized_chunk_size().min(self.frame_count);
        let pool = if threading.parallel {
            Some(threading.build_pool()?)
        } else {
            None
        };
        let frame_count = self.frame_count;

        std::thread::scope(|scope| -> FormwaveResult<SequenceStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);

            let enc = scope.spawn(move || -> FormwaveResult<()> {
                sink.begin(cfg)?;

                let mut next = 0u64;
                let mut pending = HashMap::<u64, FrameRgb>::new();
                while next < frame_count {
                    if let Some(frame) = pending.remove(&next) {
                        sink.push_frame(FrameIndex(next), &frame)?;
                        next += 1;
                        continue;
                    }

                    let msg = rx.recv().map_err(|_| {
                        FormwaveError::render("frame channel disconnected unexpectedly")
                    })?;
                    pending.insert(msg.idx.0, msg.frame);
                }

                sink.end()
            });

            let mut stats = SequenceStats::default();
            let produce_res = (|| -> Result<(), ProduceError> {
                let mut chunk_start = 0u64;
                while chunk_start < frame_count {
                    let chunk_end = (chunk_start + chunk_size).min(frame_count);
                    match pool.as_ref() {
                        Some(pool) => self.send_chunk_parallel(pool, &tx, chunk_start, chunk_end)?,
                        None => {
                            for i in chunk_start..chunk_end {
                                let frame = self.render_frame(FrameIndex(i))?;
                                send(&tx, FrameIndex(i), frame)?;
                            }
                        }
                    }
                    tracing::debug!(chunk_start, chunk_end, "sequence chunk rendered");
                    stats.frames_total += chunk_end - chunk_start;
                    stats.chunks += 1;
                    chunk_start = chunk_end;
                }
                Ok(())
            })();

            drop(tx);
            let enc_res = enc
                .join()
                .map_err(|_| FormwaveError::render("sink thread panicked"))?;

            // A disconnected channel means the sink stopped first; its error is the cause.
            match produce_res {
                Err(ProduceError::Failed(e)) => return Err(e),
                Err(ProduceError::SinkDisconnected) => {
                    enc_res?;
                    return Err(FormwaveError::render("sink stopped before the last frame"));
                }
                Ok(()) => {}
            }
            enc_res?;
            Ok(stats)
        })
    }

    fn send_chunk_parallel(
        &self,
        pool: &rayon::ThreadPool,
        tx: &mpsc::SyncSender<FrameMsg>,
        start: u64,
        end: u64,
    ) -> Result<(), ProduceError> {
        pool.install(|| {
            (start..end).into_par_iter().try_for_each(|i| {
                let frame = self.render_frame(FrameIndex(i))?;
                send(tx, FrameIndex(i), frame)
            })
        })
    }
}

fn send(
    tx: &mpsc::SyncSender<FrameMsg>,
    idx: FrameIndex,
    frame: FrameRgb,
) -> Result<(), ProduceError> {
    tx.send(FrameMsg { idx, frame })
        .map_err(|_| ProduceError::SinkDisconnected)
}

/// Why frame production stopped early.
#[derive(Debug)]
enum ProduceError {
    /// The sink thread exited and dropped its receiver.
    SinkDisconnected,
    /// Rendering a frame failed.
    Failed(FormwaveError),
}

impl From<FormwaveError> for ProduceError {
    fn from(e: FormwaveError) -> Self {
        Self::Failed(e)
    }
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: FrameRgb,
}

/// Lazy stream over the frames of a [`Sequence`], produced one at a time on the calling thread.
///
/// Yields exactly `frame_count` items, then `None` forever. There is no way to rewind.
#[derive(Debug)]
pub struct SequenceFrames {
    seq: Sequence,
    next: u64,
}

impl SequenceFrames {
    /// The sequence being streamed.
    pub fn sequence(&self) -> &Sequence {
        &self.seq
    }
}

impl Iterator for SequenceFrames {
    type Item = FormwaveResult<FrameRgb>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.seq.frame_count {
            return None;
        }
        let idx = FrameIndex(self.next);
        self.next += 1;
        Some(self.seq.render_frame(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.seq.frame_count.saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SequenceFrames {}

impl std::iter::FusedIterator for SequenceFrames {}

/// Validate the inputs and return a lazy stream of `frame_count` composited frames.
pub fn generate_sequence(
    size: Size,
    frame_count: u64,
    colorspace: Colorspace,
    channel_specs: Vec<ChannelSpec>,
) -> FormwaveResult<SequenceFrames> {
    Ok(Sequence::new(size, frame_count, colorspace, channel_specs, false)?.frames())
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/animator.rs"]
mod tests;
