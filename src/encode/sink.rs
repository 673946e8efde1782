use crate::foundation::core::{FrameIndex, Size};
use crate::foundation::error::FormwaveResult;
use crate::render::frame::FrameRgb;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame dimensions.
    pub size: Size,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
    /// Provenance text shared by every frame of the sequence.
    pub comment: Option<String>,
}

/// Consumer of rendered frames, typically an animated-container encoder.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at `0`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FormwaveResult<()>;
    /// Push one frame in index order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> FormwaveResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> FormwaveResult<()>;
}

/// In-memory sink for tests and for encoders that need every frame up front.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRgb)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRgb)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Take the captured frames, dropping their indices.
    pub fn into_frames(self) -> Vec<FrameRgb> {
        self.frames.into_iter().map(|(_, f)| f).collect()
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FormwaveResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> FormwaveResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FormwaveResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
