use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::Rng;

use crate::foundation::core::Size;
use crate::foundation::error::{FormwaveError, FormwaveResult};
use crate::render::colorspace::Colorspace;
use crate::sequence::animator::Sequence;
use crate::synth::channel::ChannelSpec;
use crate::synth::generator::GeneratorKind;

/// JSON-facing description of a looping sequence.
///
/// This is the human-editable boundary object. [`SequenceDoc::into_sequence`] validates it and
/// produces a renderable [`Sequence`]; saving a doc and loading it again renders identical frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceDoc {
    /// Frame dimensions.
    pub size: Size,
    /// Frames per loop.
    pub frame_count: u64,
    /// Colorspace name, case-insensitive on input.
    pub colorspace: Colorspace,
    /// Apply the log-polar remap to every frame.
    #[serde(default)]
    pub log_polar: bool,
    /// Seed the doc was drawn from, if it was drawn at random.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// One spec per colorspace channel.
    pub channels: Vec<ChannelSpec>,
}

impl SequenceDoc {
    /// Parse a doc from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FormwaveResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FormwaveError::configuration(format!("parse sequence JSON: {e}")))
    }

    /// Parse a doc from JSON text.
    pub fn from_json_str(s: &str) -> FormwaveResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FormwaveError::configuration(format!("parse sequence JSON: {e}")))
    }

    /// Parse a doc from a JSON file on disk. Failing to open the file is an I/O error.
    pub fn from_path(path: impl AsRef<Path>) -> FormwaveResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("open sequence JSON '{}': {e}", path.display()),
            )
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> FormwaveResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FormwaveError::serde(format!("serialize sequence JSON: {e}")))
    }

    /// Check every field without building a [`Sequence`].
    pub fn validate(&self) -> FormwaveResult<()> {
        self.to_sequence().map(|_| ())
    }

    /// Build a renderable sequence.
    pub fn to_sequence(&self) -> FormwaveResult<Sequence> {
        Sequence::new(
            self.size,
            self.frame_count,
            self.colorspace,
            self.channels.clone(),
            self.log_polar,
        )
    }

    /// Build a renderable sequence, consuming the doc.
    pub fn into_sequence(self) -> FormwaveResult<Sequence> {
        Sequence::new(
            self.size,
            self.frame_count,
            self.colorspace,
            self.channels,
            self.log_polar,
        )
    }

    /// Draw a complete random doc. `colorspace` and `log_polar` are drawn when `None`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        size: Size,
        frame_count: u64,
        colorspace: Option<Colorspace>,
        kind: GeneratorKind,
        log_polar: Option<bool>,
    ) -> FormwaveResult<Self> {
        let seq = Sequence::random(rng, size, frame_count, colorspace, kind, log_polar)?;
        Ok(Self::from(&seq))
    }

    /// Attach the seed the doc was drawn from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl From<&Sequence> for SequenceDoc {
    fn from(seq: &Sequence) -> Self {
        Self {
            size: seq.size(),
            frame_count: seq.frame_count(),
            colorspace: seq.colorspace(),
            log_polar: seq.log_polar(),
            seed: None,
            channels: seq.channels().to_vec(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/doc.rs"]
mod tests;
