/// Result alias used across the crate.
pub type FormwaveResult<T> = Result<T, FormwaveError>;

/// Error type for configuration, rendering, and collaborator failures.
///
/// The wave and expression math is total, so evaluation itself never fails. Errors come from
/// malformed input (rejected up front) or from the surrounding plumbing.
#[derive(thiserror::Error, Debug)]
pub enum FormwaveError {
    /// Invalid colorspace, channel count, size, frame count, or numeric field.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Pipeline plumbing failed (thread pool, encoder channel).
    #[error("render error: {0}")]
    Render(String),

    /// A sequence document could not be written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// I/O from an external collaborator, propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FormwaveError {
    /// Build a [`FormwaveError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`FormwaveError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FormwaveError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
