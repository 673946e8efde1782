use crate::foundation::error::{FormwaveError, FormwaveResult};

/// Threading and chunking controls for multi-frame rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderThreading {
    /// Render frames concurrently on a dedicated rayon pool.
    pub parallel: bool,
    /// Worker thread count. `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Frames rendered per parallel batch.
    pub chunk_size: usize,
    /// Bounded channel capacity between frame producers and the sink thread.
    pub channel_capacity: usize,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 16,
            channel_capacity: 4,
        }
    }
}

impl RenderThreading {
    /// Parallel rendering with rayon's default thread count.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    pub(crate) fn normalized_chunk_size(&self) -> u64 {
        self.chunk_size.max(1) as u64
    }

    pub(crate) fn build_pool(&self) -> FormwaveResult<rayon::ThreadPool> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(FormwaveError::configuration(
                "render threading 'threads' must be >= 1 when set",
            ));
        }

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = self.threads {
            builder = builder.num_threads(n);
        }
        builder
            .build()
            .map_err(|e| FormwaveError::render(format!("failed to build rayon thread pool: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/threading.rs"]
mod tests;
