use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Media tooling the pipeline depends on. Implementations may shell out to
/// external processes or wrap native libraries; the orchestrator only sees
/// this contract.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Convert `input` into a mono, 16 kHz, 16-bit PCM WAV file at `output`.
    async fn normalize(&self, input: &Path, output: &Path) -> Result<(), MediaToolError>;

    /// Report the duration of `input` in seconds.
    async fn probe(&self, input: &Path) -> Result<f64, MediaToolError>;

    /// Split `input` into sequential, non-overlapping fragments of at most
    /// `max_seconds` each, returning the generated fragment paths. Callers
    /// must not rely on the returned order.
    async fn split(&self, input: &Path, max_seconds: u32) -> Result<Vec<PathBuf>, MediaToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaToolError {
    #[error("{0} is not installed")]
    Unavailable(String),
    #[error("{tool} exited abnormally: {stderr}")]
    Failed { tool: String, stderr: String },
    #[error("{0} timed out")]
    TimedOut(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
