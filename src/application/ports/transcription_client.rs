use std::path::Path;

use async_trait::async_trait;

/// One call to the remote speech-to-text service for exactly one audio
/// asset. The service's model and language are fixed by the implementation.
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio read failed: {0}")]
    AudioRead(#[from] std::io::Error),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
