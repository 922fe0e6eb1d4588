use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{MediaTool, TranscriptionClient, TranscriptionError};
use crate::domain::{
    AudioChunkSet, DurationEstimate, NormalizedAudioAsset, RawAudioAsset, Transcript,
    TranscriptSegment,
};

/// Longest fragment the splitter emits. Kept below the remote API's 30 s
/// per-call ceiling.
pub const MAX_CHUNK_SECONDS: u32 = 29;

/// Drives one upload through normalize → probe → transcribe → stitch and
/// deletes every transient file the request produced before returning.
///
/// All degraded-tooling policy lives here: a failed conversion falls back
/// to the uploaded bytes, a failed probe assumes a short clip, failed
/// segmentation falls back to one whole-file call, and a failed chunk
/// becomes a placeholder segment instead of failing the request.
pub struct TranscriptionPipeline<M, T>
where
    M: MediaTool,
    T: TranscriptionClient,
{
    media_tool: Arc<M>,
    transcription: Arc<T>,
}

impl<M, T> TranscriptionPipeline<M, T>
where
    M: MediaTool,
    T: TranscriptionClient,
{
    pub fn new(media_tool: Arc<M>, transcription: Arc<T>) -> Self {
        Self {
            media_tool,
            transcription,
        }
    }

    pub async fn run(&self, raw: &RawAudioAsset) -> Result<Transcript, PipelineError> {
        let mut scratch: Vec<PathBuf> = vec![raw.path().to_path_buf()];

        let normalized = match self.normalize(raw).await {
            Ok(asset) => asset,
            Err(e) => {
                self.cleanup(&scratch).await;
                return Err(e);
            }
        };
        if !normalized.is_verbatim() {
            scratch.push(normalized.path().to_path_buf());
        }

        let duration = self.probe(&normalized).await;
        tracing::info!(
            secs = duration.secs(),
            fallback = duration.is_fallback(),
            "Audio duration estimated"
        );

        let outcome = if duration.requires_chunking() {
            self.transcribe_chunked(&normalized, &mut scratch).await
        } else {
            self.transcribe_direct(&normalized).await
        };

        self.cleanup(&scratch).await;
        outcome
    }

    /// Produce the canonical-format asset for `raw`. A WAV upload passes
    /// through verbatim. Conversion failures fall back to the uploaded
    /// bytes as long as they are readable; short clips in a near-canonical
    /// container are still accepted by the remote service.
    async fn normalize(&self, raw: &RawAudioAsset) -> Result<NormalizedAudioAsset, PipelineError> {
        if raw.format().is_canonical() {
            return Ok(NormalizedAudioAsset::verbatim(raw));
        }

        let output = raw.path().with_extension("wav");
        match self.media_tool.normalize(raw.path(), &output).await {
            Ok(()) => Ok(NormalizedAudioAsset::converted(output)),
            Err(e) => {
                tracing::warn!(error = %e, "Normalization failed, trying the uploaded bytes");
                if let Err(io) = tokio::fs::remove_file(&output).await {
                    tracing::debug!(
                        path = %output.display(),
                        error = %io,
                        "No partial conversion output to remove"
                    );
                }
                match tokio::fs::metadata(raw.path()).await {
                    Ok(_) => Ok(NormalizedAudioAsset::verbatim(raw)),
                    Err(io) => Err(PipelineError::UnreadableUpload(io)),
                }
            }
        }
    }

    /// Never fails outward: any probe error degrades to the fixed fallback
    /// duration, which keeps unknown clips on the direct path.
    async fn probe(&self, asset: &NormalizedAudioAsset) -> DurationEstimate {
        match self.media_tool.probe(asset.path()).await {
            Ok(secs) => DurationEstimate::measured(secs),
            Err(e) => {
                tracing::warn!(error = %e, "Duration probe failed, assuming a short clip");
                DurationEstimate::fallback()
            }
        }
    }

    async fn transcribe_direct(
        &self,
        asset: &NormalizedAudioAsset,
    ) -> Result<Transcript, PipelineError> {
        let text = self
            .transcription
            .transcribe(asset.path())
            .await
            .map_err(PipelineError::Transcription)?;
        Ok(Transcript::from_text(text))
    }

    async fn transcribe_chunked(
        &self,
        asset: &NormalizedAudioAsset,
        scratch: &mut Vec<PathBuf>,
    ) -> Result<Transcript, PipelineError> {
        let chunks = self.split(asset).await;
        scratch.extend(chunks.paths().iter().cloned());

        if chunks.is_empty() {
            tracing::warn!("Segmentation produced no chunks, sending the whole file in one call");
            return self.transcribe_direct(asset).await;
        }

        let mut segments = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::info!(
                chunk = index + 1,
                total = chunks.len(),
                path = %chunk.display(),
                "Transcribing chunk"
            );
            match self.transcription.transcribe(chunk).await {
                Ok(text) => segments.push(TranscriptSegment::recognized(index, text)),
                Err(e) => {
                    tracing::error!(
                        chunk = index + 1,
                        error = %e,
                        "Chunk transcription failed, inserting placeholder"
                    );
                    segments.push(TranscriptSegment::failed(index));
                }
            }
        }

        Ok(Transcript::stitch(segments))
    }

    /// Returns an empty set when segmentation tooling is unavailable or the
    /// process fails; the caller falls back to a whole-file call.
    async fn split(&self, asset: &NormalizedAudioAsset) -> AudioChunkSet {
        match self.media_tool.split(asset.path(), MAX_CHUNK_SECONDS).await {
            Ok(paths) => AudioChunkSet::from_paths(paths),
            Err(e) => {
                tracing::warn!(error = %e, "Segmentation unavailable or failed");
                AudioChunkSet::empty()
            }
        }
    }

    /// Best-effort deletion; a file that cannot be removed never changes
    /// the outcome already computed.
    async fn cleanup(&self, files: &[PathBuf]) {
        for path in files {
            if let Err(e) = tokio::fs::remove_file(path).await {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "Could not remove transient file"
                );
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("uploaded audio unreadable: {0}")]
    UnreadableUpload(#[source] std::io::Error),
    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
}
