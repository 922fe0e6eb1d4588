mod transcription_pipeline;

pub use transcription_pipeline::{MAX_CHUNK_SECONDS, PipelineError, TranscriptionPipeline};
