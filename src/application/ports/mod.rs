mod media_tool;
mod transcription_client;

pub use media_tool::{MediaTool, MediaToolError};
pub use transcription_client::{TranscriptionClient, TranscriptionError};
