mod audio_asset;
mod audio_format;
mod chunk_set;
mod duration;
mod transcript;

pub use audio_asset::{NormalizationProvenance, NormalizedAudioAsset, RawAudioAsset};
pub use audio_format::AudioFormat;
pub use chunk_set::AudioChunkSet;
pub use duration::{
    DIRECT_PATH_CEILING_SECS, DurationEstimate, DurationProvenance, FALLBACK_DURATION_SECS,
};
pub use transcript::{Transcript, TranscriptSegment};
