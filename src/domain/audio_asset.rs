use std::path::{Path, PathBuf};

use super::AudioFormat;

/// One uploaded recording as stored on disk, before any processing.
/// Lives for the duration of a single transcription request.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAudioAsset {
    path: PathBuf,
    format: AudioFormat,
}

impl RawAudioAsset {
    pub fn new(path: PathBuf, format: AudioFormat) -> Self {
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }
}

/// Canonical-format derivative of a raw upload: either a converted
/// mono/16 kHz/16-bit PCM file, or the raw bytes passed through verbatim
/// when conversion was skipped or fell back.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAudioAsset {
    path: PathBuf,
    provenance: NormalizationProvenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationProvenance {
    Converted,
    Verbatim,
}

impl NormalizedAudioAsset {
    pub fn converted(path: PathBuf) -> Self {
        Self {
            path,
            provenance: NormalizationProvenance::Converted,
        }
    }

    pub fn verbatim(raw: &RawAudioAsset) -> Self {
        Self {
            path: raw.path().to_path_buf(),
            provenance: NormalizationProvenance::Verbatim,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the asset shares storage with the raw upload.
    pub fn is_verbatim(&self) -> bool {
        self.provenance == NormalizationProvenance::Verbatim
    }
}
