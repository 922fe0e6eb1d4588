use std::path::{Path, PathBuf};

/// Ordered fragments of one normalized recording.
///
/// Ordering is the lexicographic order of the fragment paths; the splitter
/// names fragments with a fixed-width sequence suffix so this matches time
/// order. An empty set means segmentation was unavailable or failed, which
/// the pipeline treats as a recoverable condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioChunkSet {
    chunks: Vec<PathBuf>,
}

impl AudioChunkSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_paths(mut paths: Vec<PathBuf>) -> Self {
        paths.sort();
        Self { chunks: paths }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.chunks.iter().map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.chunks
    }
}
