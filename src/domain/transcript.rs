use std::fmt;

/// Text recovered for one chunk, or a placeholder when that chunk's remote
/// call failed. Indexed by the chunk's position so stitching can restore
/// time order regardless of completion order.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    index: usize,
    text: SegmentText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentText {
    Recognized(String),
    Failed,
}

impl TranscriptSegment {
    pub fn recognized(index: usize, text: String) -> Self {
        Self {
            index,
            text: SegmentText::Recognized(text),
        }
    }

    pub fn failed(index: usize) -> Self {
        Self {
            index,
            text: SegmentText::Failed,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_placeholder(&self) -> bool {
        self.text == SegmentText::Failed
    }

    /// The segment as it appears in the stitched transcript. Failed chunks
    /// render as a placeholder naming the 1-based chunk position.
    pub fn render(&self) -> String {
        match &self.text {
            SegmentText::Recognized(text) => text.clone(),
            SegmentText::Failed => format!("[Error in chunk {}]", self.index + 1),
        }
    }
}

/// The final transcript returned to the caller: per-chunk text joined with
/// single spaces in ascending chunk order, trimmed of surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into().trim().to_string())
    }

    pub fn stitch(mut segments: Vec<TranscriptSegment>) -> Self {
        segments.sort_by_key(TranscriptSegment::index);
        let joined = segments
            .iter()
            .map(TranscriptSegment::render)
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
