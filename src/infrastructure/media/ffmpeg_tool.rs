use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{MediaTool, MediaToolError};

const FFMPEG: &str = "ffmpeg";
const FFPROBE: &str = "ffprobe";

/// `MediaTool` backed by the ffmpeg suite invoked as subprocesses.
///
/// A binary missing from PATH surfaces as `Unavailable`, a non-zero exit
/// as `Failed` with the tool's stderr, and an invocation exceeding the
/// configured timeout is killed and reported as `TimedOut`.
pub struct FfmpegMediaTool {
    chunk_dir: PathBuf,
    tool_timeout: Duration,
}

impl FfmpegMediaTool {
    pub fn new(chunk_dir: PathBuf, tool_timeout: Duration) -> Self {
        Self {
            chunk_dir,
            tool_timeout,
        }
    }

    async fn run(
        &self,
        tool: &'static str,
        mut command: Command,
    ) -> Result<std::process::Output, MediaToolError> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MediaToolError::Unavailable(tool.to_string()));
            }
            Err(e) => return Err(MediaToolError::Io(e)),
        };

        let output = tokio::time::timeout(self.tool_timeout, child.wait_with_output())
            .await
            .map_err(|_| MediaToolError::TimedOut(tool.to_string()))?
            .map_err(MediaToolError::Io)?;

        if !output.status.success() {
            return Err(MediaToolError::Failed {
                tool: tool.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}

#[async_trait]
impl MediaTool for FfmpegMediaTool {
    async fn normalize(&self, input: &Path, output: &Path) -> Result<(), MediaToolError> {
        let mut command = Command::new(FFMPEG);
        command
            .arg("-i")
            .arg(input)
            .args(["-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1", "-y"])
            .arg(output);

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            "Converting audio to 16kHz mono PCM"
        );
        self.run(FFMPEG, command).await?;
        Ok(())
    }

    async fn probe(&self, input: &Path) -> Result<f64, MediaToolError> {
        let mut command = Command::new(FFPROBE);
        command
            .args(["-v", "quiet", "-show_entries", "format=duration", "-of", "csv=p=0"])
            .arg(input);

        let output = self.run(FFPROBE, command).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse::<f64>()
            .map_err(|_| MediaToolError::Failed {
                tool: FFPROBE.to_string(),
                stderr: format!("unparseable duration: {:?}", stdout.trim()),
            })
    }

    async fn split(&self, input: &Path, max_seconds: u32) -> Result<Vec<PathBuf>, MediaToolError> {
        tokio::fs::create_dir_all(&self.chunk_dir).await?;

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        // %03d gives fragments a fixed-width suffix so lexicographic order
        // matches time order.
        let pattern = self.chunk_dir.join(format!("{}_%03d.wav", stem));

        let mut command = Command::new(FFMPEG);
        command
            .arg("-i")
            .arg(input)
            .args(["-f", "segment", "-segment_time"])
            .arg(max_seconds.to_string())
            .args(["-c:a", "pcm_s16le", "-ar", "16000", "-ac", "1"])
            .arg(&pattern);

        tracing::debug!(
            input = %input.display(),
            segment_time = max_seconds,
            "Splitting audio into fixed-length fragments"
        );
        self.run(FFMPEG, command).await?;

        let prefix = format!("{}_", stem);
        let mut chunks = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.chunk_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix) && name.ends_with(".wav") {
                chunks.push(entry.path());
            }
        }

        tracing::info!(chunks = chunks.len(), "Audio split complete");
        Ok(chunks)
    }
}
