mod ffmpeg_tool;

pub use ffmpeg_tool::FfmpegMediaTool;
