use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use dhwani::application::services::TranscriptionPipeline;
use dhwani::infrastructure::media::FfmpegMediaTool;
use dhwani::infrastructure::observability::{TracingConfig, init_tracing};
use dhwani::infrastructure::transcription::SarvamClient;
use dhwani::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    init_tracing(TracingConfig::default(), settings.server.port);

    if settings.sarvam.api_key.is_none() {
        tracing::warn!("SARVAM_API_KEY is not set, transcription requests will fail");
    }

    tokio::fs::create_dir_all(&settings.media.upload_dir).await?;
    tokio::fs::create_dir_all(&settings.media.chunk_dir).await?;

    let media_tool = Arc::new(FfmpegMediaTool::new(
        settings.media.chunk_dir.clone(),
        Duration::from_secs(settings.media.tool_timeout_secs),
    ));
    let transcription = Arc::new(SarvamClient::new(
        &settings.sarvam.base_url,
        settings.sarvam.api_key.clone().unwrap_or_default(),
        settings.sarvam.model.clone(),
        settings.sarvam.language_code.clone(),
        Duration::from_secs(settings.sarvam.request_timeout_secs),
    )?);
    let pipeline = Arc::new(TranscriptionPipeline::new(media_tool, transcription));

    let state = AppState {
        pipeline,
        settings: settings.clone(),
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
