use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use dhwani::application::ports::{TranscriptionClient, TranscriptionError};
use dhwani::infrastructure::transcription::SarvamClient;

async fn start_mock_sarvam_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/speech-to-text",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn client(base_url: &str) -> SarvamClient {
    SarvamClient::new(
        base_url,
        "test-key".to_string(),
        "saarika:v2.5".to_string(),
        "te-IN".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

async fn write_audio_fixture(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("clip.wav");
    tokio::fs::write(&path, b"fake audio bytes").await.unwrap();
    path
}

#[tokio::test]
async fn given_valid_audio_when_sarvam_responds_then_trimmed_transcript_is_returned() {
    let response_body = r#"{"request_id": "req-1", "transcript": "  telugu text  "}"#;
    let (base_url, shutdown_tx) = start_mock_sarvam_server(200, response_body).await;
    let dir = TempDir::new().unwrap();
    let audio = write_audio_fixture(&dir).await;

    let result = client(&base_url).transcribe(&audio).await;

    assert_eq!(result.unwrap(), "telugu text");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_api_error_carries_status_and_body() {
    let response_body = r#"{"error": {"message": "invalid key"}}"#;
    let (base_url, shutdown_tx) = start_mock_sarvam_server(403, response_body).await;
    let dir = TempDir::new().unwrap();
    let audio = write_audio_fixture(&dir).await;

    let result = client(&base_url).transcribe(&audio).await;

    match result {
        Err(TranscriptionError::ApiRequestFailed(message)) => {
            assert!(message.contains("403"), "message was: {}", message);
            assert!(message.contains("invalid key"), "message was: {}", message);
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_response_without_transcript_field_then_malformed_response_error() {
    let response_body = r#"{"request_id": "req-2"}"#;
    let (base_url, shutdown_tx) = start_mock_sarvam_server(200, response_body).await;
    let dir = TempDir::new().unwrap();
    let audio = write_audio_fixture(&dir).await;

    let result = client(&base_url).transcribe(&audio).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::MalformedResponse(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_audio_file_then_read_error_before_any_request() {
    let result = client("http://127.0.0.1:1")
        .transcribe(Path::new("/nonexistent/clip.wav"))
        .await;

    assert!(matches!(result, Err(TranscriptionError::AudioRead(_))));
}
