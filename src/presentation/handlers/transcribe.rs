use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{MediaTool, TranscriptionClient};
use crate::domain::{AudioFormat, RawAudioAsset};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
    pub success: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<M, T>(
    State(state): State<AppState<M, T>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    M: MediaTool + 'static,
    T: TranscriptionClient + 'static,
{
    let mut pin: Option<String> = None;
    let mut audio: Option<(String, Bytes)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        match field.name() {
            Some("pin") => match field.text().await {
                Ok(value) => pin = Some(value),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read pin field");
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: format!("Failed to read form field: {}", e),
                        }),
                    )
                        .into_response();
                }
            },
            Some("audio") => {
                let filename = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(data) => audio = Some((filename, data)),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                }
            }
            _ => {}
        }
    }

    // Authorization comes first: a bad PIN must trigger no filesystem or
    // pipeline work.
    if pin.as_deref() != Some(state.settings.auth.pin.as_str()) {
        tracing::warn!("Rejected request with invalid PIN");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid PIN".to_string(),
            }),
        )
            .into_response();
    }

    let Some((filename, data)) = audio else {
        tracing::warn!("Transcription request with no file");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio file provided".to_string(),
            }),
        )
            .into_response();
    };

    if filename.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file selected".to_string(),
            }),
        )
            .into_response();
    }

    let Some(format) = AudioFormat::from_filename(&filename) else {
        tracing::warn!(filename = %filename, "Disallowed upload extension");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid file type. Please use WAV, MP3, M4A, or WEBM".to_string(),
            }),
        )
            .into_response();
    };

    if state.settings.sarvam.api_key.is_none() {
        tracing::error!("SARVAM_API_KEY is not set");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Sarvam API key not configured".to_string(),
            }),
        )
            .into_response();
    }

    // Timestamp plus a random component keeps concurrent requests sharing
    // the upload directory from colliding.
    let stored_name = format!(
        "{}_{}_{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        Uuid::new_v4().simple(),
        sanitize_filename(&filename)
    );
    let path = state.settings.media.upload_dir.join(stored_name);
    if let Err(e) = tokio::fs::write(&path, &data).await {
        tracing::error!(error = %e, "Failed to store upload");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to store upload: {}", e),
            }),
        )
            .into_response();
    }

    tracing::info!(
        filename = %filename,
        bytes = data.len(),
        format = %format,
        "Processing upload"
    );

    let raw = RawAudioAsset::new(path, format);
    match state.pipeline.run(&raw).await {
        Ok(transcript) => {
            tracing::info!(
                chars = transcript.as_str().len(),
                "Transcription completed"
            );
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    transcript: transcript.into_string(),
                    success: true,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// Keep only the final path component of the client-supplied name,
/// restricted to a conservative character set.
fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\note.wav"), "note.wav");
    }

    #[test]
    fn drops_unsafe_characters() {
        assert_eq!(sanitize_filename("my note (1).mp3"), "mynote1.mp3");
    }
}
