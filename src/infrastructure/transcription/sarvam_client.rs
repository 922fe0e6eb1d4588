use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionClient, TranscriptionError};

/// Client for the Sarvam AI speech-to-text endpoint. Model and language
/// are fixed per deployment; every call carries one audio file.
pub struct SarvamClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    language_code: String,
}

impl SarvamClient {
    pub fn new(
        base_url: &str,
        api_key: String,
        model: String,
        language_code: String,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let endpoint = format!("{}/speech-to-text", base_url.trim_end_matches('/'));
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
            language_code,
        })
    }
}

#[derive(Deserialize)]
struct SarvamTranscriptionResponse {
    transcript: String,
}

#[async_trait]
impl TranscriptionClient for SarvamClient {
    async fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionError> {
        let audio_data = tokio::fs::read(audio).await?;
        let file_name = audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("language_code", self.language_code.clone())
            .part("file", file_part);

        tracing::debug!(
            model = %self.model,
            language = %self.language_code,
            "Sending audio to Sarvam speech-to-text"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-subscription-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: SarvamTranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::MalformedResponse(e.to_string()))?;

        tracing::info!(
            chars = result.transcript.len(),
            "Sarvam transcription completed"
        );

        Ok(result.transcript.trim().to_string())
    }
}
