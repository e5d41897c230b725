use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::{Segment, TranscriptionResult};
use crate::infrastructure::providers::with_retry;

/// Speech-to-text against any OpenAI-compatible `/audio/transcriptions`
/// endpoint (OpenAI, Groq).
pub struct WhisperEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl WhisperEngine {
    pub fn new(base_url: &str, api_key: String, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    async fn request(
        &self,
        audio_path: &Path,
        language: Option<&str>,
        timestamps: bool,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let audio = tokio::fs::read(audio_path).await.map_err(|e| {
            TranscriptionError::AudioFile(format!("{}: {}", audio_path.display(), e))
        })?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", multipart::Part::bytes(audio).file_name(file_name));
        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }
        if timestamps {
            form = form.text("response_format", "verbose_json");
        }

        let url = format!("{}/audio/transcriptions", self.base_url);
        tracing::debug!(model = %self.model, "Sending audio to transcription API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(status_error(status, body));
        }

        if timestamps {
            let payload: VerboseTranscription = response.json().await.map_err(|e| {
                TranscriptionError::ApiRequestFailed(format!("parse response: {}", e))
            })?;
            let segments = payload.segments.map(|segments| {
                segments
                    .into_iter()
                    .map(|s| Segment {
                        text: s.text,
                        start: s.start,
                        end: s.end,
                        speaker: None,
                    })
                    .collect()
            });
            tracing::info!(chars = payload.text.len(), "Transcription completed");
            return Ok(TranscriptionResult {
                text: payload.text,
                source_language: payload.language,
                segments,
            });
        }

        let payload: PlainTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {}", e)))?;
        tracing::info!(chars = payload.text.len(), "Transcription completed");
        Ok(TranscriptionResult {
            text: payload.text,
            source_language: None,
            segments: None,
        })
    }
}

#[async_trait]
impl Transcriber for WhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
        timestamps: bool,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        with_retry("transcription", TranscriptionError::is_transient, || {
            self.request(audio_path, language, timestamps)
        })
        .await
    }
}

fn request_error(e: reqwest::Error) -> TranscriptionError {
    if e.is_timeout() {
        TranscriptionError::Timeout(e.to_string())
    } else if e.is_connect() {
        TranscriptionError::ConnectionFailed(e.to_string())
    } else {
        TranscriptionError::ApiRequestFailed(e.to_string())
    }
}

fn status_error(status: StatusCode, body: String) -> TranscriptionError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => TranscriptionError::RateLimited(body),
        StatusCode::REQUEST_TIMEOUT => TranscriptionError::Timeout(body),
        s if s.is_server_error() => TranscriptionError::ServiceUnavailable(body),
        s => TranscriptionError::ApiRequestFailed(format!("status {}: {}", s, body)),
    }
}

#[derive(Deserialize)]
struct PlainTranscription {
    text: String,
}

#[derive(Deserialize)]
struct VerboseTranscription {
    text: String,
    language: Option<String>,
    segments: Option<Vec<VerboseSegment>>,
}

#[derive(Deserialize)]
struct VerboseSegment {
    text: String,
    start: f64,
    end: f64,
}
