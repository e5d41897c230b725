use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::time::Instant;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::{normalize, regional_provider_code, Segment, TranscriptionResult};

const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Speech-to-text via the regional provider's asynchronous batch job API:
/// submit, poll until completion within the job timeout, fetch the output.
///
/// When the overall target language is English the job runs in the backend's
/// built-in translate mode: the transcript comes back already in English and
/// the result is tagged `source_language = "en"`, which makes the pipeline
/// skip its own translation step. One network job covers both stages.
pub struct SarvamSpeechEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    target_language: String,
    job_timeout: Duration,
}

impl SarvamSpeechEngine {
    pub fn new(
        base_url: &str,
        api_key: String,
        model: &str,
        target_language: &str,
        job_timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            target_language: target_language.to_string(),
            job_timeout,
        }
    }

    async fn submit_job(
        &self,
        audio_path: &Path,
        mode: &str,
        language_code: &str,
        timestamps: bool,
    ) -> Result<String, TranscriptionError> {
        let audio = tokio::fs::read(audio_path).await.map_err(|e| {
            TranscriptionError::AudioFile(format!("{}: {}", audio_path.display(), e))
        })?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("mode", mode.to_string())
            .text("language_code", language_code.to_string())
            .text("with_diarization", "true")
            .text("with_timestamps", timestamps.to_string())
            .part("file", multipart::Part::bytes(audio).file_name(file_name));

        let url = format!("{}/speech-to-text-job", self.base_url);
        tracing::debug!(
            model = %self.model,
            mode = %mode,
            language_code = %language_code,
            "Submitting batch speech-to-text job"
        );

        let response = self
            .client
            .post(&url)
            .header("api-subscription-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("submit: {}", e)))?;
        let response = check_status(response).await?;

        let created: CreateJobResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse job id: {}", e)))?;
        Ok(created.job_id)
    }

    async fn wait_for_completion(&self, job_id: &str) -> Result<(), TranscriptionError> {
        let url = format!("{}/speech-to-text-job/{}/status", self.base_url, job_id);
        let deadline = Instant::now() + self.job_timeout;

        loop {
            let response = self
                .client
                .get(&url)
                .header("api-subscription-key", &self.api_key)
                .send()
                .await
                .map_err(|e| TranscriptionError::ApiRequestFailed(format!("poll: {}", e)))?;
            let response = check_status(response).await?;

            let status: JobStatusResponse = response.json().await.map_err(|e| {
                TranscriptionError::ApiRequestFailed(format!("parse job status: {}", e))
            })?;

            match status.status.as_str() {
                "Completed" => return Ok(()),
                "Failed" => {
                    return Err(TranscriptionError::JobFailed(
                        status
                            .error_message
                            .unwrap_or_else(|| "no error message".to_string()),
                    ))
                }
                state => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(TranscriptionError::JobTimeout(self.job_timeout.as_secs()));
                    }
                    tracing::debug!(job_id = %job_id, state = %state, "Job still running");
                    tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
                }
            }
        }
    }

    async fn fetch_output(
        &self,
        job_id: &str,
        mode: &str,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let url = format!("{}/speech-to-text-job/{}/output", self.base_url, job_id);
        let response = self
            .client
            .get(&url)
            .header("api-subscription-key", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("fetch output: {}", e)))?;
        let response = check_status(response).await?;

        let output: JobOutput = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse output: {}", e)))?;

        // In translate mode the transcript is already English; tagging the
        // result "en" is what tells the pipeline not to translate again.
        let source_language = if mode == "translate" {
            Some("en".to_string())
        } else {
            output.language_code
        };

        let segments = output
            .diarized_transcript
            .filter(|d| !d.entries.is_empty())
            .map(|d| {
                d.entries
                    .into_iter()
                    .map(|entry| Segment {
                        text: entry.transcript,
                        start: entry.start_time_seconds,
                        end: entry.end_time_seconds,
                        speaker: entry.speaker_id,
                    })
                    .collect()
            });

        tracing::info!(chars = output.transcript.len(), "Batch job output fetched");
        Ok(TranscriptionResult {
            text: output.transcript,
            source_language,
            segments,
        })
    }
}

#[async_trait]
impl Transcriber for SarvamSpeechEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
        timestamps: bool,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let mode = if normalize(&self.target_language) == "en" {
            "translate"
        } else {
            "transcribe"
        };
        let language_code = match language {
            Some(language) => regional_provider_code(language),
            None => "unknown".to_string(),
        };

        let job_id = self
            .submit_job(audio_path, mode, &language_code, timestamps)
            .await?;
        tracing::info!(job_id = %job_id, "Batch speech-to-text job started");

        self.wait_for_completion(&job_id).await?;
        self.fetch_output(&job_id, mode).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TranscriptionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(match status {
        StatusCode::TOO_MANY_REQUESTS => TranscriptionError::RateLimited(body),
        s if s.is_server_error() => TranscriptionError::ServiceUnavailable(body),
        s => TranscriptionError::ApiRequestFailed(format!("status {}: {}", s, body)),
    })
}

#[derive(Deserialize)]
struct CreateJobResponse {
    job_id: String,
}

#[derive(Deserialize)]
struct JobStatusResponse {
    status: String,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct JobOutput {
    transcript: String,
    language_code: Option<String>,
    diarized_transcript: Option<DiarizedTranscript>,
}

#[derive(Deserialize)]
struct DiarizedTranscript {
    entries: Vec<DiarizedEntry>,
}

#[derive(Deserialize)]
struct DiarizedEntry {
    transcript: String,
    start_time_seconds: f64,
    end_time_seconds: f64,
    speaker_id: Option<String>,
}
