use std::path::Path;

use async_trait::async_trait;

use crate::domain::TranscriptionResult;

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
        timestamps: bool,
    ) -> Result<TranscriptionResult, TranscriptionError>;
}

impl std::fmt::Debug for dyn Transcriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Transcriber")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("audio file error: {0}")]
    AudioFile(String),
    #[error("batch job failed: {0}")]
    JobFailed(String),
    #[error("batch job did not complete within {0} seconds")]
    JobTimeout(u64),
}

impl TranscriptionError {
    /// Transient failures are retried with backoff; everything else surfaces
    /// immediately. Job timeouts are terminal for the item, never retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_)
                | Self::Timeout(_)
                | Self::ConnectionFailed(_)
                | Self::ServiceUnavailable(_)
        )
    }
}
