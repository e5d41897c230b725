use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{TranslationError, Translator};
use crate::domain::regional_provider_code;
use crate::infrastructure::providers::with_retry;

/// Per-request character budget for the regional translation API, kept
/// under the provider's hard 2000-character input limit.
pub const CHUNK_CHAR_BUDGET: usize = 1900;

/// Split text on paragraph boundaries into chunks at or under `max_chars`,
/// greedily packing paragraphs until the next one would overflow. A single
/// paragraph longer than the budget is emitted whole as its own oversized
/// chunk rather than split mid-paragraph.
pub fn chunk_paragraphs(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        if current.is_empty() {
            current.push_str(paragraph);
        } else if current.len() + 2 + paragraph.len() <= max_chars {
            current.push_str("\n\n");
            current.push_str(paragraph);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(paragraph);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Translation via the regional provider's `/translate` endpoint. Long texts
/// are chunked on paragraph boundaries, translated chunk by chunk in order,
/// and rejoined with blank lines.
pub struct SarvamTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl SarvamTranslator {
    pub fn new(base_url: &str, api_key: String, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    async fn request_chunk(
        &self,
        chunk: &str,
        source_code: &str,
        target_code: &str,
    ) -> Result<String, TranslationError> {
        let body = json!({
            "model": self.model,
            "input": chunk,
            "source_language_code": source_code,
            "target_language_code": target_code,
        });

        let url = format!("{}/translate", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("api-subscription-key", &self.api_key)
            .json(&body)
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

        let translated: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(format!("parse response: {}", e)))?;
        Ok(translated.translated_text)
    }
}

#[async_trait]
impl Translator for SarvamTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let source_code = regional_provider_code(source_language);
        let target_code = regional_provider_code(target_language);

        let chunks = chunk_paragraphs(text, CHUNK_CHAR_BUDGET);
        tracing::debug!(
            chunks = chunks.len(),
            source = %source_code,
            target = %target_code,
            "Translating via regional API"
        );

        let mut outputs = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let translated =
                with_retry("regional translation", TranslationError::is_transient, || {
                    self.request_chunk(chunk, &source_code, &target_code)
                })
                .await?;
            outputs.push(translated);
        }

        Ok(outputs.join("\n\n"))
    }
}

fn request_error(e: reqwest::Error) -> TranslationError {
    if e.is_timeout() {
        TranslationError::Timeout(e.to_string())
    } else if e.is_connect() {
        TranslationError::ConnectionFailed(e.to_string())
    } else {
        TranslationError::ApiRequestFailed(e.to_string())
    }
}

fn status_error(status: StatusCode, body: String) -> TranslationError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => TranslationError::RateLimited(body),
        s if s.is_server_error() => TranslationError::ServiceUnavailable(body),
        s => TranslationError::ApiRequestFailed(format!("status {}: {}", s, body)),
    }
}

#[derive(Deserialize)]
struct TranslateResponse {
    translated_text: String,
}
