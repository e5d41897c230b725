use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{TranslationError, Translator};
use crate::infrastructure::providers::with_retry;

/// Translation through any OpenAI-compatible `/chat/completions` endpoint,
/// prompting the model to emit only the translated text.
pub struct ChatTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatTranslator {
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
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let system = format!(
            "You are a translator. Translate the following text from {} to {}. \
             Output only the translated text, nothing else.",
            source_language, target_language
        );
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": text },
            ],
        });

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            model = %self.model,
            source = %source_language,
            target = %target_language,
            "Sending chat translation request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
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

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(format!("parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TranslationError::InvalidResponse("no choices returned".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        with_retry("chat translation", TranslationError::is_transient, || {
            self.request(text, source_language, target_language)
        })
        .await
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
        StatusCode::REQUEST_TIMEOUT => TranslationError::Timeout(body),
        s if s.is_server_error() => TranslationError::ServiceUnavailable(body),
        s => TranslationError::ApiRequestFailed(format!("status {}: {}", s, body)),
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
