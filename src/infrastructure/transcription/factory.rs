use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ConfigError, Transcriber};
use crate::application::services::{plan_transcription, SpeechBackend};
use crate::infrastructure::providers::{parse_model, require_api_key};

use super::sarvam_engine::SarvamSpeechEngine;
use super::whisper_engine::WhisperEngine;

pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Build the transcription backend for one job. A regional declared
    /// source routes to the regional batch engine; anything else uses the
    /// general Whisper-style engine. Credential lookup happens here, before
    /// any network call.
    pub fn create(
        general_model: &str,
        regional_model: &str,
        source_language: Option<&str>,
        target_language: &str,
        job_timeout: Duration,
    ) -> Result<Arc<dyn Transcriber>, ConfigError> {
        match plan_transcription(source_language) {
            SpeechBackend::Regional => {
                let (provider, model_name) = parse_model(regional_model)?;
                let api_key = require_api_key(provider.api_key_env)?;
                Ok(Arc::new(SarvamSpeechEngine::new(
                    provider.base_url,
                    api_key,
                    model_name,
                    target_language,
                    job_timeout,
                )))
            }
            SpeechBackend::General => {
                let (provider, model_name) = parse_model(general_model)?;
                let api_key = require_api_key(provider.api_key_env)?;
                Ok(Arc::new(WhisperEngine::new(
                    provider.base_url,
                    api_key,
                    model_name,
                )))
            }
        }
    }
}
