use std::sync::Arc;

use crate::application::ports::{ConfigError, Translator};
use crate::application::services::{
    plan_translation, ChainedTranslator, TranslationRoute, PIVOT_LANGUAGE,
};
use crate::infrastructure::providers::{parse_model, require_api_key};

use super::chat_translator::ChatTranslator;
use super::sarvam_translator::SarvamTranslator;

pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Build the translation backend(s) the router selects for a language
    /// pair. `None` means translation is not needed at all. Two-hop routes
    /// compose the regional and general backends through the English pivot.
    pub fn create(
        general_model: &str,
        regional_model: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Option<Arc<dyn Translator>>, ConfigError> {
        let route = plan_translation(source_language, target_language);
        tracing::debug!(
            source = %source_language,
            target = %target_language,
            route = ?route,
            "Translation route selected"
        );

        match route {
            TranslationRoute::Skip => Ok(None),
            TranslationRoute::Regional => Ok(Some(Self::regional(regional_model)?)),
            TranslationRoute::General => Ok(Some(Self::general(general_model)?)),
            TranslationRoute::RegionalThenGeneral => Ok(Some(Arc::new(ChainedTranslator::new(
                Self::regional(regional_model)?,
                Self::general(general_model)?,
                PIVOT_LANGUAGE,
            )))),
            TranslationRoute::GeneralThenRegional => Ok(Some(Arc::new(ChainedTranslator::new(
                Self::general(general_model)?,
                Self::regional(regional_model)?,
                PIVOT_LANGUAGE,
            )))),
        }
    }

    fn general(model: &str) -> Result<Arc<dyn Translator>, ConfigError> {
        let (provider, model_name) = parse_model(model)?;
        let api_key = require_api_key(provider.api_key_env)?;
        Ok(Arc::new(ChatTranslator::new(
            provider.base_url,
            api_key,
            model_name,
        )))
    }

    fn regional(model: &str) -> Result<Arc<dyn Translator>, ConfigError> {
        let (provider, model_name) = parse_model(model)?;
        let api_key = require_api_key(provider.api_key_env)?;
        Ok(Arc::new(SarvamTranslator::new(
            provider.base_url,
            api_key,
            model_name,
        )))
    }
}
