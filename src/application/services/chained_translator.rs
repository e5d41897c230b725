use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{TranslationError, Translator};

/// Two single-hop translators composed through a pivot language.
///
/// Each hop is an independent backend call with no caching in between. A
/// first-hop failure short-circuits; the second hop never runs.
pub struct ChainedTranslator {
    first: Arc<dyn Translator>,
    second: Arc<dyn Translator>,
    pivot_language: String,
}

impl ChainedTranslator {
    pub fn new(
        first: Arc<dyn Translator>,
        second: Arc<dyn Translator>,
        pivot_language: impl Into<String>,
    ) -> Self {
        Self {
            first,
            second,
            pivot_language: pivot_language.into(),
        }
    }
}

#[async_trait]
impl Translator for ChainedTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        tracing::debug!(
            source = %source_language,
            pivot = %self.pivot_language,
            target = %target_language,
            "Translating via pivot language"
        );

        let intermediate = self
            .first
            .translate(text, source_language, &self.pivot_language)
            .await?;

        self.second
            .translate(&intermediate, &self.pivot_language, target_language)
            .await
    }
}
