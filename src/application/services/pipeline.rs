use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::application::ports::{
    Transcriber, TranscriptionError, TranslationError, Translator,
};
use crate::domain::{normalize, ScribeResult, TranslationResult};

#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),
    #[error("no translator configured but translation is required")]
    TranslatorRequired,
    #[error("source and target language are both '{0}'; nothing to translate")]
    SameLanguage(String),
}

/// Run one end-to-end unit of work: transcribe, then translate unless the
/// detected language already matches the target.
///
/// The translator may legally be `None` when the caller knows translation
/// cannot be needed; if it turns out to be needed anyway, that is a distinct
/// [`ScribeError::TranslatorRequired`] failure, never a silent
/// transcription-only result.
pub async fn scribe(
    audio_path: &Path,
    transcriber: &dyn Transcriber,
    translator: Option<&dyn Translator>,
    source_language: Option<&str>,
    target_language: &str,
    timestamps: bool,
) -> Result<ScribeResult, ScribeError> {
    let transcription = transcriber
        .transcribe(audio_path, source_language, timestamps)
        .await?;

    let detected = transcription.source_language.as_deref().or(source_language);

    if let Some(language) = detected {
        if normalize(language) == normalize(target_language) {
            tracing::debug!(
                language = %language,
                "Detected language matches target, skipping translation"
            );
            return Ok(ScribeResult {
                transcription,
                translation: None,
            });
        }
    }

    let translator = translator.ok_or(ScribeError::TranslatorRequired)?;

    let translated = translator
        .translate(
            &transcription.text,
            detected.unwrap_or("auto"),
            target_language,
        )
        .await?;

    let translation = TranslationResult {
        text: translated,
        source_language: detected.unwrap_or("unknown").to_string(),
        target_language: target_language.to_string(),
    };

    Ok(ScribeResult {
        transcription,
        translation: Some(translation),
    })
}

/// Run [`scribe`] over many inputs with at most `concurrency` in flight at
/// once. Results come back in input order regardless of completion order, and
/// one item's failure never disturbs the others' slots.
#[allow(clippy::too_many_arguments)]
pub async fn scribe_batch(
    audio_paths: &[PathBuf],
    transcriber: Arc<dyn Transcriber>,
    translator: Option<Arc<dyn Translator>>,
    source_language: Option<&str>,
    target_language: &str,
    timestamps: bool,
    concurrency: usize,
) -> Vec<Result<ScribeResult, ScribeError>> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let tasks = audio_paths.iter().map(|path| {
        let semaphore = Arc::clone(&semaphore);
        let transcriber = Arc::clone(&transcriber);
        let translator = translator.clone();
        async move {
            // The semaphore is never closed, so acquisition cannot fail.
            let _permit = semaphore
                .acquire()
                .await
                .expect("batch semaphore closed");
            scribe(
                path,
                transcriber.as_ref(),
                translator.as_deref(),
                source_language,
                target_language,
                timestamps,
            )
            .await
        }
    });

    join_all(tasks).await
}

/// Text-only shortcut: translate raw text without a transcription step.
///
/// Unlike the audio pipeline, an identical source and target pair is an error
/// here rather than a skip; translating a text to its own language produces
/// nothing useful.
pub async fn translate_text(
    text: &str,
    translator: &dyn Translator,
    source_language: &str,
    target_language: &str,
) -> Result<TranslationResult, ScribeError> {
    let source_base = normalize(source_language);
    if source_base == normalize(target_language) {
        return Err(ScribeError::SameLanguage(source_base));
    }

    let translated = translator
        .translate(text, source_language, target_language)
        .await?;

    Ok(TranslationResult {
        text: translated,
        source_language: source_language.to_string(),
        target_language: target_language.to_string(),
    })
}
