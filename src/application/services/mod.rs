mod chained_translator;
mod pipeline;
mod routing;

pub use chained_translator::ChainedTranslator;
pub use pipeline::{scribe, scribe_batch, translate_text, ScribeError};
pub use routing::{
    plan_transcription, plan_translation, SpeechBackend, TranslationRoute, PIVOT_LANGUAGE,
};
