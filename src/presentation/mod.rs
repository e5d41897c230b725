mod output;
mod settings;

pub use output::{format_json, format_text};
pub use settings::{
    Settings, DEFAULT_CONCURRENCY, DEFAULT_JOB_TIMEOUT_SECS, DEFAULT_REGIONAL_TRANSCRIPTION_MODEL,
    DEFAULT_REGIONAL_TRANSLATION_MODEL, DEFAULT_TARGET_LANGUAGE, DEFAULT_TRANSCRIPTION_MODEL,
    DEFAULT_TRANSLATION_MODEL,
};
