mod config_error;
mod transcriber;
mod translator;

pub use config_error::ConfigError;
pub use transcriber::{Transcriber, TranscriptionError};
pub use translator::{TranslationError, Translator};
