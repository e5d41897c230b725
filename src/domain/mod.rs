pub mod language;
mod transcript;

pub use language::{is_regional, normalize, regional_provider_code, REGIONAL_LANGUAGES};
pub use transcript::{ScribeResult, Segment, TranscriptionResult, TranslationResult};
