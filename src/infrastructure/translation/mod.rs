mod chat_translator;
mod factory;
mod sarvam_translator;

pub use chat_translator::ChatTranslator;
pub use factory::TranslatorFactory;
pub use sarvam_translator::{chunk_paragraphs, SarvamTranslator, CHUNK_CHAR_BUDGET};
