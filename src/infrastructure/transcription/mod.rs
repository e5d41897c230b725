mod factory;
mod sarvam_engine;
mod whisper_engine;

pub use factory::TranscriberFactory;
pub use sarvam_engine::SarvamSpeechEngine;
pub use whisper_engine::WhisperEngine;
