pub mod providers;
pub mod transcription;
pub mod translation;
