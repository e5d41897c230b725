/// A timed slice of a transcript. Ordering within a [`TranscriptionResult`]
/// is chronological; `end >= start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub speaker: Option<String>,
}

/// Output of one transcription call. `source_language` is the language the
/// backend detected or was told; `segments` is the diarized/timed breakdown
/// of `text` when timestamps were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    pub text: String,
    pub source_language: Option<String>,
    pub segments: Option<Vec<Segment>>,
}

/// Output of one translation call. All fields are required once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// One end-to-end pipeline result. `translation` is present exactly when the
/// detected source language differed from the requested target.
#[derive(Debug, Clone, PartialEq)]
pub struct ScribeResult {
    pub transcription: TranscriptionResult,
    pub translation: Option<TranslationResult>,
}
