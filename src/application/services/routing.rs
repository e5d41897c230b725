use crate::domain::{is_regional, normalize};

/// Intermediate language bridging two single-hop translators when no backend
/// supports the requested pair directly.
pub const PIVOT_LANGUAGE: &str = "en";

/// How a (source, target) pair gets translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationRoute {
    /// Source and target already match; no translation backend needed.
    Skip,
    /// The regional backend handles the pair natively (regional <-> English).
    Regional,
    /// The general LLM-chat backend handles the pair directly.
    General,
    /// Two hops: regional source -> pivot, then general pivot -> target.
    RegionalThenGeneral,
    /// Two hops: general source -> pivot, then regional pivot -> target.
    GeneralThenRegional,
}

/// Decision table for translation backend selection, evaluated in order.
pub fn plan_translation(source: &str, target: &str) -> TranslationRoute {
    let source_base = normalize(source);
    let target_base = normalize(target);

    if source_base == target_base {
        return TranslationRoute::Skip;
    }

    let source_regional = is_regional(source);
    let target_regional = is_regional(target);

    // Regional <-> English pairs are native to the regional backend; the
    // two-hop composition must never be chosen for them.
    if (source_regional && target_base == PIVOT_LANGUAGE)
        || (target_regional && source_base == PIVOT_LANGUAGE)
    {
        return TranslationRoute::Regional;
    }

    if source_regional {
        return TranslationRoute::RegionalThenGeneral;
    }
    if target_regional {
        return TranslationRoute::GeneralThenRegional;
    }

    TranslationRoute::General
}

/// Which speech-to-text backend handles a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechBackend {
    General,
    Regional,
}

/// A regional declared source language routes to the regional speech backend;
/// everything else (including an undeclared source) uses the general one.
pub fn plan_transcription(declared_source: Option<&str>) -> SpeechBackend {
    match declared_source {
        Some(language) if is_regional(language) => SpeechBackend::Regional,
        _ => SpeechBackend::General,
    }
}
