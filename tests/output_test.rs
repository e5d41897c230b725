use polyscribe::domain::{ScribeResult, Segment, TranscriptionResult, TranslationResult};
use polyscribe::presentation::{format_json, format_text};

fn sample_result() -> ScribeResult {
    ScribeResult {
        transcription: TranscriptionResult {
            text: "hola mundo".to_string(),
            source_language: Some("es".to_string()),
            segments: Some(vec![
                Segment {
                    text: "hola".to_string(),
                    start: 0.0,
                    end: 1.5,
                    speaker: Some("1".to_string()),
                },
                Segment {
                    text: "mundo".to_string(),
                    start: 61.25,
                    end: 62.0,
                    speaker: None,
                },
            ]),
        },
        translation: Some(TranslationResult {
            text: "hello world".to_string(),
            source_language: "es".to_string(),
            target_language: "en".to_string(),
        }),
    }
}

#[test]
fn given_translation_present_when_formatting_text_then_translation_wins() {
    let result = sample_result();
    assert_eq!(format_text(&result, false), "hello world");
}

#[test]
fn given_no_translation_when_formatting_text_then_transcription_used() {
    let mut result = sample_result();
    result.translation = None;
    assert_eq!(format_text(&result, false), "hola mundo");
}

#[test]
fn given_timestamps_when_formatting_text_then_segment_lines_rendered() {
    let result = sample_result();
    let rendered = format_text(&result, true);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "[Speaker 1] [00:00.00 - 00:01.50] hola");
    assert_eq!(lines[1], "[01:01.25 - 01:02.00] mundo");
}

#[test]
fn given_full_result_when_formatting_json_then_structure_round_trips() {
    let result = sample_result();
    let value: serde_json::Value = serde_json::from_str(&format_json(&result)).unwrap();

    assert_eq!(value["transcription"]["text"], "hola mundo");
    assert_eq!(value["transcription"]["source_language"], "es");
    assert_eq!(value["segments"][0]["speaker"], "1");
    assert!(value["segments"][1].get("speaker").is_none());
    assert_eq!(value["translation"]["target_language"], "en");
}

#[test]
fn given_no_segments_when_formatting_json_then_segments_key_absent() {
    let mut result = sample_result();
    result.transcription.segments = None;
    result.translation = None;
    let value: serde_json::Value = serde_json::from_str(&format_json(&result)).unwrap();

    assert!(value.get("segments").is_none());
    assert!(value.get("translation").is_none());
}
