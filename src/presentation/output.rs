use serde_json::json;

use crate::domain::{ScribeResult, Segment};

/// Plain-text rendering: the translation when present, otherwise the
/// transcription. With timestamps, one line per segment instead.
pub fn format_text(result: &ScribeResult, timestamps: bool) -> String {
    if timestamps {
        if let Some(segments) = &result.transcription.segments {
            return segments
                .iter()
                .map(format_segment_line)
                .collect::<Vec<_>>()
                .join("\n");
        }
    }

    match &result.translation {
        Some(translation) => translation.text.clone(),
        None => result.transcription.text.clone(),
    }
}

fn format_segment_line(segment: &Segment) -> String {
    let prefix = match &segment.speaker {
        Some(speaker) => format!("[Speaker {}] ", speaker),
        None => String::new(),
    };
    format!(
        "{}[{} - {}] {}",
        prefix,
        format_offset(segment.start),
        format_offset(segment.end),
        segment.text
    )
}

fn format_offset(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let rest = seconds - (minutes as f64) * 60.0;
    format!("{:02}:{:05.2}", minutes, rest)
}

/// Structured rendering of the whole result as pretty-printed JSON.
pub fn format_json(result: &ScribeResult) -> String {
    let mut data = json!({
        "transcription": {
            "text": result.transcription.text,
            "source_language": result.transcription.source_language,
        },
    });

    if let Some(segments) = &result.transcription.segments {
        let rendered: Vec<_> = segments
            .iter()
            .map(|s| {
                let mut entry = json!({
                    "text": s.text,
                    "start": s.start,
                    "end": s.end,
                });
                if let Some(speaker) = &s.speaker {
                    entry["speaker"] = json!(speaker);
                }
                entry
            })
            .collect();
        data["segments"] = json!(rendered);
    }

    if let Some(translation) = &result.translation {
        data["translation"] = json!({
            "text": translation.text,
            "source_language": translation.source_language,
            "target_language": translation.target_language,
        });
    }

    serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
}
