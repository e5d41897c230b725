use std::path::PathBuf;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use polyscribe::application::ports::{Transcriber, TranscriptionError};
use polyscribe::infrastructure::transcription::SarvamSpeechEngine;

async fn start_mock_server(
    status_body: &'static str,
    output_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route(
            "/speech-to-text-job",
            post(|| async { r#"{"job_id": "job-1"}"# }),
        )
        .route(
            "/speech-to-text-job/job-1/status",
            get(move || async move { status_body }),
        )
        .route(
            "/speech-to-text-job/job-1/output",
            get(move || async move { output_body }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn write_fake_audio(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, b"fake audio bytes").unwrap();
    path
}

#[tokio::test]
async fn given_english_target_when_transcribing_then_translate_mode_tags_english() {
    let output = r#"{
        "transcript": "hello from the batch job",
        "language_code": "hi-IN",
        "diarized_transcript": {
            "entries": [
                {
                    "transcript": "hello from the batch job",
                    "start_time_seconds": 0.0,
                    "end_time_seconds": 2.4,
                    "speaker_id": "1"
                }
            ]
        }
    }"#;
    let (base_url, shutdown_tx) =
        start_mock_server(r#"{"status": "Completed"}"#, output).await;
    let audio = write_fake_audio("polyscribe_sarvam_translate.mp3");

    let engine = SarvamSpeechEngine::new(
        &base_url,
        "test-key".to_string(),
        "saarika:v2.5",
        "en",
        Duration::from_secs(60),
    );
    let result = engine.transcribe(&audio, Some("hi"), true).await.unwrap();

    assert_eq!(result.text, "hello from the batch job");
    // Translate mode output is already English; the tag makes the pipeline
    // skip its own translation step.
    assert_eq!(result.source_language.as_deref(), Some("en"));
    let segments = result.segments.unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].speaker.as_deref(), Some("1"));
    assert_eq!(segments[0].end, 2.4);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_english_target_when_transcribing_then_reported_language_kept() {
    let output = r#"{"transcript": "some hindi text", "language_code": "hi-IN"}"#;
    let (base_url, shutdown_tx) =
        start_mock_server(r#"{"status": "Completed"}"#, output).await;
    let audio = write_fake_audio("polyscribe_sarvam_transcribe.mp3");

    let engine = SarvamSpeechEngine::new(
        &base_url,
        "test-key".to_string(),
        "saarika:v2.5",
        "hi",
        Duration::from_secs(60),
    );
    let result = engine.transcribe(&audio, Some("hi"), false).await.unwrap();

    assert_eq!(result.source_language.as_deref(), Some("hi-IN"));
    assert!(result.segments.is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_failed_job_when_transcribing_then_job_failed_error() {
    let (base_url, shutdown_tx) = start_mock_server(
        r#"{"status": "Failed", "error_message": "corrupt audio"}"#,
        r#"{"transcript": "unused"}"#,
    )
    .await;
    let audio = write_fake_audio("polyscribe_sarvam_failed.mp3");

    let engine = SarvamSpeechEngine::new(
        &base_url,
        "test-key".to_string(),
        "saarika:v2.5",
        "en",
        Duration::from_secs(60),
    );
    let result = engine.transcribe(&audio, Some("hi"), false).await;

    assert!(
        matches!(result, Err(TranscriptionError::JobFailed(ref msg)) if msg == "corrupt audio")
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_job_never_completing_when_timeout_elapses_then_terminal_timeout_error() {
    let (base_url, shutdown_tx) = start_mock_server(
        r#"{"status": "Processing"}"#,
        r#"{"transcript": "unused"}"#,
    )
    .await;
    let audio = write_fake_audio("polyscribe_sarvam_timeout.mp3");

    let engine = SarvamSpeechEngine::new(
        &base_url,
        "test-key".to_string(),
        "saarika:v2.5",
        "en",
        Duration::ZERO,
    );
    let result = engine.transcribe(&audio, Some("hi"), false).await;

    assert!(matches!(result, Err(TranscriptionError::JobTimeout(0))));
    shutdown_tx.send(()).ok();
}
