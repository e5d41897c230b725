use std::path::PathBuf;

use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use polyscribe::application::ports::{Transcriber, TranscriptionError};
use polyscribe::infrastructure::transcription::WhisperEngine;

async fn start_mock_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
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
async fn given_plain_response_when_transcribing_then_text_only_result() {
    let (base_url, shutdown_tx) =
        start_mock_server(200, r#"{"text": "hello world"}"#).await;
    let audio = write_fake_audio("polyscribe_whisper_plain.mp3");

    let engine = WhisperEngine::new(&base_url, "test-key".to_string(), "whisper-large-v3-turbo");
    let result = engine.transcribe(&audio, None, false).await.unwrap();

    assert_eq!(result.text, "hello world");
    assert!(result.source_language.is_none());
    assert!(result.segments.is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_verbose_response_when_transcribing_with_timestamps_then_segments_parsed() {
    let body = r#"{
        "text": "hola mundo",
        "language": "es",
        "segments": [
            {"text": "hola", "start": 0.0, "end": 0.8},
            {"text": "mundo", "start": 0.8, "end": 1.5}
        ]
    }"#;
    let (base_url, shutdown_tx) = start_mock_server(200, body).await;
    let audio = write_fake_audio("polyscribe_whisper_verbose.mp3");

    let engine = WhisperEngine::new(&base_url, "test-key".to_string(), "whisper-large-v3-turbo");
    let result = engine.transcribe(&audio, Some("es"), true).await.unwrap();

    assert_eq!(result.text, "hola mundo");
    assert_eq!(result.source_language.as_deref(), Some("es"));
    let segments = result.segments.unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "hola");
    assert_eq!(segments[1].start, 0.8);
    assert_eq!(segments[1].end, 1.5);
    assert!(segments[0].speaker.is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_client_error_status_when_transcribing_then_api_error_not_retried() {
    let (base_url, shutdown_tx) =
        start_mock_server(400, r#"{"error": {"message": "bad audio"}}"#).await;
    let audio = write_fake_audio("polyscribe_whisper_error.mp3");

    let engine = WhisperEngine::new(&base_url, "test-key".to_string(), "whisper-large-v3-turbo");
    let result = engine.transcribe(&audio, None, false).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_audio_file_when_transcribing_then_file_error() {
    let (base_url, shutdown_tx) = start_mock_server(200, r#"{"text": "unused"}"#).await;

    let engine = WhisperEngine::new(&base_url, "test-key".to_string(), "whisper-large-v3-turbo");
    let result = engine
        .transcribe(std::path::Path::new("/nonexistent/audio.mp3"), None, false)
        .await;

    assert!(matches!(result, Err(TranscriptionError::AudioFile(_))));
    shutdown_tx.send(()).ok();
}
