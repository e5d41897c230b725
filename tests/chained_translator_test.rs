use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use polyscribe::application::ports::{TranslationError, Translator};
use polyscribe::application::services::ChainedTranslator;

type CallLog = Arc<Mutex<Vec<(String, String, String, String)>>>;

struct RecordingTranslator {
    label: String,
    output: String,
    log: CallLog,
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        self.log.lock().unwrap().push((
            self.label.clone(),
            text.to_string(),
            source_language.to_string(),
            target_language.to_string(),
        ));
        Ok(self.output.clone())
    }
}

struct FailingTranslator {
    call_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source_language: &str,
        _target_language: &str,
    ) -> Result<String, TranslationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Err(TranslationError::ApiRequestFailed("first hop down".to_string()))
    }
}

struct CountingTranslator {
    call_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Translator for CountingTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source_language: &str,
        _target_language: &str,
    ) -> Result<String, TranslationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok("second hop output".to_string())
    }
}

#[tokio::test]
async fn given_two_hops_when_translating_then_pivot_bridges_in_order() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::new(RecordingTranslator {
        label: "first".to_string(),
        output: "english text".to_string(),
        log: Arc::clone(&log),
    });
    let second = Arc::new(RecordingTranslator {
        label: "second".to_string(),
        output: "texte final".to_string(),
        log: Arc::clone(&log),
    });

    let chained = ChainedTranslator::new(first, second, "en");
    let result = chained.translate("text", "hi", "fr").await.unwrap();

    assert_eq!(result, "texte final");
    let calls = log.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        (
            "first".to_string(),
            "text".to_string(),
            "hi".to_string(),
            "en".to_string()
        )
    );
    assert_eq!(
        calls[1],
        (
            "second".to_string(),
            "english text".to_string(),
            "en".to_string(),
            "fr".to_string()
        )
    );
}

#[tokio::test]
async fn given_first_hop_failure_when_translating_then_second_never_runs() {
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));
    let chained = ChainedTranslator::new(
        Arc::new(FailingTranslator {
            call_count: Arc::clone(&first_calls),
        }),
        Arc::new(CountingTranslator {
            call_count: Arc::clone(&second_calls),
        }),
        "en",
    );

    let err = chained.translate("text", "hi", "fr").await.unwrap_err();

    assert!(matches!(err, TranslationError::ApiRequestFailed(_)));
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}
