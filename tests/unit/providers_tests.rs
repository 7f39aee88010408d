/*!
 * Tests for translator implementations
 */

use serde_json::json;
use std::sync::atomic::Ordering;
use yatt::app_config::{TranslationConfig, TranslationProvider};
use yatt::errors::TranslationError;
use yatt::language_utils::Language;
use yatt::providers::{Translator, create_translator};
use yatt::providers::google::GoogleTranslator;
use yatt::providers::mock::MockTranslator;

#[test]
fn test_googleRequestUrl_withCustomEndpoint_shouldKeepHostAndEncodeQuery() {
    let translator = GoogleTranslator::new("http://localhost:8080/translate", 5);

    let url = translator
        .request_url("a&b = c", Language::German, Language::Japanese)
        .unwrap();

    assert_eq!(url.host_str(), Some("localhost"));
    assert_eq!(url.port(), Some(8080));
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("sl".to_string(), "de".to_string())));
    assert!(pairs.contains(&("tl".to_string(), "ja".to_string())));
    assert!(pairs.contains(&("q".to_string(), "a&b = c".to_string())));
}

#[test]
fn test_googleExtractText_withMultipleSentences_shouldConcatenate() {
    let body = json!([
        [
            ["Hallo. ", "Hello. ", null, null, 10],
            ["Wie geht's?", "How are you?", null, null, 10]
        ],
        null,
        "en"
    ]);

    let text = GoogleTranslator::extract_text_from_response(&body).unwrap();

    assert_eq!(text, "Hallo. Wie geht's?");
}

#[test]
fn test_googleExtractText_withErrorObject_shouldFail() {
    let body = json!({"error": "bad request"});

    let result = GoogleTranslator::extract_text_from_response(&body);

    assert!(matches!(result, Err(TranslationError::ParseError(_))));
}

#[test]
fn test_createTranslator_shouldFollowConfiguredProvider() {
    let mut config = TranslationConfig::default();
    assert_eq!(create_translator(&config).name(), "google");

    config.provider = TranslationProvider::Mock;
    assert_eq!(create_translator(&config).name(), "mock");
}

#[tokio::test]
async fn test_mockFailing_shouldCountEveryRequest() {
    let mock = MockTranslator::failing();

    for _ in 0..3 {
        assert!(mock
            .translate("text", Language::Russian, Language::English)
            .await
            .is_err());
    }

    assert_eq!(mock.counter().load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_googleTranslate_withUnreachableEndpoint_shouldReturnRequestFailed() {
    // Port 9 (discard) is closed on test machines; the request fails fast
    let translator = GoogleTranslator::new("http://127.0.0.1:9/translate_a/single", 2);

    let result = translator
        .translate("hello", Language::English, Language::Russian)
        .await;

    assert!(matches!(result, Err(TranslationError::RequestFailed(_))));
}
