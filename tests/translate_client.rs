//! Wire-format tests for the translate TTS client against a mock server.

use talktape::infrastructure::synthesis::{SpeechSynthesizer, SynthesisError, VoiceSpec};
use talktape::{AccentVariant, LanguageCode, TranslateTtsClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn voice(language: LanguageCode, slow: bool) -> VoiceSpec {
    VoiceSpec {
        language,
        accent: AccentVariant::UnitedStates,
        slow,
    }
}

#[tokio::test]
async fn it_should_send_the_expected_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("client", "tw-ob"))
        .and(query_param("tl", "fa"))
        .and(query_param("ttsspeed", "1"))
        .and(query_param("q", "سلام دنیا"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let client = TranslateTtsClient::with_base_url(server.uri());
    let audio = client
        .synthesize("سلام دنیا", &voice(LanguageCode::Persian, false))
        .await
        .unwrap();

    assert_eq!(audio, vec![1, 2, 3]);
}

#[tokio::test]
async fn it_should_ask_for_slow_speech() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "ru"))
        .and(query_param("ttsspeed", "0.24"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8]))
        .expect(1)
        .mount(&server)
        .await;

    let client = TranslateTtsClient::with_base_url(server.uri());
    client
        .synthesize("Привет", &voice(LanguageCode::Russian, true))
        .await
        .unwrap();
}

#[tokio::test]
async fn it_should_surface_error_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = TranslateTtsClient::with_base_url(server.uri());
    let result = client
        .synthesize("hello", &voice(LanguageCode::English, false))
        .await;

    match result {
        Err(SynthesisError::Service { status, .. }) => assert_eq!(status, 429),
        other => panic!("expected a service error, got {other:?}"),
    }
}

#[tokio::test]
async fn it_should_surface_transport_failures() {
    // Nothing is listening here.
    let client = TranslateTtsClient::with_base_url("http://127.0.0.1:9");
    let result = client
        .synthesize("hello", &voice(LanguageCode::English, false))
        .await;

    assert!(matches!(result, Err(SynthesisError::Request(_))));
}
