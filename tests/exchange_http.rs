//! HTTP exchange behavior against a mock endpoint.
//!
//! The wire contract is asymmetric on purpose: the request body is JSON,
//! the reply is the bare text body. These tests pin both halves.

use careline::exchange::{ExchangeClient, HttpExchangeClient};
use careline::session::Turn;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: client pointed at a mock server's `/gemini/` route.
fn test_client(mock_uri: &str) -> HttpExchangeClient {
    HttpExchangeClient::new(
        &format!("{mock_uri}/gemini/"),
        Duration::from_secs(5),
        Duration::from_secs(2),
    )
}

#[tokio::test]
async fn success_returns_raw_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Fees vary by session."))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client
        .exchange(&[], "What is the cost of therapy and do you accept insurance?")
        .await
        .unwrap();

    assert_eq!(reply, "Fees vary by session.");
}

#[tokio::test]
async fn reply_body_is_never_parsed_as_json() {
    let server = MockServer::start().await;
    // Even a JSON-looking body comes back verbatim as text.
    Mock::given(method("POST"))
        .and(path("/gemini/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"answer": 42}"#))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client.exchange(&[], "hello").await.unwrap();

    assert_eq!(reply, r#"{"answer": 42}"#);
}

#[tokio::test]
async fn request_carries_history_and_message() {
    let server = MockServer::start().await;
    let expected = serde_json::json!({
        "history": [
            { "role": "user", "parts": [{ "text": "Is therapy confidential?" }] },
            { "role": "model", "parts": [{ "text": "Yes, within legal limits." }] },
        ],
        "message": "What are the limits?",
    });
    Mock::given(method("POST"))
        .and(path("/gemini/"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_string("Mostly safety concerns."))
        .expect(1)
        .mount(&server)
        .await;

    let history = vec![
        Turn::user("Is therapy confidential?"),
        Turn::model("Yes, within legal limits."),
    ];
    let client = test_client(&server.uri());
    let reply = client
        .exchange(&history, "What are the limits?")
        .await
        .unwrap();

    assert_eq!(reply, "Mostly safety concerns.");
}

#[tokio::test]
async fn first_message_sends_empty_history() {
    let server = MockServer::start().await;
    let expected = serde_json::json!({
        "history": [],
        "message": "hello",
    });
    Mock::given(method("POST"))
        .and(path("/gemini/"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_string("hi"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client.exchange(&[], "hello").await.unwrap();
}

#[tokio::test]
async fn server_error_status_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("relay exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.exchange(&[], "hello").await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("500"), "expected status in error, got: {err}");
}

#[tokio::test]
async fn not_found_status_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.exchange(&[], "hello").await.is_err());
}

#[tokio::test]
async fn unreachable_endpoint_is_failure() {
    // Port 1 is never listening; the connect is refused immediately.
    let client = test_client("http://127.0.0.1:1");
    assert!(client.exchange(&[], "hello").await.is_err());
}
