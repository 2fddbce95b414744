use openai_sdk::{
    types::completion::CompletionRequest, Client, ClientConfig, CompletionProvider, PromptRequest,
    RetryPolicy, SdkError,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, max_retries: u32) -> Client {
    Client::from_config(
        ClientConfig::new("test-key".to_string())
            .unwrap()
            .with_base_url(server.uri())
            .with_max_retries(max_retries),
    )
    .unwrap()
}

fn completion_body(texts: &[&str]) -> serde_json::Value {
    let choices: Vec<_> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"text": t, "index": i, "finish_reason": "stop", "logprobs": null}))
        .collect();
    json!({
        "id": "cmpl-123",
        "object": "text_completion",
        "created": 1677652288,
        "model": "text-davinci-003",
        "choices": choices,
        "usage": {"prompt_tokens": 21, "completion_tokens": 2, "total_tokens": 23}
    })
}

fn classify_request() -> CompletionRequest {
    CompletionRequest::builder()
        .model("text-davinci-003")
        .prompt("Classify this message")
        .max_tokens(10)
        .build()
}

#[tokio::test]
async fn test_create_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({
            "model": "text-davinci-003",
            "prompt": "Classify this message",
            "max_tokens": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&["\n\nwork"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server, 0)
        .completions()
        .create(classify_request())
        .await
        .expect("Failed to create completion");

    assert_eq!(response.id, "cmpl-123");
    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.choices[0].text, "\n\nwork");
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.as_ref().unwrap().total_tokens, 23);
}

#[tokio::test]
async fn test_provider_maps_first_choice_and_usage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body(&[" urgent", " social"])),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, 0);
    let result = client
        .complete(
            PromptRequest::builder()
                .model("text-davinci-003")
                .prompt("Classify")
                .max_tokens(10)
                .build(),
        )
        .await
        .expect("provider call should succeed");

    assert_eq!(result.first_text().unwrap(), " urgent");
    assert_eq!(result.usage.unwrap().output_tokens, 2);
}

#[tokio::test]
async fn test_empty_choices_is_no_completion_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&[])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, 0);
    let result = client
        .complete(
            PromptRequest::builder()
                .model("text-davinci-003")
                .prompt("Classify")
                .max_tokens(10)
                .build(),
        )
        .await
        .expect("an empty choice list is still a valid response");

    assert!(matches!(
        result.first_text(),
        Err(SdkError::NoCompletionError { .. })
    ));
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, 3)
        .completions()
        .create(classify_request())
        .await
        .unwrap_err();

    match err {
        SdkError::AuthenticationError { status, message } => {
            assert_eq!(status, Some(401));
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected AuthenticationError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_without_retries_sends_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, 0)
        .completions()
        .create(classify_request())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::RateLimited(ref body) if body == "quota exceeded"));
}

#[tokio::test]
async fn test_retry_on_429_when_enabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&["work"])))
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server, 2)
        .completions()
        .create(classify_request())
        .await
        .expect("Should succeed after retry");
    assert_eq!(response.choices[0].text, "work");
}

#[tokio::test]
async fn test_error_response_400() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad request: invalid model"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, 0)
        .completions()
        .create(classify_request())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::ApiError(_)));
    let msg = err.to_string();
    assert!(msg.contains("400"), "Error should contain status code 400");
    assert!(msg.contains("invalid model"));
}

#[tokio::test]
async fn test_retry_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = Client::from_config(
        ClientConfig::new("test-key".to_string())
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_retry_policy(
                RetryPolicy::default()
                    .with_max_retries(1)
                    .with_base_delay(Duration::from_millis(1))
                    .with_jitter(Duration::ZERO),
            ),
    )
    .unwrap();

    let err = client
        .completions()
        .create(classify_request())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"), "Error should contain status code 500");
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server, 0)
        .completions()
        .create(classify_request())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::SerializationError(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Nothing listens on port 1.
    let client = Client::from_config(
        ClientConfig::new("test-key".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client
        .completions()
        .create(classify_request())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::TransportError(_)), "got {err:?}");
}

#[test]
fn test_debug_redacts_api_key() {
    let config = ClientConfig::new("sk-super-secret-key-12345".to_string()).unwrap();
    let debug_output = format!("{:?}", config);
    assert!(
        !debug_output.contains("sk-super-secret-key-12345"),
        "Debug output should not contain the raw API key"
    );
    assert!(
        debug_output.contains("[REDACTED]"),
        "Debug output should show [REDACTED]"
    );
}

#[test]
fn test_empty_api_key_is_authentication_error() {
    let err = ClientConfig::new("   ".to_string()).unwrap_err();
    assert!(matches!(
        err,
        SdkError::AuthenticationError { status: None, .. }
    ));
}

#[test]
fn test_non_header_api_key_is_authentication_error() {
    let err = ClientConfig::new("bad\nkey".to_string()).unwrap_err();
    assert!(matches!(
        err,
        SdkError::AuthenticationError { status: None, .. }
    ));
    assert!(!err.to_string().contains("bad\nkey"));
}
