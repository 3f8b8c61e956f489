//! Completion client integration tests using wiremock

use serde_json::json;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck::completion::{CompletionClient, GeminiClient, Turn};
use taskdeck::config::CompletionConfig;

fn completion_config(api_base: String) -> CompletionConfig {
    CompletionConfig {
        api_base,
        model: "gemini-2.0-flash-lite".to_string(),
        api_key: "gem-key".to_string(),
    }
}

fn reply_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            }
        }]
    })
}

/// The request carries history turns, the new message, and generation config
#[tokio::test]
async fn test_send_message_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-lite:generateContent"))
        .and(header("x-goog-api-key", "gem-key"))
        .and(body_partial_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Remind me about the dentist"}]},
                {"role": "model", "parts": [{"text": "When is it?"}]},
                {"role": "user", "parts": [{"text": "Tomorrow at 2pm"}]}
            ],
            "generationConfig": {
                "temperature": 1.0,
                "topP": 0.95,
                "topK": 40,
                "maxOutputTokens": 8192,
                "responseMimeType": "application/json"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Got it")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(completion_config(server.uri())).unwrap();
    let history = vec![
        Turn::user("Remind me about the dentist"),
        Turn::model("When is it?"),
    ];

    let reply = client
        .send_message(&history, "Tomorrow at 2pm")
        .await
        .unwrap();
    assert_eq!(reply, "Got it");
}

/// The reply text is extracted verbatim from the first candidate
#[tokio::test]
async fn test_send_message_extracts_text() {
    let server = MockServer::start().await;

    let task_json = r#"{"title":"Dentist","dueDate":"2025-03-16","dueTime":"14:00"}"#;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-lite:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(task_json)))
        .mount(&server)
        .await;

    let client = GeminiClient::new(completion_config(server.uri())).unwrap();
    let reply = client.send_message(&[], "dentist tomorrow 2pm").await.unwrap();
    assert_eq!(reply, task_json);
}

/// A response without candidates is an error, not an empty reply
#[tokio::test]
async fn test_send_message_no_candidates_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-lite:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = GeminiClient::new(completion_config(server.uri())).unwrap();
    let err = client.send_message(&[], "hello").await.unwrap_err();
    assert!(err.to_string().to_lowercase().contains("completion"));
}

/// HTTP errors surface the status code
#[tokio::test]
async fn test_send_message_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-lite:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(completion_config(server.uri())).unwrap();
    let err = client.send_message(&[], "hello").await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("429"), "unexpected error: {}", message);
}
