//! REST key check against a mock `generateContent` endpoint.

use live_probe::{ApiStatus, Credential, KeyChecker};
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "AIzaSyRestTestKey00000";

fn checker(server: &MockServer) -> KeyChecker {
    let base_url = Url::parse(&format!("{}/v1beta/", server.uri())).unwrap();
    KeyChecker::with_base_url(&Credential::new(KEY, "GOOGLE_API_KEY"), base_url)
        .unwrap()
        .with_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_model_with_candidates_is_available() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", KEY))
        .and(body_partial_json(json!({ "contents": [{ "parts": [{ "text": "Test" }] }] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hi" }], "role": "model" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let availability = checker(&server).check_model("models/gemini-2.0-flash").await.unwrap();

    assert!(availability.available);
    assert_eq!(availability.model, "models/gemini-2.0-flash");
    assert_eq!(availability.status, None);
    assert_eq!(availability.detail, None);
}

#[tokio::test]
async fn test_invalid_key_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                    "reason": "API_KEY_INVALID"
                }]
            }
        })))
        .mount(&server)
        .await;

    let availability = checker(&server).check_model("gemini-2.0-flash").await.unwrap();

    assert!(!availability.available);
    assert_eq!(availability.status, Some(ApiStatus::ApiKeyInvalid));
    assert_eq!(
        availability.detail.as_deref(),
        Some("API key not valid. Please pass a valid API key.")
    );
}

#[tokio::test]
async fn test_empty_candidates_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let availability = checker(&server).check_model("gemini-2.0-flash").await.unwrap();

    assert!(!availability.available);
    assert_eq!(availability.status, None);
    assert!(availability.detail.is_some());
}

#[tokio::test]
async fn test_check_models_reports_each_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [{}] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro-vision:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-restricted:generateContent"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "denied", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let results = checker(&server)
        .check_models(&["gemini-2.0-flash", "gemini-pro-vision", "gemini-restricted"])
        .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].available);
    assert!(!results[1].available);
    assert_eq!(results[1].status, Some(ApiStatus::NotFound));
    assert_eq!(results[1].detail.as_deref(), Some("HTTP 404"));
    assert!(!results[2].available);
    assert_eq!(results[2].status, Some(ApiStatus::PermissionDenied));
}
