//! Service status lookups.

use harvestapi::fetch_status;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_status_member_is_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": {"name": "Harvest"},
            "status": {"indicator": "none", "description": "All Systems Operational"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = fetch_status(&format!("{}/api/v2/status.json", mock_server.uri())).await;

    assert_eq!(status["description"], "All Systems Operational");
}

#[tokio::test]
async fn test_missing_status_member_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": {}})))
        .mount(&mock_server)
        .await;

    let status = fetch_status(&format!("{}/status.json", mock_server.uri())).await;
    assert_eq!(status, json!({}));
}

#[tokio::test]
async fn test_non_json_status_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let status = fetch_status(&format!("{}/status.json", mock_server.uri())).await;
    assert_eq!(status, json!({}));
}

#[tokio::test]
async fn test_unreachable_status_is_empty() {
    let status = fetch_status("http://127.0.0.1:1/status.json").await;
    assert_eq!(status, json!({}));
}
