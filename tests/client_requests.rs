//! Request plumbing tests: authentication, decoding and transport errors.
//!
//! Uses wiremock to stand in for the Harvest API.

use harvestapi::{
    Auth, Clients, Delete, Get, HarvestClient, HarvestError, HarvestResponse, List, OAuth2Token,
};
use wiremock::matchers::{basic_auth, bearer_token, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_basic_auth_header_is_precomputed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients/1"))
        .and(header(
            "authorization",
            "Basic dXNlckBleGFtcGxlLmNvbTpwYXNz",
        ))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "client": {"id": 1, "name": "Acme"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarvestClient::with_basic(&mock_server.uri(), " user@example.com ", "pass").unwrap();
    let response = Clients::get(&client, 1).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.json().unwrap()["client"]["name"], "Acme");
}

#[tokio::test]
async fn test_basic_auth_per_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .and(basic_auth("user@example.com", "pass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Auth::basic("user@example.com", "pass").per_request();
    let client = HarvestClient::new(&mock_server.uri(), auth).unwrap();
    let response = Clients::list(&client, &Default::default()).await.unwrap();

    assert!(response.is_empty());
}

#[tokio::test]
async fn test_oauth2_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .and(bearer_token("access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"client": {"id": 1}}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarvestClient::with_oauth2(
        &mock_server.uri(),
        "client-id",
        OAuth2Token::bearer("access-123"),
    )
    .unwrap();
    let response = Clients::list(&client, &Default::default()).await.unwrap();

    assert_eq!(response.items().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_error_status_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients/9"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Authentication failed for API request."
        })))
        .mount(&mock_server)
        .await;

    let client = HarvestClient::with_basic(&mock_server.uri(), "a@b.c", "wrong").unwrap();
    let response = Clients::get(&client, 9).await.unwrap();

    assert_eq!(response.status(), 401);
    assert!(response.is_auth_failure());
}

#[tokio::test]
async fn test_non_json_body_falls_back_to_raw() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients/2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = HarvestClient::with_basic(&mock_server.uri(), "a@b.c", "pw").unwrap();
    let response = Clients::get(&client, 2).await.unwrap();

    match response {
        HarvestResponse::Raw { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "<html>Bad Gateway</html>");
        }
        other => panic!("Expected raw response, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_is_never_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clients/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarvestClient::with_basic(&mock_server.uri(), "a@b.c", "pw").unwrap();
    let response = Clients::delete(&client, 3).await.unwrap();

    assert!(response.json().is_none());
    assert!(response.is_success());
    assert!(matches!(response, HarvestResponse::Raw { ref body, .. } if body.contains("ok")));
}

#[tokio::test]
async fn test_account_path_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/clients/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"client": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = format!("{}/acme/", mock_server.uri());
    let client = HarvestClient::with_basic(&uri, "a@b.c", "pw").unwrap();
    assert!(client.uri().ends_with("/acme"));

    let response = Clients::get(&client, 4).await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_transport_error() {
    // Nothing listens on port 1.
    let client = HarvestClient::with_basic("http://127.0.0.1:1", "a@b.c", "pw").unwrap();
    let result = Clients::get(&client, 1).await;

    assert!(matches!(result, Err(HarvestError::Transport(_))));
}

#[test]
fn test_invalid_uri() {
    let result = HarvestClient::with_basic("not a uri", "a@b.c", "pw");
    assert!(matches!(result, Err(HarvestError::InvalidUri(_))));

    let result = HarvestClient::with_basic("mailto:me@acme.com", "a@b.c", "pw");
    assert!(matches!(result, Err(HarvestError::InvalidUri(_))));
}
