//! Export workflow tests against a wiremock account.

use std::fs;

use chrono::NaiveDate;
use harvestapi::export::{self, ExportOptions};
use harvestapi::{DateRange, HarvestClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn range_2016() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2016, 12, 31).unwrap(),
    )
}

fn read(dir: &std::path::Path, name: &str) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join(name)).unwrap()).unwrap()
}

/// An account with one client and two projects.
async fn healthy_account() -> MockServer {
    let server = MockServer::start().await;

    mount(&server, "/clients", json!([{"client": {"id": 1, "name": "Acme"}}])).await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("client", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"project": {"id": 10, "client_id": 1}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param_is_missing("client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"project": {"id": 10, "client_id": 1}},
            {"project": {"id": 11, "client_id": 1}}
        ])))
        .mount(&server)
        .await;
    mount(&server, "/contacts", json!([])).await;
    mount(&server, "/people", json!([{"user": {"id": 5, "email": "ada@acme.com"}}])).await;
    mount(&server, "/tasks", json!([{"task": {"id": 31, "name": "Design"}}])).await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"invoices": {"id": 61}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    for project in ["10", "11"] {
        Mock::given(method("GET"))
            .and(path(format!("/projects/{project}/expenses")))
            .and(query_param("from", "2016-01-01"))
            .and(query_param("to", "2016-12-31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"expense": {"id": project.parse::<u64>().unwrap() * 100}}
            ])))
            .mount(&server)
            .await;
        mount(
            &server,
            &format!("/projects/{project}/task_assignments"),
            json!([{"task_assignment": {"project_id": project.parse::<u64>().unwrap()}}]),
        )
        .await;
    }
    Mock::given(method("GET"))
        .and(path("/projects/10/entries"))
        .and(query_param("from", "2016-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"day_entry": {"id": 71, "hours": 2.5}}
        ])))
        .mount(&server)
        .await;
    // Not a list: skipped with a warning.
    mount(&server, "/projects/11/entries", json!({"message": "Project archived"})).await;

    server
}

#[tokio::test]
async fn test_export_writes_every_file() {
    let server = healthy_account().await;
    let dir = tempfile::tempdir().unwrap();
    let client = HarvestClient::with_basic(&server.uri(), "ada@acme.com", "pw").unwrap();

    let options = ExportOptions {
        dir: dir.path().to_path_buf(),
        range: range_2016(),
    };
    let report = export::export(&client, &options).await.unwrap();

    assert_eq!(report.errors(), 0);
    let names: Vec<String> = report
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "clients.json",
            "projects.json",
            "contacts.json",
            "people.json",
            "tasks.json",
            "invoices.json",
            "expenses_for_project.json",
            "tasks_for_project.json",
            "timesheets_for_project.json",
            "projects_for_client.json",
        ]
    );

    assert_eq!(read(dir.path(), "contacts.json"), json!([]));
    assert_eq!(read(dir.path(), "invoices.json"), json!([{"invoices": {"id": 61}}]));
    assert_eq!(
        read(dir.path(), "expenses_for_project.json"),
        json!([{"expense": {"id": 1000}}, {"expense": {"id": 1100}}])
    );
    assert_eq!(
        read(dir.path(), "timesheets_for_project.json"),
        json!([{"day_entry": {"hours": 2.5, "id": 71}}])
    );
    assert_eq!(
        read(dir.path(), "projects_for_client.json"),
        json!([{"project": {"client_id": 1, "id": 10}}])
    );
    assert_eq!(
        read(dir.path(), "tasks_for_project.json")
            .as_array()
            .map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn test_export_files_are_pretty_and_sorted() {
    let server = healthy_account().await;
    let dir = tempfile::tempdir().unwrap();
    let client = HarvestClient::with_basic(&server.uri(), "ada@acme.com", "pw").unwrap();

    let options = ExportOptions {
        dir: dir.path().to_path_buf(),
        range: range_2016(),
    };
    export::export(&client, &options).await.unwrap();

    let text = fs::read_to_string(dir.path().join("clients.json")).unwrap();
    assert_eq!(
        text,
        "[\n    {\n        \"client\": {\n            \"id\": 1,\n            \"name\": \"Acme\"\n        }\n    }\n]"
    );
}

#[tokio::test]
async fn test_export_stops_after_rejected_collections() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Authentication failed for API request."
        })))
        .mount(&server)
        .await;
    mount(&server, "/projects", json!([{"project": {"id": 10}}])).await;
    mount(&server, "/contacts", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Oops</h1>"))
        .mount(&server)
        .await;
    mount(&server, "/tasks", json!([])).await;
    mount(&server, "/invoices", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/projects/10/expenses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = HarvestClient::with_basic(&server.uri(), "ada@acme.com", "wrong").unwrap();
    let options = ExportOptions {
        dir: dir.path().to_path_buf(),
        range: range_2016(),
    };
    let report = export::export(&client, &options).await.unwrap();

    assert_eq!(report.errors(), 2);
    assert_eq!(report.failed, vec!["clients.json", "people.json"]);
    assert!(!dir.path().join("clients.json").exists());
    assert!(dir.path().join("projects.json").exists());
    assert!(!dir.path().join("expenses_for_project.json").exists());
}

#[tokio::test]
async fn test_export_creates_missing_directory() {
    let server = healthy_account().await;
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("nested").join("out");
    let client = HarvestClient::with_basic(&server.uri(), "ada@acme.com", "pw").unwrap();

    let options = ExportOptions {
        dir: dir.clone(),
        range: range_2016(),
    };
    export::export(&client, &options).await.unwrap();

    assert!(dir.join("projects_for_client.json").exists());
}
