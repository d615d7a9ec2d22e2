//! E2E tests using the mock Harvest server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use chrono::{Datelike, NaiveDate};
use harvestapi::export::{self, convert_dir, Conversion, ExportOptions};
use harvestapi::mock_server::{Collection, Fixtures, MockCredentials, MockServer, MockState};
use harvestapi::{
    who_am_i, Auth, Clients, Contacts, Create, DateRange, Delete, ExpenseCategories, Get,
    HarvestClient, HarvestResponse, List, OAuth2Token, People, Projects, TaskAssignments, Tasks,
    TimeEntries, Toggle, Update, UserAssignments,
};
use serde_json::{json, Map, Value};

fn connect(server: &MockServer) -> HarvestClient {
    HarvestClient::with_basic(server.url(), "ada@acme.com", "secret").unwrap()
}

fn range_2016() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2016, 12, 31).unwrap(),
    )
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Record Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_who_am_i() {
    let server = MockServer::start().await;
    let client = connect(&server);

    let account = who_am_i(&client).await.unwrap();
    assert_eq!(account.json().unwrap()["company"]["name"], "Acme Consulting");

    server.shutdown().await;
}

#[tokio::test]
async fn test_client_lifecycle() {
    let server = MockServer::start_empty().await;
    let client = connect(&server);

    // Step 1: Create answers 201 with an empty body
    let created = Clients::create(&client, &json!({"client": {"name": "Initech", "active": true}}))
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    assert!(matches!(created, HarvestResponse::Raw { ref body, .. } if body.is_empty()));

    // Step 2: The new client shows up in the listing
    let listing = Clients::list(&client, &Default::default()).await.unwrap();
    let records = listing.items().unwrap();
    assert_eq!(records.len(), 1);
    let id = records[0]["client"]["id"].as_u64().unwrap();

    // Step 3: Update and toggle
    let updated = Clients::update(&client, id, &json!({"client": {"name": "Initrode"}}))
        .await
        .unwrap();
    assert_eq!(updated.json().unwrap()["client"]["name"], "Initrode");

    let toggled = Clients::toggle(&client, id).await.unwrap();
    assert_eq!(toggled.json().unwrap()["client"]["active"], false);

    // Step 4: Delete, after which the client is gone
    let deleted = Clients::delete(&client, id).await.unwrap();
    assert!(deleted.is_success());
    assert_eq!(Clients::get(&client, id).await.unwrap().status(), 404);

    server.shutdown().await;
}

#[tokio::test]
async fn test_projects_of_a_client() {
    let server = MockServer::start().await;
    let client = connect(&server);

    let projects = Projects::for_client(&client, 1).await.unwrap();
    let names: Vec<&str> = projects
        .items()
        .unwrap()
        .iter()
        .filter_map(|p| p["project"]["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Website", "Mobile App"]);

    let contacts = Contacts::for_client(&client, 2, &Default::default())
        .await
        .unwrap();
    assert_eq!(contacts.items().map(Vec::len), Some(1));

    server.shutdown().await;
}

#[tokio::test]
async fn test_project_timesheets_respect_range() {
    let server = MockServer::start().await;
    let client = connect(&server);

    let entries = Projects::timesheets(&client, 10, range_2016()).await.unwrap();
    assert_eq!(entries.items().map(Vec::len), Some(2));

    let later = DateRange::year(2017).unwrap();
    let none = Projects::timesheets(&client, 10, later).await.unwrap();
    assert!(none.is_empty());

    let expenses = Projects::expenses(&client, 10, range_2016()).await.unwrap();
    assert_eq!(expenses.items().unwrap()[0]["expense"]["total_cost"], 42.5);

    server.shutdown().await;
}

#[tokio::test]
async fn test_task_assignment_workflow() {
    let server = MockServer::start().await;
    let client = connect(&server);

    // Assign an existing task to a project without tasks
    let assigned = TaskAssignments::assign(&client, 11, &json!({"task": {"id": 31}}))
        .await
        .unwrap();
    assert_eq!(assigned.status(), 201);

    // Create a new task and assign it in one go
    let created = TaskAssignments::create_with_new_task(
        &client,
        11,
        &json!({"task": {"name": "Review", "billable_by_default": false}}),
    )
    .await
    .unwrap();
    assert_eq!(created.status(), 201);

    let listing = TaskAssignments::list(&client, 11).await.unwrap();
    let assignments = listing.items().unwrap().clone();
    assert_eq!(assignments.len(), 2);

    // Change the first assignment
    let first = assignments[0]["task_assignment"]["id"].as_u64().unwrap();
    let changed = TaskAssignments::change(
        &client,
        11,
        first,
        json!({"hourly_rate": 150.0}),
        Map::new(),
    )
    .await
    .unwrap();
    assert_eq!(changed.json().unwrap()["task_assignment"]["hourly_rate"], 150.0);

    // Remove it again
    TaskAssignments::remove(&client, 11, first).await.unwrap();
    let remaining = TaskAssignments::list(&client, 11).await.unwrap();
    assert_eq!(remaining.items().map(Vec::len), Some(1));
    assert_eq!(
        TaskAssignments::get(&client, 11, first).await.unwrap().status(),
        404
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_user_assignment() {
    let server = MockServer::start().await;
    let client = connect(&server);

    let response = UserAssignments::assign(&client, 10, 508344).await.unwrap();
    assert_eq!(response.status(), 201);

    let unknown = UserAssignments::assign(&client, 10, 1).await.unwrap();
    assert_eq!(unknown.status(), 404);

    server.shutdown().await;
}

#[tokio::test]
async fn test_people_expense_categories_and_tasks() {
    let server = MockServer::start().await;
    let client = connect(&server);

    let person = People::toggle(&client, 508344).await.unwrap();
    assert_eq!(person.json().unwrap()["user"]["is_active"], false);

    let created = ExpenseCategories::create(&client, 53, &json!({"expense_category": {"name": "Hotels"}}))
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let hotels = ExpenseCategories::get(&client, 53).await.unwrap();
    assert_eq!(hotels.json().unwrap()["expense_category"]["name"], "Hotels");

    let archived = ExpenseCategories::toggle(&client, 53).await.unwrap();
    assert_eq!(archived.json().unwrap()["expense_category"]["deactivated"], true);

    Tasks::activate(&client, 31).await.unwrap();
    let task = Tasks::get(&client, 31).await.unwrap();
    assert_eq!(task.json().unwrap()["task"]["deactivated"], false);

    let contact = Contacts::create(&client, 23, "Bugs", "Bunny", Map::new())
        .await
        .unwrap();
    assert_eq!(contact.status(), 201);
    let bugs = Contacts::get(&client, 23).await.unwrap();
    assert_eq!(bugs.json().unwrap()["contact"]["first-name"], "Bugs");

    server.shutdown().await;
}

#[tokio::test]
async fn test_time_entry_workflow() {
    let server = MockServer::start().await;
    let client = connect(&server);

    // Entries of March 1st 2016 (day 61 of a leap year)
    let day = TimeEntries::day(&client, 61, 2016).await.unwrap();
    let body = day.json().unwrap();
    assert_eq!(body["for_day"], "2016-03-01");
    assert_eq!(body["day_entries"].as_array().map(Vec::len), Some(1));

    // Log a new entry for today
    let created = TimeEntries::create(
        &client,
        &json!({"project_id": 10, "task_id": 31, "hours": 1.0, "notes": "Standup"}),
    )
    .await
    .unwrap();
    assert_eq!(created.status(), 201);
    let id = created.json().unwrap()["id"].as_u64().unwrap();

    let today = TimeEntries::today(&client).await.unwrap();
    let today_body = today.json().unwrap();
    assert_eq!(
        today_body["for_day"],
        chrono::Utc::now().date_naive().to_string()
    );
    assert!(today_body["day_entries"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["id"] == id));

    // Start the timer, edit, delete
    let timer = TimeEntries::toggle(&client, id).await.unwrap();
    assert_eq!(timer.json().unwrap()["day_entry"]["timer_started"], true);

    let updated = TimeEntries::update(&client, id, &json!({"hours": 2.0}))
        .await
        .unwrap();
    assert_eq!(updated.json().unwrap()["day_entry"]["hours"], 2.0);

    TimeEntries::delete(&client, id).await.unwrap();
    assert_eq!(TimeEntries::get(&client, id).await.unwrap().status(), 404);

    // Entries logged on behalf of someone else
    let theirs = TimeEntries::create_for_user(&client, 508344, &json!({"project_id": 10, "hours": 0.5}))
        .await
        .unwrap();
    assert_eq!(theirs.json().unwrap()["user_id"], 508344);

    server.shutdown().await;
}

#[tokio::test]
async fn test_invoices_across_small_pages() {
    let server = MockServer::with_state(Fixtures::default_scenario().with_invoice_page_size(1)).await;
    let client = connect(&server);

    let invoices = harvestapi::Invoices::list(&client, &Default::default())
        .await
        .unwrap();
    assert_eq!(invoices.items().map(Vec::len), Some(3));

    server.shutdown().await;
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_oauth2_token_is_accepted() {
    let state = Fixtures::default_scenario().with_credentials(MockCredentials::Bearer("tok".into()));
    let server = MockServer::with_state(state).await;

    let good = HarvestClient::with_oauth2(server.url(), "id", OAuth2Token::bearer("tok")).unwrap();
    assert!(People::list(&good, &()).await.unwrap().is_success());

    let basic = HarvestClient::new(server.url(), Auth::basic("ada@acme.com", "secret")).unwrap();
    let rejected = People::list(&basic, &()).await.unwrap();
    assert!(rejected.is_auth_failure());

    server.shutdown().await;
}

// =============================================================================
// Export Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_export_then_convert() {
    let server = MockServer::start().await;
    let client = connect(&server);
    let dir = tempfile::tempdir().unwrap();

    let options = ExportOptions {
        dir: dir.path().to_path_buf(),
        range: range_2016(),
    };
    let report = export::export(&client, &options).await.unwrap();
    assert_eq!(report.errors(), 0);
    assert_eq!(report.written.len(), 10);

    let conversions = convert_dir(dir.path()).unwrap();
    assert_eq!(conversions.len(), 10);

    let projects_csv = std::fs::read_to_string(dir.path().join("projects.csv")).unwrap();
    let mut lines = projects_csv.split("\r\n");
    let header = lines.next().unwrap();
    assert!(header.starts_with("\"active\",\"bill_by\",\"billable\""));
    assert_eq!(lines.filter(|l| !l.is_empty()).count(), 3);

    let timesheets = conversions
        .iter()
        .find(|(p, _)| p.ends_with("timesheets_for_project.csv"))
        .map(|(_, c)| c.clone());
    assert_eq!(timesheets, Some(Conversion::Rows(2)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_export_with_wrong_password_stops_early() {
    let state = Fixtures::default_scenario().with_credentials(MockCredentials::Basic {
        email: "ada@acme.com".to_string(),
        password: "secret".to_string(),
    });
    let server = MockServer::with_state(state).await;
    let client = HarvestClient::with_basic(server.url(), "ada@acme.com", "nope").unwrap();
    let dir = tempfile::tempdir().unwrap();

    let options = ExportOptions {
        dir: dir.path().to_path_buf(),
        range: DateRange::year(chrono::Utc::now().year()).unwrap(),
    };
    let report = export::export(&client, &options).await.unwrap();

    assert_eq!(report.errors(), 6);
    assert!(report.written.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_is_visible_to_tests() {
    let server = MockServer::with_state(MockState::new()).await;
    let client = connect(&server);

    server
        .state()
        .write()
        .await
        .insert(Collection::Tasks, json!({"id": 5, "name": "Injected"}));

    let task = Tasks::get(&client, 5).await.unwrap();
    assert_eq!(task.json().unwrap()["task"]["name"], Value::from("Injected"));

    server.shutdown().await;
}
