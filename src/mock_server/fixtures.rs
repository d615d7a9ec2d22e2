//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic Harvest records. All
//! records are unwrapped; the state wraps them when serving.

use serde_json::{json, Value};

use super::state::{Collection, MockState};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Account Fixtures
    // =========================================================================

    /// The `who_am_i` document of the default account.
    pub fn account() -> Value {
        json!({
            "company": {
                "base_uri": "https://acme.harvestapp.com",
                "full_domain": "acme.harvestapp.com",
                "name": "Acme Consulting",
                "active": true,
                "week_start_day": "Monday",
                "time_format": "hours_minutes",
                "clock": "24h"
            },
            "user": {
                "id": 508343,
                "email": "ada@acme.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "admin": true,
                "timezone": "Europe/London"
            }
        })
    }

    // =========================================================================
    // Record Fixtures
    // =========================================================================

    /// A client company.
    pub fn client(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "active": true,
            "currency": "United States Dollar - USD",
            "currency_symbol": "$",
            "details": null,
            "updated_at": "2016-01-04T18:34:01Z",
            "created_at": "2015-11-02T09:12:44Z"
        })
    }

    /// A contact of a client.
    pub fn contact(id: u64, client_id: u64, first_name: &str, last_name: &str) -> Value {
        json!({
            "id": id,
            "client_id": client_id,
            "first_name": first_name,
            "last_name": last_name,
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "phone_office": "",
            "updated_at": "2016-01-04T18:34:01Z"
        })
    }

    /// A user of the account.
    pub fn person(id: u64, first_name: &str, last_name: &str) -> Value {
        json!({
            "id": id,
            "email": format!("{}@acme.com", first_name.to_lowercase()),
            "first_name": first_name,
            "last_name": last_name,
            "is_active": true,
            "is_admin": false,
            "department": "Engineering",
            "default_hourly_rate": 100.0,
            "updated_at": "2016-01-04T18:34:01Z"
        })
    }

    /// A project of a client.
    pub fn project(id: u64, client_id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "client_id": client_id,
            "name": name,
            "code": "",
            "active": true,
            "billable": true,
            "bill_by": "Project",
            "budget": null,
            "notes": "",
            "updated_at": "2016-02-10T12:00:00Z"
        })
    }

    /// A task.
    pub fn task(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "billable_by_default": true,
            "default_hourly_rate": 0.0,
            "is_default": false,
            "deactivated": false,
            "updated_at": "2016-01-04T18:34:01Z"
        })
    }

    /// A task assigned to a project.
    pub fn task_assignment(id: u64, project_id: u64, task_id: u64) -> Value {
        json!({
            "id": id,
            "project_id": project_id,
            "task_id": task_id,
            "billable": true,
            "deactivated": false,
            "hourly_rate": 100.0,
            "budget": null
        })
    }

    /// An expense category.
    pub fn expense_category(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "unit_name": null,
            "unit_price": null,
            "deactivated": false,
            "updated_at": "2016-01-04T18:34:01Z"
        })
    }

    /// An invoice for a client.
    pub fn invoice(id: u64, client_id: u64, amount: f64) -> Value {
        json!({
            "id": id,
            "client_id": client_id,
            "number": id.to_string(),
            "amount": amount,
            "due_amount": amount,
            "state": "open",
            "currency": "United States Dollar - USD",
            "issued_at": "2016-03-01",
            "due_at": "2016-03-31",
            "subject": format!("Invoice {id}"),
            "updated_at": "2016-03-01T10:00:00Z"
        })
    }

    /// A time entry on a project.
    pub fn day_entry(id: u64, project_id: u64, task_id: u64, spent_at: &str, hours: f64) -> Value {
        json!({
            "id": id,
            "project_id": project_id,
            "task_id": task_id,
            "user_id": 508343,
            "spent_at": spent_at,
            "hours": hours,
            "notes": "Pairing session",
            "is_billed": false,
            "is_closed": false,
            "timer_started": false,
            "updated_at": format!("{spent_at}T17:00:00Z")
        })
    }

    /// An expense on a project.
    pub fn expense(id: u64, project_id: u64, category_id: u64, spent_at: &str, cost: f64) -> Value {
        json!({
            "id": id,
            "project_id": project_id,
            "expense_category_id": category_id,
            "user_id": 508343,
            "spent_at": spent_at,
            "total_cost": cost,
            "units": 1.0,
            "notes": "Train tickets",
            "is_billed": false
        })
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// A small account with two clients, three projects and some history in
    /// 2016.
    pub fn default_scenario() -> MockState {
        MockState::new()
            .with_account(Self::account())
            .with_record(Collection::Clients, Self::client(1, "Acme Corp"))
            .with_record(Collection::Clients, Self::client(2, "Globex"))
            .with_record(Collection::Contacts, Self::contact(21, 1, "Wile", "Coyote"))
            .with_record(Collection::Contacts, Self::contact(22, 2, "Hank", "Scorpio"))
            .with_record(Collection::People, Self::person(508343, "Ada", "Lovelace"))
            .with_record(Collection::People, Self::person(508344, "Grace", "Hopper"))
            .with_record(Collection::Projects, Self::project(10, 1, "Website"))
            .with_record(Collection::Projects, Self::project(11, 1, "Mobile App"))
            .with_record(Collection::Projects, Self::project(12, 2, "Doomsday Device"))
            .with_record(Collection::Tasks, Self::task(31, "Design"))
            .with_record(Collection::Tasks, Self::task(32, "Development"))
            .with_record(Collection::TaskAssignments, Self::task_assignment(41, 10, 31))
            .with_record(Collection::TaskAssignments, Self::task_assignment(42, 10, 32))
            .with_record(Collection::TaskAssignments, Self::task_assignment(43, 12, 32))
            .with_record(Collection::ExpenseCategories, Self::expense_category(51, "Travel"))
            .with_record(Collection::ExpenseCategories, Self::expense_category(52, "Meals"))
            .with_record(Collection::Invoices, Self::invoice(61, 1, 1200.0))
            .with_record(Collection::Invoices, Self::invoice(62, 1, 800.0))
            .with_record(Collection::Invoices, Self::invoice(63, 2, 4500.0))
            .with_record(
                Collection::DayEntries,
                Self::day_entry(71, 10, 31, "2016-03-01", 2.5),
            )
            .with_record(
                Collection::DayEntries,
                Self::day_entry(72, 10, 32, "2016-03-02", 6.0),
            )
            .with_record(
                Collection::DayEntries,
                Self::day_entry(73, 12, 32, "2017-01-15", 1.0),
            )
            .with_record(
                Collection::Expenses,
                Self::expense(81, 10, 51, "2016-03-01", 42.5),
            )
    }
}
