//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Harvest API server.
//! Records are kept unwrapped (`{"id": 1, "name": ...}`) and wrapped in their
//! collection's member name (`{"client": {...}}`) on the way out.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// State shared between the handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// Record collections served by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Clients,
    Contacts,
    People,
    Projects,
    Tasks,
    ExpenseCategories,
    Invoices,
    DayEntries,
    Expenses,
    TaskAssignments,
    UserAssignments,
}

impl Collection {
    /// The collection addressed by the first segment of a request path.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "clients" => Some(Self::Clients),
            "contacts" => Some(Self::Contacts),
            "people" => Some(Self::People),
            "projects" => Some(Self::Projects),
            "tasks" => Some(Self::Tasks),
            "expense_categories" => Some(Self::ExpenseCategories),
            "invoices" => Some(Self::Invoices),
            _ => None,
        }
    }

    /// Member name each record is wrapped in.
    ///
    /// Invoices really are wrapped in the plural.
    pub fn wrapper(self) -> &'static str {
        match self {
            Self::Clients => "client",
            Self::Contacts => "contact",
            Self::People => "user",
            Self::Projects => "project",
            Self::Tasks => "task",
            Self::ExpenseCategories => "expense_category",
            Self::Invoices => "invoices",
            Self::DayEntries => "day_entry",
            Self::Expenses => "expense",
            Self::TaskAssignments => "task_assignment",
            Self::UserAssignments => "user_assignment",
        }
    }

    /// Path segment used in `Location` headers.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Contacts => "contacts",
            Self::People => "people",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::ExpenseCategories => "expense_categories",
            Self::Invoices => "invoices",
            Self::DayEntries => "daily/show",
            Self::Expenses => "expenses",
            Self::TaskAssignments => "task_assignments",
            Self::UserAssignments => "user_assignments",
        }
    }

    /// Boolean member flipped by a toggle, and its value on records that
    /// lack it.
    pub fn active_flag(self) -> (&'static str, bool) {
        match self {
            Self::People => ("is_active", true),
            Self::ExpenseCategories | Self::Tasks => ("deactivated", false),
            Self::DayEntries => ("timer_started", false),
            _ => ("active", true),
        }
    }
}

/// Credentials the mock insists on, if any.
#[derive(Debug, Clone)]
pub enum MockCredentials {
    Basic { email: String, password: String },
    Bearer(String),
}

impl MockCredentials {
    fn expected_header(&self) -> String {
        match self {
            Self::Basic { email, password } => {
                format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
            }
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

/// Shared state for the mock server.
///
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    records: HashMap<Collection, BTreeMap<u64, Value>>,

    /// Document served at `/account/who_am_i`.
    pub account: Value,

    /// If set, every API request must carry these credentials.
    pub credentials: Option<MockCredentials>,

    /// Invoices per page.
    pub invoice_page_size: usize,

    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            account: Value::Object(Map::new()),
            credentials: None,
            invoice_page_size: 50,
            next_id: 1000,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add an unwrapped record; it must carry a numeric `id`.
    pub fn with_record(mut self, collection: Collection, record: Value) -> Self {
        self.insert(collection, record);
        self
    }

    /// Require credentials on every API request.
    pub fn with_credentials(mut self, credentials: MockCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the number of invoices per page.
    pub fn with_invoice_page_size(mut self, size: usize) -> Self {
        self.invoice_page_size = size.max(1);
        self
    }

    /// Set the `who_am_i` document.
    pub fn with_account(mut self, account: Value) -> Self {
        self.account = account;
        self
    }

    /// Whether a request with this `Authorization` header may proceed.
    pub fn authorize(&self, header: Option<&str>) -> bool {
        match &self.credentials {
            None => true,
            Some(expected) => header == Some(expected.expected_header().as_str()),
        }
    }

    /// Number of records in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        self.records.get(&collection).map_or(0, BTreeMap::len)
    }

    /// Get the unwrapped record.
    pub fn record(&self, collection: Collection, id: u64) -> Option<&Value> {
        self.records.get(&collection)?.get(&id)
    }

    /// Get a record wrapped in its member name.
    pub fn get(&self, collection: Collection, id: u64) -> Option<Value> {
        self.record(collection, id).map(|r| wrap(collection, r))
    }

    /// All wrapped records of a collection, ordered by id.
    pub fn list(&self, collection: Collection) -> Vec<Value> {
        self.list_where(collection, |_| true)
    }

    /// Wrapped records whose numeric `key` equals `value`.
    pub fn list_by(&self, collection: Collection, key: &str, value: u64) -> Vec<Value> {
        self.list_where(collection, |r| r.get(key).and_then(Value::as_u64) == Some(value))
    }

    /// Wrapped records of a project spent within `from..=to`.
    pub fn list_spent(
        &self,
        collection: Collection,
        project_id: u64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<Value> {
        self.list_where(collection, |r| {
            if r.get("project_id").and_then(Value::as_u64) != Some(project_id) {
                return false;
            }
            let Some(spent) = spent_at(r) else {
                return false;
            };
            from.map_or(true, |f| spent >= f) && to.map_or(true, |t| spent <= t)
        })
    }

    /// Wrapped records spent on `day`.
    pub fn list_on(&self, collection: Collection, day: NaiveDate) -> Vec<Value> {
        self.list_where(collection, |r| spent_at(r) == Some(day))
    }

    /// One page of wrapped invoices (pages start at 1).
    pub fn invoice_page(&self, page: usize) -> Vec<Value> {
        let size = self.invoice_page_size.max(1);
        let start = page.saturating_sub(1).saturating_mul(size);
        self.list(Collection::Invoices)
            .into_iter()
            .skip(start)
            .take(size)
            .collect()
    }

    fn list_where(&self, collection: Collection, keep: impl Fn(&Value) -> bool) -> Vec<Value> {
        self.records
            .get(&collection)
            .map(|records| {
                records
                    .values()
                    .filter(|r| keep(r))
                    .map(|r| wrap(collection, r))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Store a record, assigning an id if it has none. Returns the id.
    ///
    /// A body wrapped in the collection's member name is unwrapped first.
    pub fn insert(&mut self, collection: Collection, body: Value) -> u64 {
        let mut record = unwrap(collection, body);
        let id = match record.get("id").and_then(Value::as_u64) {
            Some(id) => id,
            None => {
                self.next_id += 1;
                self.next_id
            }
        };
        if let Value::Object(fields) = &mut record {
            fields.insert("id".to_string(), Value::from(id));
        } else {
            record = serde_json::json!({ "id": id });
        }
        self.records.entry(collection).or_default().insert(id, record);
        id
    }

    /// Merge the members of `body` into a record; returns the wrapped result.
    pub fn update(&mut self, collection: Collection, id: u64, body: Value) -> Option<Value> {
        let record = self.records.get_mut(&collection)?.get_mut(&id)?;
        if let (Value::Object(fields), Value::Object(changes)) =
            (&mut *record, unwrap(collection, body))
        {
            for (key, value) in changes {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        Some(wrap(collection, record))
    }

    /// Flip the collection's active flag; returns the wrapped result.
    pub fn toggle(&mut self, collection: Collection, id: u64) -> Option<Value> {
        let (flag, default) = collection.active_flag();
        let record = self.records.get_mut(&collection)?.get_mut(&id)?;
        if let Value::Object(fields) = &mut *record {
            let current = fields
                .get(flag)
                .and_then(Value::as_bool)
                .unwrap_or(default);
            fields.insert(flag.to_string(), Value::Bool(!current));
        }
        Some(wrap(collection, record))
    }

    /// Reset the active flag to its default, i.e. active.
    pub fn activate(&mut self, collection: Collection, id: u64) -> bool {
        let (flag, active) = collection.active_flag();
        match self.records.get_mut(&collection).and_then(|r| r.get_mut(&id)) {
            Some(Value::Object(fields)) => {
                fields.insert(flag.to_string(), Value::Bool(active));
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Remove a record; `false` if it did not exist.
    pub fn remove(&mut self, collection: Collection, id: u64) -> bool {
        self.records
            .get_mut(&collection)
            .and_then(|records| records.remove(&id))
            .is_some()
    }
}

fn wrap(collection: Collection, record: &Value) -> Value {
    let mut wrapped = Map::new();
    wrapped.insert(collection.wrapper().to_string(), record.clone());
    Value::Object(wrapped)
}

fn unwrap(collection: Collection, body: Value) -> Value {
    match body {
        Value::Object(mut fields) => match fields.remove(collection.wrapper()) {
            Some(inner) if inner.is_object() => inner,
            Some(inner) => {
                fields.insert(collection.wrapper().to_string(), inner);
                Value::Object(fields)
            }
            None => Value::Object(fields),
        },
        other => other,
    }
}

fn spent_at(record: &Value) -> Option<NaiveDate> {
    record
        .get("spent_at")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}
