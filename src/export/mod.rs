//! Dump account data to JSON files and convert them to CSV.
//!
//! The export runs in two phases. The primary phase saves the top-level
//! collections; if any of them is rejected the export stops there. The
//! dependent phase then walks every project and client id and saves the
//! per-id listings, concatenated into one file each.

pub mod convert;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::query::DateRange;
use crate::resources::{Clients, Contacts, Invoices, People, Projects, TaskAssignments, Tasks};
use crate::response::HarvestResponse;
use crate::traits::List;

pub use convert::{convert_dir, convert_file, Conversion};

/// Options for [`export`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the JSON files are written to.
    pub dir: PathBuf,
    /// Date range for project timesheets and expenses.
    pub range: DateRange,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            range: DateRange::current_year(),
        }
    }
}

/// Outcome of an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    /// Files that could not be produced because the response was rejected
    /// or not JSON.
    pub failed: Vec<String>,
}

impl ExportReport {
    /// Number of failures; also the process exit code of the export.
    pub fn errors(&self) -> usize {
        self.failed.len()
    }
}

/// The primary collections, in export order.
const PRIMARY: [&str; 6] = [
    "clients.json",
    "projects.json",
    "contacts.json",
    "people.json",
    "tasks.json",
    "invoices.json",
];

/// Run the full export into `options.dir`.
///
/// # Errors
///
/// Transport and filesystem errors abort the export. Rejected responses do
/// not; they are counted in [`ExportReport::failed`].
#[tracing::instrument(skip(client))]
pub async fn export(client: &HarvestClient, options: &ExportOptions) -> Result<ExportReport> {
    fs::create_dir_all(&options.dir)?;
    let mut report = ExportReport::default();

    let mut project_ids = Vec::new();
    let mut client_ids = Vec::new();

    for filename in PRIMARY {
        let response = fetch_primary(client, filename).await?;
        let document = match response {
            r if r.is_auth_failure() => {
                tracing::error!("{}: Authentication failed", filename);
                report.failed.push(filename.to_string());
                continue;
            }
            HarvestResponse::Json { body, .. } => body,
            HarvestResponse::Raw { status, .. } => {
                tracing::error!("{}: response is not JSON (HTTP {})", filename, status);
                report.failed.push(filename.to_string());
                continue;
            }
        };

        tracing::info!("{}", filename);
        match filename {
            "projects.json" => project_ids = record_ids(&document, "project"),
            "clients.json" => client_ids = record_ids(&document, "client"),
            _ => {}
        }
        report
            .written
            .push(write_json(&options.dir.join(filename), &document)?);
    }

    if report.errors() > 0 {
        return Ok(report);
    }

    let range = options.range;
    let dependent = [
        ("expenses_for_project.json", Dependent::Expenses(range), &project_ids),
        ("tasks_for_project.json", Dependent::TaskAssignments, &project_ids),
        ("timesheets_for_project.json", Dependent::Timesheets(range), &project_ids),
        ("projects_for_client.json", Dependent::ProjectsForClient, &client_ids),
    ];

    for (filename, listing, ids) in dependent {
        tracing::info!("{}", filename);
        let mut records = Vec::new();
        for &id in ids {
            tracing::info!("{}", id);
            match listing.fetch(client, id).await? {
                HarvestResponse::Json {
                    body: Value::Array(items),
                    ..
                } => records.extend(items),
                other => {
                    tracing::warn!(
                        id,
                        status = other.status(),
                        "{}: skipping non-list response",
                        filename
                    );
                }
            }
        }
        report
            .written
            .push(write_json(&options.dir.join(filename), &Value::Array(records))?);
    }

    Ok(report)
}

async fn fetch_primary(client: &HarvestClient, filename: &str) -> Result<HarvestResponse> {
    match filename {
        "clients.json" => Clients::list(client, &Default::default()).await,
        "projects.json" => Projects::list(client, &Default::default()).await,
        "contacts.json" => Contacts::list(client, &Default::default()).await,
        "people.json" => People::list(client, &()).await,
        "tasks.json" => Tasks::list(client, &Default::default()).await,
        _ => Invoices::list(client, &Default::default()).await,
    }
}

/// Per-id listings of the dependent phase.
#[derive(Debug, Clone, Copy)]
enum Dependent {
    Expenses(DateRange),
    TaskAssignments,
    Timesheets(DateRange),
    ProjectsForClient,
}

impl Dependent {
    async fn fetch(self, client: &HarvestClient, id: u64) -> Result<HarvestResponse> {
        match self {
            Dependent::Expenses(range) => Projects::expenses(client, id, range).await,
            Dependent::TaskAssignments => TaskAssignments::list(client, id).await,
            Dependent::Timesheets(range) => Projects::timesheets(client, id, range).await,
            Dependent::ProjectsForClient => Projects::for_client(client, id).await,
        }
    }
}

/// Ids of wrapped records, e.g. `[{"project": {"id": 1}}]` with kind
/// `project`. Records without a numeric id are skipped.
pub fn record_ids(document: &Value, kind: &str) -> Vec<u64> {
    document
        .as_array()
        .map(|records| {
            records
                .iter()
                .filter_map(|r| r.get(kind)?.get("id")?.as_u64())
                .collect()
        })
        .unwrap_or_default()
}

/// Write `value` as pretty JSON with sorted keys and a 4-space indent.
pub fn write_json(path: &Path, value: &Value) -> Result<PathBuf> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sort_keys(value).serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(path.to_path_buf())
}

/// Copy of `value` with object members in key order at every level.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
