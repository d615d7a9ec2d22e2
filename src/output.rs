//! Output formatting for CLI display.
//!
//! Harvest records are wrapped objects such as `{"project": {...}}`;
//! [`SummaryRow`] picks the few members worth showing in a table and
//! [`PrettyPrint`] renders a single record as key-value lines.

use serde_json::Value;
use tabled::Tabled;

use crate::response::HarvestResponse;

/// Trait for human-readable key-value output.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for HarvestResponse {
    fn pretty_print(&self) -> String {
        match self {
            HarvestResponse::Json { body, .. } => match single_member(body) {
                Some((kind, inner)) => pretty_record(kind, inner),
                None => serde_json::to_string_pretty(body).unwrap_or_default(),
            },
            HarvestResponse::Raw { status, body } if body.trim().is_empty() => {
                format!("HTTP {status} (no content)")
            }
            HarvestResponse::Raw { status, body } => format!("HTTP {status}\n{body}"),
        }
    }
}

fn single_member(body: &Value) -> Option<(&String, &Value)> {
    let map = body.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.iter().next()
}

fn pretty_record(kind: &str, inner: &Value) -> String {
    let Some(fields) = inner.as_object() else {
        return format!("{kind}: {inner}");
    };

    let header = match fields.get("id") {
        Some(id) => format!("{}: {}", title_case(kind), display_value(id)),
        None => title_case(kind),
    };
    let divider = "─".repeat(header.chars().count().max(30));
    let width = fields.keys().map(String::len).max().unwrap_or(0) + 1;

    let mut lines = vec![header, divider];
    for (key, value) in fields {
        if key == "id" {
            continue;
        }
        lines.push(format!("{:<width$} {}", format!("{key}:"), display_value(value)));
    }
    lines.join("\n")
}

fn title_case(kind: &str) -> String {
    kind.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One table row per wrapped record.
#[derive(Debug, Tabled)]
pub struct SummaryRow {
    pub kind: String,
    pub id: String,
    pub name: String,
    pub active: String,
    pub updated: String,
}

impl SummaryRow {
    /// Summarize a wrapped record; `None` if it is not wrapped.
    pub fn from_record(record: &Value) -> Option<Self> {
        let (kind, inner) = record.as_object()?.iter().next()?;
        let inner = inner.as_object()?;
        let text = |key: &str| inner.get(key).map(display_value).unwrap_or_default();

        let name = ["name", "subject", "number", "notes", "email"]
            .iter()
            .map(|key| text(*key))
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| {
                format!("{} {}", text("first_name"), text("last_name"))
                    .trim()
                    .to_string()
            });

        let active = ["active", "is_active"]
            .iter()
            .find_map(|key| inner.get(*key).and_then(Value::as_bool))
            .map(|b| if b { "yes" } else { "no" }.to_string())
            .unwrap_or_default();

        Some(Self {
            kind: kind.clone(),
            id: text("id"),
            name,
            active,
            updated: text("updated_at"),
        })
    }

    /// Rows for every wrapped record of a collection.
    pub fn from_collection(records: &[Value]) -> Vec<Self> {
        records.iter().filter_map(Self::from_record).collect()
    }
}
