//! JSON to CSV conversion of exported files.
//!
//! Exported files hold arrays of wrapped records (`[{"client": {...}}]`).
//! The header is the sorted member list of the first record's wrapped
//! object; every later record is projected onto it.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;

use crate::error::{HarvestError, Result};

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Header plus this many data rows were written.
    Rows(usize),
    /// The JSON array was empty; an empty CSV file was left behind.
    NoData,
}

/// Convert every `*.json` file in `dir` (in name order) to a sibling
/// `.csv` file.
pub fn convert_dir(dir: &Path) -> Result<Vec<(PathBuf, Conversion)>> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    inputs.sort();

    let mut results = Vec::with_capacity(inputs.len());
    for json_path in inputs {
        let csv_path = json_path.with_extension("csv");
        tracing::info!("{} -> {}", json_path.display(), csv_path.display());
        let outcome = convert_file(&json_path, &csv_path)?;
        results.push((csv_path, outcome));
    }
    Ok(results)
}

/// Convert one exported JSON file to CSV.
///
/// # Errors
///
/// Returns [`HarvestError::ExportShape`] if the file is not an array of
/// wrapped records.
pub fn convert_file(json_path: &Path, csv_path: &Path) -> Result<Conversion> {
    let name = json_path.display().to_string();
    let data: Value = serde_json::from_str(&fs::read_to_string(json_path)?)?;
    let records = data.as_array().ok_or_else(|| HarvestError::ExportShape {
        file: name.clone(),
        reason: "expected a JSON array".to_string(),
    })?;
    tracing::info!("{} JSON records", records.len());

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_path(csv_path)?;

    let Some(first) = records.first() else {
        writer.flush()?;
        tracing::error!("No data in '{}'", name);
        return Ok(Conversion::NoData);
    };

    let (kind, fields) = header_of(first).ok_or_else(|| HarvestError::ExportShape {
        file: name.clone(),
        reason: "first record is not a single wrapped object".to_string(),
    })?;

    writer.write_record(&fields)?;

    let mut rows = 0;
    for record in records {
        let Some(inner) = record.get(&kind).and_then(Value::as_object) else {
            tracing::warn!("{}: record without '{}' skipped", name, kind);
            continue;
        };
        writer.write_record(fields.iter().map(|field| cell(inner.get(field))))?;
        rows += 1;
    }
    writer.flush()?;

    tracing::info!("{} CSV rows", rows);
    Ok(Conversion::Rows(rows))
}

/// Wrapper key and sorted field names of a record like `{"task": {...}}`.
fn header_of(record: &Value) -> Option<(String, Vec<String>)> {
    let (kind, inner) = record.as_object()?.iter().next()?;
    let mut fields: Vec<String> = inner.as_object()?.keys().cloned().collect();
    fields.sort();
    Some((kind.clone(), fields))
}

/// Text of one CSV cell: strings verbatim, missing and null empty, anything
/// else as JSON.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_formatting() {
        assert_eq!(cell(None), "");
        assert_eq!(cell(Some(&Value::Null)), "");
        assert_eq!(cell(Some(&json!("Acme, Inc."))), "Acme, Inc.");
        assert_eq!(cell(Some(&json!(12.5))), "12.5");
        assert_eq!(cell(Some(&json!(true))), "true");
        assert_eq!(cell(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }

    #[test]
    fn test_header_of_wrapped_record() {
        let (kind, fields) = header_of(&json!({"client": {"name": "A", "id": 1, "active": true}}))
            .unwrap();
        assert_eq!(kind, "client");
        assert_eq!(fields, vec!["active", "id", "name"]);

        assert!(header_of(&json!({"client": 5})).is_none());
        assert!(header_of(&json!([1])).is_none());
    }
}
