//! Responses returned by the request dispatcher.

use serde_json::Value;

/// Message Harvest sends back when credentials are rejected.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed for API request.";

/// The outcome of a single API call.
///
/// Harvest documents are passed through untouched. When the body cannot be
/// decoded as JSON (or the call was a DELETE) the raw text is kept instead.
#[derive(Debug, Clone, PartialEq)]
pub enum HarvestResponse {
    /// A JSON-decoded body.
    Json {
        status: u16,
        body: Value,
    },
    /// The undecoded body.
    Raw { status: u16, body: String },
}

impl HarvestResponse {
    /// Decode a response body, falling back to the raw text.
    pub(crate) fn decode(status: u16, body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => HarvestResponse::Json {
                status,
                body: value,
            },
            Err(_) => HarvestResponse::Raw { status, body },
        }
    }

    /// HTTP status code of the response.
    pub fn status(&self) -> u16 {
        match self {
            HarvestResponse::Json { status, .. } | HarvestResponse::Raw { status, .. } => *status,
        }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// The decoded document, if the body was JSON.
    pub fn json(&self) -> Option<&Value> {
        match self {
            HarvestResponse::Json { body, .. } => Some(body),
            HarvestResponse::Raw { .. } => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            HarvestResponse::Json { body, .. } => Some(body),
            HarvestResponse::Raw { .. } => None,
        }
    }

    /// The records of a collection response.
    ///
    /// Returns `None` unless the body is a JSON array.
    pub fn items(&self) -> Option<&Vec<Value>> {
        self.json().and_then(Value::as_array)
    }

    /// True for an empty collection, an empty raw body or a JSON `null`.
    pub fn is_empty(&self) -> bool {
        match self {
            HarvestResponse::Json { body, .. } => match body {
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
                Value::Null => true,
                _ => false,
            },
            HarvestResponse::Raw { body, .. } => body.trim().is_empty(),
        }
    }

    /// Whether Harvest rejected the credentials for this call.
    pub fn is_auth_failure(&self) -> bool {
        self.json()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .is_some_and(|m| m == AUTH_FAILED_MESSAGE)
    }
}
