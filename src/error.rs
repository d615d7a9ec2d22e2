//! Error types for Harvest API operations.

use thiserror::Error;

/// Errors that can occur during Harvest API operations.
///
/// HTTP error statuses are not represented here: the Harvest API answers
/// failures with JSON documents, which are handed back to the caller as a
/// [`HarvestResponse`](crate::HarvestResponse) like any other body.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The account URI has no scheme or host.
    #[error("Invalid harvest uri \"{0}\".")]
    InvalidUri(String),

    /// Configuration is missing or incomplete.
    #[error("Harvest configuration required: {0}")]
    ConfigMissing(String),

    /// Credentials could not be turned into an `Authorization` header.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Transport-level failure while talking to the API.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON parsing or encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An exported document does not have the expected layout.
    #[error("Unexpected layout in '{file}': {reason}")]
    ExportShape { file: String, reason: String },
}

/// Result type alias for Harvest operations.
pub type Result<T> = core::result::Result<T, HarvestError>;
