//! Query parameter types shared by several endpoints.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use serde_with::skip_serializing_none;

/// Format Harvest expects for `updated_since`.
const UPDATED_SINCE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Lower bound on a record's last modification time.
///
/// Serialized as `YYYY-MM-DD HH:MM` in UTC. Parses RFC 3339 timestamps,
/// `YYYY-MM-DD HH:MM` and bare dates (midnight).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatedSince(pub DateTime<Utc>);

impl From<DateTime<Utc>> for UpdatedSince {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for UpdatedSince {
    fn from(value: NaiveDate) -> Self {
        Self(Utc.from_utc_datetime(&value.and_time(chrono::NaiveTime::MIN)))
    }
}

impl fmt::Display for UpdatedSince {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(UPDATED_SINCE_FORMAT))
    }
}

impl Serialize for UpdatedSince {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for UpdatedSince {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, UPDATED_SINCE_FORMAT) {
            return Ok(Self(Utc.from_utc_datetime(&naive)));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self::from)
    }
}

/// Inclusive date range sent as `from` / `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// January 1st through December 31st of `year`.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            from: NaiveDate::from_ymd_opt(year, 1, 1)?,
            to: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// The current calendar year (UTC).
    pub fn current_year() -> Self {
        let today = Utc::now().date_naive();
        Self {
            from: today.with_ordinal(1).unwrap_or(today),
            to: NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
        }
    }
}

/// Filter for collections that only support `updated_since`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatedSinceQuery {
    pub updated_since: Option<UpdatedSince>,
}

impl UpdatedSinceQuery {
    pub fn since(value: impl Into<UpdatedSince>) -> Self {
        Self {
            updated_since: Some(value.into()),
        }
    }
}
