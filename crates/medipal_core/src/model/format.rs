//! Strict calendar date and wall-clock time formats.
//!
//! # Responsibility
//! - Parse and render `YYYY-MM-DD` dates and `HH:MM` times.
//! - Provide serde adapters so persisted records keep the same text shape.
//!
//! # Invariants
//! - Dates are always zero padded `YYYY-MM-DD`.
//! - Times are always zero padded 24-hour `HH:MM`, never with seconds.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static TIME_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time regex"));

/// Malformed date or time text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidDate(String),
    InvalidTime(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
        }
    }
}

impl Error for ParseError {}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = value.trim();
    if !DATE_SHAPE_RE.is_match(trimmed) {
        return Err(ParseError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(trimmed.to_string()))
}

/// Parses a strict `HH:MM` time.
pub fn parse_time(value: &str) -> Result<NaiveTime, ParseError> {
    let trimmed = value.trim();
    if !TIME_SHAPE_RE.is_match(trimmed) {
        return Err(ParseError::InvalidTime(trimmed.to_string()));
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .map_err(|_| ParseError::InvalidTime(trimmed.to_string()))
}

/// Parses a comma-separated list such as `08:00, 20:00`.
///
/// Returns the times sorted ascending with duplicates removed. An input with
/// no entries is rejected.
pub fn parse_time_list(value: &str) -> Result<Vec<NaiveTime>, ParseError> {
    let mut times = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_time)
        .collect::<Result<Vec<_>, _>>()?;
    if times.is_empty() {
        return Err(ParseError::InvalidTime(value.trim().to_string()));
    }
    times.sort();
    times.dedup();
    Ok(times)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Serde adapter for `NaiveDate` fields stored as `YYYY-MM-DD`.
pub mod serde_date {
    use chrono::NaiveDate;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for optional `NaiveDate` fields (`null` when absent).
pub mod serde_date_opt {
    use chrono::NaiveDate;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(value) => serializer.serialize_some(&super::format_date(*value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => super::parse_date(value).map(Some).map_err(D::Error::custom),
        }
    }
}

/// Serde adapter for `NaiveTime` fields stored as `HH:MM`.
pub mod serde_time {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for the sorted dose time list of a drug.
pub mod serde_time_list {
    use chrono::NaiveTime;
    use serde::ser::SerializeSeq;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(times: &[NaiveTime], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(times.len()))?;
        for time in times {
            seq.serialize_element(&super::format_time(*time))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<NaiveTime>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        let mut times = raw
            .iter()
            .map(|value| super::parse_time(value))
            .collect::<Result<Vec<_>, _>>()
            .map_err(D::Error::custom)?;
        times.sort();
        times.dedup();
        Ok(times)
    }
}
