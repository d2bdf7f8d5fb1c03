//! Dose log records.
//!
//! # Invariants
//! - A log is keyed by `(date, time, lowercase drug name)`.
//! - At most one log exists per key; the store overwrites on re-mark.

use crate::model::format::{serde_date, serde_time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Recorded outcome of one scheduled dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoseStatus {
    Taken,
    Missed,
}

impl DoseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Taken => "TAKEN",
            Self::Missed => "MISSED",
        }
    }
}

impl Display for DoseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected dose status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDoseStatus(pub String);

impl Display for InvalidDoseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "status must be TAKEN or MISSED, got `{}`", self.0)
    }
}

impl Error for InvalidDoseStatus {}

impl FromStr for DoseStatus {
    type Err = InvalidDoseStatus;

    /// Accepts exactly `TAKEN` or `MISSED`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "TAKEN" => Ok(Self::Taken),
            "MISSED" => Ok(Self::Missed),
            other => Err(InvalidDoseStatus(other.to_string())),
        }
    }
}

/// Status entry for one `(date, time, drug)` dose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseLog {
    #[serde(rename = "date_str", with = "serde_date")]
    pub date: NaiveDate,
    #[serde(rename = "time_str", with = "serde_time")]
    pub time: NaiveTime,
    pub drug_name: String,
    pub status: DoseStatus,
    #[serde(default)]
    pub note: Option<String>,
}

impl DoseLog {
    /// Returns whether this log belongs to the given dose key.
    pub fn matches(&self, date: NaiveDate, time: NaiveTime, drug_name: &str) -> bool {
        self.date == date
            && self.time == time
            && self.drug_name.to_lowercase() == drug_name.to_lowercase()
    }
}
