//! Symptom log records.

use crate::model::format::serde_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted symptom intensity scale.
pub const INTENSITY_RANGE: RangeInclusive<u8> = 1..=5;

/// One symptom observation. Append-only; several per day are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomLog {
    #[serde(rename = "date_str", with = "serde_date")]
    pub date: NaiveDate,
    pub symptom: String,
    /// Expected in `INTENSITY_RANGE`; checked by the store on insert.
    pub intensity: u8,
    #[serde(default)]
    pub note: Option<String>,
}

impl SymptomLog {
    pub fn new(date: NaiveDate, symptom: impl Into<String>, intensity: u8) -> Self {
        Self {
            date,
            symptom: symptom.into(),
            intensity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn has_valid_intensity(&self) -> bool {
        INTENSITY_RANGE.contains(&self.intensity)
    }

    /// Case-insensitive symptom name match.
    pub fn is_symptom(&self, name: &str) -> bool {
        self.symptom.to_lowercase() == name.to_lowercase()
    }
}
