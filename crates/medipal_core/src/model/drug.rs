//! Drug domain model.
//!
//! # Responsibility
//! - Describe one registered medication and its daily dosing times.
//! - Answer whether a drug is active on a given calendar date.
//!
//! # Invariants
//! - `id` is stable and never reused for another drug.
//! - `times` is sorted ascending and free of duplicates.
//! - `end_date >= start_date` is expected but not enforced.

use crate::model::format::{serde_date, serde_date_opt, serde_time_list};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a registered drug.
pub type DrugId = Uuid;

/// One medication with its dosing schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    /// Generated on load for documents written before ids existed.
    #[serde(default = "Uuid::new_v4")]
    pub id: DrugId,
    pub name: String,
    /// Free text, e.g. `500mg`.
    pub dosage: String,
    #[serde(with = "serde_time_list")]
    pub times: Vec<NaiveTime>,
    #[serde(with = "serde_date")]
    pub start_date: NaiveDate,
    /// `None` means the course is ongoing.
    #[serde(default, with = "serde_date_opt")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Drug {
    /// Creates an ongoing drug with a generated id.
    ///
    /// Dose times are sorted and de-duplicated.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        times: impl IntoIterator<Item = NaiveTime>,
        start_date: NaiveDate,
    ) -> Self {
        let mut times: Vec<NaiveTime> = times.into_iter().collect();
        times.sort();
        times.dedup();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: dosage.into(),
            times,
            start_date,
            end_date: None,
            notes: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns whether `date` falls inside `[start_date, end_date]`.
    ///
    /// A missing end date is treated as open ended.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        self.end_date.map_or(true, |end| date <= end)
    }

    /// Case-folded name used for ordering and log matching.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::Drug;
    use chrono::{NaiveDate, NaiveTime};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn new_sorts_and_dedups_times() {
        let drug = Drug::new("Ibuprofen", "200mg", [at(20), at(8), at(20)], day(1));
        assert_eq!(drug.times, vec![at(8), at(20)]);
        assert!(!drug.id.is_nil());
    }

    #[test]
    fn active_window_is_inclusive() {
        let drug = Drug::new("Ibuprofen", "200mg", [at(8)], day(3)).with_end_date(day(5));
        assert!(!drug.is_active_on(day(2)));
        assert!(drug.is_active_on(day(3)));
        assert!(drug.is_active_on(day(5)));
        assert!(!drug.is_active_on(day(6)));
    }

    #[test]
    fn open_ended_drug_stays_active() {
        let drug = Drug::new("Vitamin D", "1000 IU", [at(9)], day(1));
        assert!(drug.is_active_on(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    }
}
