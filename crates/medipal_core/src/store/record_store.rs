//! In-memory record store.
//!
//! # Responsibility
//! - Own the drug, dose log and symptom collections.
//! - Derive the daily dose schedule and weekly adherence from them.
//!
//! # Invariants
//! - Drug storage order is insertion order; sorted views never reorder it.
//! - At most one `DoseLog` exists per `(date, time, lowercase drug name)`.
//! - Every stored `SymptomLog` has an intensity in `INTENSITY_RANGE`.
//! - Date-relative queries take `today` explicitly; nothing reads the clock.

use crate::model::dose_log::{DoseLog, DoseStatus, InvalidDoseStatus};
use crate::model::drug::{Drug, DrugId};
use crate::model::symptom::SymptomLog;
use chrono::{Days, NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of days covered by the weekly adherence summary.
pub const ADHERENCE_WINDOW_DAYS: u64 = 7;

pub type StoreResult<T> = Result<T, StoreError>;

/// Invalid-argument errors raised by store mutations.
///
/// The store is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InvalidStatus(String),
    IntensityOutOfRange(u8),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(value) => {
                write!(f, "status must be TAKEN or MISSED, got `{value}`")
            }
            Self::IntensityOutOfRange(value) => {
                write!(f, "intensity must be 1..5, got {value}")
            }
        }
    }
}

impl Error for StoreError {}

impl From<InvalidDoseStatus> for StoreError {
    fn from(value: InvalidDoseStatus) -> Self {
        Self::InvalidStatus(value.0)
    }
}

/// One scheduled administration of a drug on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledDose<'a> {
    pub drug: &'a Drug,
    pub time: NaiveTime,
}

/// Taken vs expected doses over the weekly window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdherenceSummary {
    pub taken: usize,
    pub expected: usize,
    /// Rounded to one decimal; `100.0` when nothing was expected.
    pub percent: f64,
}

/// Process-wide record store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    drugs: Vec<Drug>,
    dose_logs: Vec<DoseLog>,
    symptoms: Vec<SymptomLog>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already validated collections.
    pub(crate) fn from_parts(
        drugs: Vec<Drug>,
        dose_logs: Vec<DoseLog>,
        symptoms: Vec<SymptomLog>,
    ) -> Self {
        Self {
            drugs,
            dose_logs,
            symptoms,
        }
    }

    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }

    pub fn dose_logs(&self) -> &[DoseLog] {
        &self.dose_logs
    }

    pub fn symptoms(&self) -> &[SymptomLog] {
        &self.symptoms
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty() && self.dose_logs.is_empty() && self.symptoms.is_empty()
    }

    /// Appends a drug. Duplicate names are allowed.
    pub fn add_drug(&mut self, drug: Drug) -> DrugId {
        let id = drug.id;
        self.drugs.push(drug);
        id
    }

    /// Removes the drug at storage position `index`.
    ///
    /// Returns `None` when `index` is out of bounds.
    pub fn remove_drug(&mut self, index: usize) -> Option<Drug> {
        if index < self.drugs.len() {
            Some(self.drugs.remove(index))
        } else {
            None
        }
    }

    pub fn remove_drug_by_id(&mut self, id: DrugId) -> Option<Drug> {
        let index = self.drugs.iter().position(|drug| drug.id == id)?;
        self.remove_drug(index)
    }

    /// Drugs ordered by case-insensitive name; insertion order breaks ties.
    pub fn list_drugs(&self) -> Vec<&Drug> {
        self.display_positions()
            .into_iter()
            .map(|index| &self.drugs[index])
            .collect()
    }

    /// Storage positions in display order.
    ///
    /// `display_positions()[i]` is where the drug shown at row `i` of
    /// `list_drugs()` lives in storage.
    pub fn display_positions(&self) -> Vec<usize> {
        let mut keyed: Vec<(String, usize)> = self
            .drugs
            .iter()
            .enumerate()
            .map(|(index, drug)| (drug.name_key(), index))
            .collect();
        keyed.sort_by(|left, right| left.0.cmp(&right.0));
        keyed.into_iter().map(|(_, index)| index).collect()
    }

    /// Removes the drug shown at `display_index` of `list_drugs()`.
    pub fn remove_drug_at_display(&mut self, display_index: usize) -> Option<Drug> {
        let storage_index = *self.display_positions().get(display_index)?;
        self.remove_drug(storage_index)
    }

    /// Doses due on `date`, ordered by time then case-insensitive drug name.
    pub fn daily_schedule(&self, date: NaiveDate) -> Vec<ScheduledDose<'_>> {
        let mut schedule: Vec<ScheduledDose<'_>> = self
            .drugs
            .iter()
            .filter(|drug| drug.is_active_on(date))
            .flat_map(|drug| drug.times.iter().map(move |&time| ScheduledDose { drug, time }))
            .collect();
        schedule.sort_by_cached_key(|dose| (dose.time, dose.drug.name_key()));
        schedule
    }

    /// Returns the recorded status for one dose, or `None` when unmarked.
    pub fn get_dose_status(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        drug_name: &str,
    ) -> Option<DoseStatus> {
        self.dose_logs
            .iter()
            .find(|log| log.matches(date, time, drug_name))
            .map(|log| log.status)
    }

    /// Records a dose status, overwriting any existing log for the same key.
    pub fn mark_dose(
        &mut self,
        date: NaiveDate,
        time: NaiveTime,
        drug_name: &str,
        status: DoseStatus,
        note: Option<String>,
    ) {
        let log = DoseLog {
            date,
            time,
            drug_name: drug_name.to_string(),
            status,
            note,
        };
        match self
            .dose_logs
            .iter_mut()
            .find(|existing| existing.matches(date, time, drug_name))
        {
            Some(existing) => *existing = log,
            None => self.dose_logs.push(log),
        }
    }

    /// Appends a symptom entry after checking its intensity.
    pub fn add_symptom(&mut self, log: SymptomLog) -> StoreResult<()> {
        if !log.has_valid_intensity() {
            return Err(StoreError::IntensityOutOfRange(log.intensity));
        }
        self.symptoms.push(log);
        Ok(())
    }

    /// Counts of scheduled and taken doses on one day.
    pub(crate) fn taken_on(&self, date: NaiveDate) -> (usize, usize) {
        let schedule = self.daily_schedule(date);
        let taken = schedule
            .iter()
            .filter(|dose| {
                self.get_dose_status(date, dose.time, &dose.drug.name) == Some(DoseStatus::Taken)
            })
            .count();
        (taken, schedule.len())
    }

    /// Adherence across the seven days ending on `today`.
    pub fn adherence_last_7_days(&self, today: NaiveDate) -> AdherenceSummary {
        let (taken, expected) = window_days(today, ADHERENCE_WINDOW_DAYS)
            .map(|date| self.taken_on(date))
            .fold((0, 0), |(taken, expected), (day_taken, day_expected)| {
                (taken + day_taken, expected + day_expected)
            });
        let percent = if expected == 0 {
            100.0
        } else {
            round_to(taken as f64 / expected as f64 * 100.0, 1)
        };
        AdherenceSummary {
            taken,
            expected,
            percent,
        }
    }
}

/// Yields `today`, `today - 1`, ... for `days` days.
pub(crate) fn window_days(today: NaiveDate, days: u64) -> impl Iterator<Item = NaiveDate> {
    (0..days).filter_map(move |offset| today.checked_sub_days(Days::new(offset)))
}

/// Rounds to `decimals` places, ties to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
