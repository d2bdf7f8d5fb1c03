//! Per-day adherence figures.

use crate::store::record_store::{window_days, Store, ADHERENCE_WINDOW_DAYS};
use chrono::NaiveDate;

/// Chart row for one day of the weekly adherence view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAdherence {
    pub date: NaiveDate,
    /// Whole percent, ties to even; `100` when nothing was scheduled.
    pub percent: u32,
}

/// Percentage of scheduled doses marked TAKEN on `date`.
///
/// Returns `None` when no dose is scheduled that day. Not rounded.
pub fn adherence_pct_on(store: &Store, date: NaiveDate) -> Option<f64> {
    let (taken, expected) = store.taken_on(date);
    if expected == 0 {
        return None;
    }
    Some(taken as f64 / expected as f64 * 100.0)
}

/// Seven chart rows, today first.
pub fn weekly_adherence_chart(store: &Store, today: NaiveDate) -> Vec<DailyAdherence> {
    window_days(today, ADHERENCE_WINDOW_DAYS)
        .map(|date| DailyAdherence {
            date,
            percent: adherence_pct_on(store, date)
                .map_or(100, |pct| pct.round_ties_even() as u32),
        })
        .collect()
}
