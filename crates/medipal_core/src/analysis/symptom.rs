//! Symptom averages, short-term trend and adherence comparison.
//!
//! # Invariants
//! - Symptom names match case-insensitively.
//! - Every average reported here is rounded to two decimals.
//! - "No data" is `None`, never a zero average.

use crate::analysis::adherence::adherence_pct_on;
use crate::model::symptom::SymptomLog;
use crate::store::record_store::{round_to, window_days, Store};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Minimum |delta| between the trend windows that counts as a change.
pub const TREND_THRESHOLD: f64 = 0.3;
/// Entries in each trend window.
pub const TREND_WINDOW: usize = 3;
/// Daily adherence below this percentage counts as a low-adherence day.
pub const LOW_ADHERENCE_PCT: f64 = 80.0;
/// Days scanned by the adherence/symptom comparison.
pub const COMPARISON_DAYS: u64 = 14;

const MIN_TREND_ENTRIES: usize = 4;

/// Direction of the short-term symptom trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    /// Recent entries are more intense (worsening).
    Up,
    /// Recent entries are less intense (improving).
    Down,
    Flat,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

impl Display for TrendDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortTrend {
    pub direction: TrendDirection,
    /// `mean(recent) - mean(previous)`, two decimals.
    pub delta: f64,
}

impl ShortTrend {
    fn flat() -> Self {
        Self {
            direction: TrendDirection::Flat,
            delta: 0.0,
        }
    }
}

/// Aggregated insight for one symptom.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomAnalysis {
    pub symptom: String,
    pub avg_7d: Option<f64>,
    pub avg_14d: Option<f64>,
    pub trend: ShortTrend,
    /// Mean intensity on days with adherence below 80%.
    pub low_adherence_avg: Option<f64>,
    /// Mean intensity on days with adherence of at least 80%.
    pub high_adherence_avg: Option<f64>,
}

impl SymptomAnalysis {
    /// Whether both buckets have data and low-adherence days are worse.
    pub fn low_adherence_worse(&self) -> bool {
        matches!(
            (self.low_adherence_avg, self.high_adherence_avg),
            (Some(low), Some(high)) if low > high
        )
    }
}

/// Chart row for one day of the symptom trend view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySymptomAverage {
    pub date: NaiveDate,
    /// Unrounded day mean; `None` when nothing was logged.
    pub average: Option<f64>,
}

fn intensities_on<'a>(
    store: &'a Store,
    symptom: &'a str,
    date: NaiveDate,
) -> impl Iterator<Item = u8> + 'a {
    store
        .symptoms()
        .iter()
        .filter(move |log| log.date == date && log.is_symptom(symptom))
        .map(|log| log.intensity)
}

fn mean(values: &[u8]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u32 = values.iter().map(|&value| u32::from(value)).sum();
    Some(f64::from(sum) / values.len() as f64)
}

/// Mean intensity over the last `days` days including `today`.
pub fn symptom_avg_over(store: &Store, symptom: &str, days: u64, today: NaiveDate) -> Option<f64> {
    let values: Vec<u8> = window_days(today, days)
        .flat_map(|date| intensities_on(store, symptom, date))
        .collect();
    mean(&values).map(|avg| round_to(avg, 2))
}

/// Compares the last three entries against the three before them.
pub fn symptom_short_trend(store: &Store, symptom: &str) -> ShortTrend {
    let mut logs: Vec<&SymptomLog> = store
        .symptoms()
        .iter()
        .filter(|log| log.is_symptom(symptom))
        .collect();
    if logs.len() < MIN_TREND_ENTRIES {
        return ShortTrend::flat();
    }
    logs.sort_by_key(|log| log.date);

    let split = logs.len() - TREND_WINDOW;
    let recent: Vec<u8> = logs[split..].iter().map(|log| log.intensity).collect();
    let previous: Vec<u8> = logs[split.saturating_sub(TREND_WINDOW)..split]
        .iter()
        .map(|log| log.intensity)
        .collect();

    let (Some(recent_avg), Some(previous_avg)) = (mean(&recent), mean(&previous)) else {
        return ShortTrend::flat();
    };
    let delta = round_to(recent_avg - previous_avg, 2);
    let direction = if delta > TREND_THRESHOLD {
        TrendDirection::Up
    } else if delta < -TREND_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };
    ShortTrend { direction, delta }
}

/// Builds the full insight for one symptom relative to `today`.
pub fn analyze_symptom(store: &Store, symptom: &str, today: NaiveDate) -> SymptomAnalysis {
    let mut low_days = Vec::new();
    let mut high_days = Vec::new();
    for date in window_days(today, COMPARISON_DAYS) {
        let day_values: Vec<u8> = intensities_on(store, symptom, date).collect();
        if day_values.is_empty() {
            continue;
        }
        let Some(pct) = adherence_pct_on(store, date) else {
            continue;
        };
        if pct < LOW_ADHERENCE_PCT {
            low_days.extend(day_values);
        } else {
            high_days.extend(day_values);
        }
    }

    SymptomAnalysis {
        symptom: symptom.to_string(),
        avg_7d: symptom_avg_over(store, symptom, 7, today),
        avg_14d: symptom_avg_over(store, symptom, COMPARISON_DAYS, today),
        trend: symptom_short_trend(store, symptom),
        low_adherence_avg: mean(&low_days).map(|avg| round_to(avg, 2)),
        high_adherence_avg: mean(&high_days).map(|avg| round_to(avg, 2)),
    }
}

/// Per-day mean intensity, today first.
pub fn symptom_daily_averages(
    store: &Store,
    symptom: &str,
    today: NaiveDate,
    days: u64,
) -> Vec<DailySymptomAverage> {
    window_days(today, days)
        .map(|date| {
            let values: Vec<u8> = intensities_on(store, symptom, date).collect();
            DailySymptomAverage {
                date,
                average: mean(&values),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::mean;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1, 2]), Some(1.5));
    }
}
