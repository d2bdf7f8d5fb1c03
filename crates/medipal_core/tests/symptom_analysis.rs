use chrono::{Days, NaiveDate, NaiveTime};
use medipal_core::{
    adherence_pct_on, analyze_symptom, symptom_avg_over, symptom_daily_averages,
    symptom_short_trend, weekly_adherence_chart, DoseStatus, Drug, Store, SymptomLog,
    TrendDirection,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn days_ago(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).unwrap()
}

fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

/// Logs `intensities` on consecutive days, oldest first, ending yesterday.
fn store_with_series(symptom: &str, intensities: &[u8]) -> Store {
    let mut store = Store::new();
    let count = intensities.len() as u64;
    for (offset, &intensity) in intensities.iter().enumerate() {
        let date = days_ago(count - offset as u64);
        store
            .add_symptom(SymptomLog::new(date, symptom, intensity))
            .unwrap();
    }
    store
}

#[test]
fn short_trend_detects_improvement_past_threshold() {
    // recent [5, 2, 1] = 2.67 vs previous [2, 3, 4] = 3.0
    let store = store_with_series("headache", &[2, 3, 4, 5, 2, 1]);
    let trend = symptom_short_trend(&store, "Headache");
    assert_eq!(trend.direction, TrendDirection::Down);
    assert_eq!(trend.delta, -0.33);
}

#[test]
fn short_trend_detects_worsening() {
    let store = store_with_series("nausea", &[1, 1, 1, 2, 2, 3]);
    let trend = symptom_short_trend(&store, "nausea");
    assert_eq!(trend.direction, TrendDirection::Up);
    assert_eq!(trend.delta, 1.33);
}

#[test]
fn short_trend_within_threshold_is_flat() {
    // recent [4, 2, 3] vs previous [3, 2, 4]
    let store = store_with_series("fatigue", &[3, 2, 4, 4, 2, 3]);
    let trend = symptom_short_trend(&store, "fatigue");
    assert_eq!(trend.direction, TrendDirection::Flat);
    assert_eq!(trend.delta, 0.0);
}

#[test]
fn short_trend_needs_at_least_four_entries() {
    let store = store_with_series("headache", &[1, 5, 5]);
    let trend = symptom_short_trend(&store, "headache");
    assert_eq!(trend.direction, TrendDirection::Flat);
    assert_eq!(trend.delta, 0.0);
}

#[test]
fn short_trend_uses_partial_previous_window() {
    // recent [1, 2, 3] = 2.0 vs previous [4]
    let store = store_with_series("headache", &[4, 1, 2, 3]);
    let trend = symptom_short_trend(&store, "headache");
    assert_eq!(trend.direction, TrendDirection::Down);
    assert_eq!(trend.delta, -2.0);
}

#[test]
fn short_trend_orders_entries_by_date_not_insertion() {
    let mut store = Store::new();
    for (offset, intensity) in [(1, 5), (2, 5), (3, 5), (4, 1), (5, 1), (6, 1)] {
        store
            .add_symptom(SymptomLog::new(days_ago(offset), "cramps", intensity))
            .unwrap();
    }
    // Chronologically: 1, 1, 1, 5, 5, 5.
    let trend = symptom_short_trend(&store, "cramps");
    assert_eq!(trend.direction, TrendDirection::Up);
    assert_eq!(trend.delta, 4.0);
}

#[test]
fn symptom_average_covers_window_including_today() {
    let mut store = Store::new();
    for (date, intensity) in [
        (today(), 2),
        (days_ago(6), 3),
        (days_ago(6), 3),
        (days_ago(7), 5),
    ] {
        store
            .add_symptom(SymptomLog::new(date, "Headache", intensity))
            .unwrap();
    }

    assert_eq!(symptom_avg_over(&store, "headache", 7, today()), Some(2.67));
    assert_eq!(symptom_avg_over(&store, "headache", 14, today()), Some(3.25));
    assert_eq!(symptom_avg_over(&store, "headache", 1, today()), Some(2.0));
}

#[test]
fn symptom_average_without_entries_is_none() {
    let store = store_with_series("headache", &[3]);
    assert_eq!(symptom_avg_over(&store, "dizziness", 7, today()), None);
}

#[test]
fn adherence_pct_on_is_none_without_schedule() {
    let mut store = Store::new();
    assert_eq!(adherence_pct_on(&store, today()), None);

    store.add_drug(Drug::new("Metformin", "500mg", [at(8), at(12), at(20)], today()));
    store.mark_dose(today(), at(12), "Metformin", DoseStatus::Taken, None);
    let pct = adherence_pct_on(&store, today()).unwrap();
    assert!((pct - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn analysis_buckets_symptoms_by_daily_adherence() {
    let mut store = Store::new();
    store.add_drug(Drug::new("Metformin", "500mg", [at(8)], days_ago(13)));
    store.mark_dose(days_ago(1), at(8), "Metformin", DoseStatus::Taken, None);
    store.mark_dose(days_ago(2), at(8), "Metformin", DoseStatus::Missed, None);

    for (date, intensity) in [
        (days_ago(1), 2),
        (days_ago(2), 4),
        (days_ago(2), 5),
        (days_ago(20), 1),
    ] {
        store
            .add_symptom(SymptomLog::new(date, "headache", intensity))
            .unwrap();
    }

    let analysis = analyze_symptom(&store, "headache", today());
    assert_eq!(analysis.symptom, "headache");
    assert_eq!(analysis.avg_7d, Some(3.67));
    assert_eq!(analysis.avg_14d, Some(3.67));
    assert_eq!(analysis.high_adherence_avg, Some(2.0));
    assert_eq!(analysis.low_adherence_avg, Some(4.5));
    assert!(analysis.low_adherence_worse());
    // Chronologically 1, 4, 5, 2: recent [4, 5, 2] vs previous [1].
    assert_eq!(analysis.trend.direction, TrendDirection::Up);
    assert_eq!(analysis.trend.delta, 2.67);
}

#[test]
fn analysis_skips_days_without_schedule() {
    let mut store = Store::new();
    store
        .add_symptom(SymptomLog::new(today(), "headache", 3))
        .unwrap();

    let analysis = analyze_symptom(&store, "headache", today());
    assert_eq!(analysis.avg_7d, Some(3.0));
    assert_eq!(analysis.low_adherence_avg, None);
    assert_eq!(analysis.high_adherence_avg, None);
    assert!(!analysis.low_adherence_worse());
}

#[test]
fn weekly_chart_lists_today_first_with_full_marks_for_empty_days() {
    let mut store = Store::new();
    store.add_drug(Drug::new("Metformin", "500mg", [at(8), at(20)], days_ago(1)));
    store.mark_dose(today(), at(8), "Metformin", DoseStatus::Taken, None);

    let chart = weekly_adherence_chart(&store, today());
    assert_eq!(chart.len(), 7);
    assert_eq!(chart[0].date, today());
    assert_eq!(chart[0].percent, 50);
    assert_eq!(chart[1].percent, 0);
    assert!(chart[2..].iter().all(|row| row.percent == 100));
}

#[test]
fn daily_symptom_averages_mark_missing_days() {
    let mut store = Store::new();
    store
        .add_symptom(SymptomLog::new(today(), "headache", 2))
        .unwrap();
    store
        .add_symptom(SymptomLog::new(today(), "headache", 3))
        .unwrap();

    let rows = symptom_daily_averages(&store, "headache", today(), 3);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].average, Some(2.5));
    assert_eq!(rows[1].average, None);
    assert_eq!(rows[2].date, days_ago(2));
}

#[test]
fn exact_halves_round_to_even() {
    let mut store = Store::new();
    let times = (8..16).map(at);
    store.add_drug(Drug::new("Levothyroxine", "50mcg", times, days_ago(1)));
    store.mark_dose(today(), at(8), "Levothyroxine", DoseStatus::Taken, None);
    for intensity in [3, 3, 3, 2, 2, 2, 1, 1] {
        store
            .add_symptom(SymptomLog::new(today(), "dizziness", intensity))
            .unwrap();
    }

    // 1 of 16 doses = 6.25%.
    let summary = store.adherence_last_7_days(today());
    assert_eq!((summary.taken, summary.expected), (1, 16));
    assert_eq!(summary.percent, 6.2);
    // 1 of 8 doses today = 12.5%.
    assert_eq!(weekly_adherence_chart(&store, today())[0].percent, 12);
    // 17 / 8 = 2.125.
    assert_eq!(symptom_avg_over(&store, "dizziness", 7, today()), Some(2.12));
}
