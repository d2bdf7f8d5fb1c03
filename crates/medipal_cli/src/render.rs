//! Text rendering of store views and analysis results.

use crate::paint::{Color, Painter};
use chrono::NaiveDate;
use medipal_core::{
    format_date, format_time, AdherenceSummary, DailyAdherence, DailySymptomAverage, DoseStatus,
    Drug, ScheduledDose, Store, SymptomAnalysis, TrendDirection,
};

const RULE_WIDTH: usize = 72;

pub fn drug_table(painter: &Painter, drugs: &[&Drug], show_ids: bool) {
    if drugs.is_empty() {
        println!("{}", painter.paint("(No drugs)", Color::Gray, false));
        return;
    }
    painter.heading("\n# Drugs");
    println!("Idx | Name | Dosage | Times | Start -> End | Notes");
    println!("{}", "-".repeat(RULE_WIDTH));
    for (index, drug) in drugs.iter().enumerate() {
        let times: Vec<String> = drug.times.iter().map(|time| format_time(*time)).collect();
        let end = drug
            .end_date
            .map(format_date)
            .unwrap_or_else(|| "open-ended".to_string());
        println!(
            "{index:>3} | {} | {} | {} | {} -> {end} | {}",
            drug.name,
            drug.dosage,
            times.join(", "),
            format_date(drug.start_date),
            drug.notes.as_deref().unwrap_or("")
        );
        if show_ids {
            println!("    | id={}", drug.id);
        }
    }
}

pub fn schedule_table(
    painter: &Painter,
    store: &Store,
    date: NaiveDate,
    schedule: &[ScheduledDose<'_>],
) {
    if schedule.is_empty() {
        println!("{}", painter.paint("(No scheduled doses)", Color::Gray, false));
        return;
    }
    painter.heading(&format!("\n# Schedule for {}", format_date(date)));
    println!("Idx | Time | Drug (dosage) | Status");
    println!("{}", "-".repeat(54));
    for (index, dose) in schedule.iter().enumerate() {
        let status = match store.get_dose_status(date, dose.time, &dose.drug.name) {
            Some(DoseStatus::Taken) => painter.paint("TAKEN", Color::Green, true),
            Some(DoseStatus::Missed) => painter.paint("MISSED", Color::Red, true),
            None => painter.paint("-", Color::Gray, false),
        };
        println!(
            "{index:>3} | {} | {} ({}) | {status}",
            format_time(dose.time),
            dose.drug.name,
            dose.drug.dosage
        );
    }
}

pub fn adherence_summary(painter: &Painter, summary: &AdherenceSummary) {
    println!(
        "Taken {} / Expected {} = {}",
        summary.taken,
        summary.expected,
        painter.paint(&format!("{}%", summary.percent), Color::Cyan, true)
    );
}

pub fn weekly_chart(painter: &Painter, rows: &[DailyAdherence]) {
    println!(
        "{}",
        painter.paint("Adherence last 7 days (today first)", Color::Magenta, true)
    );
    for row in rows {
        let bar = "#".repeat((row.percent / 5) as usize);
        let color = if row.percent >= 90 {
            Color::Green
        } else if row.percent >= 60 {
            Color::Yellow
        } else {
            Color::Red
        };
        println!(
            "{} | {:>3}% | {}",
            format_date(row.date),
            row.percent,
            painter.paint(&bar, color, true)
        );
    }
}

pub fn symptom_chart(painter: &Painter, symptom: &str, rows: &[DailySymptomAverage]) {
    println!(
        "{}",
        painter.paint(
            &format!("Symptom trend: {symptom} (last {} days)", rows.len()),
            Color::Cyan,
            true
        )
    );
    for row in rows {
        let average = row.average.unwrap_or(0.0);
        let bar = "#".repeat(average.round() as usize);
        let color = if average <= 2.0 {
            Color::Green
        } else if average <= 3.5 {
            Color::Yellow
        } else {
            Color::Red
        };
        println!(
            "{} | {average:.1} | {}",
            format_date(row.date),
            painter.paint(&bar, color, true)
        );
    }
}

fn optional_avg(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |avg| avg.to_string())
}

pub fn symptom_analysis(painter: &Painter, analysis: &SymptomAnalysis) {
    println!("{}", painter.paint("\n== Symptom analysis ==", Color::Magenta, true));
    println!("Symptom: {}", painter.paint(&analysis.symptom, Color::Cyan, true));
    println!("Avg intensity (7d):  {}", optional_avg(analysis.avg_7d));
    println!("Avg intensity (14d): {}", optional_avg(analysis.avg_14d));
    let trend = match analysis.trend.direction {
        TrendDirection::Up => painter.paint("worsening ↑", Color::Red, true),
        TrendDirection::Down => painter.paint("improving ↓", Color::Green, true),
        TrendDirection::Flat => painter.paint("stable →", Color::Yellow, true),
    };
    println!(
        "Short-term trend (last 3 vs prev 3): {trend} (Δ={:+.2})",
        analysis.trend.delta
    );
    match (analysis.low_adherence_avg, analysis.high_adherence_avg) {
        (Some(low), Some(high)) => {
            println!("When adherence <80%:  avg={low}");
            println!("When adherence ≥80%:  avg={high}");
            if analysis.low_adherence_worse() {
                painter.warn(
                    "Hint: symptoms are higher on low-adherence days. Try improving dose adherence.",
                );
            }
        }
        _ => painter.warn(
            "Hint: need more data to compare symptom vs adherence (last 14 days).",
        ),
    }
}
