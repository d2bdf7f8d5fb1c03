//! CSV export of dose and symptom logs.
//!
//! # Invariants
//! - Headers are `date,time,drug,status,note` and `date,symptom,intensity,note`.
//! - A missing note is written as an empty field.
//! - Fields with a comma, quote, CR or LF are quoted; rows end with CRLF.

use crate::model::dose_log::DoseLog;
use crate::model::format::{format_date, format_time};
use crate::model::symptom::SymptomLog;
use crate::store::record_store::Store;
use log::info;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const DOSE_CSV_HEADER: [&str; 5] = ["date", "time", "drug", "status", "note"];
pub const SYMPTOM_CSV_HEADER: [&str; 4] = ["date", "symptom", "intensity", "note"];
pub const DEFAULT_DOSE_CSV: &str = "dose_logs.csv";
pub const DEFAULT_SYMPTOM_CSV: &str = "symptom_logs.csv";

fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")
}

pub fn write_dose_csv<W: Write>(writer: &mut W, logs: &[DoseLog]) -> io::Result<()> {
    write_row(writer, &DOSE_CSV_HEADER)?;
    for log in logs {
        let date = format_date(log.date);
        let time = format_time(log.time);
        write_row(
            writer,
            &[
                date.as_str(),
                time.as_str(),
                log.drug_name.as_str(),
                log.status.as_str(),
                log.note.as_deref().unwrap_or(""),
            ],
        )?;
    }
    Ok(())
}

pub fn write_symptom_csv<W: Write>(writer: &mut W, logs: &[SymptomLog]) -> io::Result<()> {
    write_row(writer, &SYMPTOM_CSV_HEADER)?;
    for log in logs {
        let date = format_date(log.date);
        let intensity = log.intensity.to_string();
        write_row(
            writer,
            &[
                date.as_str(),
                log.symptom.as_str(),
                intensity.as_str(),
                log.note.as_deref().unwrap_or(""),
            ],
        )?;
    }
    Ok(())
}

/// Writes both CSV files, replacing existing ones.
pub fn export_csv(
    store: &Store,
    doses_path: impl AsRef<Path>,
    symptoms_path: impl AsRef<Path>,
) -> io::Result<()> {
    let mut doses = BufWriter::new(File::create(doses_path.as_ref())?);
    write_dose_csv(&mut doses, store.dose_logs())?;
    doses.flush()?;

    let mut symptoms = BufWriter::new(File::create(symptoms_path.as_ref())?);
    write_symptom_csv(&mut symptoms, store.symptoms())?;
    symptoms.flush()?;

    info!(
        "event=csv_export module=export status=ok dose_rows={} symptom_rows={}",
        store.dose_logs().len(),
        store.symptoms().len()
    );
    Ok(())
}
