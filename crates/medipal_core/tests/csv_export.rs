use chrono::{NaiveDate, NaiveTime};
use medipal_core::{export_csv, write_dose_csv, DoseStatus, Store, SymptomLog};
use std::fs;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

#[test]
fn dose_csv_has_header_and_empty_notes() {
    let mut store = Store::new();
    store.mark_dose(day(), at(8), "Amoxicillin", DoseStatus::Taken, None);
    store.mark_dose(
        day(),
        at(20),
        "Amoxicillin",
        DoseStatus::Missed,
        Some("late, tired".to_string()),
    );

    let mut out = Vec::new();
    write_dose_csv(&mut out, store.dose_logs()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "date,time,drug,status,note\r\n\
         2024-06-15,08:00,Amoxicillin,TAKEN,\r\n\
         2024-06-15,20:00,Amoxicillin,MISSED,\"late, tired\"\r\n"
    );
}

#[test]
fn export_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let doses = dir.path().join("dose_logs.csv");
    let symptoms = dir.path().join("symptom_logs.csv");

    let mut store = Store::new();
    store
        .add_symptom(SymptomLog::new(day(), "headache", 3).with_note("said \"ouch\""))
        .unwrap();
    export_csv(&store, &doses, &symptoms).unwrap();

    assert_eq!(
        fs::read_to_string(&doses).unwrap(),
        "date,time,drug,status,note\r\n"
    );
    assert_eq!(
        fs::read_to_string(&symptoms).unwrap(),
        "date,symptom,intensity,note\r\n2024-06-15,headache,3,\"said \"\"ouch\"\"\"\r\n"
    );
}
