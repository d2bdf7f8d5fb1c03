//! Core domain logic for MediPal.
//! This crate is the single source of truth for record, schedule and
//! adherence invariants.

pub mod analysis;
pub mod export;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod store;

pub use analysis::adherence::{adherence_pct_on, weekly_adherence_chart, DailyAdherence};
pub use analysis::symptom::{
    analyze_symptom, symptom_avg_over, symptom_daily_averages, symptom_short_trend,
    DailySymptomAverage, ShortTrend, SymptomAnalysis, TrendDirection, TREND_THRESHOLD,
};
pub use export::csv::{export_csv, write_dose_csv, write_symptom_csv};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::dose_log::{DoseLog, DoseStatus, InvalidDoseStatus};
pub use model::drug::{Drug, DrugId};
pub use model::format::{
    format_date, format_time, parse_date, parse_time, parse_time_list, ParseError,
};
pub use model::symptom::{SymptomLog, INTENSITY_RANGE};
pub use persist::{
    load_store, load_store_or_recover, save_store, JsonFileRepository, LoadOutcome, LoadedStore,
    PersistError, PersistResult, StoreDocument, StoreRepository,
};
pub use service::medipal_service::{MarkedDose, MediPalService, ServiceError, ServiceResult};
pub use store::record_store::{AdherenceSummary, ScheduledDose, Store, StoreError, StoreResult};

