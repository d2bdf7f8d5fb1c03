//! Record model for drugs, dose logs and symptom logs.
//!
//! # Responsibility
//! - Define the passive records owned by the store.
//! - Keep the persisted text shape (`YYYY-MM-DD`, `HH:MM`) in one place.
//!
//! # Invariants
//! - Drug names and symptom names compare case-insensitively.
//! - Dose statuses are exactly `TAKEN` or `MISSED`.

pub mod dose_log;
pub mod drug;
pub mod format;
pub mod symptom;
