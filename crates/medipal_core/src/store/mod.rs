//! Record store and its query/mutation operations.
//!
//! # Responsibility
//! - Hold the single mutable state of the process.
//! - Keep schedule and adherence derivation next to the data it reads.
//!
//! # Invariants
//! - Mutations that fail leave the store unchanged.
//! - Callers only receive borrowed views or owned copies of records.

pub mod record_store;
