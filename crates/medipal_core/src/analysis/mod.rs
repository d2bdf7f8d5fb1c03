//! Pure read-only analysis over a store snapshot.
//!
//! # Responsibility
//! - Compute adherence percentages and symptom statistics.
//! - Feed the chart rows printed by the CLI.
//!
//! # Invariants
//! - Functions never mutate the store.
//! - "Today" is always passed in by the caller.

pub mod adherence;
pub mod symptom;
