//! Flat-file exports of the log collections.

pub mod csv;
