//! JSON document persistence for the record store.
//!
//! # Responsibility
//! - Serialize the whole store into one JSON document and back.
//! - Tell "no file yet" apart from "file exists but is unusable".
//!
//! # Invariants
//! - Every save rewrites the full document.
//! - A corrupt document is never silently replaced; it is reported or moved
//!   aside before an empty store is used.

use crate::store::record_store::Store;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::{
    load_store, load_store_or_recover, save_store, JsonFileRepository, LoadOutcome, LoadedStore,
    StoreDocument,
};

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidRecord(String),
    Encode(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot access `{}`: {source}", path.display()),
            Self::Corrupt { path, source } => {
                write!(f, "data file `{}` is corrupt: {source}", path.display())
            }
            Self::InvalidRecord(message) => write!(f, "invalid persisted record: {message}"),
            Self::Encode(err) => write!(f, "failed to encode store: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::InvalidRecord(_) => None,
            Self::Encode(err) => Some(err),
        }
    }
}

/// Storage contract used by the service layer.
pub trait StoreRepository {
    fn load(&self) -> PersistResult<Store>;
    fn save(&self, store: &Store) -> PersistResult<()>;
}
