//! File-backed JSON store document.
//!
//! # Responsibility
//! - Load the store document from disk, distinguishing missing and corrupt files.
//! - Save the full document after each mutation.
//! - Move corrupt documents aside so their content is never lost.
//!
//! # Invariants
//! - Persisted field names stay `drugs`, `dose_logs`, `symptoms`.
//! - Loaded symptom logs satisfy the same intensity rule as inserts.
//! - No locking or atomic rename; one process owns the file.

use super::{PersistError, PersistResult, StoreRepository};
use crate::model::dose_log::DoseLog;
use crate::model::drug::Drug;
use crate::model::symptom::SymptomLog;
use crate::store::record_store::Store;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// On-disk shape of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub drugs: Vec<Drug>,
    #[serde(default)]
    pub dose_logs: Vec<DoseLog>,
    #[serde(default)]
    pub symptoms: Vec<SymptomLog>,
}

impl StoreDocument {
    pub fn from_store(store: &Store) -> Self {
        Self {
            drugs: store.drugs().to_vec(),
            dose_logs: store.dose_logs().to_vec(),
            symptoms: store.symptoms().to_vec(),
        }
    }

    /// Converts into a store, rejecting records that break store invariants.
    pub fn into_store(self) -> PersistResult<Store> {
        if let Some(bad) = self.symptoms.iter().find(|log| !log.has_valid_intensity()) {
            return Err(PersistError::InvalidRecord(format!(
                "symptom `{}` on {} has intensity {} outside 1..5",
                bad.symptom, bad.date, bad.intensity
            )));
        }
        Ok(Store::from_parts(self.drugs, self.dose_logs, self.symptoms))
    }
}

/// How the store came into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No data file existed; the store starts empty.
    Missing,
    /// The data file was read successfully.
    Loaded,
    /// The data file was unusable and moved to `backup`; the store starts empty.
    Recovered { backup: PathBuf, reason: String },
}

#[derive(Debug)]
pub struct LoadedStore {
    pub store: Store,
    pub outcome: LoadOutcome,
}

/// Reads the store document at `path`.
///
/// # Errors
/// - `PersistError::Io` when the file exists but cannot be read.
/// - `PersistError::Corrupt` when the content is not a valid document.
/// - `PersistError::InvalidRecord` when a record breaks store invariants.
pub fn load_store(path: impl AsRef<Path>) -> PersistResult<LoadedStore> {
    let path = path.as_ref();
    let started_at = Instant::now();

    if !path.exists() {
        info!("event=store_load module=persist status=ok outcome=missing");
        return Ok(LoadedStore {
            store: Store::new(),
            outcome: LoadOutcome::Missing,
        });
    }

    let result = fs::read_to_string(path)
        .map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|raw| {
            serde_json::from_str::<StoreDocument>(&raw).map_err(|source| PersistError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
        })
        .and_then(StoreDocument::into_store);

    match result {
        Ok(store) => {
            info!(
                "event=store_load module=persist status=ok outcome=loaded drugs={} dose_logs={} symptoms={} duration_ms={}",
                store.drugs().len(),
                store.dose_logs().len(),
                store.symptoms().len(),
                started_at.elapsed().as_millis()
            );
            Ok(LoadedStore {
                store,
                outcome: LoadOutcome::Loaded,
            })
        }
        Err(err) => {
            error!(
                "event=store_load module=persist status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Loads the store, moving a corrupt document aside instead of failing.
///
/// Read failures (`PersistError::Io`) are still returned, because saving
/// over an unreadable file could destroy data the user can still rescue.
pub fn load_store_or_recover(path: impl AsRef<Path>) -> PersistResult<LoadedStore> {
    let path = path.as_ref();
    match load_store(path) {
        Ok(loaded) => Ok(loaded),
        Err(err @ (PersistError::Corrupt { .. } | PersistError::InvalidRecord(_))) => {
            let backup = backup_path(path);
            fs::rename(path, &backup).map_err(|source| PersistError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            warn!(
                "event=store_recover module=persist status=ok backup={}",
                backup.display()
            );
            Ok(LoadedStore {
                store: Store::new(),
                outcome: LoadOutcome::Recovered {
                    backup,
                    reason: err.to_string(),
                },
            })
        }
        Err(err) => Err(err),
    }
}

/// Overwrites the document at `path` with the full store.
pub fn save_store(path: impl AsRef<Path>, store: &Store) -> PersistResult<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let encoded = serde_json::to_string_pretty(&StoreDocument::from_store(store))
        .map_err(PersistError::Encode)?;
    fs::write(path, encoded).map_err(io_err)?;

    info!(
        "event=store_save module=persist status=ok drugs={} dose_logs={} symptoms={}",
        store.drugs().len(),
        store.dose_logs().len(),
        store.symptoms().len()
    );
    Ok(())
}

/// Picks `<file>.corrupt-<millis stamp>`, adding `-N` until the name is free.
fn backup_path(path: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f");
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "medipal_data.json".to_string());
    let base = format!("{file_name}.corrupt-{stamp}");

    let mut candidate = path.with_file_name(&base);
    let mut attempt = 1u32;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{base}-{attempt}"));
        attempt += 1;
    }
    candidate
}

/// JSON file implementation of `StoreRepository`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreRepository for JsonFileRepository {
    fn load(&self) -> PersistResult<Store> {
        load_store(&self.path).map(|loaded| loaded.store)
    }

    fn save(&self, store: &Store) -> PersistResult<()> {
        save_store(&self.path, store)
    }
}
