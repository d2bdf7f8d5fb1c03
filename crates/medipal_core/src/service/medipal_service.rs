//! Use-case service over the record store.
//!
//! # Responsibility
//! - Provide the mutating entry points used by the CLI.
//! - Persist the store through a `StoreRepository` after every mutation.
//!
//! # Invariants
//! - A rejected mutation neither changes the store nor writes the file.
//! - Index based operations resolve against the same view the CLI printed.

use crate::model::dose_log::DoseStatus;
use crate::model::drug::{Drug, DrugId};
use crate::model::symptom::SymptomLog;
use crate::persist::{PersistError, StoreRepository};
use crate::store::record_store::{Store, StoreError};
use chrono::{Days, NaiveDate, NaiveTime};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Invalid status or intensity.
    Store(StoreError),
    Persist(PersistError),
    DrugNotFound(DrugId),
    /// Display or schedule index outside the list the user saw.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
            Self::DrugNotFound(id) => write!(f, "drug not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range (0..{len})")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::DrugNotFound(_) | Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PersistError> for ServiceError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Dose that was just marked through `mark_scheduled_dose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedDose {
    pub drug_name: String,
    pub time: NaiveTime,
    pub status: DoseStatus,
}

/// Store facade that saves after each mutation.
pub struct MediPalService<R: StoreRepository> {
    repo: R,
    store: Store,
}

impl<R: StoreRepository> MediPalService<R> {
    /// Loads the store through `repo`.
    pub fn open(repo: R) -> ServiceResult<Self> {
        let store = repo.load()?;
        Ok(Self { repo, store })
    }

    /// Wraps an already loaded store.
    pub fn with_store(repo: R, store: Store) -> Self {
        Self { repo, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn persist(&self) -> ServiceResult<()> {
        self.repo.save(&self.store).map_err(|err| {
            warn!("event=store_save module=service status=error error={err}");
            ServiceError::from(err)
        })
    }

    pub fn add_drug(&mut self, drug: Drug) -> ServiceResult<DrugId> {
        let id = self.store.add_drug(drug);
        self.persist()?;
        info!("event=drug_add module=service status=ok");
        Ok(id)
    }

    pub fn delete_drug(&mut self, id: DrugId) -> ServiceResult<Drug> {
        let removed = self
            .store
            .remove_drug_by_id(id)
            .ok_or(ServiceError::DrugNotFound(id))?;
        self.persist()?;
        info!("event=drug_delete module=service status=ok");
        Ok(removed)
    }

    /// Deletes the drug shown at `display_index` of `Store::list_drugs`.
    pub fn delete_drug_at_display(&mut self, display_index: usize) -> ServiceResult<Drug> {
        let len = self.store.drugs().len();
        let removed = self
            .store
            .remove_drug_at_display(display_index)
            .ok_or(ServiceError::IndexOutOfRange {
                index: display_index,
                len,
            })?;
        self.persist()?;
        info!("event=drug_delete module=service status=ok mode=display_index");
        Ok(removed)
    }

    pub fn mark_dose(
        &mut self,
        date: NaiveDate,
        time: NaiveTime,
        drug_name: &str,
        status: DoseStatus,
        note: Option<String>,
    ) -> ServiceResult<()> {
        self.store.mark_dose(date, time, drug_name, status, note);
        self.persist()?;
        info!("event=dose_mark module=service status=ok dose_status={status}");
        Ok(())
    }

    /// Marks the dose at `schedule_index` of `Store::daily_schedule(date)`.
    pub fn mark_scheduled_dose(
        &mut self,
        date: NaiveDate,
        schedule_index: usize,
        status: DoseStatus,
        note: Option<String>,
    ) -> ServiceResult<MarkedDose> {
        let (drug_name, time) = {
            let schedule = self.store.daily_schedule(date);
            let dose = schedule
                .get(schedule_index)
                .ok_or(ServiceError::IndexOutOfRange {
                    index: schedule_index,
                    len: schedule.len(),
                })?;
            (dose.drug.name.clone(), dose.time)
        };
        self.mark_dose(date, time, &drug_name, status, note)?;
        Ok(MarkedDose {
            drug_name,
            time,
            status,
        })
    }

    pub fn add_symptom(&mut self, log: SymptomLog) -> ServiceResult<()> {
        self.store.add_symptom(log)?;
        self.persist()?;
        info!("event=symptom_add module=service status=ok");
        Ok(())
    }

    /// Seeds demo drugs and symptoms when no drug is registered yet.
    ///
    /// Returns whether anything was added.
    pub fn ensure_sample(&mut self, today: NaiveDate) -> ServiceResult<bool> {
        if !self.store.drugs().is_empty() {
            return Ok(false);
        }
        let days_before = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
        let days_after = |n: u64| today.checked_add_days(Days::new(n)).unwrap_or(today);
        let at = |hour: u32| NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default();

        self.store.add_drug(
            Drug::new("Amoxicillin", "500mg", [at(8), at(20)], days_before(1))
                .with_end_date(days_after(5))
                .with_notes("After meal"),
        );
        self.store.add_drug(
            Drug::new("Vitamin D", "1000 IU", [at(9)], days_before(10)).with_notes("Morning"),
        );
        for (offset, intensity) in [(3, 2), (2, 3), (1, 4)] {
            self.store
                .add_symptom(SymptomLog::new(days_before(offset), "headache", intensity))?;
        }
        self.persist()?;
        info!("event=sample_seed module=service status=ok");
        Ok(true)
    }
}
