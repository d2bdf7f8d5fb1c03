use chrono::{Days, NaiveDate, NaiveTime};
use medipal_core::{
    DoseStatus, Drug, MediPalService, PersistResult, ServiceError, Store, StoreError,
    StoreRepository, SymptomLog,
};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

/// In-memory repository that records every save.
#[derive(Default)]
struct MemoryRepository {
    initial: Store,
    saves: Cell<usize>,
    last_saved: RefCell<Option<Store>>,
}

impl StoreRepository for MemoryRepository {
    fn load(&self) -> PersistResult<Store> {
        Ok(self.initial.clone())
    }

    fn save(&self, store: &Store) -> PersistResult<()> {
        self.saves.set(self.saves.get() + 1);
        *self.last_saved.borrow_mut() = Some(store.clone());
        Ok(())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

fn open_service() -> MediPalService<MemoryRepository> {
    MediPalService::open(MemoryRepository::default()).unwrap()
}

#[test]
fn every_mutation_is_saved() {
    let mut service = open_service();
    let id = service
        .add_drug(Drug::new("Metformin", "500mg", [at(8)], today()))
        .unwrap();
    service
        .mark_dose(today(), at(8), "Metformin", DoseStatus::Taken, None)
        .unwrap();
    service
        .add_symptom(SymptomLog::new(today(), "nausea", 2))
        .unwrap();
    service.delete_drug(id).unwrap();

    let repo = service.repository();
    assert_eq!(repo.saves.get(), 4);
    assert_eq!(repo.last_saved.borrow().as_ref(), Some(service.store()));
}

#[test]
fn rejected_mutations_do_not_save() {
    let mut service = open_service();

    let err = service
        .add_symptom(SymptomLog::new(today(), "nausea", 6))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Store(StoreError::IntensityOutOfRange(6))
    ));

    let err = service.delete_drug_at_display(0).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::IndexOutOfRange { index: 0, len: 0 }
    ));

    let err = service.delete_drug(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, ServiceError::DrugNotFound(_)));

    let err = service
        .mark_scheduled_dose(today(), 3, DoseStatus::Taken, None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::IndexOutOfRange { index: 3, .. }));

    assert_eq!(service.repository().saves.get(), 0);
    assert!(service.store().is_empty());
}

#[test]
fn mark_scheduled_dose_resolves_schedule_index() {
    let mut service = open_service();
    service
        .add_drug(Drug::new("Vitamin D", "1000 IU", [at(9)], today()))
        .unwrap();
    service
        .add_drug(Drug::new("Amoxicillin", "500mg", [at(8), at(20)], today()))
        .unwrap();

    let marked = service
        .mark_scheduled_dose(today(), 1, DoseStatus::Missed, None)
        .unwrap();
    assert_eq!(marked.drug_name, "Vitamin D");
    assert_eq!(marked.time, at(9));
    assert_eq!(
        service.store().get_dose_status(today(), at(9), "vitamin d"),
        Some(DoseStatus::Missed)
    );
}

#[test]
fn delete_at_display_uses_sorted_view() {
    let mut service = open_service();
    for name in ["Zoloft", "aspirin", "Lisinopril"] {
        service
            .add_drug(Drug::new(name, "1 tab", [at(8)], today()))
            .unwrap();
    }

    let removed = service.delete_drug_at_display(1).unwrap();
    assert_eq!(removed.name, "Lisinopril");
    let names: Vec<&str> = service
        .store()
        .drugs()
        .iter()
        .map(|drug| drug.name.as_str())
        .collect();
    assert_eq!(names, vec!["Zoloft", "aspirin"]);
}

#[test]
fn ensure_sample_seeds_only_an_empty_drug_list() {
    let mut service = open_service();
    assert!(service.ensure_sample(today()).unwrap());

    let store = service.store();
    assert_eq!(store.drugs().len(), 2);
    assert_eq!(store.symptoms().len(), 3);
    let amoxicillin = &store.drugs()[0];
    assert_eq!(amoxicillin.name, "Amoxicillin");
    assert_eq!(amoxicillin.times, vec![at(8), at(20)]);
    assert_eq!(
        amoxicillin.end_date,
        today().checked_add_days(Days::new(5))
    );
    assert_eq!(store.daily_schedule(today()).len(), 3);

    assert!(!service.ensure_sample(today()).unwrap());
    assert_eq!(service.repository().saves.get(), 1);
}

#[test]
fn open_uses_repository_contents() {
    let mut initial = Store::new();
    initial.add_drug(Drug::new("Metformin", "500mg", [at(8)], today()));
    let repo = MemoryRepository {
        initial,
        ..MemoryRepository::default()
    };

    let service = MediPalService::open(repo).unwrap();
    assert_eq!(service.store().drugs().len(), 1);
}
