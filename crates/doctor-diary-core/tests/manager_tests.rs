//! Manager integration tests over a real on-disk store.

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;

use doctor_diary_core::{Manager, ManagerError, RecordStore};

fn open_manager(dir: &TempDir) -> Manager {
    Manager::open(RecordStore::in_dir(dir.path())).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

#[test]
fn test_add_patient_rejects_duplicate_id() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);

    manager.add_patient("1", "Ann", "Lee").unwrap();
    let err = manager.add_patient("1", "Bob", "Ray").unwrap_err();
    assert!(matches!(err, ManagerError::DuplicateId(id) if id == "1"));

    // Rejection left the roster unchanged
    assert_eq!(manager.count_patients(), 1);
    assert_eq!(manager.get_patient_by_id("1").unwrap().first_name, "Ann");
}

#[test]
fn test_add_appointment_requires_registered_patient() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);

    let err = manager
        .add_appointment("9", date(1), time(9), "checkup")
        .unwrap_err();
    assert!(matches!(err, ManagerError::UnknownPatient(id) if id == "9"));
    assert_eq!(manager.count_appointments(), 0);
}

#[test]
fn test_slot_is_exclusive_across_patients() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);

    manager.add_patient("1", "Ann", "Lee").unwrap();
    manager.add_patient("2", "Bob", "Ray").unwrap();
    manager.add_appointment("1", date(1), time(9), "checkup").unwrap();

    let err = manager
        .add_appointment("2", date(1), time(9), "x-ray")
        .unwrap_err();
    assert!(matches!(err, ManagerError::SlotConflict { .. }));
    assert_eq!(manager.count_appointments(), 1);

    // Same date, different time is fine
    manager.add_appointment("2", date(1), time(10), "x-ray").unwrap();
    assert_eq!(manager.count_appointments(), 2);
}

#[test]
fn test_delete_patient_orphans_their_appointments() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);

    manager.add_patient("1", "Ann", "Lee").unwrap();
    manager.add_patient("2", "Bob", "Ray").unwrap();
    manager.add_appointment("1", date(1), time(9), "checkup").unwrap();
    manager.add_appointment("2", date(1), time(10), "x-ray").unwrap();
    manager.add_appointment("1", date(2), time(9), "results").unwrap();

    manager.delete_patient("1").unwrap();

    assert!(manager.get_patient_by_id("1").is_none());
    // Appointments are retained, flipped to the orphan marker
    assert_eq!(manager.count_appointments(), 3);
    let orphaned: Vec<_> = manager
        .appointments()
        .iter()
        .filter(|a| a.patient.is_orphaned())
        .collect();
    assert_eq!(orphaned.len(), 2);
    // Bob's appointment is untouched
    assert!(manager
        .get_busy_appointment(date(1), time(10))
        .unwrap()
        .patient
        .is_owned_by("2"));
}

#[test]
fn test_delete_unknown_patient() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);
    let err = manager.delete_patient("9").unwrap_err();
    assert!(matches!(err, ManagerError::UnknownPatient(_)));
}

#[test]
fn test_cancel_then_recancel_slot() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);

    manager.add_patient("1", "Ann", "Lee").unwrap();
    manager.add_appointment("1", date(1), time(9), "checkup").unwrap();

    manager.delete_appointment(date(1), time(9)).unwrap();
    assert_eq!(manager.count_appointments(), 0);

    let err = manager.delete_appointment(date(1), time(9)).unwrap_err();
    assert!(matches!(err, ManagerError::SlotEmpty { .. }));
}

#[test]
fn test_empty_date_query_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let manager = open_manager(&dir);
    assert!(manager.get_appointments_by_date(date(1)).is_empty());
}

#[test]
fn test_appointments_by_patient() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);

    manager.add_patient("1", "Ann", "Lee").unwrap();
    manager.add_patient("2", "Bob", "Ray").unwrap();
    manager.add_appointment("1", date(1), time(9), "first").unwrap();
    manager.add_appointment("2", date(1), time(10), "other").unwrap();
    manager.add_appointment("1", date(3), time(11), "second").unwrap();

    // Unknown patient is an absent signal, not an empty list
    assert!(manager.get_appointments_by_patient("9").is_none());

    let anns = manager.get_appointments_by_patient("1").unwrap();
    assert_eq!(anns.len(), 2);
    // Insertion order preserved
    assert_eq!(anns[0].description, "first");
    assert_eq!(anns[1].description, "second");

    // Registered patient with no bookings gets an empty list
    manager.add_patient("3", "Cay", "Doe").unwrap();
    assert!(manager.get_appointments_by_patient("3").unwrap().is_empty());
}

#[test]
fn test_mutations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut manager = open_manager(&dir);
        manager.add_patient("1", "Ann", "Lee").unwrap();
        manager.add_patient("2", "Bob", "Ray").unwrap();
        manager.add_appointment("1", date(1), time(9), "checkup").unwrap();
        manager.delete_patient("1").unwrap();
    }

    let manager = open_manager(&dir);
    assert_eq!(manager.count_patients(), 1);
    assert_eq!(manager.count_appointments(), 1);
    // The orphan marker round-trips through the file
    assert!(manager.appointments()[0].patient.is_orphaned());
}

// The end-to-end walk from the requirements: duplicate registration,
// conflicting booking, cascading delete, cancel then re-cancel.
#[test]
fn test_full_scenario() {
    let dir = TempDir::new().unwrap();
    let mut manager = open_manager(&dir);
    let slot = (date(1), time(9));

    manager.add_patient("1", "Ann", "Lee").unwrap();
    assert!(matches!(
        manager.add_patient("1", "Ann", "Lee").unwrap_err(),
        ManagerError::DuplicateId(_)
    ));

    manager.add_appointment("1", slot.0, slot.1, "checkup").unwrap();

    manager.add_patient("2", "Bob", "Ray").unwrap();
    assert!(matches!(
        manager.add_appointment("2", slot.0, slot.1, "x-ray").unwrap_err(),
        ManagerError::SlotConflict { .. }
    ));

    manager.delete_patient("1").unwrap();
    assert!(manager
        .get_busy_appointment(slot.0, slot.1)
        .unwrap()
        .patient
        .is_orphaned());

    manager.delete_appointment(slot.0, slot.1).unwrap();
    assert!(matches!(
        manager.delete_appointment(slot.0, slot.1).unwrap_err(),
        ManagerError::SlotEmpty { .. }
    ));
}
