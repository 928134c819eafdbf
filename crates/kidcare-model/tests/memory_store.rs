//! Reference store tests
//!
//! Exercises the in-memory store through the collaborator traits:
//! - Child fan-out against the standard catalog
//! - Record joins and ordering
//! - Snapshot persistence
//! - Appointment and medication tables

use chrono::{NaiveDate, NaiveTime};
use kidcare_model::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentStore, AvailabilitySlot,
    AvailabilityStore, Child, ChildId, ChildStore, DoctorId, EntityKind, Gender, InMemoryStore,
    Medication, MedicationId, MedicationStore, NoOpRecommendationService, RecommendationRequest,
    RecommendationService, Snapshot, StoreError, UserId, VaccinationRecord, VaccinationStore,
    standard_catalog,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Test Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn store() -> InMemoryStore {
    InMemoryStore::with_catalog(standard_catalog().unwrap())
}

fn child(parent: UserId) -> Child {
    Child {
        id: ChildId::new(),
        parent_id: parent,
        name: "Anaya".to_string(),
        date_of_birth: date(2025, 1, 1),
        gender: Gender::Female,
        place_of_birth: None,
        birth_health_issues: vec![],
    }
}

async fn register(store: &InMemoryStore, child: Child) -> ChildId {
    let catalog = store.fetch_catalog().await.unwrap();
    let records = catalog
        .iter()
        .map(|entry| VaccinationRecord::pending(child.id, entry.id))
        .collect();
    let id = child.id;
    store.insert_child_with_records(child, records).await.unwrap();
    id
}

// ============================================================================
// Vaccination records
// ============================================================================

#[tokio::test]
async fn test_fan_out_creates_one_record_per_entry() {
    let store = store();
    let id = register(&store, child(UserId::new())).await;

    let entries = store.fetch_vaccination_records(id).await.unwrap();
    assert_eq!(entries.len(), 30);
    assert!(entries.iter().all(|e| !e.is_completed()));

    let orders: Vec<_> = entries.iter().map(|e| e.schedule.sort_order).collect();
    let mut sorted = orders.clone();
    sorted.sort();
    assert_eq!(orders, sorted);
}

#[tokio::test]
async fn test_update_record_is_visible_on_refetch() {
    let store = store();
    let id = register(&store, child(UserId::new())).await;
    let first = store.fetch_vaccination_records(id).await.unwrap()[0].id();

    store
        .update_vaccination_record(first, true, Some(date(2025, 1, 2)))
        .await
        .unwrap();

    let entries = store.fetch_vaccination_records(id).await.unwrap();
    assert!(entries[0].is_completed());
    assert_eq!(entries[0].record.administered_date, Some(date(2025, 1, 2)));
}

#[tokio::test]
async fn test_records_of_unknown_child_are_empty() {
    let store = store();
    let entries = store.fetch_vaccination_records(ChildId::new()).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_duplicate_child_rejected_without_partial_write() {
    let store = store();
    let parent = UserId::new();
    let kid = child(parent);
    register(&store, kid.clone()).await;

    let err = store
        .insert_child_with_records(kid.clone(), vec![VaccinationRecord::pending(kid.id, standard_catalog().unwrap().entries()[0].id)])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { kind: EntityKind::Child, .. }));
    assert_eq!(store.fetch_vaccination_records(kid.id).await.unwrap().len(), 30);
    assert_eq!(store.list_children(parent).await.unwrap().len(), 1);
}

// ============================================================================
// Snapshots
// ============================================================================

#[tokio::test]
async fn test_snapshot_survives_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kidcare.json");

    let store = store();
    let id = register(&store, child(UserId::new())).await;
    store.snapshot().write_file(&path).unwrap();

    let reloaded = InMemoryStore::from_snapshot(Snapshot::from_file(&path).unwrap());
    assert_eq!(reloaded.fetch_child(id).await.unwrap().name, "Anaya");
    assert_eq!(reloaded.fetch_vaccination_records(id).await.unwrap().len(), 30);
}

// ============================================================================
// Appointments and medications
// ============================================================================

#[tokio::test]
async fn test_second_appointment_on_slot_rejected() {
    let store = store();
    let doctor = DoctorId::new();
    let slot = AvailabilitySlot::new(doctor, date(2025, 6, 1), time(9, 0), time(9, 30));
    let slot_id = store.insert_slot(slot).await.unwrap();

    let appointment = |parent| Appointment {
        id: AppointmentId::new(),
        doctor_id: doctor,
        parent_id: parent,
        child_id: None,
        availability_id: slot_id,
        appointment_date: date(2025, 6, 1),
        appointment_time: time(9, 0),
        status: AppointmentStatus::Pending,
        is_self_booking: true,
        notes: None,
    };

    let parent = UserId::new();
    store.create_appointment(appointment(parent)).await.unwrap();
    let err = store.create_appointment(appointment(UserId::new())).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { .. }));

    assert_eq!(store.list_appointments_for_slot(slot_id).await.unwrap().len(), 1);
    assert_eq!(store.list_appointments_for_requester(parent).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_medications_newest_first() {
    let store = store();
    let id = register(&store, child(UserId::new())).await;

    for (medicine, day) in [("Paracetamol", 3), ("Vitamin D", 20), ("ORS", 10)] {
        store
            .insert_medication(Medication {
                id: MedicationId::new(),
                child_id: id,
                health_issue: "Fever".to_string(),
                medicine_name: medicine.to_string(),
                dosage: "5 ml".to_string(),
                frequency: "Twice daily".to_string(),
                duration: "3 days".to_string(),
                doctor_name: "Dr. Rao".to_string(),
                doctor_contact: None,
                prescribed_date: date(2025, 3, day),
                notes: None,
            })
            .await
            .unwrap();
    }

    let names: Vec<_> = store
        .list_medications(id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.medicine_name)
        .collect();
    assert_eq!(names, vec!["Vitamin D", "ORS", "Paracetamol"]);
}

#[tokio::test]
async fn test_noop_recommendations_are_empty() {
    let service = NoOpRecommendationService::new();
    let request = RecommendationRequest {
        health_issues: vec!["Jaundice".to_string()],
        child_name: "Anaya".to_string(),
        age: "3 months old".to_string(),
    };
    assert_eq!(service.request_health_recommendations(&request).await.unwrap(), "");
}
