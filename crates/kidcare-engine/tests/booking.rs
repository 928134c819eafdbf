//! Appointment slot allocator tests
//!
//! Covers:
//! - Pending appointment copied from the slot
//! - Concurrent bookings of one slot
//! - Compensation when the appointment insert fails
//! - Availability rules and the open-slot listing

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use futures::future::join_all;
use kidcare_diagnostics::{KC0003, KC0006, KC0007, KC0108, KC0200, KC0201};
use kidcare_engine::{
    BookingRequest, EngineError, EvaluationContext, add_availability, book_appointment,
    open_slots, remove_availability,
};
use kidcare_model::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentStore, AvailabilitySlot,
    AvailabilityStore, Beneficiary, ChildId, DoctorId, InMemoryStore, SlotId, StoreError, UserId,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tokio::sync::Barrier;

// ============================================================================
// Test Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn ctx() -> EvaluationContext {
    EvaluationContext::new(date(2025, 5, 10))
}

async fn store_with_slot() -> (InMemoryStore, DoctorId, SlotId) {
    let store = InMemoryStore::new();
    let doctor = DoctorId::new();
    let slot = add_availability(&store, &ctx(), doctor, date(2025, 5, 12), time(10, 0), time(10, 30))
        .await
        .unwrap();
    (store, doctor, slot.id)
}

/// Appointment table that refuses every insert
struct RejectingAppointments;

#[async_trait]
impl AppointmentStore for RejectingAppointments {
    async fn create_appointment(&self, _appointment: Appointment) -> Result<AppointmentId, StoreError> {
        Err(StoreError::Rejected("insert denied".to_string()))
    }

    async fn list_appointments_for_slot(&self, _slot: SlotId) -> Result<Vec<Appointment>, StoreError> {
        Ok(vec![])
    }

    async fn list_appointments_for_requester(&self, _requester: UserId) -> Result<Vec<Appointment>, StoreError> {
        Ok(vec![])
    }
}

/// Availability store whose release step fails
struct StickySlots(InMemoryStore);

#[async_trait]
impl AvailabilityStore for StickySlots {
    async fn fetch_open_slots(&self, doctor: DoctorId, from: NaiveDate) -> Result<Vec<AvailabilitySlot>, StoreError> {
        self.0.fetch_open_slots(doctor, from).await
    }

    async fn fetch_slot(&self, slot: SlotId) -> Result<AvailabilitySlot, StoreError> {
        self.0.fetch_slot(slot).await
    }

    async fn insert_slot(&self, slot: AvailabilitySlot) -> Result<SlotId, StoreError> {
        self.0.insert_slot(slot).await
    }

    async fn delete_slot(&self, slot: SlotId) -> Result<(), StoreError> {
        self.0.delete_slot(slot).await
    }

    async fn set_slot_booked(&self, slot: SlotId) -> Result<AvailabilitySlot, StoreError> {
        self.0.set_slot_booked(slot).await
    }

    async fn release_slot(&self, _slot: SlotId) -> Result<(), StoreError> {
        Err(StoreError::NetworkError("connection reset".to_string()))
    }
}

// ============================================================================
// Booking
// ============================================================================

#[tokio::test]
async fn test_booking_creates_pending_appointment_from_slot() {
    let (store, doctor, slot) = store_with_slot().await;
    let requester = UserId::new();
    let child = ChildId::new();

    let request = BookingRequest::new(doctor, requester, slot, Beneficiary::Child(child));
    let appointment = book_appointment(&store, &store, &ctx(), request).await.unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.appointment_date, date(2025, 5, 12));
    assert_eq!(appointment.appointment_time, time(10, 0));
    assert_eq!(appointment.beneficiary(), Some(Beneficiary::Child(child)));
    assert!(store.fetch_slot(slot).await.unwrap().is_booked);
    assert!(open_slots(&store, &ctx(), doctor).await.unwrap().is_empty());
    assert_eq!(store.list_appointments_for_requester(requester).await.unwrap(), vec![appointment]);
}

#[tokio::test]
async fn test_second_booking_gets_slot_taken() {
    let (store, doctor, slot) = store_with_slot().await;

    let first = BookingRequest::new(doctor, UserId::new(), slot, Beneficiary::Requester);
    book_appointment(&store, &store, &ctx(), first).await.unwrap();

    let second = BookingRequest::new(doctor, UserId::new(), slot, Beneficiary::Requester);
    let err = book_appointment(&store, &store, &ctx(), second).await.unwrap_err();
    assert_eq!(err, EngineError::SlotAlreadyBooked { slot });
    assert_eq!(err.code(), KC0200);
    assert_eq!(store.appointment_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_exactly_one_wins() {
    let (store, doctor, slot) = store_with_slot().await;
    let contenders = 16;
    let barrier = Arc::new(Barrier::new(contenders));

    let handles: Vec<_> = (0..contenders)
        .map(|_| {
            let store = store.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                let request = BookingRequest::new(doctor, UserId::new(), slot, Beneficiary::Requester);
                barrier.wait().await;
                book_appointment(&store, &store, &ctx(), request).await
            })
        })
        .collect();

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert_eq!(result.as_ref().unwrap_err(), &EngineError::SlotAlreadyBooked { slot });
    }
    assert_eq!(store.list_appointments_for_slot(slot).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_insert_releases_slot() {
    let (store, doctor, slot) = store_with_slot().await;

    let request = BookingRequest::new(doctor, UserId::new(), slot, Beneficiary::Requester);
    let err = book_appointment(&store, &RejectingAppointments, &ctx(), request)
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::Store(StoreError::Rejected("insert denied".to_string())));
    assert!(!store.fetch_slot(slot).await.unwrap().is_booked);
    assert_eq!(open_slots(&store, &ctx(), doctor).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_release_reported() {
    let (store, doctor, slot) = store_with_slot().await;
    let slots = StickySlots(store.clone());

    let request = BookingRequest::new(doctor, UserId::new(), slot, Beneficiary::Requester);
    let err = book_appointment(&slots, &RejectingAppointments, &ctx(), request)
        .await
        .unwrap_err();

    assert_eq!(err.code(), KC0201);
    assert!(matches!(err, EngineError::RollbackFailed { slot: s, .. } if s == slot));
}

#[tokio::test]
async fn test_slot_of_other_doctor_rejected_before_claiming() {
    let (store, _doctor, slot) = store_with_slot().await;

    let request = BookingRequest::new(DoctorId::new(), UserId::new(), slot, Beneficiary::Requester);
    let err = book_appointment(&store, &store, &ctx(), request).await.unwrap_err();

    assert_eq!(err.code(), KC0007);
    assert!(!store.fetch_slot(slot).await.unwrap().is_booked);
}

#[tokio::test]
async fn test_unknown_slot() {
    let store = InMemoryStore::new();
    let request = BookingRequest::new(DoctorId::new(), UserId::new(), SlotId::new(), Beneficiary::Requester);
    let err = book_appointment(&store, &store, &ctx(), request).await.unwrap_err();
    assert_eq!(err.code(), kidcare_diagnostics::KC0102);
}

// ============================================================================
// Availability
// ============================================================================

#[tokio::test]
async fn test_add_availability_validation() {
    let store = InMemoryStore::new();
    let doctor = DoctorId::new();

    let err = add_availability(&store, &ctx(), doctor, date(2025, 5, 12), time(11, 0), time(11, 0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), KC0003);

    let err = add_availability(&store, &ctx(), doctor, date(2025, 5, 9), time(9, 0), time(10, 0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), KC0006);

    assert!(open_slots(&store, &ctx(), doctor).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_booked_slot_cannot_be_removed() {
    let (store, doctor, slot) = store_with_slot().await;
    book_appointment(&store, &store, &ctx(), BookingRequest::new(doctor, UserId::new(), slot, Beneficiary::Requester))
        .await
        .unwrap();

    let err = remove_availability(&store, slot).await.unwrap_err();
    assert_eq!(err.code(), KC0108);

    let free = add_availability(&store, &ctx(), doctor, date(2025, 5, 10), time(9, 0), time(9, 15))
        .await
        .unwrap();
    remove_availability(&store, free.id).await.unwrap();
    assert!(store.fetch_slot(free.id).await.is_err());
}

#[tokio::test]
async fn test_open_slots_ordered_from_today() {
    let store = InMemoryStore::new();
    let doctor = DoctorId::new();
    let later = add_availability(&store, &ctx(), doctor, date(2025, 5, 11), time(9, 0), time(9, 30))
        .await
        .unwrap();
    let afternoon = add_availability(&store, &ctx(), doctor, date(2025, 5, 10), time(15, 0), time(15, 30))
        .await
        .unwrap();
    let morning = add_availability(&store, &ctx(), doctor, date(2025, 5, 10), time(8, 0), time(8, 30))
        .await
        .unwrap();

    let ids: Vec<_> = open_slots(&store, &ctx(), doctor)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![morning.id, afternoon.id, later.id]);

    let tomorrow = EvaluationContext::new(date(2025, 5, 11));
    assert_eq!(open_slots(&store, &tomorrow, doctor).await.unwrap().len(), 1);
}
