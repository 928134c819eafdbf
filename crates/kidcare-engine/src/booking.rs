//! Appointment slot allocator
//!
//! Booking claims the slot first with a compare-and-swap on its booked flag,
//! which is the only serialization point between concurrent callers. The
//! appointment row is written second; if that write fails the slot is
//! released again so it returns to the open list.

use crate::context::EvaluationContext;
use crate::error::{EngineError, EngineResult};
use kidcare_model::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentStore, AvailabilityStore,
    Beneficiary, ChildId, DoctorId, SlotId, StoreError, UserId,
};
use log::{info, warn};

/// A validated booking request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub doctor: DoctorId,
    pub requester: UserId,
    pub slot: SlotId,
    pub beneficiary: Beneficiary,
    pub notes: Option<String>,
}

impl BookingRequest {
    pub fn new(doctor: DoctorId, requester: UserId, slot: SlotId, beneficiary: Beneficiary) -> Self {
        Self {
            doctor,
            requester,
            slot,
            beneficiary,
            notes: None,
        }
    }

    /// Build a request from the raw child/self-booking pair.
    ///
    /// Exactly one of `child` and `is_self_booking` must be set.
    pub fn from_parts(
        doctor: DoctorId,
        requester: UserId,
        slot: SlotId,
        child: Option<ChildId>,
        is_self_booking: bool,
    ) -> EngineResult<Self> {
        let beneficiary = match (child, is_self_booking) {
            (None, true) => Beneficiary::Requester,
            (Some(child), false) => Beneficiary::Child(child),
            (Some(_), true) => {
                return Err(EngineError::beneficiary(
                    "A booking cannot be both for yourself and for a child",
                ));
            }
            (None, false) => {
                return Err(EngineError::beneficiary(
                    "Choose yourself or a child as the beneficiary",
                ));
            }
        };
        Ok(Self::new(doctor, requester, slot, beneficiary))
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }
}

/// Book an open slot.
///
/// Fails with [`EngineError::SlotAlreadyBooked`] when another booking holds
/// the slot. A failed appointment insert releases the slot and returns the
/// insert error; if the release fails as well the result is
/// [`EngineError::RollbackFailed`].
pub async fn book_appointment(
    slots: &dyn AvailabilityStore,
    appointments: &dyn AppointmentStore,
    ctx: &EvaluationContext,
    request: BookingRequest,
) -> EngineResult<Appointment> {
    let slot = slots.fetch_slot(request.slot).await?;
    if slot.doctor_id != request.doctor {
        return Err(EngineError::foreign_slot(slot.id));
    }
    if slot.available_date < ctx.today {
        return Err(EngineError::past_date("Slot date", slot.available_date));
    }

    let slot = match slots.set_slot_booked(request.slot).await {
        Ok(slot) => slot,
        Err(StoreError::AlreadyBooked(id)) => {
            warn!("slot {} already taken, booking by {} rejected", id, request.requester);
            return Err(EngineError::SlotAlreadyBooked { slot: id });
        }
        Err(e) => return Err(e.into()),
    };

    let (child_id, is_self_booking) = match request.beneficiary {
        Beneficiary::Requester => (None, true),
        Beneficiary::Child(child) => (Some(child), false),
    };
    let appointment = Appointment {
        id: AppointmentId::new(),
        doctor_id: request.doctor,
        parent_id: request.requester,
        child_id,
        availability_id: slot.id,
        appointment_date: slot.available_date,
        appointment_time: slot.start_time,
        status: AppointmentStatus::Pending,
        is_self_booking,
        notes: request.notes,
    };

    match appointments.create_appointment(appointment.clone()).await {
        Ok(_) => {
            info!(
                "booked slot {} on {} at {} for {}",
                slot.id, slot.available_date, slot.start_time, request.requester
            );
            Ok(appointment)
        }
        Err(cause) => {
            warn!("appointment insert failed for slot {}, releasing: {}", slot.id, cause);
            match slots.release_slot(slot.id).await {
                Ok(()) => Err(cause.into()),
                Err(release) => Err(EngineError::RollbackFailed {
                    slot: slot.id,
                    cause,
                    release,
                }),
            }
        }
    }
}
