//! Provider availability management

use crate::context::EvaluationContext;
use crate::error::{EngineError, EngineResult};
use chrono::{NaiveDate, NaiveTime};
use kidcare_model::{AvailabilitySlot, AvailabilityStore, DoctorId, SlotId, StoreError};
use log::info;

/// Offer a new slot. Requires `start < end` and a date no earlier than today.
pub async fn add_availability(
    store: &dyn AvailabilityStore,
    ctx: &EvaluationContext,
    doctor: DoctorId,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> EngineResult<AvailabilitySlot> {
    if start >= end {
        return Err(EngineError::time_range(start, end));
    }
    if date < ctx.today {
        return Err(EngineError::past_date("Slot date", date));
    }

    let slot = AvailabilitySlot::new(doctor, date, start, end);
    store.insert_slot(slot.clone()).await?;
    info!("doctor {} offered {} {}-{}", doctor, date, start, end);
    Ok(slot)
}

/// Withdraw a slot that nobody has booked
pub async fn remove_availability(store: &dyn AvailabilityStore, slot: SlotId) -> EngineResult<()> {
    let existing = store.fetch_slot(slot).await?;
    if existing.is_booked {
        return Err(StoreError::SlotBooked(slot).into());
    }
    store.delete_slot(slot).await?;
    info!("slot {} withdrawn", slot);
    Ok(())
}

/// Unbooked slots of a provider from today on, ordered by date and start time
pub async fn open_slots(
    store: &dyn AvailabilityStore,
    ctx: &EvaluationContext,
    doctor: DoctorId,
) -> EngineResult<Vec<AvailabilitySlot>> {
    let mut slots = store.fetch_open_slots(doctor, ctx.today).await?;
    slots.retain(|s| !s.is_booked && s.available_date >= ctx.today);
    slots.sort_by_key(AvailabilitySlot::sort_key);
    Ok(slots)
}
