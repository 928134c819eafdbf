//! Availability and booking commands

use super::Session;
use super::output::{format_success, format_table};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use kidcare_engine::{
    BookingRequest, EngineError, add_availability, book_appointment, open_slots,
    remove_availability,
};
use kidcare_model::{AvailabilitySlot, ChildId, ChildStore, DoctorId, SlotId, UserId};
use serde_json::json;
use tabled::Tabled;

/// Configuration for the slots command
pub struct SlotsConfig {
    pub doctor: DoctorId,
}

/// Configuration for the add-slot command
pub struct AddSlotConfig {
    pub doctor: DoctorId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Configuration for the remove-slot command
pub struct RemoveSlotConfig {
    pub slot: SlotId,
}

/// Configuration for the book command
pub struct BookConfig {
    pub doctor: DoctorId,
    pub slot: SlotId,
    pub requester: UserId,
    /// Book for this child; books for the requester when absent
    pub child: Option<ChildId>,
    pub notes: Option<String>,
}

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "From")]
    start: String,
    #[tabled(rename = "To")]
    end: String,
    #[tabled(rename = "Slot")]
    id: String,
}

impl From<&AvailabilitySlot> for SlotRow {
    fn from(slot: &AvailabilitySlot) -> Self {
        Self {
            date: slot.available_date.format("%a %d %b %Y").to_string(),
            start: slot.start_time.format("%H:%M").to_string(),
            end: slot.end_time.format("%H:%M").to_string(),
            id: slot.id.to_string(),
        }
    }
}

/// List a doctor's open slots from today on
pub async fn slots(session: &Session, config: SlotsConfig) -> Result<()> {
    let store = session.load_store()?;
    let slots = open_slots(&store, &session.ctx, config.doctor)
        .await
        .with_context(|| format!("Failed to list slots of doctor {}", config.doctor))?;

    session.print(&slots, || format_table(slots.iter().map(SlotRow::from).collect()))
}

/// Offer a new slot
pub async fn add_slot(session: &Session, config: AddSlotConfig) -> Result<()> {
    let store = session.load_store()?;
    let slot = add_availability(
        &store,
        &session.ctx,
        config.doctor,
        config.date,
        config.start,
        config.end,
    )
    .await
    .context("Failed to add availability")?;
    session.save_store(&store)?;

    session.print(&slot, || format_success(&format!("Added slot {}", slot.id)))
}

/// Withdraw an unbooked slot
pub async fn remove_slot(session: &Session, config: RemoveSlotConfig) -> Result<()> {
    let store = session.load_store()?;
    remove_availability(&store, config.slot)
        .await
        .with_context(|| format!("Failed to remove slot {}", config.slot))?;
    session.save_store(&store)?;

    session.print(&json!({ "removed": config.slot }), || {
        format_success(&format!("Removed slot {}", config.slot))
    })
}

/// Book a slot for the requester or one of their children
pub async fn book(session: &Session, config: BookConfig) -> Result<()> {
    let store = session.load_store()?;

    let request = BookingRequest::from_parts(
        config.doctor,
        config.requester,
        config.slot,
        config.child,
        config.child.is_none(),
    )?;
    let request = match config.notes {
        Some(notes) => request.with_notes(notes),
        None => request,
    };

    if let Some(child) = config.child {
        let child = store
            .fetch_child(child)
            .await
            .with_context(|| format!("Failed to load child {}", child))?;
        if child.parent_id != config.requester {
            return Err(EngineError::beneficiary(format!(
                "{} is not a child of {}",
                child.name, config.requester
            ))
            .into());
        }
    }

    let appointment = book_appointment(&store, &store, &session.ctx, request)
        .await
        .with_context(|| format!("Failed to book slot {}", config.slot))?;
    session.save_store(&store)?;

    session.print(&appointment, || {
        format_success(&format!(
            "Booked {} at {} ({}, appointment {})",
            appointment.appointment_date,
            appointment.appointment_time.format("%H:%M"),
            appointment.status,
            appointment.id
        ))
    })
}
