//! Provider availability slots

use crate::ids::{DoctorId, SlotId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A same-day time window a provider offers for appointments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: SlotId,
    pub doctor_id: DoctorId,
    pub available_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub is_booked: bool,
}

impl AvailabilitySlot {
    pub fn new(doctor_id: DoctorId, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id: SlotId::new(),
            doctor_id,
            available_date: date,
            start_time: start,
            end_time: end,
            is_booked: false,
        }
    }

    /// Ordering key used when listing slots
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.available_date, self.start_time)
    }
}
