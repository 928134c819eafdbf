//! Appointments

use crate::ids::{AppointmentId, ChildId, DoctorId, SlotId, UserId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Who the appointment is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Beneficiary {
    /// The requester books for themselves
    Requester,
    /// The requester books for one of their children
    Child(ChildId),
}

/// A persisted appointment.
///
/// Exactly one of `child_id` and `is_self_booking` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub doctor_id: DoctorId,
    pub parent_id: UserId,
    #[serde(default)]
    pub child_id: Option<ChildId>,
    pub availability_id: SlotId,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub is_self_booking: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// The beneficiary, or `None` when the stored row breaks the invariant
    pub fn beneficiary(&self) -> Option<Beneficiary> {
        match (self.is_self_booking, self.child_id) {
            (true, None) => Some(Beneficiary::Requester),
            (false, Some(child)) => Some(Beneficiary::Child(child)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(child_id: Option<ChildId>, is_self_booking: bool) -> Appointment {
        Appointment {
            id: AppointmentId::new(),
            doctor_id: DoctorId::new(),
            parent_id: UserId::new(),
            child_id,
            availability_id: SlotId::new(),
            appointment_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            appointment_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            status: AppointmentStatus::Pending,
            is_self_booking,
            notes: None,
        }
    }

    #[test]
    fn test_beneficiary_invariant() {
        let child = ChildId::new();
        assert_eq!(appointment(None, true).beneficiary(), Some(Beneficiary::Requester));
        assert_eq!(appointment(Some(child), false).beneficiary(), Some(Beneficiary::Child(child)));
        assert_eq!(appointment(Some(child), true).beneficiary(), None);
        assert_eq!(appointment(None, false).beneficiary(), None);
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&AppointmentStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        assert_eq!(AppointmentStatus::Cancelled.to_string(), "cancelled");
    }
}
