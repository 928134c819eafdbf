//! Opaque identifiers
//!
//! Every entity is addressed by a UUID wrapped in its own newtype so a slot id
//! can never be passed where a child id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Vaccine catalog entry id
    ScheduleId
);
entity_id!(
    /// Child id
    ChildId
);
entity_id!(
    /// Vaccination record id
    RecordId
);
entity_id!(
    /// Availability slot id
    SlotId
);
entity_id!(
    /// Appointment id
    AppointmentId
);
entity_id!(
    /// Doctor (provider) id
    DoctorId
);
entity_id!(
    /// Account id of a parent or other requester
    UserId
);
entity_id!(
    /// Medication record id
    MedicationId
);
