//! Collaborator traits
//!
//! The engine never talks to storage or the recommendation gateway directly.
//! It consumes these traits, one per concern, each a single asynchronous
//! request/response round trip. Timeouts and transport are the implementor's
//! business.

use crate::appointment::Appointment;
use crate::availability::AvailabilitySlot;
use crate::catalog::CatalogEntry;
use crate::child::Child;
use crate::doctor::Doctor;
use crate::ids::{AppointmentId, ChildId, DoctorId, RecordId, SlotId, UserId};
use crate::medication::Medication;
use crate::vaccination::{VaccinationEntry, VaccinationRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use kidcare_diagnostics::{
    ErrorCode, KC0004, KC0100, KC0101, KC0102, KC0103, KC0104, KC0105, KC0106, KC0107, KC0108,
    KC0109, KC0110, KC0200, KC0400, KidcareError,
};
use std::fmt;

/// Kind of entity a store operation addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    VaccinationRecord,
    CatalogEntry,
    Child,
    Slot,
    Appointment,
    Doctor,
    Medication,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::VaccinationRecord => write!(f, "vaccination record"),
            EntityKind::CatalogEntry => write!(f, "catalog entry"),
            EntityKind::Child => write!(f, "child"),
            EntityKind::Slot => write!(f, "availability slot"),
            EntityKind::Appointment => write!(f, "appointment"),
            EntityKind::Doctor => write!(f, "doctor"),
            EntityKind::Medication => write!(f, "medication"),
        }
    }
}

/// Data store error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// The compare-and-swap on a slot's booked flag found it already set
    #[error("Slot already booked: {0}")]
    AlreadyBooked(SlotId),

    #[error("Booked slot cannot be removed: {0}")]
    SlotBooked(SlotId),

    #[error("Duplicate {kind}: {id}")]
    Duplicate { kind: EntityKind, id: String },

    /// Row-level authorization refused the write
    #[error("Write rejected: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn duplicate(kind: EntityKind, id: impl ToString) -> Self {
        Self::Duplicate {
            kind,
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::NotFound { kind, .. } => match kind {
                EntityKind::Child => KC0101,
                EntityKind::Slot => KC0102,
                EntityKind::VaccinationRecord => KC0100,
                _ => KC0110,
            },
            StoreError::AlreadyBooked(_) => KC0200,
            StoreError::SlotBooked(_) => KC0108,
            StoreError::Duplicate { .. } => KC0109,
            StoreError::Rejected(_) => KC0103,
            StoreError::NetworkError(_) => KC0104,
            StoreError::Internal(_) => KC0400,
        }
    }
}

impl From<StoreError> for KidcareError {
    fn from(err: StoreError) -> Self {
        let code = err.code();
        match &err {
            StoreError::AlreadyBooked(slot) => {
                KidcareError::booking(code, err.to_string(), slot.to_string())
            }
            StoreError::NotFound { id, .. } | StoreError::Duplicate { id, .. } => {
                KidcareError::collaborator(code, err.to_string()).with_subject(id.clone())
            }
            _ => KidcareError::collaborator(code, err.to_string()),
        }
    }
}

/// Reads and writes of per-child vaccination state
#[async_trait]
pub trait VaccinationStore: Send + Sync {
    /// All records of a child joined to their catalog entries, in catalog sort order
    async fn fetch_vaccination_records(
        &self,
        child: ChildId,
    ) -> Result<Vec<VaccinationEntry>, StoreError>;

    /// Overwrite the completion flag and administered date of one record
    async fn update_vaccination_record(
        &self,
        record: RecordId,
        is_completed: bool,
        administered_date: Option<NaiveDate>,
    ) -> Result<(), StoreError>;
}

/// Child profiles and the catalog they are vaccinated against
#[async_trait]
pub trait ChildStore: Send + Sync {
    async fn fetch_child(&self, child: ChildId) -> Result<Child, StoreError>;

    async fn list_children(&self, parent: UserId) -> Result<Vec<Child>, StoreError>;

    /// Catalog entries in sort order
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError>;

    /// Insert a child together with its vaccination records, all or nothing
    async fn insert_child_with_records(
        &self,
        child: Child,
        records: Vec<VaccinationRecord>,
    ) -> Result<(), StoreError>;
}

/// Provider availability
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Unbooked slots of a provider on or after `from`, ordered by (date, start time)
    async fn fetch_open_slots(
        &self,
        doctor: DoctorId,
        from: NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>, StoreError>;

    async fn fetch_slot(&self, slot: SlotId) -> Result<AvailabilitySlot, StoreError>;

    async fn insert_slot(&self, slot: AvailabilitySlot) -> Result<SlotId, StoreError>;

    /// Remove a slot; booked slots are refused with [`StoreError::SlotBooked`]
    async fn delete_slot(&self, slot: SlotId) -> Result<(), StoreError>;

    /// Atomically flip `is_booked` from false to true.
    ///
    /// Fails with [`StoreError::AlreadyBooked`] if the flag was already set.
    /// This is the only serialization point between concurrent bookings.
    async fn set_slot_booked(&self, slot: SlotId) -> Result<AvailabilitySlot, StoreError>;

    /// Clear `is_booked` again after a failed appointment insert
    async fn release_slot(&self, slot: SlotId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create_appointment(&self, appointment: Appointment) -> Result<AppointmentId, StoreError>;

    async fn list_appointments_for_slot(&self, slot: SlotId) -> Result<Vec<Appointment>, StoreError>;

    async fn list_appointments_for_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<Appointment>, StoreError>;
}

#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError>;
}

#[async_trait]
pub trait MedicationStore: Send + Sync {
    async fn insert_medication(&self, medication: Medication) -> Result<(), StoreError>;

    /// Medications of a child, newest prescription first
    async fn list_medications(&self, child: ChildId) -> Result<Vec<Medication>, StoreError>;
}

/// Input for a health recommendation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub health_issues: Vec<String>,
    pub child_name: String,
    /// Age description such as "3 months old"
    pub age: String,
}

/// Recommendation service error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendationError {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI service requires payment. Please add credits to your workspace.")]
    PaymentRequired,

    #[error("AI service error: {0}")]
    Upstream(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RecommendationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecommendationError::RateLimited => KC0105,
            RecommendationError::PaymentRequired => KC0106,
            RecommendationError::Upstream(_) => KC0107,
            RecommendationError::InvalidRequest(_) => KC0004,
        }
    }
}

impl From<RecommendationError> for KidcareError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::InvalidRequest(_) => KidcareError::validation(err.code(), err.to_string()),
            _ => KidcareError::collaborator(err.code(), err.to_string()),
        }
    }
}

/// Free-text health recommendations for a child's birth health issues
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn request_health_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<String, RecommendationError>;
}
