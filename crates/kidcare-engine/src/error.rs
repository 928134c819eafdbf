//! Engine errors

use kidcare_diagnostics::{
    Diagnostic, ErrorCode, KC0001, KC0002, KC0003, KC0005, KC0006, KC0007, KC0200, KC0201,
    KidcareError,
};
use kidcare_model::{EntityKind, RecommendationError, SlotId, StoreError};
use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by engine operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed input, rejected before any collaborator call
    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    /// The slot's compare-and-swap lost to another booking
    #[error("Slot already taken: {slot}")]
    SlotAlreadyBooked { slot: SlotId },

    /// Appointment creation failed and releasing the slot failed too
    #[error("Appointment creation failed ({cause}); releasing slot {slot} failed: {release}")]
    RollbackFailed {
        slot: SlotId,
        cause: StoreError,
        release: StoreError,
    },

    /// Data store failure, surfaced verbatim
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Recommendation service failure, surfaced verbatim
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
}

impl EngineError {
    /// Create a validation error
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    /// Create a blank-field error
    pub fn blank(field: &str) -> Self {
        Self::validation(KC0001, format!("{} is required", field))
    }

    /// Create a date-in-the-future error
    pub fn future_date(field: &str, date: chrono::NaiveDate) -> Self {
        Self::validation(KC0002, format!("{} {} is in the future", field, date))
    }

    /// Create a date-in-the-past error
    pub fn past_date(field: &str, date: chrono::NaiveDate) -> Self {
        Self::validation(KC0006, format!("{} {} is in the past", field, date))
    }

    /// Create an invalid time range error
    pub fn time_range(start: chrono::NaiveTime, end: chrono::NaiveTime) -> Self {
        Self::validation(
            KC0003,
            format!("Start time {} must be before end time {}", start, end),
        )
    }

    /// Create an invalid beneficiary error
    pub fn beneficiary(message: impl Into<String>) -> Self {
        Self::validation(KC0005, message)
    }

    /// Create a slot-owner mismatch error
    pub fn foreign_slot(slot: SlotId) -> Self {
        Self::validation(KC0007, format!("Slot {} belongs to another provider", slot))
    }

    /// Create a not-found error for an entity the caller referenced
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::Store(StoreError::not_found(kind, id))
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::Validation { code, .. } => *code,
            EngineError::SlotAlreadyBooked { .. } => KC0200,
            EngineError::RollbackFailed { .. } => KC0201,
            EngineError::Store(e) => e.code(),
            EngineError::Recommendation(e) => e.code(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation { .. })
            || matches!(self, EngineError::Recommendation(RecommendationError::InvalidRequest(_)))
    }

    /// Convert to a user-visible diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        KidcareError::from(self.clone()).to_diagnostic()
    }
}

impl From<EngineError> for KidcareError {
    fn from(err: EngineError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            EngineError::Validation { .. } => KidcareError::validation(code, message),
            EngineError::SlotAlreadyBooked { slot } | EngineError::RollbackFailed { slot, .. } => {
                KidcareError::booking(code, message, slot.to_string())
            }
            EngineError::Store(e) => e.into(),
            EngineError::Recommendation(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kidcare_diagnostics::{KC0102, Severity};

    #[test]
    fn test_store_errors_keep_their_code() {
        let slot = SlotId::new();
        let err = EngineError::not_found(EntityKind::Slot, slot);
        assert_eq!(err.code(), KC0102);
        assert_eq!(err.to_string(), format!("availability slot not found: {}", slot));
    }

    #[test]
    fn test_slot_taken_diagnostic() {
        let slot = SlotId::new();
        let diagnostic = EngineError::SlotAlreadyBooked { slot }.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.code, KC0200);
        assert_eq!(diagnostic.subject, Some(slot.to_string()));
        assert_eq!(diagnostic.help.as_deref(), Some("Pick another open slot"));
    }

    #[test]
    fn test_validation_helpers() {
        let err = EngineError::blank("Name");
        assert!(err.is_validation());
        assert_eq!(err.code(), KC0001);
        assert_eq!(err.to_string(), "Name is required");
        assert!(!EngineError::Store(StoreError::NetworkError("timeout".into())).is_validation());
    }
}
