//! Child vaccination tracking and appointment booking
//!
//! This crate ties the kidcare workspace together:
//! - Vaccination status (due, completed, upcoming) per child
//! - Completion toggling against a data store
//! - Appointment booking with a compare-and-swap on the slot
//! - Child registration, medications, doctor search and recommendation prompts
//!
//! # Example
//!
//! ```ignore
//! use kidcare::{EvaluationContext, InMemoryStore, ScheduleTracker, standard_catalog};
//! use std::sync::Arc;
//!
//! let store = InMemoryStore::with_catalog(standard_catalog()?);
//! let tracker = ScheduleTracker::load(Arc::new(store), &child).await?;
//! let summary = tracker.summary(&EvaluationContext::local());
//! ```

// Re-export the workspace crates
pub use kidcare_diagnostics as diagnostics;
pub use kidcare_engine as engine;
pub use kidcare_model as model;

// Convenience re-exports
pub use kidcare_diagnostics::{Diagnostic, ErrorCode, KidcareError, Result};
pub use kidcare_engine::{
    BookingRequest, EngineError, EngineResult, EvaluationContext, ScheduleTracker, StatusReport,
    StatusSummary, VaccineStatus,
};
pub use kidcare_model::{InMemoryStore, Snapshot, standard_catalog};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
