//! kidcare engine
//!
//! Domain logic over the collaborator traits of `kidcare-model`:
//!
//! - **Vaccination status**: age labels, the due-now predicate, summary counts
//!   and grouping by age in catalog order
//! - **Completion toggle** and a caller-side [`ScheduleTracker`] that only
//!   changes its view after the store confirms
//! - **Appointment slot allocator**: slot-first compare-and-swap booking with
//!   compensation when the appointment insert fails
//! - **Availability**, **child registration**, **medications**, **doctor
//!   search** and the **health recommendation** adapter
//!
//! The current date is always an input ([`EvaluationContext`]); nothing in
//! this crate reads a clock except [`EvaluationContext::local`].
//!
//! # Example
//!
//! ```ignore
//! use kidcare_engine::{EvaluationContext, ScheduleTracker};
//!
//! let ctx = EvaluationContext::local();
//! let mut tracker = ScheduleTracker::load(store, &child).await?;
//! tracker.toggle(&ctx, record_id).await?;
//! println!("{:?}", tracker.summary(&ctx));
//! ```

pub mod availability;
pub mod booking;
pub mod children;
pub mod context;
pub mod directory;
pub mod error;
pub mod medication;
pub mod recommendations;
pub mod status;
pub mod toggle;
pub mod tracker;

pub use availability::{add_availability, open_slots, remove_availability};
pub use booking::{BookingRequest, book_appointment};
pub use children::{NewChild, age_in_months, describe_age, describe_age_short, register_child};
pub use context::EvaluationContext;
pub use directory::{DoctorQuery, search_doctors, specializations};
pub use error::{EngineError, EngineResult};
pub use medication::{NewMedication, add_medication, medications_for};
pub use recommendations::{
    SYSTEM_PROMPT, classify_gateway_status, recommendation_request, request_recommendations,
    user_prompt,
};
pub use status::{
    StatusLine, StatusReport, StatusSummary, VaccineStatus, age_label, filter_completed,
    filter_due, group_by_age, is_due,
};
pub use toggle::{Toggled, toggle_completion};
pub use tracker::ScheduleTracker;
