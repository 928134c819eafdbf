//! kidcare data model
//!
//! This crate provides:
//! - Entities: vaccine catalog entries, children, vaccination records,
//!   availability slots, appointments, doctors and medications
//! - Collaborator traits describing the hosted data API and the
//!   recommendation service
//! - An in-memory reference store implementing every collaborator trait
//! - JSON snapshots and the embedded standard immunization schedule

pub mod appointment;
pub mod availability;
pub mod catalog;
pub mod child;
pub mod doctor;
pub mod ids;
pub mod medication;
pub mod memory;
pub mod noop;
pub mod provider;
pub mod snapshot;
pub mod standard;
pub mod vaccination;

pub use appointment::*;
pub use availability::*;
pub use catalog::*;
pub use child::*;
pub use doctor::*;
pub use ids::*;
pub use medication::*;
pub use memory::*;
pub use noop::*;
pub use provider::*;
pub use snapshot::*;
pub use standard::*;
pub use vaccination::*;
