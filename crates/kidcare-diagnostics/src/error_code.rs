//! kidcare error codes following a structured numbering system
//!
//! Error code ranges:
//! - KC0001-KC0099: Validation errors (rejected before any collaborator call)
//! - KC0100-KC0199: Collaborator errors (data store, recommendation service)
//! - KC0200-KC0299: Booking conflicts
//! - KC0400-KC0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a validation error (0001-0099)
    pub const fn is_validation_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a collaborator error (0100-0199)
    pub const fn is_collaborator_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a booking conflict (0200-0299)
    pub const fn is_booking_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KC{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Validation errors (0001-0099)
    map.insert(1, ErrorInfo::new("Required field is blank"));
    map.insert(2, ErrorInfo::new("Date is in the future")
        .with_help("Dates of birth and prescription dates cannot be after today"));
    map.insert(3, ErrorInfo::new("Invalid time range")
        .with_help("End time must be after start time"));
    map.insert(4, ErrorInfo::new("Health issues are required"));
    map.insert(5, ErrorInfo::new("Invalid beneficiary")
        .with_help("Book either for yourself or for exactly one child"));
    map.insert(6, ErrorInfo::new("Date is in the past"));
    map.insert(7, ErrorInfo::new("Slot belongs to another provider"));
    map.insert(8, ErrorInfo::new("Invalid catalog entry")
        .with_help("A catalog entry sets at most one of age_weeks, age_months, age_years"));
    map.insert(9, ErrorInfo::new("Invalid date or time format"));

    // Collaborator errors (0100-0199)
    map.insert(100, ErrorInfo::new("Vaccination record not found"));
    map.insert(101, ErrorInfo::new("Child not found"));
    map.insert(102, ErrorInfo::new("Availability slot not found"));
    map.insert(103, ErrorInfo::new("Write rejected by the data store")
        .with_help("Check that the signed-in account owns this record"));
    map.insert(104, ErrorInfo::new("Data store unavailable"));
    map.insert(105, ErrorInfo::new("Recommendation rate limit exceeded")
        .with_help("Please try again later"));
    map.insert(106, ErrorInfo::new("Recommendation service requires payment"));
    map.insert(107, ErrorInfo::new("Recommendation service error"));
    map.insert(108, ErrorInfo::new("Booked slot cannot be removed"));
    map.insert(109, ErrorInfo::new("Duplicate record"));
    map.insert(110, ErrorInfo::new("Entity not found"));

    // Booking conflicts (0200-0299)
    map.insert(200, ErrorInfo::new("Slot already taken")
        .with_help("Pick another open slot"));
    map.insert(201, ErrorInfo::new("Appointment creation failed and the slot could not be released")
        .with_help("The slot stays booked without an appointment; release it manually"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Configuration error"));
    map.insert(403, ErrorInfo::new("Invalid data format"));

    map
});

// Validation errors
pub const KC0001: ErrorCode = ErrorCode::new(1);
pub const KC0002: ErrorCode = ErrorCode::new(2);
pub const KC0003: ErrorCode = ErrorCode::new(3);
pub const KC0004: ErrorCode = ErrorCode::new(4);
pub const KC0005: ErrorCode = ErrorCode::new(5);
pub const KC0006: ErrorCode = ErrorCode::new(6);
pub const KC0007: ErrorCode = ErrorCode::new(7);
pub const KC0008: ErrorCode = ErrorCode::new(8);
pub const KC0009: ErrorCode = ErrorCode::new(9);

// Collaborator errors
pub const KC0100: ErrorCode = ErrorCode::new(100);
pub const KC0101: ErrorCode = ErrorCode::new(101);
pub const KC0102: ErrorCode = ErrorCode::new(102);
pub const KC0103: ErrorCode = ErrorCode::new(103);
pub const KC0104: ErrorCode = ErrorCode::new(104);
pub const KC0105: ErrorCode = ErrorCode::new(105);
pub const KC0106: ErrorCode = ErrorCode::new(106);
pub const KC0107: ErrorCode = ErrorCode::new(107);
pub const KC0108: ErrorCode = ErrorCode::new(108);
pub const KC0109: ErrorCode = ErrorCode::new(109);
pub const KC0110: ErrorCode = ErrorCode::new(110);

// Booking conflicts
pub const KC0200: ErrorCode = ErrorCode::new(200);
pub const KC0201: ErrorCode = ErrorCode::new(201);

// System errors
pub const KC0400: ErrorCode = ErrorCode::new(400);
pub const KC0401: ErrorCode = ErrorCode::new(401);
pub const KC0402: ErrorCode = ErrorCode::new(402);
pub const KC0403: ErrorCode = ErrorCode::new(403);
