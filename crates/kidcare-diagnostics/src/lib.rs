//! kidcare diagnostics and error reporting
//!
//! This crate provides the shared error vocabulary for the kidcare workspace:
//! stable error codes, their descriptions, and user-facing diagnostics.

mod diagnostic;
mod error_code;

pub use diagnostic::*;
pub use error_code::*;

/// Result type for operations that report a [`KidcareError`]
pub type Result<T> = std::result::Result<T, KidcareError>;
