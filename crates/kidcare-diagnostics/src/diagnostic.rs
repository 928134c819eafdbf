//! kidcare error and diagnostic types

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The action was rejected
    Error,
    /// The action completed but something needs attention
    Warning,
    /// Informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A user-visible message describing why an action failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Entity the message is about (record id, slot id, ...)
    pub subject: Option<String>,
    /// Additional help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            subject: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            subject: None,
            help: None,
        }
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic for a terminal, colouring the severity
    #[cfg(feature = "colored")]
    pub fn render_colored(&self) -> String {
        use colored::Colorize;

        let label = match self.severity {
            Severity::Error => format!("{}[{}]", self.severity, self.code).red().bold(),
            Severity::Warning => format!("{}[{}]", self.severity, self.code).yellow().bold(),
            Severity::Info => format!("{}[{}]", self.severity, self.code).cyan().bold(),
        };
        let mut out = format!("{}: {}", label, self.message);
        if let Some(subject) = &self.subject {
            out.push_str(&format!(" ({})", subject.dimmed()));
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("\n  {} {}", "help:".green(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(subject) = &self.subject {
            write!(f, " ({})", subject)?;
        }
        Ok(())
    }
}

/// Workspace-level error type carrying a stable [`ErrorCode`]
#[derive(Debug, Clone, Error)]
pub enum KidcareError {
    /// Malformed input, rejected before any collaborator call
    #[error("{code}: {message}")]
    Validation { code: ErrorCode, message: String },

    /// A collaborator reported a failure
    #[error("{code}: {message}")]
    Collaborator {
        code: ErrorCode,
        message: String,
        subject: Option<String>,
    },

    /// A booking lost the race for a slot or was rolled back
    #[error("{code}: {message}")]
    Booking {
        code: ErrorCode,
        message: String,
        subject: Option<String>,
    },

    /// I/O, configuration or format failure
    #[error("{code}: {message}")]
    System { code: ErrorCode, message: String },
}

impl KidcareError {
    /// Create a validation error
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    /// Create a collaborator error
    pub fn collaborator(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Collaborator {
            code,
            message: message.into(),
            subject: None,
        }
    }

    /// Create a booking error about a slot
    pub fn booking(code: ErrorCode, message: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::Booking {
            code,
            message: message.into(),
            subject: Some(subject.into()),
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
        }
    }

    /// Attach the entity the error concerns
    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        match self {
            Self::Collaborator { code, message, .. } => Self::Collaborator {
                code,
                message,
                subject: Some(subject.into()),
            },
            Self::Booking { code, message, .. } => Self::Booking {
                code,
                message,
                subject: Some(subject.into()),
            },
            other => other,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::Collaborator { code, .. } => *code,
            Self::Booking { code, .. } => *code,
            Self::System { code, .. } => *code,
        }
    }

    /// Convert to a diagnostic, filling help text from the code table
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, message, subject) = match self {
            Self::Validation { code, message } => (*code, message, None),
            Self::Collaborator {
                code,
                message,
                subject,
            } => (*code, message, subject.as_ref()),
            Self::Booking {
                code,
                message,
                subject,
            } => (*code, message, subject.as_ref()),
            Self::System { code, message } => (*code, message, None),
        };

        let mut diag = Diagnostic::error(code, message.clone());
        if let Some(subject) = subject {
            diag = diag.with_subject(subject.clone());
        }
        if let Some(help) = code.info().help {
            diag = diag.with_help(help);
        }
        diag
    }
}
