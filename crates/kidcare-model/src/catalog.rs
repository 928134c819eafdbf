//! Vaccine catalog
//!
//! Reference data describing every scheduled vaccine and the age at which it
//! becomes due. The catalog is seeded once per deployment and read-only after.

use crate::ids::ScheduleId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduled vaccine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ScheduleId,
    pub vaccine_name: String,
    pub vaccine_code: String,
    pub purpose: String,
    #[serde(default)]
    pub age_weeks: Option<u32>,
    #[serde(default)]
    pub age_months: Option<u32>,
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub is_optional: bool,
    pub sort_order: i32,
}

/// The age at which a catalog entry is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledAge {
    AtBirth,
    Weeks(u32),
    Months(u32),
    Years(u32),
}

impl ScheduledAge {
    /// Minimum child age in days at which the dose becomes due.
    ///
    /// Months are 30 days and years are 365 days. Due dates downstream were
    /// calibrated against this approximation, so it must not become calendar
    /// arithmetic.
    pub fn threshold_days(&self) -> i64 {
        match self {
            ScheduledAge::AtBirth => 0,
            ScheduledAge::Weeks(n) => i64::from(*n) * 7,
            ScheduledAge::Months(n) => i64::from(*n) * 30,
            ScheduledAge::Years(n) => i64::from(*n) * 365,
        }
    }
}

impl fmt::Display for ScheduledAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduledAge::AtBirth => write!(f, "At birth"),
            ScheduledAge::Weeks(n) => write!(f, "{} weeks", n),
            ScheduledAge::Months(n) => write!(f, "{} months", n),
            ScheduledAge::Years(n) => write!(f, "{} years", n),
        }
    }
}

impl CatalogEntry {
    /// Create an at-birth entry; chain `weeks`/`months`/`years` to schedule it later
    pub fn new(
        vaccine_name: impl Into<String>,
        vaccine_code: impl Into<String>,
        purpose: impl Into<String>,
        sort_order: i32,
    ) -> Self {
        Self {
            id: ScheduleId::new(),
            vaccine_name: vaccine_name.into(),
            vaccine_code: vaccine_code.into(),
            purpose: purpose.into(),
            age_weeks: None,
            age_months: None,
            age_years: None,
            is_optional: false,
            sort_order,
        }
    }

    pub fn weeks(mut self, n: u32) -> Self {
        self.age_weeks = Some(n);
        self
    }

    pub fn months(mut self, n: u32) -> Self {
        self.age_months = Some(n);
        self
    }

    pub fn years(mut self, n: u32) -> Self {
        self.age_years = Some(n);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Resolve the scheduled age.
    ///
    /// Fields are checked weeks, months, years in that order and a zero value
    /// counts as unset, so an entry with every field empty or zero is due at birth.
    pub fn scheduled_age(&self) -> ScheduledAge {
        match (nonzero(self.age_weeks), nonzero(self.age_months), nonzero(self.age_years)) {
            (Some(w), _, _) => ScheduledAge::Weeks(w),
            (None, Some(m), _) => ScheduledAge::Months(m),
            (None, None, Some(y)) => ScheduledAge::Years(y),
            (None, None, None) => ScheduledAge::AtBirth,
        }
    }

    /// Human-readable age label ("6 weeks", "9 months", "At birth", ...)
    pub fn age_label(&self) -> String {
        self.scheduled_age().to_string()
    }

    /// Check the at-most-one-age-field invariant
    pub fn validate(&self) -> Result<(), CatalogError> {
        let set = [self.age_weeks, self.age_months, self.age_years]
            .iter()
            .filter(|v| nonzero(**v).is_some())
            .count();
        if set > 1 {
            return Err(CatalogError::InvalidEntry {
                vaccine: self.vaccine_name.clone(),
                reason: "more than one of age_weeks, age_months, age_years is set".to_string(),
            });
        }
        if self.vaccine_name.trim().is_empty() {
            return Err(CatalogError::InvalidEntry {
                vaccine: self.vaccine_code.clone(),
                reason: "vaccine name is blank".to_string(),
            });
        }
        Ok(())
    }
}

fn nonzero(value: Option<u32>) -> Option<u32> {
    value.filter(|n| *n > 0)
}

/// Catalog loading error
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid catalog entry '{vaccine}': {reason}")]
    InvalidEntry { vaccine: String, reason: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<CatalogError> for kidcare_diagnostics::KidcareError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::InvalidEntry { .. } => Self::validation(err.code(), message),
            _ => Self::system(err.code(), message),
        }
    }
}

impl CatalogError {
    pub fn code(&self) -> kidcare_diagnostics::ErrorCode {
        match self {
            CatalogError::InvalidEntry { .. } => kidcare_diagnostics::KC0008,
            CatalogError::ParseError(_) => kidcare_diagnostics::KC0403,
            CatalogError::IoError(_) => kidcare_diagnostics::KC0401,
        }
    }
}

/// The full vaccine catalog, kept in `sort_order`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleCatalog {
    entries: Vec<CatalogEntry>,
}

impl ScheduleCatalog {
    /// Build a catalog, validating every entry and ordering by `sort_order`
    pub fn new(mut entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        for entry in &entries {
            entry.validate()?;
        }
        entries.sort_by_key(|e| e.sort_order);
        Ok(Self { entries })
    }

    /// Load a catalog from a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseError(e.to_string()))?;
        Self::new(entries)
    }

    /// Load a catalog from a JSON file at runtime
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &ScheduleId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }
}
