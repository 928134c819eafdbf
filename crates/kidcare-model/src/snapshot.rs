//! JSON snapshot of every table
//!
//! The reference store loads its state from a snapshot and dumps it back, so a
//! deployment can be run from a single data file.

use crate::appointment::Appointment;
use crate::availability::AvailabilitySlot;
use crate::catalog::{CatalogEntry, CatalogError, ScheduleCatalog};
use crate::child::Child;
use crate::doctor::Doctor;
use crate::medication::Medication;
use crate::vaccination::VaccinationRecord;
use kidcare_diagnostics::KidcareError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub vaccination_records: Vec<VaccinationRecord>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read or write {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid snapshot: {0}")]
    Parse(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SnapshotError {
    pub fn code(&self) -> kidcare_diagnostics::ErrorCode {
        match self {
            SnapshotError::Io { .. } => kidcare_diagnostics::KC0401,
            SnapshotError::Parse(_) => kidcare_diagnostics::KC0403,
            SnapshotError::Catalog(err) => err.code(),
        }
    }
}

impl From<SnapshotError> for KidcareError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Catalog(err) => err.into(),
            _ => KidcareError::system(err.code(), err.to_string()),
        }
    }
}

impl Snapshot {
    /// Parse a snapshot; the catalog table is validated and put in `sort_order`
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))?;
        let catalog = std::mem::take(&mut snapshot.catalog);
        snapshot.catalog = ScheduleCatalog::new(catalog)?.into_entries();
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| SnapshotError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
