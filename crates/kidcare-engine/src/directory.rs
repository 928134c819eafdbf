//! Doctor search

use crate::error::EngineResult;
use kidcare_model::{Doctor, DoctorDirectory};
use std::collections::BTreeSet;

/// Directory filters; blank fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorQuery {
    /// Case-insensitive substring of the doctor's location
    pub location: Option<String>,
    /// Exact specialization
    pub specialization: Option<String>,
}

impl DoctorQuery {
    pub fn matches(&self, doctor: &Doctor) -> bool {
        if !doctor.active {
            return false;
        }
        if let Some(location) = non_blank(&self.location) {
            if !doctor
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }
        if let Some(specialization) = non_blank(&self.specialization) {
            if doctor.specialization != specialization {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Active doctors matching the query, in directory order
pub async fn search_doctors(directory: &dyn DoctorDirectory, query: &DoctorQuery) -> EngineResult<Vec<Doctor>> {
    let doctors = directory.list_doctors().await?;
    Ok(doctors.into_iter().filter(|d| query.matches(d)).collect())
}

/// Distinct specializations of active doctors, sorted, for filter menus
pub fn specializations(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .filter(|d| d.active)
        .map(|d| d.specialization.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
