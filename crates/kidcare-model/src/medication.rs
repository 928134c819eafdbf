//! Medication records

use crate::ids::{ChildId, MedicationId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A prescription recorded by a parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: MedicationId,
    pub child_id: ChildId,
    pub health_issue: String,
    pub medicine_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub doctor_name: String,
    #[serde(default)]
    pub doctor_contact: Option<String>,
    pub prescribed_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}
