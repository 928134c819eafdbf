//! Medication records

use crate::context::EvaluationContext;
use crate::error::{EngineError, EngineResult};
use chrono::NaiveDate;
use kidcare_model::{ChildId, Medication, MedicationId, MedicationStore};
use log::info;

/// Input for recording a prescription
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMedication {
    pub health_issue: String,
    pub medicine_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub doctor_name: String,
    pub doctor_contact: Option<String>,
    pub prescribed_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

fn required(value: &str, field: &str) -> EngineResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EngineError::blank(field));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Record a prescription for a child. The prescribed date defaults to today
/// and may not lie in the future.
pub async fn add_medication(
    store: &dyn MedicationStore,
    ctx: &EvaluationContext,
    child: ChildId,
    new: NewMedication,
) -> EngineResult<Medication> {
    let prescribed_date = new.prescribed_date.unwrap_or(ctx.today);
    if prescribed_date > ctx.today {
        return Err(EngineError::future_date("Prescribed date", prescribed_date));
    }

    let medication = Medication {
        id: MedicationId::new(),
        child_id: child,
        health_issue: required(&new.health_issue, "Health issue")?,
        medicine_name: required(&new.medicine_name, "Medicine name")?,
        dosage: required(&new.dosage, "Dosage")?,
        frequency: required(&new.frequency, "Frequency")?,
        duration: required(&new.duration, "Duration")?,
        doctor_name: required(&new.doctor_name, "Doctor name")?,
        doctor_contact: optional(new.doctor_contact),
        prescribed_date,
        notes: optional(new.notes),
    };

    store.insert_medication(medication.clone()).await?;
    info!("medication {} recorded for child {}", medication.id, child);
    Ok(medication)
}

/// Medications of a child, newest prescription first
pub async fn medications_for(store: &dyn MedicationStore, child: ChildId) -> EngineResult<Vec<Medication>> {
    let mut medications = store.list_medications(child).await?;
    medications.sort_by(|a, b| b.prescribed_date.cmp(&a.prescribed_date));
    Ok(medications)
}
