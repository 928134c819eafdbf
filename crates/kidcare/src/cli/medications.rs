//! Medication commands

use super::Session;
use super::output::{cell, format_success, format_table};
use anyhow::{Context, Result};
use kidcare_engine::{NewMedication, add_medication, medications_for};
use kidcare_model::ChildId;
use tabled::Tabled;

/// Configuration for the medications command
pub struct MedicationsConfig {
    pub child: ChildId,
}

/// Configuration for the add-medication command
pub struct AddMedicationConfig {
    pub child: ChildId,
    pub medication: NewMedication,
}

#[derive(Tabled)]
struct MedicationRow {
    #[tabled(rename = "Prescribed")]
    prescribed: String,
    #[tabled(rename = "Medicine")]
    medicine: String,
    #[tabled(rename = "For")]
    health_issue: String,
    #[tabled(rename = "Dosage")]
    dosage: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Doctor")]
    doctor: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// List a child's medications, newest first
pub async fn medications(session: &Session, config: MedicationsConfig) -> Result<()> {
    let store = session.load_store()?;
    let medications = medications_for(&store, config.child)
        .await
        .with_context(|| format!("Failed to list medications of child {}", config.child))?;

    session.print(&medications, || {
        format_table(
            medications
                .iter()
                .map(|m| MedicationRow {
                    prescribed: m.prescribed_date.to_string(),
                    medicine: m.medicine_name.clone(),
                    health_issue: m.health_issue.clone(),
                    dosage: m.dosage.clone(),
                    frequency: m.frequency.clone(),
                    duration: m.duration.clone(),
                    doctor: match &m.doctor_contact {
                        Some(contact) => format!("{} ({})", m.doctor_name, contact),
                        None => m.doctor_name.clone(),
                    },
                    notes: cell(m.notes.as_deref()),
                })
                .collect(),
        )
    })
}

/// Record a prescription
pub async fn add(session: &Session, config: AddMedicationConfig) -> Result<()> {
    let store = session.load_store()?;
    let medication = add_medication(&store, &session.ctx, config.child, config.medication)
        .await
        .context("Failed to add medication")?;
    session.save_store(&store)?;

    session.print(&medication, || {
        format_success(&format!(
            "Recorded {} for {}",
            medication.medicine_name, medication.health_issue
        ))
    })
}
