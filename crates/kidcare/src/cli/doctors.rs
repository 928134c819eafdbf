//! Doctor search command

use super::Session;
use super::output::{cell, format_table};
use anyhow::{Context, Result};
use kidcare_engine::{DoctorQuery, search_doctors, specializations};
use kidcare_model::DoctorDirectory;
use tabled::Tabled;

/// Configuration for the doctors command
pub struct DoctorsConfig {
    pub location: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Tabled)]
struct DoctorRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Specialization")]
    specialization: String,
    #[tabled(rename = "Qualification")]
    qualification: String,
    #[tabled(rename = "Experience")]
    experience: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Fee")]
    fee: String,
    #[tabled(rename = "Id")]
    id: String,
}

/// Search the doctor directory
pub async fn doctors(session: &Session, config: DoctorsConfig) -> Result<()> {
    let store = session.load_store()?;
    let query = DoctorQuery {
        location: config.location,
        specialization: config.specialization,
    };
    let found = search_doctors(&store, &query)
        .await
        .context("Failed to search doctors")?;
    let all = store.list_doctors().await.context("Failed to list doctors")?;

    session.print(&found, || {
        let rows = found
            .iter()
            .map(|d| DoctorRow {
                name: d.name.clone(),
                specialization: d.specialization.clone(),
                qualification: d.qualification.clone(),
                experience: format!("{} years", d.experience_years),
                location: d.location.clone(),
                fee: cell(d.consultation_fee),
                id: d.id.to_string(),
            })
            .collect();
        format!(
            "{}\nSpecializations: {}",
            format_table(rows),
            specializations(&all).join(", ")
        )
    })
}
