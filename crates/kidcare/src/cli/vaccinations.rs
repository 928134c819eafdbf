//! Status and toggle commands

use super::Session;
use super::output::{cell, format_success, format_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use kidcare_engine::{ScheduleTracker, StatusReport, StatusSummary, VaccineStatus};
use kidcare_model::{Child, ChildId, ChildStore, RecordId};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tabled::Tabled;

/// Configuration for the status command
pub struct StatusConfig {
    pub child: ChildId,
    /// Keep only records with this status
    pub only: Option<VaccineStatus>,
}

/// Configuration for the toggle command
pub struct ToggleConfig {
    pub child: ChildId,
    pub record: RecordId,
}

/// JSON shape of the status command; groups keep catalog order
#[derive(Serialize)]
struct StatusOutput<'a> {
    child: &'a Child,
    evaluated_on: NaiveDate,
    #[serde(flatten)]
    report: &'a StatusReport,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Vaccine")]
    vaccine: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Given")]
    given: String,
    #[tabled(rename = "Record")]
    record: String,
}

/// Parse a `--only` filter value
pub fn parse_status(s: &str) -> Result<VaccineStatus, String> {
    match s.trim().to_lowercase().as_str() {
        "due" => Ok(VaccineStatus::Due),
        "completed" | "done" => Ok(VaccineStatus::Completed),
        "upcoming" => Ok(VaccineStatus::Upcoming),
        other => Err(format!("unknown status '{}' (expected due, completed or upcoming)", other)),
    }
}

fn summary_line(child: &Child, summary: &StatusSummary) -> String {
    format!(
        "{}: {} completed, {} due, {} upcoming of {} ({}%)",
        child.name,
        summary.completed,
        summary.due,
        summary.upcoming,
        summary.total,
        summary.completion_percent()
    )
}

fn report_table(child: &Child, report: &StatusReport) -> String {
    let rows: Vec<StatusRow> = report
        .groups
        .values()
        .flatten()
        .map(|line| StatusRow {
            age: line.age_label.clone(),
            vaccine: if line.is_optional {
                format!("{} (optional)", line.vaccine_name)
            } else {
                line.vaccine_name.clone()
            },
            code: line.vaccine_code.clone(),
            status: line.status.to_string(),
            given: cell(line.administered_date),
            record: line.record_id.to_string(),
        })
        .collect();
    format!("{}\n{}", summary_line(child, &report.summary), format_table(rows))
}

async fn load_child(store: &dyn ChildStore, child: ChildId) -> Result<Child> {
    store
        .fetch_child(child)
        .await
        .with_context(|| format!("Failed to load child {}", child))
}

/// Show a child's vaccination status grouped by age
pub async fn status(session: &Session, config: StatusConfig) -> Result<()> {
    let store = session.load_store()?;
    let child = load_child(&store, config.child).await?;

    let tracker = ScheduleTracker::load(Arc::new(store), &child)
        .await
        .with_context(|| format!("Failed to load vaccination records of {}", child.name))?;

    let mut report = tracker.report(&session.ctx);
    if let Some(only) = config.only {
        report.retain_status(only);
    }

    let value = StatusOutput {
        child: &child,
        evaluated_on: session.ctx.today,
        report: &report,
    };
    session.print(&value, || report_table(&child, &report))
}

/// Toggle one record's completion and save the data file
pub async fn toggle(session: &Session, config: ToggleConfig) -> Result<()> {
    let store = session.load_store()?;
    let child = load_child(&store, config.child).await?;

    let mut tracker = ScheduleTracker::load(Arc::new(store.clone()), &child)
        .await
        .with_context(|| format!("Failed to load vaccination records of {}", child.name))?;
    let toggled = tracker
        .toggle(&session.ctx, config.record)
        .await
        .with_context(|| format!("Failed to toggle record {}", config.record))?;
    session.save_store(&store)?;

    let summary = tracker.summary(&session.ctx);
    let vaccine = tracker
        .entry(config.record)
        .map(|e| e.schedule.vaccine_name.clone())
        .unwrap_or_else(|| config.record.to_string());

    let value = json!({
        "toggled": toggled,
        "summary": summary,
    });
    session.print(&value, || {
        let message = match toggled.administered_date {
            Some(date) => format!("{} marked completed on {}", vaccine, date),
            None => format!("{} marked not completed", vaccine),
        };
        format!("{}\n{}", format_success(&message), summary_line(&child, &summary))
    })
}
