//! Vaccination status computation
//!
//! Pure functions over a child's date of birth, the evaluation date and the
//! child's records joined to their catalog entries. Nothing here touches a
//! collaborator; derived state is recomputed from a fresh fetch every time.

use crate::context::EvaluationContext;
use chrono::NaiveDate;
use indexmap::IndexMap;
use kidcare_model::{CatalogEntry, RecordId, ScheduledAge, VaccinationEntry};
use serde::Serialize;
use std::fmt;

/// Age label of a catalog entry ("6 weeks", "9 months", "5 years", "At birth")
pub fn age_label(entry: &CatalogEntry) -> String {
    entry.age_label()
}

/// Whether an uncompleted record has reached its scheduled age.
///
/// Completed records are never due. At-birth entries are due at any age.
/// Months count as 30 days and years as 365 days.
pub fn is_due(entry: &VaccinationEntry, date_of_birth: NaiveDate, ctx: &EvaluationContext) -> bool {
    if entry.is_completed() {
        return false;
    }
    match entry.schedule.scheduled_age() {
        ScheduledAge::AtBirth => true,
        scheduled => ctx.days_since(date_of_birth) >= scheduled.threshold_days(),
    }
}

/// Status of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccineStatus {
    Completed,
    Due,
    Upcoming,
}

impl VaccineStatus {
    pub fn of(entry: &VaccinationEntry, date_of_birth: NaiveDate, ctx: &EvaluationContext) -> Self {
        if entry.is_completed() {
            VaccineStatus::Completed
        } else if is_due(entry, date_of_birth, ctx) {
            VaccineStatus::Due
        } else {
            VaccineStatus::Upcoming
        }
    }
}

impl fmt::Display for VaccineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaccineStatus::Completed => write!(f, "completed"),
            VaccineStatus::Due => write!(f, "due"),
            VaccineStatus::Upcoming => write!(f, "upcoming"),
        }
    }
}

/// Aggregate counts over a child's record set.
///
/// The three partitions are disjoint: `completed + due + upcoming == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub completed: usize,
    pub due: usize,
    pub upcoming: usize,
    pub total: usize,
}

impl StatusSummary {
    pub fn compute(
        entries: &[VaccinationEntry],
        date_of_birth: NaiveDate,
        ctx: &EvaluationContext,
    ) -> Self {
        let total = entries.len();
        let completed = entries.iter().filter(|e| e.is_completed()).count();
        let due = entries
            .iter()
            .filter(|e| is_due(e, date_of_birth, ctx))
            .count();
        Self {
            completed,
            due,
            upcoming: total - completed - due,
            total,
        }
    }

    /// Share of completed records, 0 when there are none
    pub fn completion_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

/// Entries bucketed by age label, buckets in catalog sort order
pub fn group_by_age(entries: &[VaccinationEntry]) -> IndexMap<String, Vec<&VaccinationEntry>> {
    let mut sorted: Vec<&VaccinationEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.schedule.sort_order);

    let mut groups: IndexMap<String, Vec<&VaccinationEntry>> = IndexMap::new();
    for entry in sorted {
        groups.entry(entry.schedule.age_label()).or_default().push(entry);
    }
    groups
}

pub fn filter_due<'a>(
    entries: &'a [VaccinationEntry],
    date_of_birth: NaiveDate,
    ctx: &EvaluationContext,
) -> Vec<&'a VaccinationEntry> {
    entries
        .iter()
        .filter(|e| is_due(e, date_of_birth, ctx))
        .collect()
}

pub fn filter_completed(entries: &[VaccinationEntry]) -> Vec<&VaccinationEntry> {
    entries.iter().filter(|e| e.is_completed()).collect()
}

/// One line of a status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub record_id: RecordId,
    pub vaccine_name: String,
    pub vaccine_code: String,
    pub purpose: String,
    pub age_label: String,
    pub status: VaccineStatus,
    pub administered_date: Option<NaiveDate>,
    pub is_optional: bool,
}

/// Summary plus grouped lines, ready for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub summary: StatusSummary,
    pub groups: IndexMap<String, Vec<StatusLine>>,
}

impl StatusReport {
    pub fn build(
        entries: &[VaccinationEntry],
        date_of_birth: NaiveDate,
        ctx: &EvaluationContext,
    ) -> Self {
        let groups = group_by_age(entries)
            .into_iter()
            .map(|(label, bucket)| {
                let lines = bucket
                    .into_iter()
                    .map(|e| StatusLine {
                        record_id: e.id(),
                        vaccine_name: e.schedule.vaccine_name.clone(),
                        vaccine_code: e.schedule.vaccine_code.clone(),
                        purpose: e.schedule.purpose.clone(),
                        age_label: label.clone(),
                        status: VaccineStatus::of(e, date_of_birth, ctx),
                        administered_date: e.record.administered_date,
                        is_optional: e.schedule.is_optional,
                    })
                    .collect();
                (label, lines)
            })
            .collect();

        Self {
            summary: StatusSummary::compute(entries, date_of_birth, ctx),
            groups,
        }
    }

    /// Keep only lines with the given status, dropping empty groups
    pub fn retain_status(&mut self, status: VaccineStatus) {
        self.groups.retain(|_, lines| {
            lines.retain(|l| l.status == status);
            !lines.is_empty()
        });
    }
}
