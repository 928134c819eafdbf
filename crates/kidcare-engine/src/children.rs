//! Child registration and age descriptions

use crate::context::EvaluationContext;
use crate::error::{EngineError, EngineResult};
use chrono::{Datelike, NaiveDate};
use kidcare_model::{Child, ChildId, ChildStore, Gender, UserId, VaccinationRecord};
use log::info;

/// Input for registering a child
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChild {
    pub parent: UserId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub place_of_birth: Option<String>,
    pub birth_health_issues: Vec<String>,
}

/// Register a child and create one pending record per catalog entry.
///
/// The child and its records are written in a single store call.
pub async fn register_child(
    store: &dyn ChildStore,
    ctx: &EvaluationContext,
    new: NewChild,
) -> EngineResult<Child> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(EngineError::blank("Child name"));
    }
    if new.date_of_birth > ctx.today {
        return Err(EngineError::future_date("Date of birth", new.date_of_birth));
    }

    let child = Child {
        id: ChildId::new(),
        parent_id: new.parent,
        name: name.to_string(),
        date_of_birth: new.date_of_birth,
        gender: new.gender,
        place_of_birth: new
            .place_of_birth
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        birth_health_issues: normalize_issues(new.birth_health_issues),
    };

    let catalog = store.fetch_catalog().await?;
    let records: Vec<_> = catalog
        .iter()
        .map(|entry| VaccinationRecord::pending(child.id, entry.id))
        .collect();
    let count = records.len();

    store.insert_child_with_records(child.clone(), records).await?;
    info!("registered child {} with {} vaccination records", child.id, count);
    Ok(child)
}

/// Trim labels, drop blanks and repeats, keep first-seen order
fn normalize_issues(issues: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(issues.len());
    for issue in issues {
        let issue = issue.trim();
        if !issue.is_empty() && !out.iter().any(|seen| seen == issue) {
            out.push(issue.to_string());
        }
    }
    out
}

/// Whole calendar months from birth to today, ignoring the day of month
pub fn age_in_months(date_of_birth: NaiveDate, ctx: &EvaluationContext) -> i32 {
    (ctx.today.year() - date_of_birth.year()) * 12
        + (ctx.today.month() as i32 - date_of_birth.month() as i32)
}

/// Age phrase used in recommendation prompts ("3 months old", "2 years 4 months old")
pub fn describe_age(date_of_birth: NaiveDate, ctx: &EvaluationContext) -> String {
    let months = age_in_months(date_of_birth, ctx);
    if months < 12 {
        return format!("{} months old", months);
    }
    match (months / 12, months % 12) {
        (years, 0) => format!("{} years old", years),
        (years, rest) => format!("{} years {} months old", years, rest),
    }
}

/// Compact age for listings ("3 months", "2y 4m", "5 years")
pub fn describe_age_short(date_of_birth: NaiveDate, ctx: &EvaluationContext) -> String {
    let months = age_in_months(date_of_birth, ctx);
    if months < 12 {
        return format!("{} months", months);
    }
    match (months / 12, months % 12) {
        (years, 0) => format!("{} years", years),
        (years, rest) => format!("{}y {}m", years, rest),
    }
}
