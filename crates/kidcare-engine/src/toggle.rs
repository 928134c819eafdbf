//! Completion toggle

use crate::context::EvaluationContext;
use crate::error::EngineResult;
use chrono::NaiveDate;
use kidcare_model::{RecordId, VaccinationStore};
use log::info;
use serde::Serialize;

/// The state written by a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggled {
    pub record: RecordId,
    pub is_completed: bool,
    pub administered_date: Option<NaiveDate>,
}

/// Flip a record's completion flag.
///
/// The new flag is the negation of `current`. Completing a record stamps it
/// with `ctx.today`; un-completing clears the date. Nothing is returned until
/// the store confirms the write, and callers must re-fetch the record set to
/// see the effect on due and completed counts.
pub async fn toggle_completion(
    store: &dyn VaccinationStore,
    ctx: &EvaluationContext,
    record: RecordId,
    current: bool,
) -> EngineResult<Toggled> {
    let is_completed = !current;
    let administered_date = is_completed.then_some(ctx.today);

    store
        .update_vaccination_record(record, is_completed, administered_date)
        .await?;

    info!(
        "record {} marked {}",
        record,
        if is_completed { "completed" } else { "not completed" }
    );
    Ok(Toggled {
        record,
        is_completed,
        administered_date,
    })
}
