//! Caller-side view of one child's schedule

use crate::context::EvaluationContext;
use crate::error::{EngineError, EngineResult};
use crate::status::{
    StatusReport, StatusSummary, VaccineStatus, filter_completed, filter_due, group_by_age,
};
use crate::toggle::{Toggled, toggle_completion};
use chrono::NaiveDate;
use indexmap::IndexMap;
use kidcare_model::{
    Child, ChildId, EntityKind, RecordId, VaccinationEntry, VaccinationStore,
};
use log::debug;
use std::sync::Arc;

/// Cached record set of one child.
///
/// The cache only changes after a successful fetch. A toggle writes first and
/// then refreshes, so a failed write or fetch leaves the previous view intact.
pub struct ScheduleTracker {
    store: Arc<dyn VaccinationStore>,
    child: ChildId,
    date_of_birth: NaiveDate,
    entries: Vec<VaccinationEntry>,
}

impl ScheduleTracker {
    /// Create an empty tracker; call [`ScheduleTracker::refresh`] to load it
    pub fn new(store: Arc<dyn VaccinationStore>, child: &Child) -> Self {
        Self {
            store,
            child: child.id,
            date_of_birth: child.date_of_birth,
            entries: Vec::new(),
        }
    }

    /// Create a tracker and load its records
    pub async fn load(store: Arc<dyn VaccinationStore>, child: &Child) -> EngineResult<Self> {
        let mut tracker = Self::new(store, child);
        tracker.refresh().await?;
        Ok(tracker)
    }

    pub fn child(&self) -> ChildId {
        self.child
    }

    pub fn entries(&self) -> &[VaccinationEntry] {
        &self.entries
    }

    pub fn entry(&self, record: RecordId) -> Option<&VaccinationEntry> {
        self.entries.iter().find(|e| e.id() == record)
    }

    /// Replace the cached view with a fresh fetch
    pub async fn refresh(&mut self) -> EngineResult<()> {
        let entries = self.store.fetch_vaccination_records(self.child).await?;
        debug!("loaded {} records for child {}", entries.len(), self.child);
        self.entries = entries;
        Ok(())
    }

    /// Toggle a cached record, then refresh
    pub async fn toggle(&mut self, ctx: &EvaluationContext, record: RecordId) -> EngineResult<Toggled> {
        let current = self
            .entry(record)
            .map(VaccinationEntry::is_completed)
            .ok_or_else(|| EngineError::not_found(EntityKind::VaccinationRecord, record))?;

        let toggled = toggle_completion(self.store.as_ref(), ctx, record, current).await?;
        self.refresh().await?;
        Ok(toggled)
    }

    pub fn summary(&self, ctx: &EvaluationContext) -> StatusSummary {
        StatusSummary::compute(&self.entries, self.date_of_birth, ctx)
    }

    pub fn status(&self, ctx: &EvaluationContext, record: RecordId) -> Option<VaccineStatus> {
        self.entry(record)
            .map(|e| VaccineStatus::of(e, self.date_of_birth, ctx))
    }

    /// Records due now, in catalog order
    pub fn due(&self, ctx: &EvaluationContext) -> Vec<&VaccinationEntry> {
        filter_due(&self.entries, self.date_of_birth, ctx)
    }

    pub fn completed(&self) -> Vec<&VaccinationEntry> {
        filter_completed(&self.entries)
    }

    pub fn groups(&self) -> IndexMap<String, Vec<&VaccinationEntry>> {
        group_by_age(&self.entries)
    }

    pub fn report(&self, ctx: &EvaluationContext) -> StatusReport {
        StatusReport::build(&self.entries, self.date_of_birth, ctx)
    }
}
