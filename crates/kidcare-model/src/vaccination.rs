//! Per-child vaccination records

use crate::catalog::CatalogEntry;
use crate::ids::{ChildId, RecordId, ScheduleId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion state of one catalog entry for one child.
///
/// `administered_date` is set exactly when `is_completed` is true; the toggle
/// operation maintains this, the store does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    pub id: RecordId,
    pub child_id: ChildId,
    pub schedule_id: ScheduleId,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub administered_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub verified_by: Option<UserId>,
}

impl VaccinationRecord {
    /// A fresh, incomplete record for `child` and `schedule`
    pub fn pending(child_id: ChildId, schedule_id: ScheduleId) -> Self {
        Self {
            id: RecordId::new(),
            child_id,
            schedule_id,
            is_completed: false,
            administered_date: None,
            notes: None,
            verified_by: None,
        }
    }
}

/// A vaccination record joined to its catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationEntry {
    pub record: VaccinationRecord,
    pub schedule: CatalogEntry,
}

impl VaccinationEntry {
    pub fn new(record: VaccinationRecord, schedule: CatalogEntry) -> Self {
        Self { record, schedule }
    }

    pub fn id(&self) -> RecordId {
        self.record.id
    }

    pub fn is_completed(&self) -> bool {
        self.record.is_completed
    }
}
