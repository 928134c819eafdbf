//! In-memory reference store
//!
//! Implements every collaborator trait over a [`Snapshot`] guarded by a single
//! read-write lock. Each trait call takes the lock once, so multi-row writes
//! (child fan-out, slot compare-and-swap) are atomic with respect to each other.

use crate::appointment::Appointment;
use crate::availability::AvailabilitySlot;
use crate::catalog::{CatalogEntry, ScheduleCatalog};
use crate::child::Child;
use crate::doctor::Doctor;
use crate::ids::{AppointmentId, ChildId, DoctorId, RecordId, SlotId, UserId};
use crate::medication::Medication;
use crate::provider::{
    AppointmentStore, AvailabilityStore, ChildStore, DoctorDirectory, EntityKind, MedicationStore,
    StoreError, VaccinationStore,
};
use crate::snapshot::Snapshot;
use crate::vaccination::{VaccinationEntry, VaccinationRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Snapshot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            tables: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// An empty store seeded with `catalog`
    pub fn with_catalog(catalog: ScheduleCatalog) -> Self {
        Self::from_snapshot(Snapshot {
            catalog: catalog.into_entries(),
            ..Default::default()
        })
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        self.tables.read().clone()
    }

    pub fn add_doctor(&self, doctor: Doctor) {
        self.tables.write().doctors.push(doctor);
    }

    pub fn add_slot(&self, slot: AvailabilitySlot) {
        self.tables.write().availability.push(slot);
    }

    pub fn appointment_count(&self) -> usize {
        self.tables.read().appointments.len()
    }
}

#[async_trait]
impl VaccinationStore for InMemoryStore {
    async fn fetch_vaccination_records(
        &self,
        child: ChildId,
    ) -> Result<Vec<VaccinationEntry>, StoreError> {
        let tables = self.tables.read();
        let catalog: HashMap<_, &CatalogEntry> = tables.catalog.iter().map(|e| (e.id, e)).collect();

        let mut entries = tables
            .vaccination_records
            .iter()
            .filter(|r| r.child_id == child)
            .map(|record| -> Result<VaccinationEntry, StoreError> {
                let schedule = catalog.get(&record.schedule_id).ok_or_else(|| {
                    StoreError::Internal(format!(
                        "record {} references unknown catalog entry {}",
                        record.id, record.schedule_id
                    ))
                })?;
                Ok(VaccinationEntry::new(record.clone(), (*schedule).clone()))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        entries.sort_by_key(|e| e.schedule.sort_order);
        Ok(entries)
    }

    async fn update_vaccination_record(
        &self,
        record: RecordId,
        is_completed: bool,
        administered_date: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let row = tables
            .vaccination_records
            .iter_mut()
            .find(|r| r.id == record)
            .ok_or_else(|| StoreError::not_found(EntityKind::VaccinationRecord, record))?;
        row.is_completed = is_completed;
        row.administered_date = administered_date;
        Ok(())
    }
}

#[async_trait]
impl ChildStore for InMemoryStore {
    async fn fetch_child(&self, child: ChildId) -> Result<Child, StoreError> {
        self.tables
            .read()
            .children
            .iter()
            .find(|c| c.id == child)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Child, child))
    }

    async fn list_children(&self, parent: UserId) -> Result<Vec<Child>, StoreError> {
        Ok(self
            .tables
            .read()
            .children
            .iter()
            .filter(|c| c.parent_id == parent)
            .cloned()
            .collect())
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let mut entries = self.tables.read().catalog.clone();
        entries.sort_by_key(|e| e.sort_order);
        Ok(entries)
    }

    async fn insert_child_with_records(
        &self,
        child: Child,
        records: Vec<VaccinationRecord>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if tables.children.iter().any(|c| c.id == child.id) {
            return Err(StoreError::duplicate(EntityKind::Child, child.id));
        }
        for record in &records {
            if record.child_id != child.id {
                return Err(StoreError::Internal(format!(
                    "record {} does not belong to child {}",
                    record.id, child.id
                )));
            }
            if !tables.catalog.iter().any(|e| e.id == record.schedule_id) {
                return Err(StoreError::not_found(EntityKind::CatalogEntry, record.schedule_id));
            }
        }
        tables.children.push(child);
        tables.vaccination_records.extend(records);
        Ok(())
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryStore {
    async fn fetch_open_slots(
        &self,
        doctor: DoctorId,
        from: NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>, StoreError> {
        let mut slots: Vec<_> = self
            .tables
            .read()
            .availability
            .iter()
            .filter(|s| s.doctor_id == doctor && !s.is_booked && s.available_date >= from)
            .cloned()
            .collect();
        slots.sort_by_key(AvailabilitySlot::sort_key);
        Ok(slots)
    }

    async fn fetch_slot(&self, slot: SlotId) -> Result<AvailabilitySlot, StoreError> {
        self.tables
            .read()
            .availability
            .iter()
            .find(|s| s.id == slot)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Slot, slot))
    }

    async fn insert_slot(&self, slot: AvailabilitySlot) -> Result<SlotId, StoreError> {
        let mut tables = self.tables.write();
        if tables.availability.iter().any(|s| s.id == slot.id) {
            return Err(StoreError::duplicate(EntityKind::Slot, slot.id));
        }
        let id = slot.id;
        tables.availability.push(slot);
        Ok(id)
    }

    async fn delete_slot(&self, slot: SlotId) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let index = tables
            .availability
            .iter()
            .position(|s| s.id == slot)
            .ok_or_else(|| StoreError::not_found(EntityKind::Slot, slot))?;
        if tables.availability[index].is_booked {
            return Err(StoreError::SlotBooked(slot));
        }
        tables.availability.remove(index);
        Ok(())
    }

    async fn set_slot_booked(&self, slot: SlotId) -> Result<AvailabilitySlot, StoreError> {
        let mut tables = self.tables.write();
        let row = tables
            .availability
            .iter_mut()
            .find(|s| s.id == slot)
            .ok_or_else(|| StoreError::not_found(EntityKind::Slot, slot))?;
        if row.is_booked {
            return Err(StoreError::AlreadyBooked(slot));
        }
        row.is_booked = true;
        Ok(row.clone())
    }

    async fn release_slot(&self, slot: SlotId) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let row = tables
            .availability
            .iter_mut()
            .find(|s| s.id == slot)
            .ok_or_else(|| StoreError::not_found(EntityKind::Slot, slot))?;
        row.is_booked = false;
        Ok(())
    }
}

#[async_trait]
impl AppointmentStore for InMemoryStore {
    async fn create_appointment(&self, appointment: Appointment) -> Result<AppointmentId, StoreError> {
        let mut tables = self.tables.write();
        if tables
            .appointments
            .iter()
            .any(|a| a.availability_id == appointment.availability_id)
        {
            return Err(StoreError::duplicate(EntityKind::Appointment, appointment.availability_id));
        }
        let id = appointment.id;
        tables.appointments.push(appointment);
        Ok(id)
    }

    async fn list_appointments_for_slot(&self, slot: SlotId) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .tables
            .read()
            .appointments
            .iter()
            .filter(|a| a.availability_id == slot)
            .cloned()
            .collect())
    }

    async fn list_appointments_for_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<Appointment>, StoreError> {
        let mut appointments: Vec<_> = self
            .tables
            .read()
            .appointments
            .iter()
            .filter(|a| a.parent_id == requester)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| (a.appointment_date, a.appointment_time));
        Ok(appointments)
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        Ok(self.tables.read().doctors.clone())
    }
}

#[async_trait]
impl MedicationStore for InMemoryStore {
    async fn insert_medication(&self, medication: Medication) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if !tables.children.iter().any(|c| c.id == medication.child_id) {
            return Err(StoreError::not_found(EntityKind::Child, medication.child_id));
        }
        tables.medications.push(medication);
        Ok(())
    }

    async fn list_medications(&self, child: ChildId) -> Result<Vec<Medication>, StoreError> {
        let mut medications: Vec<_> = self
            .tables
            .read()
            .medications
            .iter()
            .filter(|m| m.child_id == child)
            .cloned()
            .collect();
        medications.sort_by(|a, b| b.prescribed_date.cmp(&a.prescribed_date));
        Ok(medications)
    }
}
