//! In-memory manager for the patient roster and appointment calendar.
//!
//! The manager owns both collections and is their only writer. Each
//! mutation first checks the business rules against in-memory state,
//! then mutates, then rewrites the affected file(s) through the store.
//! A rejected mutation leaves memory and disk untouched. A persistence
//! failure is reported after memory was already mutated; the collections
//! then diverge from disk until the next successful save.
//!
//! Lookups are linear scans. The dataset is one clinic's roster; nothing
//! here precludes adding id or slot maps behind the same contract later.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::{Appointment, Patient};
use crate::store::{RecordStore, StoreError};

/// Manager errors. Everything except `Store` is an expected business-rule
/// rejection, not a fault.
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("patient {0} is already registered")]
    DuplicateId(String),

    #[error("patient {0} is not registered")]
    UnknownPatient(String),

    #[error("the {date} {time} slot is already booked")]
    SlotConflict { date: NaiveDate, time: NaiveTime },

    #[error("no appointment is booked at {date} {time}")]
    SlotEmpty { date: NaiveDate, time: NaiveTime },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Owner of the in-memory collections for the process lifetime.
pub struct Manager {
    store: RecordStore,
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
}

impl Manager {
    /// Load both collections from the store.
    pub fn open(store: RecordStore) -> ManagerResult<Self> {
        let patients = store.load_patients()?;
        let appointments = store.load_appointments()?;
        Ok(Self {
            store,
            patients,
            appointments,
        })
    }

    /// Register a new patient.
    pub fn add_patient(&mut self, id: &str, first_name: &str, last_name: &str) -> ManagerResult<()> {
        if self.get_patient_by_id(id).is_some() {
            return Err(ManagerError::DuplicateId(id.to_string()));
        }
        self.patients.push(Patient::new(id, first_name, last_name));
        self.store.save_patients(&self.patients)?;
        Ok(())
    }

    /// Book an appointment for a registered patient in a free slot.
    pub fn add_appointment(
        &mut self,
        patient_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        description: &str,
    ) -> ManagerResult<()> {
        if self.get_patient_by_id(patient_id).is_none() {
            return Err(ManagerError::UnknownPatient(patient_id.to_string()));
        }
        if self.get_busy_appointment(date, time).is_some() {
            return Err(ManagerError::SlotConflict { date, time });
        }
        self.appointments
            .push(Appointment::new(patient_id, date, time, description));
        self.store.save_appointments(&self.appointments)?;
        Ok(())
    }

    /// Delete a patient. Their appointments are kept for history, with the
    /// patient reference flipped to the orphan marker, before the patient
    /// leaves the roster. Both files are rewritten.
    pub fn delete_patient(&mut self, id: &str) -> ManagerResult<()> {
        let position = self
            .patients
            .iter()
            .position(|patient| patient.id == id)
            .ok_or_else(|| ManagerError::UnknownPatient(id.to_string()))?;

        for appointment in self
            .appointments
            .iter_mut()
            .filter(|appointment| appointment.patient.is_owned_by(id))
        {
            appointment.orphan();
        }
        self.patients.remove(position);

        self.store.save_patients(&self.patients)?;
        self.store.save_appointments(&self.appointments)?;
        Ok(())
    }

    /// Cancel the appointment occupying the given slot.
    pub fn delete_appointment(&mut self, date: NaiveDate, time: NaiveTime) -> ManagerResult<()> {
        let position = self
            .appointments
            .iter()
            .position(|appointment| appointment.occupies(date, time))
            .ok_or(ManagerError::SlotEmpty { date, time })?;

        self.appointments.remove(position);
        self.store.save_appointments(&self.appointments)?;
        Ok(())
    }

    /// Find a patient by id.
    pub fn get_patient_by_id(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|patient| patient.id == id)
    }

    /// Appointments booked for a patient, in insertion order, or `None`
    /// if no such patient is registered. Orphaned appointments never match.
    pub fn get_appointments_by_patient(&self, id: &str) -> Option<Vec<&Appointment>> {
        self.get_patient_by_id(id)?;
        Some(
            self.appointments
                .iter()
                .filter(|appointment| appointment.patient.is_owned_by(id))
                .collect(),
        )
    }

    /// Appointments on a date, in insertion order. Empty is a valid result.
    pub fn get_appointments_by_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|appointment| appointment.date == date)
            .collect()
    }

    /// The appointment occupying a slot, if any. At most one exists.
    pub fn get_busy_appointment(&self, date: NaiveDate, time: NaiveTime) -> Option<&Appointment> {
        self.appointments
            .iter()
            .find(|appointment| appointment.occupies(date, time))
    }

    /// Number of registered patients.
    pub fn count_patients(&self) -> usize {
        self.patients.len()
    }

    /// Number of booked appointments, orphaned ones included.
    pub fn count_appointments(&self) -> usize {
        self.appointments.len()
    }

    /// All registered patients, in registration order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// All booked appointments, in booking order.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}
