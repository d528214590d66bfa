//! Appointment model and the patient reference it carries.

use chrono::{NaiveDate, NaiveTime};

/// Reference from an appointment to the patient it was booked for.
///
/// Appointments outlive their patients: deleting a patient keeps the
/// patient's appointments for history, with the reference flipped to
/// [`PatientRef::Orphaned`]. The durable form of `Orphaned` is the
/// sentinel string [`crate::store::PATIENT_DELETED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientRef {
    /// Booked for a patient that was registered at creation time
    Owned(String),
    /// The owning patient has since been deleted
    Orphaned,
}

impl PatientRef {
    /// The owning patient's id, if any.
    pub fn owner_id(&self) -> Option<&str> {
        match self {
            PatientRef::Owned(id) => Some(id),
            PatientRef::Orphaned => None,
        }
    }

    /// Check whether the owning patient was deleted.
    pub fn is_orphaned(&self) -> bool {
        matches!(self, PatientRef::Orphaned)
    }

    /// Check whether this reference points at the given patient id.
    pub fn is_owned_by(&self, id: &str) -> bool {
        self.owner_id() == Some(id)
    }
}

/// A booked appointment. At most one appointment may occupy a
/// (date, time) slot, clinic-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    /// Owning patient, or the orphan marker
    pub patient: PatientRef,
    /// Calendar date of the slot, no timezone
    pub date: NaiveDate,
    /// Time of day of the slot, second resolution
    pub time: NaiveTime,
    /// Free-text description, may be empty
    pub description: String,
}

impl Appointment {
    /// Create a new appointment owned by the given patient.
    pub fn new(
        patient_id: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            patient: PatientRef::Owned(patient_id.into()),
            date,
            time,
            description: description.into(),
        }
    }

    /// Check whether this appointment occupies the given slot.
    pub fn occupies(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.date == date && self.time == time
    }

    /// Detach this appointment from its deleted owner.
    pub fn orphan(&mut self) {
        self.patient = PatientRef::Orphaned;
    }
}
