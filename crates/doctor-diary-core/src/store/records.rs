//! Raw serde records mirroring the durable JSON layout, with mapping
//! to and from the domain models.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{StoreError, StoreResult};
use crate::models::{Appointment, Patient, PatientRef};

/// Sentinel written in place of a patient id for orphaned appointments.
pub const PATIENT_DELETED: &str = "patient_deleted";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// One patient as stored on disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

/// One appointment as stored on disk. Date and time are kept textual
/// (`YYYY-MM-DD`, `HH:MM:SS`) in the durable form.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub description: String,
}

impl From<PatientRecord> for Patient {
    fn from(record: PatientRecord) -> Self {
        Patient {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
        }
    }
}

impl From<&Patient> for PatientRecord {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
        }
    }
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = StoreError;

    fn try_from(record: AppointmentRecord) -> StoreResult<Self> {
        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).map_err(|e| {
            StoreError::MalformedRecord(format!("bad date {:?}: {e}", record.date))
        })?;
        let time = NaiveTime::parse_from_str(&record.time, TIME_FORMAT).map_err(|e| {
            StoreError::MalformedRecord(format!("bad time {:?}: {e}", record.time))
        })?;
        let patient = if record.patient_id == PATIENT_DELETED {
            PatientRef::Orphaned
        } else {
            PatientRef::Owned(record.patient_id)
        };
        Ok(Appointment {
            patient,
            date,
            time,
            description: record.description,
        })
    }
}

impl From<&Appointment> for AppointmentRecord {
    fn from(appointment: &Appointment) -> Self {
        let patient_id = match &appointment.patient {
            PatientRef::Owned(id) => id.clone(),
            PatientRef::Orphaned => PATIENT_DELETED.to_string(),
        };
        Self {
            patient_id,
            date: appointment.date.format(DATE_FORMAT).to_string(),
            time: appointment.time.format(TIME_FORMAT).to_string(),
            description: appointment.description.clone(),
        }
    }
}
