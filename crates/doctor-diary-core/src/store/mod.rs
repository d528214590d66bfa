//! Flat-file record store for the two collections.
//!
//! Each collection lives in its own file as a JSON array of keyed records.
//! Loading parses every record into its typed entity; saving rewrites the
//! whole file. Saves land in a sibling `.tmp` file that is renamed over the
//! target, so an interrupted write cannot destroy the previous contents.
//! A missing file loads as an empty collection; a malformed existing file
//! fails the load.

mod records;

pub use records::*;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Appointment, Patient};

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unreadable store: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Paths of the two collection files. Holds no state between calls.
pub struct RecordStore {
    patients_path: PathBuf,
    appointments_path: PathBuf,
}

impl RecordStore {
    /// Store backed by the two given files.
    pub fn new(patients_path: impl Into<PathBuf>, appointments_path: impl Into<PathBuf>) -> Self {
        Self {
            patients_path: patients_path.into(),
            appointments_path: appointments_path.into(),
        }
    }

    /// Store rooted at a data directory, using the conventional file names
    /// `patients.json` and `appointments.json`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("patients.json"), dir.join("appointments.json"))
    }

    /// Load the full patient collection.
    pub fn load_patients(&self) -> StoreResult<Vec<Patient>> {
        let records: Vec<PatientRecord> = load_records(&self.patients_path)?;
        Ok(records.into_iter().map(Patient::from).collect())
    }

    /// Load the full appointment collection.
    pub fn load_appointments(&self) -> StoreResult<Vec<Appointment>> {
        let records: Vec<AppointmentRecord> = load_records(&self.appointments_path)?;
        records.into_iter().map(Appointment::try_from).collect()
    }

    /// Rewrite the patients file with the full collection.
    pub fn save_patients(&self, patients: &[Patient]) -> StoreResult<()> {
        let records: Vec<PatientRecord> = patients.iter().map(PatientRecord::from).collect();
        save_records(&self.patients_path, &records)
    }

    /// Rewrite the appointments file with the full collection.
    pub fn save_appointments(&self, appointments: &[Appointment]) -> StoreResult<()> {
        let records: Vec<AppointmentRecord> =
            appointments.iter().map(AppointmentRecord::from).collect();
        save_records(&self.appointments_path, &records)
    }
}

fn load_records<R: DeserializeOwned>(path: &Path) -> StoreResult<Vec<R>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    // Records are decoded one by one so a bad record reports its position
    // instead of an opaque whole-file error.
    let values: Vec<serde_json::Value> = serde_json::from_str(&text)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value)
                .map_err(|e| StoreError::MalformedRecord(format!("record {index}: {e}")))
        })
        .collect()
}

fn save_records<R: Serialize>(path: &Path, records: &[R]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
