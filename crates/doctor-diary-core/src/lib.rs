//! Doctor Diary core library.
//!
//! In-memory data management for a small clinic: a patient roster and an
//! appointment calendar, persisted as two flat JSON files that are loaded
//! whole at startup and rewritten whole after every mutation.
//!
//! # Architecture
//!
//! ```text
//! caller (CLI / GUI)
//!        │
//!        ▼
//!    Manager ──── owns Vec<Patient> + Vec<Appointment>
//!        │        enforces: unique patient ids, exclusive (date, time)
//!        │        slots, orphaning of appointments on patient delete
//!        ▼
//!  RecordStore ── whole-file load/save of patients.json / appointments.json
//! ```
//!
//! # Core Principle
//!
//! **One caller, one process.** The manager owns both collections
//! exclusively for the process lifetime; all operations run to completion
//! synchronously. Embeddings that need concurrent access must wrap the
//! whole manager in their own lock.
//!
//! # Modules
//!
//! - [`models`]: domain types (Patient, Appointment, PatientRef)
//! - [`store`]: the flat-file JSON record store
//! - [`manager`]: CRUD operations, invariants, and persistence triggers

pub mod manager;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use manager::{Manager, ManagerError, ManagerResult};
pub use models::{Appointment, Patient, PatientRef};
pub use store::{RecordStore, StoreError, StoreResult, PATIENT_DELETED};
