//! Domain models for the doctor diary.

mod appointment;
mod patient;

pub use appointment::*;
pub use patient::*;
