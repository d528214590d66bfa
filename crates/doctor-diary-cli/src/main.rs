//! Console front-end for the doctor diary.
//!
//! One subcommand per diary operation. The binary owns everything the core
//! delegates to its caller: locating and creating the data directory,
//! optional strict input validation, and turning business-rule rejections
//! into one-line statuses with a nonzero exit.

mod validate;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use doctor_diary_core::{Appointment, Manager, Patient, RecordStore};

#[derive(Parser)]
#[command(name = "doctor-diary", version, about = "Patient roster and appointment calendar for a small clinic")]
struct Cli {
    /// Directory holding patients.json and appointments.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Enforce strict input rules: 11-digit patient ids, alphabetic names
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new patient
    AddPatient {
        id: String,
        first_name: String,
        last_name: String,
    },
    /// Book an appointment for a registered patient
    AddAppointment {
        patient_id: String,
        /// Date as YYYY-MM-DD
        date: NaiveDate,
        /// Time as HH:MM:SS
        time: NaiveTime,
        #[arg(default_value = "")]
        description: String,
    },
    /// List all registered patients
    ListPatients,
    /// List appointments on a date
    Day {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
    },
    /// List appointments for a patient
    Patient { id: String },
    /// Delete a patient; their appointments are kept, marked as orphaned
    DeletePatient { id: String },
    /// Cancel the appointment at a date and time
    CancelAppointment {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
        /// Time as HH:MM:SS
        time: NaiveTime,
    },
    /// List every booked appointment
    ListAppointments,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // The core expects its caller to make sure the backing store exists.
    fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("cannot create data directory {}", cli.data_dir.display()))?;

    let store = RecordStore::in_dir(&cli.data_dir);
    let mut manager = Manager::open(store).context("failed to load the diary files")?;
    debug!(
        patients = manager.count_patients(),
        appointments = manager.count_appointments(),
        "collections loaded"
    );

    match cli.command {
        Command::AddPatient {
            id,
            first_name,
            last_name,
        } => {
            validate::patient_input(&id, &first_name, &last_name, cli.strict)?;
            manager.add_patient(&id, &first_name, &last_name)?;
            println!("patient {id} registered");
        }
        Command::AddAppointment {
            patient_id,
            date,
            time,
            description,
        } => {
            manager.add_appointment(&patient_id, date, time, &description)?;
            println!("appointment booked at {date} {time}");
        }
        Command::ListPatients => {
            for patient in manager.patients() {
                print_patient(patient);
            }
        }
        Command::Day { date } => {
            for appointment in manager.get_appointments_by_date(date) {
                print_appointment(appointment);
            }
        }
        Command::Patient { id } => {
            let Some(appointments) = manager.get_appointments_by_patient(&id) else {
                bail!("patient {id} is not registered");
            };
            for appointment in appointments {
                print_appointment(appointment);
            }
        }
        Command::DeletePatient { id } => {
            manager.delete_patient(&id)?;
            println!("patient {id} deleted");
        }
        Command::CancelAppointment { date, time } => {
            manager.delete_appointment(date, time)?;
            println!("appointment at {date} {time} canceled");
        }
        Command::ListAppointments => {
            for appointment in manager.appointments() {
                print_appointment(appointment);
            }
        }
    }

    Ok(())
}

fn print_patient(patient: &Patient) {
    println!("{}, id: {}", patient.full_name(), patient.id);
}

fn print_appointment(appointment: &Appointment) {
    let owner = match appointment.patient.owner_id() {
        Some(id) => format!("patient {id}"),
        None => "patient deleted".to_string(),
    };
    println!(
        "[{} {}] {} ({owner})",
        appointment.date,
        appointment.time.format("%H:%M"),
        appointment.description
    );
}
