//! Pre-checks applied to user input before it reaches the manager.
//!
//! The core only rejects duplicate ids; the intake-form rules (11-digit
//! identification numbers, alphabetic names) are a front-end concern and
//! only apply under `--strict`.

use anyhow::{bail, Result};

pub fn patient_input(id: &str, first_name: &str, last_name: &str, strict: bool) -> Result<()> {
    if id.is_empty() {
        bail!("patient id must not be empty");
    }
    if first_name.is_empty() || last_name.is_empty() {
        bail!("first and last name must not be empty");
    }
    if strict {
        id_validation(id)?;
        name_validation(first_name)?;
        name_validation(last_name)?;
    }
    Ok(())
}

fn id_validation(id: &str) -> Result<()> {
    if id.len() == 11 && id.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }
    bail!("invalid id {id:?}: expected 11 digits");
}

fn name_validation(name: &str) -> Result<()> {
    if name.chars().all(char::is_alphabetic) {
        return Ok(());
    }
    bail!("invalid name {name:?}: letters only");
}
