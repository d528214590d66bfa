//! Patient model.

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    /// Personal identification number. Unique across the roster and
    /// immutable after registration.
    pub id: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
}

impl Patient {
    /// Create a new patient.
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display name, first name first.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
