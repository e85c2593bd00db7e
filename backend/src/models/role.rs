//! Personnel roles
//!
//! A role is a named staff category with an average hourly rate. Activity
//! steps reference roles by name, never by id, so removing a role leaves any
//! stale references behind; cost aggregation resolves those to a zero rate.

use crate::core::new_record_id;
use serde::{Deserialize, Serialize};

/// A staff category and its average hourly rate
///
/// # Example
/// ```
/// use scenario_roi_core::PersonnelRole;
///
/// let role = PersonnelRole::new("Engineer", 65.0).with_notes("e.g. Software or Data Engineer");
/// assert_eq!(role.name(), "Engineer");
/// assert_eq!(role.hourly_rate(), 65.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelRole {
    /// Opaque row identity
    id: String,

    /// Role name, unique within a workflow
    name: String,

    /// Average hourly rate in dollars (never negative)
    hourly_rate: f64,

    /// Free-text notes
    notes: String,
}

impl PersonnelRole {
    /// Create a role; negative or non-finite rates are stored as 0
    pub fn new(name: impl Into<String>, hourly_rate: f64) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            hourly_rate: non_negative(hourly_rate),
            notes: String::new(),
        }
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_hourly_rate(&mut self, rate: f64) {
        self.hourly_rate = non_negative(rate);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Clamp to a finite, non-negative value
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
