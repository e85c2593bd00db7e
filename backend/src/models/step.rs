//! Activity steps
//!
//! A step is a named unit of work within one stage. It carries a calendar
//! duration in weeks and, for every defined role, the percentage of that
//! duration the role is actively working on it. Roles work in parallel, so
//! the allocation percentages of one step are independent of each other.

use crate::core::{new_record_id, Stage};
use crate::models::role::non_negative;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder description for steps added without text
pub const PLACEHOLDER_STEP: &str = "<placeholder>";

/// One unit of work within a stage
///
/// # Example
/// ```
/// use scenario_roi_core::{ActivityStep, Stage};
///
/// let step = ActivityStep::new(Stage::DataCleaning, "Merge survey waves")
///     .with_duration(4.0)
///     .with_allocation("Engineer", 50.0)
///     .with_allocation("Researcher", 250.0); // clamped to 100
///
/// assert_eq!(step.duration_weeks(), 4.0);
/// assert_eq!(step.allocation("Researcher"), 100.0);
/// assert_eq!(step.allocation("Project Manager"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStep {
    /// Opaque row identity
    id: String,

    /// Stage this step belongs to
    stage: Stage,

    /// Literal step text; identical text within a stage denotes the same step
    step_description: String,

    /// Free-text notes (how tooling changes the time/labor of this step)
    notes: String,

    /// Calendar duration in weeks (never negative)
    duration_weeks: f64,

    /// Role name → percent of the duration actively spent, in [0, 100]
    role_allocation: BTreeMap<String, f64>,
}

impl ActivityStep {
    /// Create a step with zero duration and an empty allocation
    pub fn new(stage: Stage, step_description: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            stage,
            step_description: step_description.into(),
            notes: String::new(),
            duration_weeks: 0.0,
            role_allocation: BTreeMap::new(),
        }
    }

    /// Create a placeholder step with a 0.0 allocation for every given role
    pub fn placeholder<'a>(stage: Stage, role_names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(stage, PLACEHOLDER_STEP).with_roles(role_names)
    }

    /// Set the duration (builder form)
    pub fn with_duration(mut self, weeks: f64) -> Self {
        self.set_duration_weeks(weeks);
        self
    }

    /// Set notes (builder form)
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set one role's allocation (builder form)
    pub fn with_allocation(mut self, role: impl Into<String>, percent: f64) -> Self {
        self.set_allocation(role, percent);
        self
    }

    /// Ensure a 0.0 allocation entry exists for every given role
    pub fn with_roles<'a>(mut self, role_names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in role_names {
            self.role_allocation.entry(name.to_string()).or_insert(0.0);
        }
        self
    }

    /// Duplicate this step under a fresh identity
    ///
    /// Description, notes, duration and allocation are copied; the allocation
    /// map is a new map, not shared with the original.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_record_id(),
            stage: self.stage,
            step_description: self.step_description.clone(),
            notes: self.notes.clone(),
            duration_weeks: self.duration_weeks,
            role_allocation: self.role_allocation.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn step_description(&self) -> &str {
        &self.step_description
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn duration_weeks(&self) -> f64 {
        self.duration_weeks
    }

    pub fn role_allocation(&self) -> &BTreeMap<String, f64> {
        &self.role_allocation
    }

    /// Allocation percentage for a role (0 when the role is absent)
    pub fn allocation(&self, role: &str) -> f64 {
        self.role_allocation.get(role).copied().unwrap_or(0.0)
    }

    pub fn set_step_description(&mut self, text: impl Into<String>) {
        self.step_description = text.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Set duration; negative or non-finite values are stored as 0
    pub fn set_duration_weeks(&mut self, weeks: f64) {
        self.duration_weeks = non_negative(weeks);
    }

    /// Set a role's allocation, clamped to [0, 100]
    pub fn set_allocation(&mut self, role: impl Into<String>, percent: f64) {
        self.role_allocation
            .insert(role.into(), clamp_percent(percent));
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn remove_role(&mut self, role: &str) -> Option<f64> {
        self.role_allocation.remove(role)
    }

    pub(crate) fn rename_role(&mut self, old: &str, new: &str) {
        if let Some(percent) = self.role_allocation.remove(old) {
            self.role_allocation.insert(new.to_string(), percent);
        }
    }
}

/// Clamp a percentage into [0, 100]; non-finite values become 0
pub(crate) fn clamp_percent(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_gets_fresh_id_and_same_content() {
        let step = ActivityStep::new(Stage::Reporting, "Write report")
            .with_duration(2.0)
            .with_notes("two drafts")
            .with_allocation("Researcher", 80.0);
        let copy = step.duplicate();

        assert_ne!(copy.id(), step.id());
        assert_eq!(copy.step_description(), step.step_description());
        assert_eq!(copy.notes(), step.notes());
        assert_eq!(copy.duration_weeks(), step.duration_weeks());
        assert_eq!(copy.role_allocation(), step.role_allocation());
    }

    #[test]
    fn test_negative_duration_clamped() {
        let step = ActivityStep::new(Stage::Reporting, "x").with_duration(-3.0);
        assert_eq!(step.duration_weeks(), 0.0);
    }

    #[test]
    fn test_with_roles_keeps_existing_values() {
        let step = ActivityStep::new(Stage::Reporting, "x")
            .with_allocation("Engineer", 30.0)
            .with_roles(["Engineer", "Researcher"]);
        assert_eq!(step.allocation("Engineer"), 30.0);
        assert_eq!(step.role_allocation().get("Researcher"), Some(&0.0));
    }

    #[test]
    fn test_rename_role_moves_allocation() {
        let mut step = ActivityStep::new(Stage::Reporting, "x").with_allocation("Eng", 40.0);
        step.rename_role("Eng", "Engineer");
        assert_eq!(step.allocation("Engineer"), 40.0);
        assert!(!step.role_allocation().contains_key("Eng"));
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-1.0), 0.0);
        assert_eq!(clamp_percent(101.0), 100.0);
        assert_eq!(clamp_percent(f64::INFINITY), 0.0);
        assert_eq!(clamp_percent(12.5), 12.5);
    }
}
