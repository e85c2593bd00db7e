//! Infrastructure cost items
//!
//! Flat per-item costs (licenses, compute, storage, ...) with one amount per
//! scenario. Items are not tied to a stage or a role; aggregation reports
//! them as a separate line rather than distributing them.

use crate::core::new_record_id;
use crate::models::role::non_negative;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categories a new workflow starts with
pub const DEFAULT_CATEGORIES: [&str; 4] = [
    "Integration Costs",
    "Software Licenses",
    "Compute Resources",
    "Storage",
];

/// One infrastructure cost category with an amount per scenario
///
/// # Example
/// ```
/// use scenario_roi_core::InfrastructureCostItem;
///
/// let item = InfrastructureCostItem::new("Storage")
///     .with_cost("BAU 1", 1200.0)
///     .with_cost("Proposed Tool", 300.0);
///
/// assert_eq!(item.cost_for("BAU 1"), 1200.0);
/// assert_eq!(item.cost_for("BAU 2"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureCostItem {
    id: String,
    category: String,

    /// Scenario name → amount (never negative)
    cost_per_scenario: BTreeMap<String, f64>,

    notes: String,
}

impl InfrastructureCostItem {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            category: category.into(),
            cost_per_scenario: BTreeMap::new(),
            notes: String::new(),
        }
    }

    /// Set the amount for one scenario (builder form)
    pub fn with_cost(mut self, scenario: impl Into<String>, amount: f64) -> Self {
        self.set_cost(scenario, amount);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn cost_per_scenario(&self) -> &BTreeMap<String, f64> {
        &self.cost_per_scenario
    }

    /// Amount for a scenario; a missing scenario key counts as 0
    pub fn cost_for(&self, scenario: &str) -> f64 {
        self.cost_per_scenario.get(scenario).copied().unwrap_or(0.0)
    }

    /// Set the amount for one scenario; negative or non-finite → 0
    pub fn set_cost(&mut self, scenario: impl Into<String>, amount: f64) {
        self.cost_per_scenario
            .insert(scenario.into(), non_negative(amount));
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub(crate) fn ensure_scenario(&mut self, scenario: &str) {
        self.cost_per_scenario
            .entry(scenario.to_string())
            .or_insert(0.0);
    }
}
