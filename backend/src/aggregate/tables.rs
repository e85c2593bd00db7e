//! Aggregation result tables
//!
//! `StageTable` is keyed by the fixed stage list and always fully populated.
//! `RoleTable` is keyed by role name in first-seen order. Both expose their
//! rows through the [`Series`] trait, which is what comparison and export
//! consume.

use crate::core::Stage;
use crate::models::PersonnelRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label of the synthetic infrastructure line in stage cost tables
pub const INFRASTRUCTURE_LABEL: &str = "Infrastructure";

/// Ordered `(label, value)` rows of an aggregation result
pub trait Series {
    /// Rows in display order
    fn series(&self) -> Vec<(String, f64)>;

    /// Sum of every row
    fn total(&self) -> f64 {
        self.series().iter().map(|(_, value)| value).sum()
    }
}

/// Stage → value, always holding every stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTable {
    values: BTreeMap<Stage, f64>,
}

impl Default for StageTable {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl StageTable {
    /// Every stage at 0
    pub fn zeroed() -> Self {
        Self {
            values: Stage::ALL.iter().map(|stage| (*stage, 0.0)).collect(),
        }
    }

    pub fn get(&self, stage: Stage) -> f64 {
        self.values.get(&stage).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, stage: Stage, amount: f64) {
        *self.values.entry(stage).or_insert(0.0) += amount;
    }

    /// Rows in workflow order
    pub fn iter(&self) -> impl Iterator<Item = (Stage, f64)> + '_ {
        self.values.iter().map(|(stage, value)| (*stage, *value))
    }
}

impl Series for StageTable {
    fn series(&self) -> Vec<(String, f64)> {
        self.iter()
            .map(|(stage, value)| (stage.label().to_string(), value))
            .collect()
    }
}

/// One role's value in a [`RoleTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub role: String,
    pub value: f64,
}

/// Role name → value, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleTable {
    entries: Vec<RoleEntry>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a role (0 when absent)
    pub fn get(&self, role: &str) -> f64 {
        self.entries
            .iter()
            .find(|entry| entry.role == role)
            .map(|entry| entry.value)
            .unwrap_or(0.0)
    }

    pub fn add(&mut self, role: &str, amount: f64) {
        match self.entries.iter_mut().find(|entry| entry.role == role) {
            Some(entry) => entry.value += amount,
            None => self.entries.push(RoleEntry {
                role: role.to_string(),
                value: amount,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }

    /// Re-key against the defined role list
    ///
    /// Defined roles come first, in definition order, zero-filled when they
    /// have no contribution. Roles seen in the steps but no longer defined
    /// follow in their original order.
    pub fn with_roles(&self, roles: &[PersonnelRole]) -> Self {
        let mut table = Self::new();
        for role in roles {
            table.add(role.name(), self.get(role.name()));
        }
        for entry in &self.entries {
            if !roles.iter().any(|role| role.name() == entry.role) {
                table.add(&entry.role, entry.value);
            }
        }
        table
    }
}

impl Series for RoleTable {
    fn series(&self) -> Vec<(String, f64)> {
        self.entries
            .iter()
            .map(|entry| (entry.role.clone(), entry.value))
            .collect()
    }
}

/// Stage costs plus an optional, undistributed infrastructure line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCostTable {
    pub stages: StageTable,
    pub infrastructure: Option<f64>,
}

impl Series for StageCostTable {
    fn series(&self) -> Vec<(String, f64)> {
        let mut rows = self.stages.series();
        if let Some(amount) = self.infrastructure {
            rows.push((INFRASTRUCTURE_LABEL.to_string(), amount));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_has_every_stage() {
        let table = StageTable::zeroed();
        assert_eq!(table.iter().count(), 8);
        assert_eq!(table.total(), 0.0);
    }

    #[test]
    fn test_role_table_keeps_first_seen_order() {
        let mut table = RoleTable::new();
        table.add("Researcher", 1.0);
        table.add("Engineer", 2.0);
        table.add("Researcher", 3.0);

        let labels: Vec<_> = table.series().into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Researcher", "Engineer"]);
        assert_eq!(table.get("Researcher"), 4.0);
    }

    #[test]
    fn test_with_roles_zero_fills_and_keeps_orphans() {
        let mut table = RoleTable::new();
        table.add("Retired Role", 5.0);
        table.add("Engineer", 2.0);

        let roles = [
            PersonnelRole::new("Engineer", 1.0),
            PersonnelRole::new("Researcher", 1.0),
        ];
        let keyed = table.with_roles(&roles);
        assert_eq!(
            keyed.series(),
            vec![
                ("Engineer".to_string(), 2.0),
                ("Researcher".to_string(), 0.0),
                ("Retired Role".to_string(), 5.0),
            ]
        );
    }

    #[test]
    fn test_infrastructure_line_is_last() {
        let table = StageCostTable {
            stages: StageTable::zeroed(),
            infrastructure: Some(10.0),
        };
        let rows = table.series();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[8], (INFRASTRUCTURE_LABEL.to_string(), 10.0));
        assert_eq!(table.total(), 10.0);
    }
}
