//! Cost aggregation
//!
//! Personnel cost is person-hours priced at each role's hourly rate.
//! Infrastructure cost is the flat sum of item amounts for a scenario.
//! A role name with no matching personnel role is priced at 0; it is never
//! an error.

use crate::aggregate::tables::{RoleTable, StageCostTable, StageTable};
use crate::core::units::person_hours;
use crate::models::{ActivityStep, InfrastructureCostItem, PersonnelRole};
use std::collections::HashMap;

/// Hourly rate lookup built once per aggregation
#[derive(Debug, Clone, Default)]
pub struct RateCard {
    rates: HashMap<String, f64>,
}

impl RateCard {
    pub fn new(roles: &[PersonnelRole]) -> Self {
        Self {
            rates: roles
                .iter()
                .map(|role| (role.name().to_string(), role.hourly_rate()))
                .collect(),
        }
    }

    /// Rate for a role name (0 for unknown roles)
    pub fn rate(&self, role: &str) -> f64 {
        self.rates.get(role).copied().unwrap_or(0.0)
    }

    /// Dollars for one (step, role) contribution
    fn step_cost(&self, step: &ActivityStep, role: &str, percent: f64) -> f64 {
        person_hours(step.duration_weeks(), percent) * self.rate(role)
    }
}

/// Hourly rate of a role (0 when the role does not exist)
pub fn hourly_rate(roles: &[PersonnelRole], role: &str) -> f64 {
    roles
        .iter()
        .find(|candidate| candidate.name() == role)
        .map(PersonnelRole::hourly_rate)
        .unwrap_or(0.0)
}

/// Total personnel cost of a set of steps
///
/// # Example
/// ```
/// use scenario_roi_core::{personnel_cost, ActivityStep, PersonnelRole, Stage};
///
/// let roles = [PersonnelRole::new("Engineer", 65.0)];
/// let step = ActivityStep::new(Stage::DataCleaning, "Clean")
///     .with_duration(1.0)
///     .with_allocation("Engineer", 100.0)
///     .with_allocation("Deleted Role", 100.0);
///
/// assert_eq!(personnel_cost([&step], &roles), 40.0 * 65.0);
/// ```
pub fn personnel_cost<'a, I>(steps: I, roles: &[PersonnelRole]) -> f64
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    let card = RateCard::new(roles);
    steps
        .into_iter()
        .flat_map(|step| {
            step.role_allocation()
                .iter()
                .map(move |(role, percent)| (step, role, *percent))
        })
        .map(|(step, role, percent)| card.step_cost(step, role, percent))
        .sum()
}

/// Sum of every item's amount for a scenario (missing amounts count as 0)
pub fn infrastructure_cost(items: &[InfrastructureCostItem], scenario: &str) -> f64 {
    items.iter().map(|item| item.cost_for(scenario)).sum()
}

/// Personnel cost plus infrastructure cost
pub fn total_cost<'a, I>(
    steps: I,
    roles: &[PersonnelRole],
    items: &[InfrastructureCostItem],
    scenario: &str,
) -> f64
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    personnel_cost(steps, roles) + infrastructure_cost(items, scenario)
}

/// Personnel cost per stage
pub fn cost_by_stage<'a, I>(steps: I, roles: &[PersonnelRole]) -> StageTable
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    let card = RateCard::new(roles);
    let mut table = StageTable::zeroed();
    for step in steps {
        for (role, percent) in step.role_allocation() {
            table.add(step.stage(), card.step_cost(step, role, *percent));
        }
    }
    table
}

/// Personnel cost per stage plus the scenario's infrastructure line
pub fn cost_by_stage_with_infrastructure<'a, I>(
    steps: I,
    roles: &[PersonnelRole],
    items: &[InfrastructureCostItem],
    scenario: &str,
) -> StageCostTable
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    StageCostTable {
        stages: cost_by_stage(steps, roles),
        infrastructure: Some(infrastructure_cost(items, scenario)),
    }
}

/// Personnel cost per role, across all stages
pub fn cost_by_role<'a, I>(steps: I, roles: &[PersonnelRole]) -> RoleTable
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    let card = RateCard::new(roles);
    let mut table = RoleTable::new();
    for step in steps {
        for (role, percent) in step.role_allocation() {
            table.add(role, card.step_cost(step, role, *percent));
        }
    }
    table
}
