//! Aggregation engine
//!
//! Pure roll-ups of activity steps into person-hours, calendar durations and
//! dollars, grouped by stage or by role.
//!
//! - **tables**: Result containers (`StageTable`, `RoleTable`, `StageCostTable`)
//! - **time**: Person-hours and stage calendar durations
//! - **cost**: Personnel, infrastructure and total cost
//!
//! # Critical Invariants
//!
//! 1. Stage tables always contain all eight stages, zero-filled
//! 2. The stage-grouped and role-grouped totals of the same steps agree
//! 3. Unknown role names never fail; they contribute hours at a zero rate
//! 4. Inputs are borrowed, never mutated

pub mod cost;
pub mod tables;
pub mod time;

pub use cost::{
    cost_by_role, cost_by_stage, cost_by_stage_with_infrastructure, hourly_rate,
    infrastructure_cost, personnel_cost, total_cost, RateCard,
};
pub use tables::{RoleEntry, RoleTable, Series, StageCostTable, StageTable, INFRASTRUCTURE_LABEL};
pub use time::{person_hours_by_role, person_hours_by_stage, stage_calendar_duration};

use crate::models::{InfrastructureCostItem, PersonnelRole, Scenario};
use serde::{Deserialize, Serialize};

/// Scenario-level totals feeding comparison and projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAggregate {
    pub scenario: String,

    /// Person-hours across all stages and roles
    pub person_hours: f64,

    /// Elapsed weeks across all stages (parallel effort not counted twice)
    pub calendar_weeks: f64,

    /// Dollars spent on personnel
    pub personnel_cost: f64,

    /// Sum of the scenario's infrastructure item amounts
    pub infrastructure_cost: f64,

    /// `personnel_cost + infrastructure_cost`
    pub total_cost: f64,
}

impl ScenarioAggregate {
    /// Roll up one scenario
    ///
    /// # Example
    /// ```
    /// use scenario_roi_core::{ActivityStep, PersonnelRole, Scenario, ScenarioAggregate, Stage};
    ///
    /// let mut scenario = Scenario::new("BAU 1");
    /// scenario.push_step(
    ///     ActivityStep::new(Stage::DataCleaning, "Clean")
    ///         .with_duration(2.0)
    ///         .with_allocation("Engineer", 50.0),
    /// );
    /// let roles = [PersonnelRole::new("Engineer", 10.0)];
    ///
    /// let aggregate = ScenarioAggregate::compute(&scenario, &roles, &[]);
    /// assert_eq!(aggregate.person_hours, 40.0);
    /// assert_eq!(aggregate.calendar_weeks, 2.0);
    /// assert_eq!(aggregate.personnel_cost, 400.0);
    /// assert_eq!(aggregate.total_cost, 400.0);
    /// ```
    pub fn compute(
        scenario: &Scenario,
        roles: &[PersonnelRole],
        items: &[InfrastructureCostItem],
    ) -> Self {
        let person_hours = person_hours_by_stage(scenario.steps()).total();
        let calendar_weeks = stage_calendar_duration(scenario.steps()).total();
        let personnel_cost = personnel_cost(scenario.steps(), roles);
        let infrastructure_cost = infrastructure_cost(items, scenario.name());

        Self {
            scenario: scenario.name().to_string(),
            person_hours,
            calendar_weeks,
            personnel_cost,
            infrastructure_cost,
            total_cost: personnel_cost + infrastructure_cost,
        }
    }
}
