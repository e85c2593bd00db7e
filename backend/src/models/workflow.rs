//! Workflow record store snapshot
//!
//! The caller-owned state object holding everything the engine reads:
//! personnel roles, scenarios, infrastructure cost items, ROI parameters and
//! analyst assumptions. Engine functions only ever borrow it immutably; the
//! mutation helpers here exist for the caller (CLI, bindings, UI) and keep the
//! cross-record invariants intact.
//!
//! # Critical Invariants
//!
//! 1. **Role Coverage**: every step's allocation has an entry for every
//!    defined role (added as 0.0 when a role is created)
//! 2. **Role Pruning**: removing a role prunes it from every allocation but
//!    never deletes steps
//! 3. **Unique Names**: role names and scenario names are unique

use crate::copier::{copy_scenario, CopyOutcome};
use crate::core::Stage;
use crate::models::assumption::Assumption;
use crate::models::infrastructure::{InfrastructureCostItem, DEFAULT_CATEGORIES};
use crate::models::role::PersonnelRole;
use crate::models::roi::RoiParameters;
use crate::models::scenario::Scenario;
use crate::models::step::ActivityStep;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scenarios a new workflow starts with, in display order
pub const DEFAULT_SCENARIOS: [&str; 3] = ["BAU 1", "BAU 2", "Proposed Tool"];

/// Errors from caller-side workflow mutations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Role '{0}' already exists")]
    DuplicateRole(String),

    #[error("Role '{0}' not found")]
    RoleNotFound(String),

    #[error("Scenario '{0}' already exists")]
    DuplicateScenario(String),

    #[error("Scenario '{0}' not found")]
    ScenarioNotFound(String),

    #[error("Name must not be empty")]
    EmptyName,
}

/// Complete snapshot of one analysis workflow
///
/// # Example
///
/// ```rust
/// use scenario_roi_core::{PersonnelRole, Stage, Workflow};
///
/// let mut workflow = Workflow::with_defaults();
/// assert_eq!(workflow.roles().len(), 3);
/// assert_eq!(workflow.scenarios().len(), 3);
///
/// workflow.add_role(PersonnelRole::new("Analyst", 40.0)).unwrap();
/// let bau = workflow.scenario("BAU 1").unwrap();
/// let step = &bau.stage_steps(Stage::Reporting)[0];
/// assert_eq!(step.role_allocation().get("Analyst"), Some(&0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    roles: Vec<PersonnelRole>,
    scenarios: Vec<Scenario>,
    infrastructure: Vec<InfrastructureCostItem>,
    roi: RoiParameters,
    assumptions: Vec<Assumption>,
}

impl Workflow {
    /// Create an empty workflow
    pub fn new() -> Self {
        Self::default()
    }

    /// The starting state a fresh analysis is prefilled with
    pub fn with_defaults() -> Self {
        let roles = vec![
            PersonnelRole::new("Engineer", 65.0).with_notes("e.g. Software or Data Engineer"),
            PersonnelRole::new("Researcher", 25.0).with_notes("e.g. PhD student"),
            PersonnelRole::new("Project Manager", 48.0)
                .with_notes("e.g. Partnerships or research manager"),
        ];
        let role_names: Vec<&str> = roles.iter().map(PersonnelRole::name).collect();

        let scenarios = DEFAULT_SCENARIOS
            .iter()
            .map(|name| Scenario::seeded(*name, &role_names))
            .collect();

        let infrastructure = DEFAULT_CATEGORIES
            .iter()
            .map(|category| {
                DEFAULT_SCENARIOS
                    .iter()
                    .fold(InfrastructureCostItem::new(*category), |item, scenario| {
                        item.with_cost(*scenario, 0.0)
                    })
            })
            .collect();

        let mut roi = RoiParameters::default();
        for scenario in DEFAULT_SCENARIOS {
            roi.orgs_per_scenario.insert(scenario.to_string(), 1);
        }

        Self {
            roles,
            scenarios,
            infrastructure,
            roi,
            assumptions: vec![Assumption::new(
                "e.g., A/B testing on the platform runs for 4 weeks.",
            )],
        }
    }

    // ------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------

    pub fn roles(&self) -> &[PersonnelRole] {
        &self.roles
    }

    /// Role names in definition order
    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(PersonnelRole::name).collect()
    }

    pub fn role(&self, name: &str) -> Option<&PersonnelRole> {
        self.roles.iter().find(|role| role.name() == name)
    }

    pub fn role_mut(&mut self, name: &str) -> Option<&mut PersonnelRole> {
        self.roles.iter_mut().find(|role| role.name() == name)
    }

    /// Define a new role and give every existing step a 0.0 allocation for it
    ///
    /// # Errors
    /// `EmptyName` for a blank name, `DuplicateRole` if the name is taken.
    pub fn add_role(&mut self, role: PersonnelRole) -> Result<(), WorkflowError> {
        if role.name().trim().is_empty() {
            return Err(WorkflowError::EmptyName);
        }
        if self.role(role.name()).is_some() {
            return Err(WorkflowError::DuplicateRole(role.name().to_string()));
        }
        for scenario in &mut self.scenarios {
            scenario.add_role(role.name());
        }
        self.roles.push(role);
        Ok(())
    }

    /// Remove a role and prune it from every allocation
    ///
    /// Steps are never deleted.
    pub fn remove_role(&mut self, name: &str) -> Option<PersonnelRole> {
        let index = self.roles.iter().position(|role| role.name() == name)?;
        for scenario in &mut self.scenarios {
            scenario.remove_role(name);
        }
        Some(self.roles.remove(index))
    }

    /// Rename a role, carrying its allocations over to the new name
    ///
    /// # Errors
    /// `RoleNotFound`, `EmptyName` or `DuplicateRole`.
    pub fn rename_role(&mut self, old: &str, new: &str) -> Result<(), WorkflowError> {
        if new.trim().is_empty() {
            return Err(WorkflowError::EmptyName);
        }
        if old == new {
            return Ok(());
        }
        if self.role(new).is_some() {
            return Err(WorkflowError::DuplicateRole(new.to_string()));
        }
        let role = self
            .role_mut(old)
            .ok_or_else(|| WorkflowError::RoleNotFound(old.to_string()))?;
        role.set_name(new);
        for scenario in &mut self.scenarios {
            scenario.rename_role(old, new);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(Scenario::name).collect()
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.name() == name)
    }

    pub fn scenario_mut(&mut self, name: &str) -> Option<&mut Scenario> {
        self.scenarios
            .iter_mut()
            .find(|scenario| scenario.name() == name)
    }

    /// Register an empty scenario
    ///
    /// Infrastructure items gain a 0 amount for it.
    ///
    /// # Errors
    /// `EmptyName` or `DuplicateScenario`.
    pub fn add_scenario(&mut self, name: &str) -> Result<&mut Scenario, WorkflowError> {
        if name.trim().is_empty() {
            return Err(WorkflowError::EmptyName);
        }
        if self.scenario(name).is_some() {
            return Err(WorkflowError::DuplicateScenario(name.to_string()));
        }
        Ok(self.insert_scenario(Scenario::new(name)))
    }

    /// Scenario by name, created and seeded with default steps on first access
    pub fn scenario_mut_or_seeded(&mut self, name: &str) -> &mut Scenario {
        match self.scenarios.iter().position(|s| s.name() == name) {
            Some(index) => &mut self.scenarios[index],
            None => {
                let role_names = self.role_names();
                let seeded = Scenario::seeded(name, &role_names);
                self.insert_scenario(seeded)
            }
        }
    }

    /// Put a scenario into the store, replacing any scenario with the same name
    pub fn upsert_scenario(&mut self, scenario: Scenario) {
        match self.scenario_mut(scenario.name()) {
            Some(existing) => *existing = scenario,
            None => {
                self.insert_scenario(scenario);
            }
        }
    }

    pub fn remove_scenario(&mut self, name: &str) -> Option<Scenario> {
        let index = self.scenarios.iter().position(|s| s.name() == name)?;
        Some(self.scenarios.remove(index))
    }

    fn insert_scenario(&mut self, scenario: Scenario) -> &mut Scenario {
        for item in &mut self.infrastructure {
            item.ensure_scenario(scenario.name());
        }
        self.scenarios.push(scenario);
        let last = self.scenarios.len() - 1;
        &mut self.scenarios[last]
    }

    /// Append a step to a scenario, covering every defined role
    ///
    /// Returns the new step's id.
    ///
    /// # Errors
    /// `ScenarioNotFound` if the scenario does not exist.
    pub fn add_step(&mut self, scenario: &str, step: ActivityStep) -> Result<String, WorkflowError> {
        let step = step.with_roles(self.roles.iter().map(PersonnelRole::name));
        let id = step.id().to_string();
        let target = self
            .scenario_mut(scenario)
            .ok_or_else(|| WorkflowError::ScenarioNotFound(scenario.to_string()))?;
        target.push_step(step);
        Ok(id)
    }

    /// Append a blank `<placeholder>` step to one stage of a scenario
    ///
    /// # Errors
    /// `ScenarioNotFound` if the scenario does not exist.
    pub fn add_placeholder_step(
        &mut self,
        scenario: &str,
        stage: Stage,
    ) -> Result<String, WorkflowError> {
        let step = ActivityStep::placeholder(stage, self.roles.iter().map(PersonnelRole::name));
        self.add_step(scenario, step)
    }

    pub fn remove_step(&mut self, scenario: &str, stage: Stage, id: &str) -> Option<ActivityStep> {
        self.scenario_mut(scenario)?.remove_step(stage, id)
    }

    /// Copy every step of `from` into `to`, overwriting `to`'s content
    ///
    /// The target is created if it does not exist yet. Returns the number of
    /// steps copied, or `None` when the source has nothing to copy (in which
    /// case the store is left untouched).
    pub fn copy_scenario(&mut self, from: &str, to: &str) -> Option<usize> {
        let empty_source = Scenario::new(from);
        let source = self.scenario(from).unwrap_or(&empty_source);
        let empty_target = Scenario::new(to);
        let target = self.scenario(to).unwrap_or(&empty_target);

        match copy_scenario(source, target) {
            CopyOutcome::Copied(copied) => {
                let count = copied.step_count();
                self.upsert_scenario(copied);
                Some(count)
            }
            CopyOutcome::SourceEmpty { .. } => None,
        }
    }

    // ------------------------------------------------------------------
    // Infrastructure, ROI, assumptions
    // ------------------------------------------------------------------

    pub fn infrastructure(&self) -> &[InfrastructureCostItem] {
        &self.infrastructure
    }

    pub fn infrastructure_mut(&mut self) -> &mut Vec<InfrastructureCostItem> {
        &mut self.infrastructure
    }

    pub fn add_infrastructure_item(&mut self, item: InfrastructureCostItem) {
        self.infrastructure.push(item);
    }

    pub fn remove_infrastructure_item(&mut self, id: &str) -> Option<InfrastructureCostItem> {
        let index = self.infrastructure.iter().position(|item| item.id() == id)?;
        Some(self.infrastructure.remove(index))
    }

    pub fn roi(&self) -> &RoiParameters {
        &self.roi
    }

    pub fn roi_mut(&mut self) -> &mut RoiParameters {
        &mut self.roi
    }

    pub fn set_roi(&mut self, roi: RoiParameters) {
        self.roi = roi;
    }

    pub fn assumptions(&self) -> &[Assumption] {
        &self.assumptions
    }

    pub fn add_assumption(&mut self, assumption: Assumption) {
        self.assumptions.push(assumption);
    }

    pub fn remove_assumption(&mut self, id: &str) -> Option<Assumption> {
        let index = self.assumptions.iter().position(|a| a.id() == id)?;
        Some(self.assumptions.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::step::PLACEHOLDER_STEP;

    #[test]
    fn test_defaults_cover_every_scenario_in_infrastructure() {
        let workflow = Workflow::with_defaults();
        assert_eq!(workflow.infrastructure().len(), 4);
        for item in workflow.infrastructure() {
            assert_eq!(item.cost_per_scenario().len(), 3);
        }
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let mut workflow = Workflow::with_defaults();
        let err = workflow
            .add_role(PersonnelRole::new("Engineer", 10.0))
            .unwrap_err();
        assert_eq!(err, WorkflowError::DuplicateRole("Engineer".to_string()));
    }

    #[test]
    fn test_blank_role_rejected() {
        let mut workflow = Workflow::new();
        assert_eq!(
            workflow.add_role(PersonnelRole::new("  ", 10.0)),
            Err(WorkflowError::EmptyName)
        );
    }

    #[test]
    fn test_remove_role_prunes_but_keeps_steps() {
        let mut workflow = Workflow::with_defaults();
        let before = workflow.scenario("BAU 1").unwrap().step_count();

        assert!(workflow.remove_role("Researcher").is_some());

        let bau = workflow.scenario("BAU 1").unwrap();
        assert_eq!(bau.step_count(), before);
        assert!(bau
            .steps()
            .all(|step| !step.role_allocation().contains_key("Researcher")));
    }

    #[test]
    fn test_rename_role_to_existing_name_rejected() {
        let mut workflow = Workflow::with_defaults();
        assert_eq!(
            workflow.rename_role("Engineer", "Researcher"),
            Err(WorkflowError::DuplicateRole("Researcher".to_string()))
        );
        assert_eq!(
            workflow.rename_role("Nobody", "Someone"),
            Err(WorkflowError::RoleNotFound("Nobody".to_string()))
        );
    }

    #[test]
    fn test_add_step_covers_roles() {
        let mut workflow = Workflow::with_defaults();
        let id = workflow
            .add_step("BAU 2", ActivityStep::new(Stage::DataCleaning, "Dedupe"))
            .unwrap();
        let step = workflow
            .scenario("BAU 2")
            .unwrap()
            .stage_steps(Stage::DataCleaning)
            .iter()
            .find(|s| s.id() == id)
            .unwrap();
        assert_eq!(step.role_allocation().len(), 3);
    }

    #[test]
    fn test_add_placeholder_step() {
        let mut workflow = Workflow::with_defaults();
        let before = workflow
            .scenario("Proposed Tool")
            .unwrap()
            .stage_steps(Stage::Reporting)
            .len();

        let id = workflow
            .add_placeholder_step("Proposed Tool", Stage::Reporting)
            .unwrap();

        let steps = workflow
            .scenario("Proposed Tool")
            .unwrap()
            .stage_steps(Stage::Reporting);
        assert_eq!(steps.len(), before + 1);
        let step = steps.last().unwrap();
        assert_eq!(step.id(), id);
        assert_eq!(step.step_description(), PLACEHOLDER_STEP);
        assert_eq!(step.duration_weeks(), 0.0);
        assert_eq!(step.role_allocation().len(), 3);
        assert!(step.role_allocation().values().all(|percent| *percent == 0.0));

        assert_eq!(
            workflow.add_placeholder_step("Nope", Stage::Reporting),
            Err(WorkflowError::ScenarioNotFound("Nope".to_string()))
        );
    }

    #[test]
    fn test_add_step_unknown_scenario() {
        let mut workflow = Workflow::new();
        let err = workflow
            .add_step("Nope", ActivityStep::new(Stage::Reporting, "x"))
            .unwrap_err();
        assert_eq!(err, WorkflowError::ScenarioNotFound("Nope".to_string()));
    }

    #[test]
    fn test_add_scenario_extends_infrastructure() {
        let mut workflow = Workflow::with_defaults();
        workflow.add_scenario("Pilot").unwrap();
        assert!(workflow
            .infrastructure()
            .iter()
            .all(|item| item.cost_per_scenario().contains_key("Pilot")));
        assert!(matches!(
            workflow.add_scenario("Pilot"),
            Err(WorkflowError::DuplicateScenario(_))
        ));
    }

    #[test]
    fn test_scenario_mut_or_seeded_creates_once() {
        let mut workflow = Workflow::with_defaults();
        workflow.scenario_mut_or_seeded("Pilot").clear();
        assert!(!workflow.scenario_mut_or_seeded("Pilot").has_recorded_stages());
        assert_eq!(workflow.scenarios().len(), 4);
    }

    #[test]
    fn test_copy_from_missing_source_is_noop() {
        let mut workflow = Workflow::with_defaults();
        let before = workflow.clone();
        assert_eq!(workflow.copy_scenario("Ghost", "BAU 2"), None);
        assert_eq!(workflow, before);
    }

    #[test]
    fn test_copy_creates_missing_target() {
        let mut workflow = Workflow::with_defaults();
        let copied = workflow.copy_scenario("BAU 1", "Pilot").unwrap();
        assert_eq!(copied, workflow.scenario("BAU 1").unwrap().step_count());
        assert!(workflow.scenario("Pilot").is_some());
    }
}
