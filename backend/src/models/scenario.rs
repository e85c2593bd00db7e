//! Scenarios
//!
//! A scenario is one complete alternative way of executing the workflow
//! ("BAU 1", "Proposed Tool", ...). It holds, per stage, an ordered list of
//! activity steps. Scenarios are independent of each other; the only way
//! content moves between them is an explicit copy.
//!
//! # Critical Invariants
//!
//! 1. Every step stored under a stage reports that same stage
//! 2. Step ids are unique within the scenario
//! 3. A stage that was never touched is simply absent; readers see it as an
//!    empty step list

use crate::core::{content_hash, Stage};
use crate::models::step::ActivityStep;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named bucket of activity steps, grouped by stage
///
/// # Example
///
/// ```rust
/// use scenario_roi_core::{ActivityStep, Scenario, Stage};
///
/// let mut scenario = Scenario::new("BAU 1");
/// assert!(!scenario.has_recorded_stages());
///
/// scenario.push_step(ActivityStep::new(Stage::Reporting, "Write report").with_duration(2.0));
/// assert_eq!(scenario.stage_steps(Stage::Reporting).len(), 1);
/// assert_eq!(scenario.stage_steps(Stage::DataCleaning).len(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name, unique within a workflow
    name: String,

    /// Stage → ordered steps (stages iterate in workflow order)
    stages: BTreeMap<Stage, Vec<ActivityStep>>,
}

impl Scenario {
    /// Create a scenario with no recorded stages
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: BTreeMap::new(),
        }
    }

    /// Create a scenario with every stage seeded with its default steps
    ///
    /// Each seeded step has zero duration and a 0.0 allocation for every
    /// given role.
    pub fn seeded<'a>(name: impl Into<String>, role_names: &[&'a str]) -> Self {
        let mut scenario = Self::new(name);
        for stage in Stage::ALL {
            scenario.stage_steps_or_seeded(stage, role_names);
        }
        scenario
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether any stage has ever been recorded in this scenario
    pub fn has_recorded_stages(&self) -> bool {
        !self.stages.is_empty()
    }

    /// Stages that have been recorded, in workflow order
    pub fn recorded_stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.stages.keys().copied()
    }

    /// Steps of one stage (empty when the stage was never recorded)
    pub fn stage_steps(&self, stage: Stage) -> &[ActivityStep] {
        self.stages.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All steps across all stages, in workflow order
    pub fn steps(&self) -> impl Iterator<Item = &ActivityStep> + '_ {
        self.stages.values().flatten()
    }

    /// Total number of steps across all stages
    pub fn step_count(&self) -> usize {
        self.stages.values().map(Vec::len).sum()
    }

    /// Steps of one stage, seeding the stage with its defaults on first access
    pub fn stage_steps_or_seeded<'a>(
        &mut self,
        stage: Stage,
        role_names: &[&'a str],
    ) -> &mut Vec<ActivityStep> {
        self.stages.entry(stage).or_insert_with(|| {
            stage
                .default_steps()
                .iter()
                .map(|text| ActivityStep::new(stage, *text).with_roles(role_names.iter().copied()))
                .collect()
        })
    }

    /// Append a step to the stage it reports
    pub fn push_step(&mut self, step: ActivityStep) {
        self.stages.entry(step.stage()).or_default().push(step);
    }

    /// Look up a step by id within a stage
    pub fn step_mut(&mut self, stage: Stage, id: &str) -> Option<&mut ActivityStep> {
        self.stages
            .get_mut(&stage)
            .and_then(|steps| steps.iter_mut().find(|step| step.id() == id))
    }

    /// Remove a step by id; the stage stays recorded even if it becomes empty
    pub fn remove_step(&mut self, stage: Stage, id: &str) -> Option<ActivityStep> {
        let steps = self.stages.get_mut(&stage)?;
        let index = steps.iter().position(|step| step.id() == id)?;
        Some(steps.remove(index))
    }

    /// Replace the steps of one stage wholesale
    ///
    /// Steps are re-homed to `stage` so the stage invariant holds.
    pub fn replace_stage(&mut self, stage: Stage, steps: Vec<ActivityStep>) {
        let steps = steps
            .into_iter()
            .map(|mut step| {
                step.set_stage(stage);
                step
            })
            .collect();
        self.stages.insert(stage, steps);
    }

    /// Drop all recorded stages
    pub fn clear(&mut self) {
        self.stages.clear();
    }

    /// Fingerprint of the scenario's step content
    ///
    /// Step ids are excluded, so a scenario and its copy hash the same.
    ///
    /// # Errors
    /// Propagates serialization failures from `content_hash`.
    pub fn content_hash(&self) -> Result<String, serde_json::Error> {
        let content: Vec<_> = self
            .steps()
            .map(|step| {
                (
                    step.stage(),
                    step.step_description(),
                    step.notes(),
                    step.duration_weeks(),
                    step.role_allocation(),
                )
            })
            .collect();
        content_hash(&content)
    }

    pub(crate) fn add_role(&mut self, role: &str) {
        for step in self.stages.values_mut().flatten() {
            if !step.role_allocation().contains_key(role) {
                step.set_allocation(role, 0.0);
            }
        }
    }

    pub(crate) fn remove_role(&mut self, role: &str) {
        for step in self.stages.values_mut().flatten() {
            step.remove_role(role);
        }
    }

    pub(crate) fn rename_role(&mut self, old: &str, new: &str) {
        for step in self.stages.values_mut().flatten() {
            step.rename_role(old, new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_covers_every_stage() {
        let scenario = Scenario::seeded("BAU 1", &["Engineer", "Researcher"]);
        for stage in Stage::ALL {
            let steps = scenario.stage_steps(stage);
            assert_eq!(steps.len(), stage.default_steps().len());
            for step in steps {
                assert_eq!(step.stage(), stage);
                assert_eq!(step.role_allocation().len(), 2);
                assert_eq!(step.duration_weeks(), 0.0);
            }
        }
    }

    #[test]
    fn test_first_access_seeds_only_once() {
        let mut scenario = Scenario::new("BAU 1");
        scenario.stage_steps_or_seeded(Stage::StudyDesign, &[]).clear();
        let steps = scenario.stage_steps_or_seeded(Stage::StudyDesign, &[]);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_remove_step_keeps_stage_recorded() {
        let mut scenario = Scenario::new("X");
        let step = ActivityStep::new(Stage::Reporting, "Write");
        let id = step.id().to_string();
        scenario.push_step(step);

        assert!(scenario.remove_step(Stage::Reporting, &id).is_some());
        assert!(scenario.has_recorded_stages());
        assert_eq!(scenario.step_count(), 0);
        assert!(scenario.remove_step(Stage::Reporting, &id).is_none());
    }

    #[test]
    fn test_replace_stage_rehomes_steps() {
        let mut scenario = Scenario::new("X");
        scenario.replace_stage(
            Stage::DataCleaning,
            vec![ActivityStep::new(Stage::Reporting, "Misfiled")],
        );
        assert_eq!(scenario.stage_steps(Stage::DataCleaning)[0].stage(), Stage::DataCleaning);
    }

    #[test]
    fn test_content_hash_ignores_ids() {
        let mut a = Scenario::new("A");
        a.push_step(ActivityStep::new(Stage::Reporting, "Write").with_duration(1.0));
        let mut b = Scenario::new("B");
        b.push_step(a.stage_steps(Stage::Reporting)[0].duplicate());

        assert_eq!(a.content_hash().unwrap(), b.content_hash().unwrap());
    }

    #[test]
    fn test_role_maintenance() {
        let mut scenario = Scenario::seeded("X", &["Engineer"]);
        scenario.add_role("Analyst");
        assert!(scenario.steps().all(|s| s.role_allocation().get("Analyst") == Some(&0.0)));

        scenario.rename_role("Analyst", "Data Analyst");
        assert!(scenario.steps().all(|s| s.role_allocation().contains_key("Data Analyst")));

        scenario.remove_role("Data Analyst");
        assert!(scenario.steps().all(|s| !s.role_allocation().contains_key("Data Analyst")));
    }
}
