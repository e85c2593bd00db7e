//! Analysis pipeline
//!
//! The explicit "recompute everything" entry point a caller triggers after
//! mutating its [`Workflow`]. Each call reads the workflow and config by
//! shared reference and returns a fresh [`AnalysisReport`]; nothing is cached
//! between calls. Each scenario summary carries a fingerprint of its steps,
//! so a caller that wants to memoise per-scenario results can key on it.
//!
//! # Pipeline Order
//!
//! 1. Per scenario, in workflow order: time tables, cost tables, aggregate
//! 2. Impact per study (shared by every scenario)
//! 3. Per scenario: projection inputs and the fifty-year projection
//! 4. Baseline-first comparisons across all scenarios (hours and costs, by
//!    stage and by role)

use crate::aggregate::{
    cost_by_role, cost_by_stage, infrastructure_cost, person_hours_by_role,
    person_hours_by_stage, stage_calendar_duration, RoleTable, ScenarioAggregate, Series,
    StageCostTable, StageTable,
};
use crate::compare::ComparisonTable;
use crate::config::AnalysisConfig;
use crate::core::units::weeks_to_months;
use crate::impact::impact_per_study;
use crate::models::{Scenario, Workflow};
use crate::projection::{ProjectionInputs, ProjectionRow};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors running the pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Baseline scenario '{0}' not found")]
    BaselineNotFound(String),

    #[error("Failed to fingerprint scenario: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

/// Everything computed for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub aggregate: ScenarioAggregate,

    /// SHA-256 of the scenario's step content (ids excluded)
    pub steps_hash: String,

    pub hours_by_stage: StageTable,
    pub hours_by_role: RoleTable,
    pub calendar_weeks: StageTable,
    pub cost_by_stage: StageCostTable,
    pub cost_by_role: RoleTable,

    pub projection_inputs: ProjectionInputs,
    pub projection: Vec<ProjectionRow>,
}

impl ScenarioSummary {
    pub fn name(&self) -> &str {
        &self.aggregate.scenario
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Scenario every comparison is measured against (None when there are
    /// no scenarios)
    pub baseline: Option<String>,

    /// Dollar impact of one completed study
    pub impact_per_study: f64,

    /// One summary per scenario, in workflow order
    pub scenarios: Vec<ScenarioSummary>,

    /// Person-hours per stage, baseline first
    pub stage_hours: Option<ComparisonTable>,

    /// Person-hours per role, baseline first
    pub role_hours: Option<ComparisonTable>,

    /// Dollars per stage (plus the infrastructure line), baseline first
    pub stage_costs: Option<ComparisonTable>,

    /// Personnel dollars per role, baseline first
    pub role_costs: Option<ComparisonTable>,
}

impl AnalysisReport {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioSummary> {
        self.scenarios.iter().find(|summary| summary.name() == name)
    }

    /// Every scenario's projection rows, scenario by scenario
    pub fn projection_rows(&self) -> impl Iterator<Item = &ProjectionRow> + '_ {
        self.scenarios
            .iter()
            .flat_map(|summary| summary.projection.iter())
    }
}

/// Run the full analysis over a workflow snapshot
///
/// # Errors
/// `BaselineNotFound` when the configured baseline names no scenario.
///
/// # Example
/// ```
/// use scenario_roi_core::{run_analysis, AnalysisConfig, Workflow};
///
/// let workflow = Workflow::with_defaults();
/// let report = run_analysis(&workflow, &AnalysisConfig::default()).unwrap();
///
/// assert_eq!(report.baseline.as_deref(), Some("BAU 1"));
/// assert_eq!(report.scenarios.len(), 3);
/// assert!(report.scenarios.iter().all(|s| s.projection.len() == 50));
/// ```
pub fn run_analysis(
    workflow: &Workflow,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let baseline = match &config.baseline_scenario {
        Some(name) => {
            if workflow.scenario(name).is_none() {
                return Err(AnalysisError::BaselineNotFound(name.clone()));
            }
            Some(name.clone())
        }
        None => workflow.scenarios().first().map(|s| s.name().to_string()),
    };

    let roi = workflow.roi().normalized();
    let impact = impact_per_study(&roi);

    let scenarios = workflow
        .scenarios()
        .iter()
        .map(|scenario| summarize(workflow, scenario, config, impact))
        .collect::<Result<Vec<_>, _>>()?;

    // Baseline first, the rest in workflow order
    let mut ordered: Vec<&ScenarioSummary> = scenarios.iter().collect();
    if let Some(name) = &baseline {
        if let Some(index) = ordered.iter().position(|s| s.name() == name) {
            let first = ordered.remove(index);
            ordered.insert(0, first);
        }
    }

    let stage_hours = comparison("Stage", &ordered, |s| &s.hours_by_stage);
    let role_hours = comparison("Role", &ordered, |s| &s.hours_by_role);
    let stage_costs = comparison("Stage", &ordered, |s| &s.cost_by_stage);
    let role_costs = comparison("Role", &ordered, |s| &s.cost_by_role);

    tracing::debug!(
        scenarios = scenarios.len(),
        baseline = baseline.as_deref().unwrap_or(""),
        impact_per_study = impact,
        "Analysis complete"
    );

    Ok(AnalysisReport {
        baseline,
        impact_per_study: impact,
        scenarios,
        stage_hours,
        role_hours,
        stage_costs,
        role_costs,
    })
}

fn summarize(
    workflow: &Workflow,
    scenario: &Scenario,
    config: &AnalysisConfig,
    impact: f64,
) -> Result<ScenarioSummary, AnalysisError> {
    let roles = workflow.roles();
    let items = workflow.infrastructure();
    let name = scenario.name();

    let aggregate = ScenarioAggregate::compute(scenario, roles, items);

    let cost_by_stage = StageCostTable {
        stages: cost_by_stage(scenario.steps(), roles),
        infrastructure: config
            .include_infrastructure_line
            .then(|| infrastructure_cost(items, name)),
    };

    let roi = workflow.roi();
    let projection_inputs = ProjectionInputs::new(
        name,
        weeks_to_months(aggregate.calendar_weeks),
        aggregate.personnel_cost
            + config
                .infrastructure_basis
                .per_study(aggregate.infrastructure_cost),
        impact,
        config.fixed_cost(name, roi.total_investment.max(0.0)),
        roi.orgs_for(name),
    )
    .with_concurrent_studies(roi.concurrent_studies());

    let projection = projection_inputs.rows().collect();

    tracing::debug!(
        scenario = name,
        person_hours = aggregate.person_hours,
        calendar_weeks = aggregate.calendar_weeks,
        cost_per_study = projection_inputs.cost_per_study,
        "Summarised scenario"
    );

    Ok(ScenarioSummary {
        steps_hash: scenario.content_hash()?,
        hours_by_stage: person_hours_by_stage(scenario.steps()),
        hours_by_role: person_hours_by_role(scenario.steps()).with_roles(roles),
        calendar_weeks: stage_calendar_duration(scenario.steps()),
        cost_by_stage,
        cost_by_role: cost_by_role(scenario.steps(), roles).with_roles(roles),
        aggregate,
        projection_inputs,
        projection,
    })
}

fn comparison<T, F>(
    key_header: &str,
    ordered: &[&ScenarioSummary],
    table: F,
) -> Option<ComparisonTable>
where
    T: Series + 'static,
    F: Fn(&ScenarioSummary) -> &T,
{
    if ordered.is_empty() {
        return None;
    }
    let columns: Vec<(&str, &dyn Series)> = ordered
        .iter()
        .map(|summary| (summary.name(), table(*summary) as &dyn Series))
        .collect();
    Some(ComparisonTable::build(key_header, &columns))
}
