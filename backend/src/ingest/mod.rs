//! Boundary ingestion
//!
//! Converts loosely typed input records (as produced by forms, spreadsheets
//! or JSON files) into the typed [`Workflow`](crate::models::Workflow).
//! All numeric clean-up happens here, so the aggregation code never has to
//! second-guess its inputs.
//!
//! # Coercion Rules
//!
//! - absent, null, non-numeric or non-finite numbers → 0
//! - numeric strings (`"4.5"`) are parsed
//! - negative durations, rates and amounts → 0
//! - percentages are clamped to [0, 100]
//! - reach, organisation counts and concurrent studies are at least 1
//! - role and scenario names are trimmed, both where they are defined and
//!   where they are referenced
//!
//! Every adjustment is recorded in the returned [`IngestReport`]. The only
//! hard failures are malformed JSON and stage labels outside the fixed list.

mod coerce;
mod records;

pub use coerce::number;
pub use records::{
    RawActivityStep, RawInfrastructureItem, RawRole, RawRoiParameters, RawScenario, RawWorkflow,
};

use crate::core::{Stage, UnknownStage};
use crate::models::{
    ActivityStep, Assumption, InfrastructureCostItem, PersonnelRole, RoiParameters, Workflow,
    WorkflowError,
};
use coerce::Coercer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fatal ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Malformed workflow JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scenario '{scenario}', step {index}: {source}")]
    UnknownStage {
        scenario: String,
        index: usize,
        #[source]
        source: UnknownStage,
    },
}

/// A non-fatal adjustment made while ingesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestIssue {
    /// A numeric field was replaced or clamped
    Coerced {
        field: String,
        raw: Value,
        value: f64,
    },

    /// An allocation referenced a role that is not defined; it was dropped
    UnknownRole {
        scenario: String,
        step: String,
        role: String,
    },

    /// A role or scenario name was blank or repeated; the record was skipped
    Skipped { field: String, reason: String },
}

/// Everything ingestion adjusted, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub issues: Vec<IngestIssue>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn skipped(&mut self, field: String, err: WorkflowError) {
        tracing::debug!(%field, reason = %err, "Skipped input record");
        self.issues.push(IngestIssue::Skipped {
            field,
            reason: err.to_string(),
        });
    }
}

/// Parse a workflow from JSON and ingest it
///
/// # Errors
/// `Json` for malformed JSON, `UnknownStage` for an unrecognised stage.
///
/// # Example
/// ```
/// use scenario_roi_core::ingest::parse_workflow;
///
/// let json = r#"{
///     "roles": [{"role": "Engineer", "hourly_rate": "65"}],
///     "scenarios": [{
///         "name": "BAU 1",
///         "steps": [{
///             "stage": "Data Cleaning",
///             "step": "Merge waves",
///             "duration_weeks": -2,
///             "roles": {"Engineer": 150}
///         }]
///     }]
/// }"#;
///
/// let (workflow, report) = parse_workflow(json).unwrap();
/// assert_eq!(workflow.roles()[0].hourly_rate(), 65.0);
/// assert_eq!(workflow.scenarios()[0].step_count(), 1);
/// assert_eq!(report.issues.len(), 2); // duration and percentage clamped
/// ```
pub fn parse_workflow(json: &str) -> Result<(Workflow, IngestReport), IngestError> {
    let raw: RawWorkflow = serde_json::from_str(json)?;
    ingest_workflow(&raw)
}

/// Convert raw records into a typed workflow
///
/// # Errors
/// `UnknownStage` when a step names a stage outside the fixed list.
pub fn ingest_workflow(raw: &RawWorkflow) -> Result<(Workflow, IngestReport), IngestError> {
    let mut coercer = Coercer::default();
    let mut workflow = Workflow::new();

    for (index, raw_role) in raw.roles.iter().enumerate() {
        let rate = coercer.non_negative(
            format!("roles[{}].hourly_rate", index),
            &raw_role.hourly_rate,
        );
        let role = PersonnelRole::new(raw_role.role.trim(), rate).with_notes(&raw_role.notes);
        if let Err(err) = workflow.add_role(role) {
            coercer.report.skipped(format!("roles[{}]", index), err);
        }
    }

    for (index, raw_item) in raw.infrastructure.iter().enumerate() {
        let mut item =
            InfrastructureCostItem::new(raw_item.category.as_str()).with_notes(&raw_item.notes);
        for (scenario, amount) in &raw_item.cost_by_scenario {
            let scenario = scenario.trim();
            let amount = coercer.non_negative(
                format!("infrastructure[{}].cost_by_scenario[{}]", index, scenario),
                amount,
            );
            item.set_cost(scenario, amount);
        }
        workflow.add_infrastructure_item(item);
    }

    for raw_scenario in &raw.scenarios {
        ingest_scenario(&mut workflow, raw_scenario, &mut coercer)?;
    }

    let roi = ingest_roi(&raw.roi, &mut coercer);
    workflow.set_roi(roi);

    for text in &raw.assumptions {
        workflow.add_assumption(Assumption::new(text.as_str()));
    }

    let report = coercer.report;
    tracing::debug!(
        roles = workflow.roles().len(),
        scenarios = workflow.scenarios().len(),
        issues = report.issues.len(),
        "Ingested workflow"
    );
    Ok((workflow, report))
}

fn ingest_scenario(
    workflow: &mut Workflow,
    raw: &RawScenario,
    coercer: &mut Coercer,
) -> Result<(), IngestError> {
    let name = raw.name.trim();
    if let Err(err) = workflow.add_scenario(name) {
        coercer
            .report
            .skipped(format!("scenarios[{}]", raw.name), err);
        return Ok(());
    }

    let role_names: Vec<String> = workflow
        .role_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut steps = Vec::with_capacity(raw.steps.len());
    for (index, raw_step) in raw.steps.iter().enumerate() {
        let stage: Stage =
            raw_step
                .stage
                .parse()
                .map_err(|source| IngestError::UnknownStage {
                    scenario: name.to_string(),
                    index,
                    source,
                })?;
        let field = format!("scenarios[{}].steps[{}]", name, index);

        let mut step = ActivityStep::new(stage, raw_step.step.as_str())
            .with_notes(&raw_step.notes)
            .with_duration(coercer.non_negative(
                format!("{}.duration_weeks", field),
                &raw_step.duration_weeks,
            ));

        for (role, percent) in &raw_step.roles {
            let role = role.trim();
            if !role_names.iter().any(|defined| defined == role) {
                tracing::debug!(scenario = name, role = %role, "Dropped allocation for undefined role");
                coercer.report.issues.push(IngestIssue::UnknownRole {
                    scenario: name.to_string(),
                    step: raw_step.step.clone(),
                    role: role.to_string(),
                });
                continue;
            }
            let percent = coercer.percent(format!("{}.roles[{}]", field, role), percent);
            step.set_allocation(role, percent);
        }

        steps.push(step.with_roles(role_names.iter().map(String::as_str)));
    }

    if let Some(scenario) = workflow.scenario_mut(name) {
        for step in steps {
            scenario.push_step(step);
        }
    }
    Ok(())
}

fn ingest_roi(raw: &RawRoiParameters, coercer: &mut Coercer) -> RoiParameters {
    RoiParameters {
        learning_definition: raw.learning_definition.clone(),
        learning_effect_sd: coercer.non_negative("roi.learning_sd".to_string(), &raw.learning_sd),
        economic_definition: raw.econ_definition.clone(),
        economic_value_per_sd: coercer
            .non_negative("roi.econ_per_sd".to_string(), &raw.econ_per_sd),
        discovery_rate_pct: coercer
            .percent("roi.discovery_rate_pct".to_string(), &raw.discovery_rate_pct),
        total_reach: coercer.count("roi.total_reach".to_string(), &raw.total_reach),
        total_investment: coercer
            .non_negative("roi.total_investment".to_string(), &raw.total_investment),
        orgs_per_scenario: raw
            .orgs_by_scenario
            .iter()
            .map(|(scenario, orgs)| {
                let orgs = coercer.count(format!("roi.orgs_by_scenario[{}]", scenario), orgs);
                (scenario.trim().to_string(), u32::try_from(orgs).unwrap_or(u32::MAX))
            })
            .collect(),
        concurrent_studies_per_org: u32::try_from(
            coercer.count("roi.concurrent_studies".to_string(), &raw.concurrent_studies),
        )
        .unwrap_or(u32::MAX),
    }
}
