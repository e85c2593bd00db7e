//! Raw input records
//!
//! Field names follow the external record schema. Numeric fields are kept as
//! raw JSON values so malformed input survives deserialization and can be
//! coerced (and reported) during ingestion instead of failing the parse.

use crate::models::Workflow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A whole workflow as supplied by the record store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWorkflow {
    pub roles: Vec<RawRole>,
    pub scenarios: Vec<RawScenario>,
    pub infrastructure: Vec<RawInfrastructureItem>,
    pub roi: RawRoiParameters,
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRole {
    pub role: String,

    #[serde(default)]
    pub hourly_rate: Value,

    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawScenario {
    pub name: String,

    #[serde(default)]
    pub steps: Vec<RawActivityStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawActivityStep {
    pub stage: String,

    #[serde(default)]
    pub step: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub duration_weeks: Value,

    /// Role name → percent of active time
    #[serde(default)]
    pub roles: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInfrastructureItem {
    pub category: String,

    #[serde(default)]
    pub cost_by_scenario: BTreeMap<String, Value>,

    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRoiParameters {
    pub learning_definition: String,
    pub learning_sd: Value,
    pub econ_definition: String,
    pub econ_per_sd: Value,
    pub discovery_rate_pct: Value,
    pub total_reach: Value,
    pub total_investment: Value,
    pub orgs_by_scenario: BTreeMap<String, Value>,
    pub concurrent_studies: Value,
}

impl From<&Workflow> for RawWorkflow {
    fn from(workflow: &Workflow) -> Self {
        let roles = workflow
            .roles()
            .iter()
            .map(|role| RawRole {
                role: role.name().to_string(),
                hourly_rate: Value::from(role.hourly_rate()),
                notes: role.notes().to_string(),
            })
            .collect();

        let scenarios = workflow
            .scenarios()
            .iter()
            .map(|scenario| RawScenario {
                name: scenario.name().to_string(),
                steps: scenario
                    .steps()
                    .map(|step| RawActivityStep {
                        stage: step.stage().label().to_string(),
                        step: step.step_description().to_string(),
                        notes: step.notes().to_string(),
                        duration_weeks: Value::from(step.duration_weeks()),
                        roles: step
                            .role_allocation()
                            .iter()
                            .map(|(role, percent)| (role.clone(), Value::from(*percent)))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let infrastructure = workflow
            .infrastructure()
            .iter()
            .map(|item| RawInfrastructureItem {
                category: item.category().to_string(),
                cost_by_scenario: item
                    .cost_per_scenario()
                    .iter()
                    .map(|(scenario, amount)| (scenario.clone(), Value::from(*amount)))
                    .collect(),
                notes: item.notes().to_string(),
            })
            .collect();

        let roi = workflow.roi();
        let roi = RawRoiParameters {
            learning_definition: roi.learning_definition.clone(),
            learning_sd: Value::from(roi.learning_effect_sd),
            econ_definition: roi.economic_definition.clone(),
            econ_per_sd: Value::from(roi.economic_value_per_sd),
            discovery_rate_pct: Value::from(roi.discovery_rate_pct),
            total_reach: Value::from(roi.total_reach),
            total_investment: Value::from(roi.total_investment),
            orgs_by_scenario: roi
                .orgs_per_scenario
                .iter()
                .map(|(scenario, orgs)| (scenario.clone(), Value::from(*orgs)))
                .collect(),
            concurrent_studies: Value::from(roi.concurrent_studies_per_org),
        };

        Self {
            roles,
            scenarios,
            infrastructure,
            roi,
            assumptions: workflow
                .assumptions()
                .iter()
                .map(|assumption| assumption.text().to_string())
                .collect(),
        }
    }
}
