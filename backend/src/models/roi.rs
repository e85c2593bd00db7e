//! ROI parameters
//!
//! A single set of parameters per workflow describing how much a completed
//! study is worth: the learning effect it uncovers, the economic value of
//! that effect, how often studies discover anything, and how many students
//! the findings reach. Only the organisation count varies by scenario.

use crate::models::role::non_negative;
use crate::models::step::clamp_percent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Workflow-wide ROI parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiParameters {
    /// What the learning effect measures (context only)
    pub learning_definition: String,

    /// Median impact on learning outcomes, in standard deviations
    pub learning_effect_sd: f64,

    /// What the economic value measures (context only)
    pub economic_definition: String,

    /// Long-term economic value of a 1 SD improvement, in dollars
    pub economic_value_per_sd: f64,

    /// Probability (percent, 0-100) that a study detects a measurable effect
    pub discovery_rate_pct: f64,

    /// Students served by the platform / tool (at least 1)
    pub total_reach: u64,

    /// Total investment in the tool, in dollars
    pub total_investment: f64,

    /// Scenario name → organisations served (each at least 1)
    pub orgs_per_scenario: BTreeMap<String, u32>,

    /// Studies each organisation runs in parallel (at least 1)
    pub concurrent_studies_per_org: u32,
}

impl Default for RoiParameters {
    fn default() -> Self {
        Self {
            learning_definition: String::new(),
            learning_effect_sd: 0.0,
            economic_definition: String::new(),
            economic_value_per_sd: 0.0,
            discovery_rate_pct: 0.0,
            total_reach: 1,
            total_investment: 0.0,
            orgs_per_scenario: BTreeMap::new(),
            concurrent_studies_per_org: 1,
        }
    }
}

impl RoiParameters {
    /// Organisations served under a scenario (missing or zero → 1)
    pub fn orgs_for(&self, scenario: &str) -> u32 {
        self.orgs_per_scenario
            .get(scenario)
            .copied()
            .unwrap_or(1)
            .max(1)
    }

    /// Concurrent studies per organisation (zero → 1)
    pub fn concurrent_studies(&self) -> u32 {
        self.concurrent_studies_per_org.max(1)
    }

    /// Copy with every field forced into its valid range
    pub fn normalized(&self) -> Self {
        Self {
            learning_definition: self.learning_definition.clone(),
            learning_effect_sd: non_negative(self.learning_effect_sd),
            economic_definition: self.economic_definition.clone(),
            economic_value_per_sd: non_negative(self.economic_value_per_sd),
            discovery_rate_pct: clamp_percent(self.discovery_rate_pct),
            total_reach: self.total_reach.max(1),
            total_investment: non_negative(self.total_investment),
            orgs_per_scenario: self
                .orgs_per_scenario
                .iter()
                .map(|(name, orgs)| (name.clone(), (*orgs).max(1)))
                .collect(),
            concurrent_studies_per_org: self.concurrent_studies(),
        }
    }
}
