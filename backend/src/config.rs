//! Analysis configuration
//!
//! Settings that shape how the pipeline turns a workflow into projections.
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Scenario that receives the ROI parameters' total investment as fixed cost
pub const DEFAULT_TOOL_SCENARIO: &str = "Proposed Tool";

/// Errors loading an analysis configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid analysis config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid analysis config: {0}")]
    Invalid(String),
}

/// How infrastructure item amounts are interpreted
///
/// # Example
/// ```
/// use scenario_roi_core::InfrastructureBasis;
///
/// assert_eq!(InfrastructureBasis::PerStudy.per_study(1200.0), 1200.0);
/// let annual = InfrastructureBasis::Annual { studies_per_year: 10.0 };
/// assert_eq!(annual.per_study(1200.0), 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InfrastructureBasis {
    /// Amounts are already the cost of one study
    PerStudy,

    /// Amounts are annual; spread them over the studies run in a year
    Annual {
        /// Studies conducted per year (values below 1 count as 1)
        studies_per_year: f64,
    },
}

impl Default for InfrastructureBasis {
    fn default() -> Self {
        InfrastructureBasis::PerStudy
    }
}

impl InfrastructureBasis {
    /// Convert a scenario's infrastructure total into a per-study amount
    pub fn per_study(&self, amount: f64) -> f64 {
        match self {
            InfrastructureBasis::PerStudy => amount,
            InfrastructureBasis::Annual { studies_per_year } => {
                let divisor = if studies_per_year.is_finite() {
                    studies_per_year.max(1.0)
                } else {
                    1.0
                };
                amount / divisor
            }
        }
    }
}

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Scenario every other scenario is compared against
    /// (None = first scenario in the workflow)
    pub baseline_scenario: Option<String>,

    /// Scenario charged the total investment as its fixed cost
    pub tool_scenario: String,

    /// Explicit fixed cost per scenario, overriding the default rule
    pub fixed_costs: BTreeMap<String, f64>,

    /// Interpretation of infrastructure amounts
    pub infrastructure_basis: InfrastructureBasis,

    /// Append the "Infrastructure" line to stage cost tables
    pub include_infrastructure_line: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baseline_scenario: None,
            tool_scenario: DEFAULT_TOOL_SCENARIO.to_string(),
            fixed_costs: BTreeMap::new(),
            infrastructure_basis: InfrastructureBasis::default(),
            include_infrastructure_line: true,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON config
    ///
    /// # Errors
    /// `Parse` for malformed JSON, `Invalid` for negative fixed costs or a
    /// non-positive studies-per-year figure.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((scenario, amount)) = self
            .fixed_costs
            .iter()
            .find(|(_, amount)| !amount.is_finite() || **amount < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "fixed cost for '{}' must be a non-negative number, got {}",
                scenario, amount
            )));
        }
        if let InfrastructureBasis::Annual { studies_per_year } = self.infrastructure_basis {
            if !studies_per_year.is_finite() || studies_per_year <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "studies_per_year must be positive, got {}",
                    studies_per_year
                )));
            }
        }
        Ok(())
    }

    /// Fixed cost of a scenario
    ///
    /// An explicit override wins; otherwise the tool scenario carries the
    /// total investment and every other scenario carries nothing.
    pub fn fixed_cost(&self, scenario: &str, total_investment: f64) -> f64 {
        match self.fixed_costs.get(scenario) {
            Some(amount) => *amount,
            None if scenario == self.tool_scenario => total_investment,
            None => 0.0,
        }
    }
}
