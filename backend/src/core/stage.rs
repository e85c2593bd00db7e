//! Workflow stages
//!
//! Every scenario is broken down into the same fixed, ordered list of stages.
//! The list is not editable: it is the comparability axis between scenarios,
//! so grouped tables from different scenarios always line up row for row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One stage of the research/production workflow
///
/// Variants are declared in workflow order, so the derived `Ord` sorts stages
/// the same way every output table lists them.
///
/// # Example
/// ```
/// use scenario_roi_core::Stage;
///
/// assert_eq!(Stage::ALL.len(), 8);
/// assert_eq!(Stage::ALL[0], Stage::DataAgreements);
/// assert!(Stage::DataCleaning < Stage::Reporting);
/// assert_eq!(Stage::Reporting.label(), "Reporting");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Data Sharing Agreements & Data User Agreements")]
    DataAgreements,

    #[serde(rename = "Human Subject Research Approvals")]
    ResearchApprovals,

    #[serde(rename = "Data Collection & Access or Transfer")]
    DataCollection,

    #[serde(rename = "Data Cleaning")]
    DataCleaning,

    #[serde(rename = "Study Design & Infrastructure Setup")]
    StudyDesign,

    #[serde(rename = "Study Implementation and Monitoring")]
    StudyImplementation,

    #[serde(rename = "Data Modeling & Analysis")]
    DataAnalysis,

    #[serde(rename = "Reporting")]
    Reporting,
}

/// Error returned when a label does not name one of the fixed stages
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown stage '{0}'")]
pub struct UnknownStage(pub String);

impl Stage {
    /// All stages in workflow order
    pub const ALL: [Stage; 8] = [
        Stage::DataAgreements,
        Stage::ResearchApprovals,
        Stage::DataCollection,
        Stage::DataCleaning,
        Stage::StudyDesign,
        Stage::StudyImplementation,
        Stage::DataAnalysis,
        Stage::Reporting,
    ];

    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Stage::DataAgreements => "Data Sharing Agreements & Data User Agreements",
            Stage::ResearchApprovals => "Human Subject Research Approvals",
            Stage::DataCollection => "Data Collection & Access or Transfer",
            Stage::DataCleaning => "Data Cleaning",
            Stage::StudyDesign => "Study Design & Infrastructure Setup",
            Stage::StudyImplementation => "Study Implementation and Monitoring",
            Stage::DataAnalysis => "Data Modeling & Analysis",
            Stage::Reporting => "Reporting",
        }
    }

    /// Step descriptions a scenario is seeded with on first access
    ///
    /// These are examples only; the analyst is expected to edit or replace
    /// them so they match the projects the tool supports.
    pub fn default_steps(&self) -> &'static [&'static str] {
        match self {
            Stage::DataAgreements => &["Drafting agreements, review, executing DSAs and DUAs"],
            Stage::ResearchApprovals => &[
                "Researchers to complete IRB requirements",
                "Consenting Participants",
            ],
            Stage::DataCollection => &[
                "Data Collection, Documentation, Anonymization (i.e. Data setup)",
                "Secure data access / transfer to researchers",
            ],
            Stage::DataCleaning => &["Data Review or Quality Check, Data Cleaning & Merging"],
            Stage::StudyDesign => &[
                "Exploratory Data Analysis to guide Study Design",
                "Data preparation to implement the study",
                "Setting up the infrastructure to execute or run the experiment",
            ],
            Stage::StudyImplementation => &["Run the study"],
            Stage::DataAnalysis => &["Analysis & QA"],
            Stage::Reporting => &["Report writing & communications"],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.label() == trimmed)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}
