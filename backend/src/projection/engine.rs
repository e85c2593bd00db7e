//! Projection row generation

use crate::core::units::{MONTHS_PER_YEAR, PROJECTION_YEARS};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Everything one scenario's projection depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Scenario the rows are labelled with
    pub scenario: String,

    /// Elapsed months for one study
    pub study_duration_months: f64,

    /// Variable cost of one study, in dollars
    pub cost_per_study: f64,

    /// Dollar impact of one completed study
    pub impact_per_study: f64,

    /// One-time scenario cost, independent of study count
    pub fixed_cost: f64,

    /// Organisations running studies
    pub num_orgs: u32,

    /// Studies each organisation runs in parallel
    pub concurrent_studies_per_org: u32,
}

impl ProjectionInputs {
    /// Inputs with one concurrent study per organisation
    pub fn new(
        scenario: impl Into<String>,
        study_duration_months: f64,
        cost_per_study: f64,
        impact_per_study: f64,
        fixed_cost: f64,
        num_orgs: u32,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            study_duration_months,
            cost_per_study,
            impact_per_study,
            fixed_cost,
            num_orgs,
            concurrent_studies_per_org: 1,
        }
    }

    pub fn with_concurrent_studies(mut self, concurrent: u32) -> Self {
        self.concurrent_studies_per_org = concurrent;
        self
    }

    /// Lazily generate the fifty yearly rows
    pub fn rows(&self) -> ProjectionRows<'_> {
        ProjectionRows {
            inputs: self,
            next_year: 1,
        }
    }

    /// Studies each organisation completes by the end of `year`
    pub fn studies_per_org(&self, year: u32) -> u64 {
        if self.study_duration_months <= 0.0 || !self.study_duration_months.is_finite() {
            return 0;
        }
        let total_months = f64::from(year) * f64::from(MONTHS_PER_YEAR);
        let studies =
            (total_months * f64::from(self.concurrent_studies_per_org) / self.study_duration_months)
                .floor();
        studies as u64
    }

    /// Compute a single projection year
    pub fn row(&self, year: u32) -> ProjectionRow {
        let studies_per_org = self.studies_per_org(year);
        let studies = studies_per_org as f64 * f64::from(self.num_orgs);

        let variable_cost = self.cost_per_study * studies;
        let total_cost = variable_cost + self.fixed_cost;
        let impact = self.impact_per_study * studies;

        ProjectionRow {
            scenario: self.scenario.clone(),
            year,
            studies_per_org,
            fixed_cost: self.fixed_cost,
            variable_cost,
            total_cost,
            impact,
            impact_per_dollar_variable: guarded_ratio(impact, variable_cost),
            impact_per_dollar_total: guarded_ratio(impact, total_cost),
        }
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// One projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub scenario: String,

    /// 1..=50
    pub year: u32,

    /// Cumulative studies completed per organisation
    pub studies_per_org: u64,

    pub fixed_cost: f64,
    pub variable_cost: f64,
    pub total_cost: f64,
    pub impact: f64,

    /// `impact / variable_cost` (0 when there is no variable cost)
    pub impact_per_dollar_variable: f64,

    /// `impact / total_cost` (0 when there is no cost at all)
    pub impact_per_dollar_total: f64,
}

/// Iterator over the fifty projection years
///
/// Cloning the iterator, or calling [`ProjectionInputs::rows`] again,
/// restarts the sequence.
#[derive(Debug, Clone)]
pub struct ProjectionRows<'a> {
    inputs: &'a ProjectionInputs,
    next_year: u32,
}

impl Iterator for ProjectionRows<'_> {
    type Item = ProjectionRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_year > PROJECTION_YEARS {
            return None;
        }
        let row = self.inputs.row(self.next_year);
        self.next_year += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (PROJECTION_YEARS + 1).saturating_sub(self.next_year) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProjectionRows<'_> {}

impl FusedIterator for ProjectionRows<'_> {}

/// Project one scenario over fifty years
///
/// # Example
/// ```
/// use scenario_roi_core::projection::{project, ProjectionInputs};
///
/// let inputs = ProjectionInputs::new("X", 6.0, 1000.0, 5000.0, 20_000.0, 2);
/// let rows = project(&inputs);
/// assert_eq!(rows.len(), 50);
///
/// let first = &rows[0];
/// assert_eq!(first.studies_per_org, 2);
/// assert_eq!(first.variable_cost, 4000.0);
/// assert_eq!(first.total_cost, 24_000.0);
/// assert_eq!(first.impact, 20_000.0);
/// assert_eq!(first.impact_per_dollar_variable, 5.0);
/// ```
pub fn project(inputs: &ProjectionInputs) -> Vec<ProjectionRow> {
    inputs.rows().collect()
}
