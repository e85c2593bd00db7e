//! Scenario comparison
//!
//! Lines up the grouped tables of several scenarios row by row and computes
//! what each candidate saves relative to the baseline. The first column is
//! always the baseline (typically a business-as-usual scenario).
//!
//! Savings sign convention: `saved = baseline - candidate`, so a positive
//! value means the candidate takes less time or costs less.

use crate::aggregate::{RoleTable, Series, StageCostTable, StageTable};
use serde::{Deserialize, Serialize};

/// Label of the appended totals row
pub const TOTAL_LABEL: &str = "TOTAL";

/// One row of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Stage label, role name, or [`TOTAL_LABEL`]
    pub label: String,

    /// One value per scenario, baseline first
    pub values: Vec<f64>,

    /// One saving per candidate: `values[0] - values[i + 1]`
    pub saved: Vec<f64>,
}

impl ComparisonRow {
    fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        let baseline = values.first().copied().unwrap_or(0.0);
        let saved = values.iter().skip(1).map(|value| baseline - value).collect();
        Self {
            label: label.into(),
            values,
            saved,
        }
    }
}

/// Row-aligned comparison of two or more scenarios
///
/// # Example
///
/// ```rust
/// use scenario_roi_core::{compare_stages, person_hours_by_stage, ActivityStep, Stage};
///
/// let bau = [ActivityStep::new(Stage::Reporting, "Report")
///     .with_duration(4.0)
///     .with_allocation("Researcher", 100.0)];
/// let tool = [ActivityStep::new(Stage::Reporting, "Report")
///     .with_duration(1.0)
///     .with_allocation("Researcher", 100.0)];
///
/// let table = compare_stages(
///     "BAU 1",
///     &person_hours_by_stage(&bau),
///     "Proposed Tool",
///     &person_hours_by_stage(&tool),
/// );
///
/// assert_eq!(table.rows.len(), 8);
/// assert_eq!(table.saved("Reporting"), Some(120.0));
/// assert_eq!(table.total.values, vec![160.0, 40.0]);
/// assert_eq!(table.total.saved, vec![120.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Header of the key column ("Stage", "Role", ...)
    pub key_header: String,

    /// Scenario names, baseline first
    pub scenarios: Vec<String>,

    /// One row per key, in baseline order followed by keys only candidates have
    pub rows: Vec<ComparisonRow>,

    /// Column sums of every numeric column
    pub total: ComparisonRow,
}

impl ComparisonTable {
    /// Compare any number of scenario series; the first one is the baseline
    pub fn build(key_header: impl Into<String>, columns: &[(&str, &dyn Series)]) -> Self {
        let series: Vec<Vec<(String, f64)>> =
            columns.iter().map(|(_, table)| table.series()).collect();

        let mut labels: Vec<&str> = Vec::new();
        for rows in &series {
            for (label, _) in rows {
                if !labels.contains(&label.as_str()) {
                    labels.push(label);
                }
            }
        }

        let rows: Vec<ComparisonRow> = labels
            .iter()
            .map(|label| {
                let values: Vec<f64> = series
                    .iter()
                    .map(|rows| {
                        rows.iter()
                            .filter(|(candidate, _)| candidate.as_str() == *label)
                            .map(|(_, value)| value)
                            .sum::<f64>()
                    })
                    .collect();
                ComparisonRow::new(*label, values)
            })
            .collect();

        let totals: Vec<f64> = (0..columns.len())
            .map(|column| rows.iter().map(|row| row.values[column]).sum::<f64>())
            .collect();

        Self {
            key_header: key_header.into(),
            scenarios: columns.iter().map(|(name, _)| name.to_string()).collect(),
            rows,
            total: ComparisonRow::new(TOTAL_LABEL, totals),
        }
    }

    /// Row by label (the totals row included)
    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        if label == TOTAL_LABEL {
            return Some(&self.total);
        }
        self.rows.iter().find(|row| row.label == label)
    }

    /// Saving of the first candidate for a row
    pub fn saved(&self, label: &str) -> Option<f64> {
        self.row(label).and_then(|row| row.saved.first().copied())
    }

    /// Rows followed by the totals row
    pub fn rows_with_total(&self) -> impl Iterator<Item = &ComparisonRow> + '_ {
        self.rows.iter().chain(std::iter::once(&self.total))
    }
}

/// Compare two stage tables (hours, weeks or dollars)
pub fn compare_stages(
    baseline_name: &str,
    baseline: &StageTable,
    candidate_name: &str,
    candidate: &StageTable,
) -> ComparisonTable {
    ComparisonTable::build(
        "Stage",
        &[
            (baseline_name, baseline as &dyn Series),
            (candidate_name, candidate as &dyn Series),
        ],
    )
}

/// Compare two role tables
pub fn compare_roles(
    baseline_name: &str,
    baseline: &RoleTable,
    candidate_name: &str,
    candidate: &RoleTable,
) -> ComparisonTable {
    ComparisonTable::build(
        "Role",
        &[
            (baseline_name, baseline as &dyn Series),
            (candidate_name, candidate as &dyn Series),
        ],
    )
}

/// Compare two stage cost tables, infrastructure line included
pub fn compare_costs(
    baseline_name: &str,
    baseline: &StageCostTable,
    candidate_name: &str,
    candidate: &StageCostTable,
) -> ComparisonTable {
    ComparisonTable::build(
        "Stage",
        &[
            (baseline_name, baseline as &dyn Series),
            (candidate_name, candidate as &dyn Series),
        ],
    )
}
