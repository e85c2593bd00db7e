//! Table builders for every engine output

use super::{Cell, Table};
use crate::aggregate::{RoleTable, Series, StageCostTable, StageTable};
use crate::compare::{ComparisonTable, TOTAL_LABEL};
use crate::core::units::person_hours;
use crate::models::{Assumption, InfrastructureCostItem, PersonnelRole, Scenario};
use crate::pipeline::AnalysisReport;
use crate::projection::ProjectionRow;

/// Unit of the values in a grouped table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Person-hours or calendar weeks
    Hours,
    /// Dollars
    Currency,
}

impl Measure {
    fn cell(self, value: f64) -> Cell {
        match self {
            Measure::Hours => Cell::Hours(value),
            Measure::Currency => Cell::Currency(value),
        }
    }
}

/// `[key, value]` rows of a series followed by a TOTAL row
fn series_table(key: &str, value: &str, series: &dyn Series, measure: Measure) -> Table {
    let mut table = Table::new([key, value]);
    let rows = series.series();
    let total: f64 = rows.iter().map(|(_, value)| value).sum();
    for (label, value) in rows {
        table.push_row(vec![Cell::Text(label), measure.cell(value)]);
    }
    table.push_row(vec![Cell::text(TOTAL_LABEL), measure.cell(total)]);
    table
}

pub fn stage_hours_table(hours: &StageTable) -> Table {
    series_table("Stage", "Person-Hours", hours, Measure::Hours)
}

pub fn role_hours_table(hours: &RoleTable) -> Table {
    series_table("Role", "Person-Hours", hours, Measure::Hours)
}

pub fn stage_duration_table(weeks: &StageTable) -> Table {
    series_table("Stage", "Weeks", weeks, Measure::Hours)
}

/// Stage costs, with the infrastructure line when the table carries one
pub fn stage_cost_table(costs: &StageCostTable) -> Table {
    series_table("Stage", "Cost", costs, Measure::Currency)
}

pub fn role_cost_table(costs: &RoleTable) -> Table {
    series_table("Role", "Cost", costs, Measure::Currency)
}

/// `[key, scenario..., Saved vs candidate...]` plus the TOTAL row
///
/// # Example
/// ```
/// use scenario_roi_core::export::{comparison_table, Measure};
/// use scenario_roi_core::{compare_stages, StageTable, Stage};
///
/// let mut bau = StageTable::zeroed();
/// bau.add(Stage::Reporting, 10.0);
/// let tool = StageTable::zeroed();
///
/// let table = comparison_table(&compare_stages("BAU", &bau, "Tool", &tool), Measure::Hours);
/// assert_eq!(table.header(), ["Stage", "BAU", "Tool", "Saved vs Tool"]);
/// assert_eq!(table.rows().len(), 9);
/// ```
pub fn comparison_table(comparison: &ComparisonTable, measure: Measure) -> Table {
    let mut header = vec![comparison.key_header.clone()];
    header.extend(comparison.scenarios.iter().cloned());
    header.extend(
        comparison
            .scenarios
            .iter()
            .skip(1)
            .map(|name| format!("Saved vs {}", name)),
    );

    let mut table = Table::new(header);
    for row in comparison.rows_with_total() {
        let mut cells = vec![Cell::text(row.label.as_str())];
        cells.extend(row.values.iter().map(|value| measure.cell(*value)));
        cells.extend(row.saved.iter().map(|value| measure.cell(*value)));
        table.push_row(cells);
    }
    table
}

/// Projection rows of one or more scenarios
pub fn projection_table<'a, I>(rows: I) -> Table
where
    I: IntoIterator<Item = &'a ProjectionRow>,
{
    let mut table = Table::new([
        "Scenario",
        "Year",
        "StudiesPerOrg",
        "FixedCost",
        "VariableCost",
        "TotalCost",
        "Impact",
        "ImpactPerDollarVariable",
        "ImpactPerDollarTotal",
    ]);
    for row in rows {
        table.push_row(vec![
            Cell::text(row.scenario.as_str()),
            Cell::Count(u64::from(row.year)),
            Cell::Count(row.studies_per_org),
            Cell::Currency(row.fixed_cost),
            Cell::Currency(row.variable_cost),
            Cell::Currency(row.total_cost),
            Cell::Currency(row.impact),
            Cell::Ratio(row.impact_per_dollar_variable),
            Cell::Ratio(row.impact_per_dollar_total),
        ]);
    }
    table
}

pub fn roles_table(roles: &[PersonnelRole]) -> Table {
    let mut table = Table::new(["Role", "Hourly Rate", "Notes"]);
    for role in roles {
        table.push_row(vec![
            Cell::text(role.name()),
            Cell::Currency(role.hourly_rate()),
            Cell::text(role.notes()),
        ]);
    }
    table
}

/// One row per item, one amount column per scenario
pub fn infrastructure_table(items: &[InfrastructureCostItem], scenarios: &[&str]) -> Table {
    let mut header = vec!["Category".to_string()];
    header.extend(scenarios.iter().map(|name| name.to_string()));
    header.push("Notes".to_string());

    let mut table = Table::new(header);
    for item in items {
        let mut cells = vec![Cell::text(item.category())];
        cells.extend(
            scenarios
                .iter()
                .map(|scenario| Cell::Currency(item.cost_for(scenario))),
        );
        cells.push(Cell::text(item.notes()));
        table.push_row(cells);
    }
    table
}

/// Total infrastructure amount per scenario
pub fn infrastructure_summary_table(items: &[InfrastructureCostItem], scenarios: &[&str]) -> Table {
    let mut table = Table::new(["Scenario", "Total Infrastructure Cost"]);
    for scenario in scenarios {
        let total: f64 = items.iter().map(|item| item.cost_for(scenario)).sum();
        table.push_row(vec![Cell::text(*scenario), Cell::Currency(total)]);
    }
    table
}

pub fn assumptions_table(assumptions: &[Assumption]) -> Table {
    let mut table = Table::new(["Assumption"]);
    for assumption in assumptions {
        table.push_row(vec![Cell::text(assumption.text())]);
    }
    table
}

/// Consolidated view of a scenario: one row per (step, role) allocation
///
/// Every allocation entry gets a row, 0% included, so a step with three
/// roles shows up three times with the same step text.
pub fn activity_preview_table(scenario: &Scenario, roles: &[PersonnelRole]) -> Table {
    let mut table = Table::new([
        "Stage",
        "Step",
        "Role",
        "Duration (weeks)",
        "% Active",
        "Person-Hours",
        "Hourly Rate",
        "Cost",
        "Notes",
    ]);
    for step in scenario.steps() {
        for (role, percent) in step.role_allocation() {
            let rate = roles
                .iter()
                .find(|candidate| candidate.name() == role)
                .map(PersonnelRole::hourly_rate)
                .unwrap_or(0.0);
            let hours = person_hours(step.duration_weeks(), *percent);
            table.push_row(vec![
                Cell::text(step.stage().label()),
                Cell::text(step.step_description()),
                Cell::text(role.as_str()),
                Cell::Hours(step.duration_weeks()),
                Cell::Hours(*percent),
                Cell::Hours(hours),
                Cell::Currency(rate),
                Cell::Currency(hours * rate),
                Cell::text(step.notes()),
            ]);
        }
    }
    table
}

/// One row per scenario with its totals and projection inputs
pub fn summary_table(report: &AnalysisReport) -> Table {
    let mut table = Table::new([
        "Scenario",
        "Person-Hours",
        "Calendar Weeks",
        "Personnel Cost",
        "Infrastructure Cost",
        "Total Cost",
        "Study Months",
        "Cost per Study",
        "Impact per Study",
        "Fixed Cost",
        "Organisations",
    ]);
    for summary in &report.scenarios {
        let aggregate = &summary.aggregate;
        let inputs = &summary.projection_inputs;
        table.push_row(vec![
            Cell::text(aggregate.scenario.as_str()),
            Cell::Hours(aggregate.person_hours),
            Cell::Hours(aggregate.calendar_weeks),
            Cell::Currency(aggregate.personnel_cost),
            Cell::Currency(aggregate.infrastructure_cost),
            Cell::Currency(aggregate.total_cost),
            Cell::Hours(inputs.study_duration_months),
            Cell::Currency(inputs.cost_per_study),
            Cell::Currency(inputs.impact_per_study),
            Cell::Currency(inputs.fixed_cost),
            Cell::Count(u64::from(inputs.num_orgs)),
        ]);
    }
    table
}
