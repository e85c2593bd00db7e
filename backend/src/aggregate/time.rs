//! Time aggregation
//!
//! Two different notions of time come out of the same steps:
//!
//! - **Person-hours**: effort. Every (step, role) pair contributes
//!   `duration_weeks * percent / 100 * 40`, and contributions of several roles
//!   on one step add up because they work in parallel.
//! - **Calendar duration**: elapsed weeks per stage, independent of how many
//!   people work on it.

use crate::aggregate::tables::{RoleTable, StageTable};
use crate::core::units::person_hours;
use crate::core::Stage;
use crate::models::ActivityStep;
use std::collections::BTreeMap;

/// Person-hours per stage
///
/// # Example
/// ```
/// use scenario_roi_core::{person_hours_by_stage, ActivityStep, Series, Stage};
///
/// let step = ActivityStep::new(Stage::DataCollection, "Collect")
///     .with_duration(4.0)
///     .with_allocation("Engineer", 50.0)
///     .with_allocation("Researcher", 25.0);
///
/// let hours = person_hours_by_stage([&step]);
/// assert_eq!(hours.get(Stage::DataCollection), 120.0);
/// assert_eq!(hours.total(), 120.0);
/// ```
pub fn person_hours_by_stage<'a, I>(steps: I) -> StageTable
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    let mut table = StageTable::zeroed();
    for step in steps {
        for percent in step.role_allocation().values() {
            table.add(step.stage(), person_hours(step.duration_weeks(), *percent));
        }
    }
    table
}

/// Person-hours per role, across all stages
pub fn person_hours_by_role<'a, I>(steps: I) -> RoleTable
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    let mut table = RoleTable::new();
    for step in steps {
        for (role, percent) in step.role_allocation() {
            table.add(role, person_hours(step.duration_weeks(), *percent));
        }
    }
    table
}

/// Elapsed weeks per stage
///
/// Within a stage, steps with identical description text are the same step
/// listed more than once, so only the longest of them counts. The distinct
/// steps of a stage are then summed.
///
/// # Example
/// ```
/// use scenario_roi_core::{stage_calendar_duration, ActivityStep, Stage};
///
/// let steps = [
///     ActivityStep::new(Stage::Reporting, "Write report").with_duration(3.0),
///     ActivityStep::new(Stage::Reporting, "Write report").with_duration(5.0),
///     ActivityStep::new(Stage::Reporting, "Present").with_duration(1.0),
/// ];
///
/// let weeks = stage_calendar_duration(&steps);
/// assert_eq!(weeks.get(Stage::Reporting), 6.0);
/// assert_eq!(weeks.get(Stage::DataCleaning), 0.0);
/// ```
pub fn stage_calendar_duration<'a, I>(steps: I) -> StageTable
where
    I: IntoIterator<Item = &'a ActivityStep>,
{
    let mut longest: BTreeMap<Stage, BTreeMap<&'a str, f64>> = BTreeMap::new();
    for step in steps {
        let entry = longest
            .entry(step.stage())
            .or_default()
            .entry(step.step_description())
            .or_insert(0.0);
        *entry = entry.max(step.duration_weeks());
    }

    let mut table = StageTable::zeroed();
    for (stage, distinct_steps) in longest {
        for weeks in distinct_steps.values() {
            table.add(stage, *weeks);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tables::Series;

    fn step(stage: Stage, text: &str, weeks: f64, roles: &[(&str, f64)]) -> ActivityStep {
        roles.iter().fold(
            ActivityStep::new(stage, text).with_duration(weeks),
            |step, (role, percent)| step.with_allocation(*role, *percent),
        )
    }

    #[test]
    fn test_empty_input_is_zero_filled() {
        let none: [ActivityStep; 0] = [];
        let hours = person_hours_by_stage(&none);
        assert_eq!(hours.iter().count(), Stage::ALL.len());
        assert_eq!(hours.total(), 0.0);
        assert!(person_hours_by_role(&none).is_empty());
        assert_eq!(stage_calendar_duration(&none).total(), 0.0);
    }

    #[test]
    fn test_roles_on_one_step_are_summed() {
        let steps = [step(
            Stage::DataCollection,
            "Collect",
            4.0,
            &[("Engineer", 50.0), ("Researcher", 25.0)],
        )];

        let by_role = person_hours_by_role(&steps);
        assert_eq!(by_role.get("Engineer"), 80.0);
        assert_eq!(by_role.get("Researcher"), 40.0);
        assert_eq!(person_hours_by_stage(&steps).get(Stage::DataCollection), 120.0);
    }

    #[test]
    fn test_role_hours_accumulate_across_stages() {
        let steps = [
            step(Stage::DataCleaning, "Clean", 1.0, &[("Engineer", 100.0)]),
            step(Stage::Reporting, "Report", 2.0, &[("Engineer", 50.0)]),
        ];
        assert_eq!(person_hours_by_role(&steps).get("Engineer"), 80.0);
    }

    #[test]
    fn test_calendar_duration_ignores_staffing() {
        let steps = [step(
            Stage::StudyImplementation,
            "Run the study",
            6.0,
            &[("Engineer", 100.0), ("Researcher", 100.0), ("Project Manager", 100.0)],
        )];
        assert_eq!(
            stage_calendar_duration(&steps).get(Stage::StudyImplementation),
            6.0
        );
    }

    #[test]
    fn test_same_text_in_different_stages_not_collapsed() {
        let steps = [
            step(Stage::DataCleaning, "Review", 2.0, &[]),
            step(Stage::Reporting, "Review", 3.0, &[]),
        ];
        let weeks = stage_calendar_duration(&steps);
        assert_eq!(weeks.get(Stage::DataCleaning), 2.0);
        assert_eq!(weeks.get(Stage::Reporting), 3.0);
    }

    #[test]
    fn test_zero_duration_contributes_nothing() {
        let steps = [step(Stage::Reporting, "Report", 0.0, &[("Engineer", 100.0)])];
        assert_eq!(person_hours_by_stage(&steps).total(), 0.0);
        assert_eq!(person_hours_by_role(&steps).get("Engineer"), 0.0);
    }
}
