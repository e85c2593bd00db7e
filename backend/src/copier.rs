//! Scenario copier
//!
//! Bootstraps one scenario from another: every step of every recorded stage
//! is duplicated under a fresh identity, and the target's previous content is
//! discarded. Copying from a scenario with no recorded stages is a no-op that
//! reports a warning instead of wiping the target.

use crate::models::scenario::Scenario;

/// Result of a copy request
#[derive(Debug, Clone, PartialEq)]
pub enum CopyOutcome {
    /// The target as it looks after the copy
    Copied(Scenario),

    /// The source had no recorded stages; nothing was changed
    SourceEmpty {
        /// Name of the empty source scenario
        source: String,
    },
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

/// Copy `source`'s steps into a new version of `target`
///
/// The returned scenario keeps `target`'s name and holds, for every stage
/// recorded in `source`, duplicates of its steps: same description, notes,
/// duration and allocation values, but new ids and an allocation map of
/// their own. Neither input is modified.
///
/// # Example
///
/// ```rust
/// use scenario_roi_core::{copy_scenario, ActivityStep, CopyOutcome, Scenario, Stage};
///
/// let mut bau = Scenario::new("BAU 1");
/// bau.push_step(ActivityStep::new(Stage::Reporting, "Write report").with_duration(3.0));
///
/// match copy_scenario(&bau, &Scenario::new("Proposed Tool")) {
///     CopyOutcome::Copied(tool) => {
///         assert_eq!(tool.name(), "Proposed Tool");
///         assert_eq!(tool.stage_steps(Stage::Reporting)[0].duration_weeks(), 3.0);
///     }
///     CopyOutcome::SourceEmpty { .. } => unreachable!(),
/// }
/// ```
pub fn copy_scenario(source: &Scenario, target: &Scenario) -> CopyOutcome {
    if !source.has_recorded_stages() {
        tracing::warn!(
            source = source.name(),
            target = target.name(),
            "No data found in source scenario; nothing copied"
        );
        return CopyOutcome::SourceEmpty {
            source: source.name().to_string(),
        };
    }

    let mut copied = Scenario::new(target.name());
    for stage in source.recorded_stages() {
        let steps = source
            .stage_steps(stage)
            .iter()
            .map(|step| step.duplicate())
            .collect();
        copied.replace_stage(stage, steps);
    }

    tracing::debug!(
        source = source.name(),
        target = target.name(),
        steps = copied.step_count(),
        "Copied scenario"
    );

    CopyOutcome::Copied(copied)
}
