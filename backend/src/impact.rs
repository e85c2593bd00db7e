//! Impact model
//!
//! Turns the workflow's ROI parameters into a dollar value per completed
//! study:
//!
//! ```text
//! per_student_improvement = learning_effect_sd * economic_value_per_sd
//! impact_per_study        = discovery_rate_pct / 100 * per_student_improvement * total_reach
//! ```
//!
//! The value does not depend on the scenario: how a study was run is assumed
//! not to change what it discovers.

use crate::models::RoiParameters;

/// Long-term economic gain per student from one study's effect, in dollars
pub fn per_student_improvement(params: &RoiParameters) -> f64 {
    params.learning_effect_sd * params.economic_value_per_sd
}

/// Expected dollar impact of one completed study
///
/// # Example
/// ```
/// use scenario_roi_core::{impact_per_study, RoiParameters};
///
/// let params = RoiParameters {
///     learning_effect_sd: 0.12,
///     economic_value_per_sd: 2400.0,
///     discovery_rate_pct: 50.0,
///     total_reach: 1000,
///     ..Default::default()
/// };
///
/// let impact = impact_per_study(&params);
/// assert!((impact - 144_000.0).abs() < 1e-6);
/// ```
pub fn impact_per_study(params: &RoiParameters) -> f64 {
    params.discovery_rate_pct / 100.0 * per_student_improvement(params) * params.total_reach as f64
}
