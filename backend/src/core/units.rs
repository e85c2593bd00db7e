//! Unit conversion constants
//!
//! All effort is expressed in person-hours using a fixed 40-hour week.
//! Calendar durations are captured in weeks and converted to months only
//! when feeding the projection engine.

/// Working hours in one person-week
pub const HOURS_PER_WEEK: f64 = 40.0;

/// Weeks in one calendar year (used for weeks → months conversion)
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Months in one calendar year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Number of years covered by every projection
pub const PROJECTION_YEARS: u32 = 50;

/// Convert a percentage of active time into person-hours
///
/// `duration_weeks * percent / 100 * 40`
///
/// # Example
/// ```
/// use scenario_roi_core::core::units::person_hours;
///
/// assert_eq!(person_hours(4.0, 50.0), 80.0);
/// ```
pub fn person_hours(duration_weeks: f64, percent_active: f64) -> f64 {
    duration_weeks * percent_active / 100.0 * HOURS_PER_WEEK
}

/// Convert calendar weeks into calendar months
///
/// # Example
/// ```
/// use scenario_roi_core::core::units::weeks_to_months;
///
/// assert_eq!(weeks_to_months(52.0), 12.0);
/// ```
pub fn weeks_to_months(weeks: f64) -> f64 {
    weeks * f64::from(MONTHS_PER_YEAR) / WEEKS_PER_YEAR
}
