//! Projection engine
//!
//! Simulates fifty years of study throughput for one scenario. Each year is
//! computed independently from cumulative elapsed time, so the sequence is
//! deterministic and restartable.
//!
//! ```text
//! For each year y in 1..=50:
//! 1. total_months    = 12 * y
//! 2. studies_per_org = floor(total_months * concurrent / duration_months)   (0 if duration <= 0)
//! 3. variable_cost   = cost_per_study * studies_per_org * num_orgs
//! 4. total_cost      = variable_cost + fixed_cost
//! 5. impact          = impact_per_study * studies_per_org * num_orgs
//! 6. roi_variable    = impact / variable_cost                              (0 if cost <= 0)
//! 7. roi_total       = impact / total_cost                                 (0 if cost <= 0)
//! ```

mod engine;

pub use engine::{project, ProjectionInputs, ProjectionRow, ProjectionRows};
