//! Scenario ROI Core - Rust Engine
//!
//! Workflow time, cost and return-on-investment analysis for comparing
//! operational scenarios ("BAU" vs. "Proposed Tool").
//!
//! # Architecture
//!
//! - **core**: Stage taxonomy, unit constants, identity and hashing
//! - **models**: Domain types (PersonnelRole, ActivityStep, Scenario, Workflow)
//! - **ingest**: Boundary conversion of loosely typed records
//! - **aggregate**: Person-hours, calendar durations and costs
//! - **impact**: Dollar impact per completed study
//! - **projection**: Fifty-year cost/impact projection
//! - **compare**: Cross-scenario savings tables
//! - **copier**: Scenario bootstrapping by deep copy
//! - **pipeline**: One-call analysis over a workflow snapshot
//! - **export**: Delimited-text tables
//!
//! # Critical Invariants
//!
//! 1. Engine functions are pure: inputs are borrowed, outputs are fresh
//! 2. Sparse or malformed input never fails aggregation; it yields zeros
//! 3. Every ratio with a non-positive denominator is 0
//! 4. FFI boundary is minimal and validates its inputs

// Module declarations
pub mod aggregate;
pub mod compare;
pub mod config;
pub mod copier;
pub mod core;
pub mod export;
pub mod impact;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod projection;

// Re-exports for convenience
pub use aggregate::{
    cost_by_role, cost_by_stage, cost_by_stage_with_infrastructure, hourly_rate,
    infrastructure_cost, person_hours_by_role, person_hours_by_stage, personnel_cost,
    stage_calendar_duration, total_cost, RoleTable, ScenarioAggregate, Series, StageCostTable,
    StageTable,
};
pub use compare::{compare_costs, compare_roles, compare_stages, ComparisonRow, ComparisonTable};
pub use config::{AnalysisConfig, ConfigError, InfrastructureBasis};
pub use copier::{copy_scenario, CopyOutcome};
pub use crate::core::{Stage, UnknownStage};
pub use export::{Cell, ExportError, Table};
pub use impact::{impact_per_study, per_student_improvement};
pub use ingest::{ingest_workflow, parse_workflow, IngestError, IngestIssue, IngestReport};
pub use models::{
    ActivityStep, Assumption, InfrastructureCostItem, PersonnelRole, RoiParameters, Scenario,
    Workflow, WorkflowError,
};
pub use pipeline::{run_analysis, AnalysisError, AnalysisReport, ScenarioSummary};
pub use projection::{project, ProjectionInputs, ProjectionRow};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn scenario_roi_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::analyze, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::project, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::default_workflow, m)?)?;
    m.add_class::<ffi::workflow::PyWorkflow>()?;
    Ok(())
}
