//! Python bindings
//!
//! Exposes the analysis pipeline to Python so the dashboard can call the
//! engine directly. Everything crosses the boundary as JSON text in the raw
//! record schema; malformed input raises `ValueError`.

pub mod types;
pub mod workflow;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::ingest::{parse_workflow, RawWorkflow};
use crate::models::Workflow;
use crate::pipeline::run_analysis;
use crate::projection::project as project_rows;
use types::{parse_config, parse_projection_inputs, report_to_json, value_error};

/// Run the full analysis over a workflow in the raw record schema
///
/// # Example (from Python)
///
/// ```python
/// from scenario_roi_core import analyze, default_workflow
///
/// result = json.loads(analyze(default_workflow()))
/// print(result["report"]["baseline"], len(result["ingest"]["issues"]))
/// ```
///
/// # Errors
///
/// Raises ValueError for malformed JSON, unknown stages, an invalid config or
/// an unknown baseline scenario.
#[pyfunction]
#[pyo3(signature = (workflow_json, config_json=None))]
pub fn analyze(workflow_json: &str, config_json: Option<&str>) -> PyResult<String> {
    let (workflow, ingest) = parse_workflow(workflow_json).map_err(value_error)?;
    let config = parse_config(config_json)?;
    let report = run_analysis(&workflow, &config).map_err(value_error)?;
    report_to_json(&report, &ingest)
}

/// Fifty-year projection for one scenario, as a JSON array of rows
///
/// Accepts a dict with `scenario`, `study_duration_months`,
/// `cost_per_study`, `impact_per_study`, and optionally `fixed_cost`,
/// `num_orgs` and `concurrent_studies_per_org`.
#[pyfunction]
pub fn project(inputs: &Bound<'_, PyDict>) -> PyResult<String> {
    let inputs = parse_projection_inputs(inputs)?;
    serde_json::to_string(&project_rows(&inputs)).map_err(value_error)
}

/// The default starting workflow in the raw record schema
#[pyfunction]
pub fn default_workflow() -> PyResult<String> {
    serde_json::to_string_pretty(&RawWorkflow::from(&Workflow::with_defaults()))
        .map_err(value_error)
}
