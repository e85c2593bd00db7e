//! PyO3 wrapper for Workflow

use pyo3::prelude::*;

use super::types::{parse_config, report_to_json, value_error};
use crate::ingest::{parse_workflow, IngestReport, RawWorkflow};
use crate::models::{PersonnelRole, Workflow as RustWorkflow};
use crate::pipeline::run_analysis;

/// Python handle on a workflow snapshot
///
/// # Example (from Python)
///
/// ```python
/// from scenario_roi_core import Workflow
///
/// wf = Workflow()                      # dashboard defaults
/// wf.add_role("Analyst", 40.0)
/// copied = wf.copy_scenario("BAU 1", "Proposed Tool")
/// report = json.loads(wf.analyze())
/// ```
#[pyclass(name = "Workflow")]
pub struct PyWorkflow {
    inner: RustWorkflow,
    ingest: IngestReport,
}

#[pymethods]
impl PyWorkflow {
    /// Load a workflow from raw-schema JSON, or start from the defaults
    ///
    /// # Errors
    ///
    /// Raises ValueError for malformed JSON or unknown stages.
    #[new]
    #[pyo3(signature = (workflow_json=None))]
    fn new(workflow_json: Option<&str>) -> PyResult<Self> {
        match workflow_json {
            Some(json) => {
                let (inner, ingest) = parse_workflow(json).map_err(value_error)?;
                Ok(Self { inner, ingest })
            }
            None => Ok(Self {
                inner: RustWorkflow::with_defaults(),
                ingest: IngestReport::default(),
            }),
        }
    }

    fn add_role(&mut self, name: &str, hourly_rate: f64) -> PyResult<()> {
        self.inner
            .add_role(PersonnelRole::new(name, hourly_rate))
            .map_err(value_error)
    }

    /// Remove a role; returns False when it did not exist
    fn remove_role(&mut self, name: &str) -> bool {
        self.inner.remove_role(name).is_some()
    }

    fn role_names(&self) -> Vec<String> {
        self.inner
            .role_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn scenario_names(&self) -> Vec<String> {
        self.inner
            .scenario_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Copy one scenario's steps into another
    ///
    /// Returns the number of steps copied, or None when the source was empty.
    fn copy_scenario(&mut self, source: &str, target: &str) -> Option<usize> {
        self.inner.copy_scenario(source, target)
    }

    /// Run the pipeline and return the JSON report
    #[pyo3(signature = (config_json=None))]
    fn analyze(&self, config_json: Option<&str>) -> PyResult<String> {
        let config = parse_config(config_json)?;
        let report = run_analysis(&self.inner, &config).map_err(value_error)?;
        report_to_json(&report, &self.ingest)
    }

    /// Current state in the raw record schema
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string_pretty(&RawWorkflow::from(&self.inner)).map_err(value_error)
    }
}
