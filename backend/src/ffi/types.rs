//! Conversion helpers between Python values and engine types

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde_json::json;
use std::fmt::Display;

use crate::config::AnalysisConfig;
use crate::ingest::IngestReport;
use crate::pipeline::AnalysisReport;
use crate::projection::ProjectionInputs;

/// Wrap any displayable error as a Python `ValueError`
pub fn value_error(err: impl Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Extract a required field from a Python dict.
///
/// # Errors
/// Returns PyValueError if the field is missing or has the wrong type.
fn extract_required<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field, falling back to `default` when missing or None.
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => value.extract(),
        _ => Ok(default),
    }
}

/// Parse an optional JSON config (None → defaults)
pub fn parse_config(json: Option<&str>) -> PyResult<AnalysisConfig> {
    match json {
        Some(json) => AnalysisConfig::from_json_str(json).map_err(value_error),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Build projection inputs from a Python dict
///
/// # Errors
/// Returns PyValueError if a required field is missing, a monetary value is
/// negative or not finite, or a count is zero.
pub fn parse_projection_inputs(dict: &Bound<'_, PyDict>) -> PyResult<ProjectionInputs> {
    let scenario: String = extract_required(dict, "scenario")?;
    let months: f64 = extract_required(dict, "study_duration_months")?;
    let cost_per_study: f64 = extract_required(dict, "cost_per_study")?;
    let impact_per_study: f64 = extract_required(dict, "impact_per_study")?;
    let fixed_cost: f64 = extract_with_default(dict, "fixed_cost", 0.0)?;
    let num_orgs: u32 = extract_with_default(dict, "num_orgs", 1)?;
    let concurrent: u32 = extract_with_default(dict, "concurrent_studies_per_org", 1)?;

    for (field, value) in [
        ("study_duration_months", months),
        ("cost_per_study", cost_per_study),
        ("impact_per_study", impact_per_study),
        ("fixed_cost", fixed_cost),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(PyValueError::new_err(format!(
                "'{}' must be a non-negative number, got {}",
                field, value
            )));
        }
    }
    if num_orgs == 0 || concurrent == 0 {
        return Err(PyValueError::new_err(
            "num_orgs and concurrent_studies_per_org must be at least 1",
        ));
    }

    Ok(ProjectionInputs::new(
        scenario,
        months,
        cost_per_study,
        impact_per_study,
        fixed_cost,
        num_orgs,
    )
    .with_concurrent_studies(concurrent))
}

/// Serialise an analysis result together with the ingestion report
pub fn report_to_json(report: &AnalysisReport, ingest: &IngestReport) -> PyResult<String> {
    serde_json::to_string(&json!({
        "report": report,
        "ingest": ingest,
    }))
    .map_err(value_error)
}
