//! Numeric coercion for loosely typed input fields

use super::{IngestIssue, IngestReport};
use serde_json::Value;

/// Read a finite number from a JSON value
///
/// Numbers and numeric strings are accepted; everything else is `None`.
///
/// # Example
/// ```
/// use scenario_roi_core::ingest::number;
/// use serde_json::json;
///
/// assert_eq!(number(&json!(4.5)), Some(4.5));
/// assert_eq!(number(&json!(" 12 ")), Some(12.0));
/// assert_eq!(number(&json!("n/a")), None);
/// assert_eq!(number(&json!(null)), None);
/// ```
pub fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Applies the coercion rules and records every adjustment
#[derive(Debug, Default)]
pub(super) struct Coercer {
    pub(super) report: IngestReport,
}

impl Coercer {
    /// Non-negative amount; invalid or negative → 0
    pub(super) fn non_negative(&mut self, field: String, raw: &Value) -> f64 {
        match number(raw) {
            Some(v) if v >= 0.0 => v,
            _ => self.coerced(field, raw, 0.0),
        }
    }

    /// Percentage in [0, 100]; invalid → 0, out of range → nearest bound
    pub(super) fn percent(&mut self, field: String, raw: &Value) -> f64 {
        match number(raw) {
            Some(v) if (0.0..=100.0).contains(&v) => v,
            Some(v) => self.coerced(field, raw, v.clamp(0.0, 100.0)),
            None => self.coerced(field, raw, 0.0),
        }
    }

    /// Whole count of at least 1; fractions are truncated
    pub(super) fn count(&mut self, field: String, raw: &Value) -> u64 {
        match number(raw) {
            Some(v) if v >= 1.0 && v.fract() == 0.0 => v as u64,
            Some(v) if v >= 1.0 => self.coerced(field, raw, v.trunc()) as u64,
            _ => self.coerced(field, raw, 1.0) as u64,
        }
    }

    fn coerced(&mut self, field: String, raw: &Value, value: f64) -> f64 {
        // Absent fields take the default silently
        if !raw.is_null() {
            tracing::debug!(%field, %raw, value, "Coerced input value");
            self.report.issues.push(IngestIssue::Coerced {
                field,
                raw: raw.clone(),
                value,
            });
        }
        value
    }
}
