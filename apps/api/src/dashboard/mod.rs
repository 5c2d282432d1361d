pub mod handlers;

use serde::Serialize;
use serde_json::Value;

use crate::models::analysis::AnalysisResultRow;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AnalysisCounts {
    pub immediate_roles: usize,
    pub future_roles: usize,
    pub skill_gaps: usize,
}

fn array_len(matched_roles: &Value, key: &str) -> usize {
    matched_roles
        .get(key)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Counts from a stored analysis. Malformed `matched_roles` counts as empty.
pub fn analysis_counts(row: &AnalysisResultRow) -> AnalysisCounts {
    AnalysisCounts {
        immediate_roles: array_len(&row.matched_roles, "immediate_roles"),
        future_roles: array_len(&row.matched_roles, "future_roles"),
        skill_gaps: row.skill_gaps.len(),
    }
}
