//! Shallow drift detection between a tool's declared fields and a provider response.
//! Only top-level keys are compared; nested structure and value types are not checked.

use serde_json::Value;
use tracing::{debug, warn};

/// Expected fields absent from the candidate, in declaration order
pub fn missing_fields(expected: &[&str], candidate: &Value) -> Vec<String> {
    match candidate.as_object() {
        Some(fields) => expected
            .iter()
            .filter(|name| !fields.contains_key(**name))
            .map(|name| name.to_string())
            .collect(),
        None => expected.iter().map(|name| name.to_string()).collect(),
    }
}

/// Logs an integrity warning for missing fields. Never alters control flow.
pub fn check(tool_id: &str, expected: &[&str], candidate: &Value) -> Vec<String> {
    let missing = missing_fields(expected, candidate);
    if missing.is_empty() {
        debug!("[{}] Integrity check passed", tool_id);
    } else {
        warn!("[{}] Data integrity warning: missing keys {:?}", tool_id, missing);
    }
    missing
}
