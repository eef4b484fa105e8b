//! Field-level diffs for audit entries

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Longest string shown in full in a diff
const MAX_STRING_LEN: usize = 50;

/// Summarize what changed between two JSON values
///
/// Objects are compared field by field, in key order. Returns `None` when
/// nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before), Value::Object(after)) => field_changes(before, after),
        _ if before != after => vec![format!("{} -> {}", show(before), show(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn field_changes(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<String> {
    let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    keys.into_iter()
        .filter_map(|key| match (before.get(key), after.get(key)) {
            (Some(old), Some(new)) if old == new => None,
            (Some(old), Some(new)) => Some(format!("{}: {} -> {}", key, show(old), show(new))),
            (Some(old), None) => Some(format!("{}: {} -> (removed)", key, show(old))),
            (None, Some(new)) => Some(format!("{}: (added) -> {}", key, show(new))),
            (None, None) => None,
        })
        .collect()
}

/// Compact rendering of a value; long strings are cut on a char boundary
fn show(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
