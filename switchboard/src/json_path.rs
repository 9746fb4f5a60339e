//! Field extraction over `serde_json::Value` with sentinel defaults
//!
//! Remote payloads are deeply nested and full of optional objects. Every
//! mapper reads them through these accessors: walk a path of keys (numeric
//! segments index into arrays), and hand back a sentinel instead of failing
//! when any step is absent or null. Absence of an optional field is data,
//! not an error.

use serde_json::Value;

/// Sentinel for a missing person-like field (assignee, owner, author)
pub const UNASSIGNED: &str = "Unassigned";

/// Sentinel for a missing descriptive field (status, name, date)
pub const UNKNOWN: &str = "Unknown";

/// Walk `value` along `path`, returning the value at the end.
///
/// A segment that parses as an integer indexes into an array; any other
/// segment looks up an object key. `None` when any step is missing or the
/// final value is JSON null.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// String at `path`, or `default` when absent/null/not a string.
///
/// Non-string scalars (numbers, booleans) are rendered rather than dropped,
/// since several services return numeric ids where text is expected.
pub fn str_at(value: &Value, path: &[&str], default: &str) -> String {
    match lookup(value, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

/// String at `path`, or `None` when absent
pub fn opt_str_at(value: &Value, path: &[&str]) -> Option<String> {
    match lookup(value, path) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Signed integer at `path`, or `default`
pub fn i64_at(value: &Value, path: &[&str], default: i64) -> i64 {
    lookup(value, path).and_then(Value::as_i64).unwrap_or(default)
}

/// Unsigned integer at `path`, or `default`
pub fn u64_at(value: &Value, path: &[&str], default: u64) -> u64 {
    lookup(value, path).and_then(Value::as_u64).unwrap_or(default)
}

/// Float at `path`, or `default` (integers widen)
pub fn f64_at(value: &Value, path: &[&str], default: f64) -> f64 {
    lookup(value, path).and_then(Value::as_f64).unwrap_or(default)
}

/// Boolean at `path`, or `default`
pub fn bool_at(value: &Value, path: &[&str], default: bool) -> bool {
    lookup(value, path).and_then(Value::as_bool).unwrap_or(default)
}

/// Array at `path`, or an empty slice
pub fn list_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Array of strings at `path`; non-string entries are skipped
pub fn string_list_at(value: &Value, path: &[&str]) -> Vec<String> {
    list_at(value, path)
        .iter()
        .filter_map(|item| item.as_str().map(String::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "key": "OPS-42",
            "fields": {
                "summary": "Fix the flaky deploy",
                "assignee": { "displayName": "Dana Q" },
                "priority": null,
                "story_points": 5,
                "done": true,
                "ratio": 0.25,
                "labels": ["infra", "deploy", 7],
                "fixVersions": [ { "name": "2024.3" } ]
            }
        })
    }

    #[test]
    fn test_lookup_walks_nested_objects() {
        let value = sample();
        let found = lookup(&value, &["fields", "assignee", "displayName"]);
        assert_eq!(found.and_then(Value::as_str), Some("Dana Q"));
    }

    #[test]
    fn test_lookup_indexes_arrays_with_numeric_segments() {
        let value = sample();
        let found = lookup(&value, &["fields", "fixVersions", "0", "name"]);
        assert_eq!(found.and_then(Value::as_str), Some("2024.3"));
    }

    #[test]
    fn test_lookup_treats_null_as_absent() {
        let value = sample();
        assert!(lookup(&value, &["fields", "priority"]).is_none());
    }

    #[test]
    fn test_lookup_missing_parent_is_absent() {
        let value = sample();
        assert!(lookup(&value, &["fields", "reporter", "displayName"]).is_none());
    }

    #[test]
    fn test_str_at_returns_sentinel_for_missing() {
        let value = sample();
        assert_eq!(
            str_at(&value, &["fields", "reporter", "displayName"], UNASSIGNED),
            UNASSIGNED
        );
        assert_eq!(
            str_at(&value, &["fields", "priority", "name"], UNKNOWN),
            UNKNOWN
        );
    }

    #[test]
    fn test_str_at_renders_scalars() {
        let value = sample();
        assert_eq!(str_at(&value, &["fields", "story_points"], ""), "5");
        assert_eq!(str_at(&value, &["fields", "done"], ""), "true");
    }

    #[test]
    fn test_numeric_accessors() {
        let value = sample();
        assert_eq!(i64_at(&value, &["fields", "story_points"], 0), 5);
        assert_eq!(u64_at(&value, &["fields", "missing"], 9), 9);
        assert!((f64_at(&value, &["fields", "ratio"], 0.0) - 0.25).abs() < f64::EPSILON);
        assert!((f64_at(&value, &["fields", "story_points"], 0.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bool_at_defaults() {
        let value = sample();
        assert!(bool_at(&value, &["fields", "done"], false));
        assert!(!bool_at(&value, &["fields", "archived"], false));
    }

    #[test]
    fn test_list_at_defaults_to_empty() {
        let value = sample();
        assert_eq!(list_at(&value, &["fields", "labels"]).len(), 3);
        assert!(list_at(&value, &["fields", "components"]).is_empty());
        assert!(list_at(&value, &["key"]).is_empty());
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        let value = sample();
        assert_eq!(
            string_list_at(&value, &["fields", "labels"]),
            vec!["infra".to_string(), "deploy".to_string()]
        );
    }

    #[test]
    fn test_lookup_on_scalar_root() {
        let value = json!("plain");
        assert!(lookup(&value, &["anything"]).is_none());
    }
}
