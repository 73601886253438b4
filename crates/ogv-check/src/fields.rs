//! Small helpers for reading and correcting YAML mapping fields.

use ogv_core::DocumentReport;
use serde_yaml::{Mapping, Value};

/// String value of a key, when present and a string.
pub(crate) fn get_str<'a>(map: &'a Mapping, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Whether the key is present at all (any value type).
pub(crate) fn has_key(map: &Mapping, key: &str) -> bool {
    map.get(key).is_some()
}

/// Insert or overwrite a string field.
pub(crate) fn set_str(map: &mut Mapping, key: &str, value: &str) {
    map.insert(
        Value::String(key.to_string()),
        Value::String(value.to_string()),
    );
}

/// Overwrite `key` with the expected vocabulary value when it differs,
/// recording one RECOMMENDATION naming the change. `source` describes
/// where the expected value came from (e.g. "inferred from the sensor
/// model record").
pub(crate) fn correct(
    map: &mut Mapping,
    report: &mut DocumentReport,
    field: &str,
    key: &str,
    expected: &str,
    source: &str,
) {
    let current = get_str(map, key).unwrap_or("").to_string();
    if current == expected {
        return;
    }
    if current.trim().is_empty() {
        report.recommendation(field, format!("filled with '{expected}' {source}"));
    } else {
        report.recommendation(field, format!("'{current}' replaced with '{expected}' {source}"));
    }
    set_str(map, key, expected);
}
