//! JSON to runtime value conversion.

use anno_value::Value;

/// Convert a JSON document into a runtime value.
///
/// Arrays become lists and objects become dicts keyed by strings. Numbers
/// become ints when they fit in an `i64`, floats otherwise.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::int(i),
            None => Value::float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::string(s.as_str()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(value_from_json).collect()),
        serde_json::Value::Object(fields) => Value::dict(
            fields
                .iter()
                .map(|(key, value)| (Value::string(key.as_str()), value_from_json(value)))
                .collect(),
        ),
    }
}
