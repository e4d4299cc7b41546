//! Helpers for pulling tunables out of a `serde_json::Value` object.
//!
//! Missing keys and wrong JSON types fall back to the supplied default, so a
//! configuration source can send a partial or sloppy object without failing a
//! frame. Range clamping happens in [`crate::config`], not here.

use serde_json::Value;

/// `params[name]` as `f64`, integers included; `default` if absent or not a number.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as a count.
///
/// Accepts non-negative integers and also floats, which are rounded, since
/// UI sliders routinely send `2000.0` for a particle count. Negative numbers
/// map to 0 and are left for the caller's clamp.
pub fn param_count(params: &Value, name: &str, default: usize) -> usize {
    match params.get(name) {
        Some(v) => v
            .as_u64()
            .map(|n| n as usize)
            .or_else(|| v.as_f64().map(|f| f.round().max(0.0) as usize))
            .unwrap_or(default),
        None => default,
    }
}

/// `params[name]` as a string slice, `None` if absent or not a string.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

/// Human name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_float_and_integer() {
        let params = json!({"force": 0.4, "size": 70});
        assert!((param_f64(&params, "force", 0.0) - 0.4).abs() < f64::EPSILON);
        assert!((param_f64(&params, "size", 0.0) - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_on_missing_or_wrong_type() {
        let params = json!({"force": "strong", "speed": null});
        assert!((param_f64(&params, "force", 0.15) - 0.15).abs() < f64::EPSILON);
        assert!((param_f64(&params, "speed", 2.5) - 2.5).abs() < f64::EPSILON);
        assert!((param_f64(&params, "absent", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_on_non_object_returns_default() {
        let params = json!([1, 2, 3]);
        assert!((param_f64(&params, "force", 3.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_count_accepts_integer_and_float() {
        let params = json!({"a": 3000, "b": 2499.6});
        assert_eq!(param_count(&params, "a", 0), 3000);
        assert_eq!(param_count(&params, "b", 0), 2500);
    }

    #[test]
    fn param_count_negative_maps_to_zero() {
        let params = json!({"n": -40});
        assert_eq!(param_count(&params, "n", 10), 0);
    }

    #[test]
    fn param_count_falls_back_on_wrong_type() {
        let params = json!({"n": "many"});
        assert_eq!(param_count(&params, "n", 10), 10);
        assert_eq!(param_count(&params, "missing", 7), 7);
    }

    #[test]
    fn param_str_extracts_strings_only() {
        let params = json!({"mode": "repel", "count": 3});
        assert_eq!(param_str(&params, "mode"), Some("repel"));
        assert_eq!(param_str(&params, "count"), None);
        assert_eq!(param_str(&params, "missing"), None);
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
