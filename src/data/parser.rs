use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use super::model::{FieldValue, Record};
use crate::error::DecodeError;

/// Decode one trimmed, non-blank log line into a [`Record`].
///
/// The line must hold a JSON object; any other JSON value, or malformed
/// syntax, is a [`DecodeError`] for that line only.
pub fn parse_record(line_number: usize, line: &str) -> Result<Record, DecodeError> {
    let root: JsonValue = serde_json::from_str(line).map_err(|e| DecodeError {
        line_number,
        message: e.to_string(),
    })?;

    let JsonValue::Object(obj) = root else {
        return Err(DecodeError {
            line_number,
            message: format!("expected a JSON object, found {}", json_kind(&root)),
        });
    };

    let fields: BTreeMap<String, FieldValue> = obj
        .into_iter()
        .map(|(key, val)| (key, json_to_field(val)))
        .collect();

    Ok(Record {
        line_number,
        fields,
    })
}

fn json_to_field(val: JsonValue) -> FieldValue {
    match val {
        JsonValue::Null => FieldValue::Null,
        JsonValue::Bool(b) => FieldValue::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::String(s) => FieldValue::String(s),
        other @ (JsonValue::Array(_) | JsonValue::Object(_)) => FieldValue::Opaque(other.to_string()),
    }
}

fn json_kind(val: &JsonValue) -> &'static str {
    match val {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_object() {
        let rec = parse_record(1, r#"{"timestamp":1000,"gear_avg":2.5,"ok":true,"mode":"auto","x":null}"#)
            .unwrap();
        assert_eq!(rec.line_number, 1);
        assert_eq!(rec.get("timestamp"), Some(&FieldValue::Integer(1000)));
        assert_eq!(rec.get("gear_avg"), Some(&FieldValue::Float(2.5)));
        assert_eq!(rec.get("ok"), Some(&FieldValue::Bool(true)));
        assert_eq!(rec.get("mode"), Some(&FieldValue::String("auto".into())));
        assert_eq!(rec.get("x"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_nested_values_are_opaque() {
        let rec = parse_record(3, r#"{"pose":{"x":1},"tags":[1,2]}"#).unwrap();
        assert_eq!(rec.get("pose"), Some(&FieldValue::Opaque(r#"{"x":1}"#.into())));
        assert_eq!(rec.get("tags"), Some(&FieldValue::Opaque("[1,2]".into())));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse_record(2, "not json").unwrap_err();
        assert_eq!(err.line_number, 2);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = parse_record(7, "[1,2,3]").unwrap_err();
        assert_eq!(err.line_number, 7);
        assert!(err.message.contains("an array"));

        assert!(parse_record(8, "42").is_err());
    }

    #[test]
    fn test_truncated_object() {
        assert!(parse_record(4, r#"{"timestamp":10"#).is_err());
    }
}
