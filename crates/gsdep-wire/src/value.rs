use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, WireError};
use crate::tag::DataType;

/// One protocol value. Exactly one variant is active per message, and each
/// variant is tied to exactly one [`DataType`] tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Str(String),
    Int(i32),
    Float(f64),
    IntList(Vec<i32>),
    FloatList(Vec<f64>),
    Map(Map<String, Value>),
}

impl TypedValue {
    /// The wire tag describing this variant.
    pub fn data_type(&self) -> DataType {
        match self {
            TypedValue::Str(_) => DataType::String,
            TypedValue::Int(_) => DataType::Int,
            TypedValue::Float(_) => DataType::Float,
            TypedValue::IntList(_) => DataType::IntList,
            TypedValue::FloatList(_) => DataType::FloatList,
            TypedValue::Map(_) => DataType::HashMap,
        }
    }

    /// Encode to the textual wire payload.
    ///
    /// Grammar, per variant:
    /// - `Str` — raw UTF-8 bytes.
    /// - `Int` — decimal ASCII.
    /// - `Float` — shortest round-trip `Display` output, except finite
    ///   values with no fractional part below 10^16 in magnitude keep one
    ///   forced decimal digit (`2.0`, `-0.0`); larger values use exponent
    ///   notation. Peers parse either form.
    /// - `IntList`/`FloatList` — `[v0, v1, ..., vn]`, comma-space
    ///   separated; the empty list is `[]`.
    /// - `Map` — compact JSON object text (no whitespace).
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        match self {
            TypedValue::Str(text) => Ok(text.as_bytes().to_vec()),
            TypedValue::Int(v) => Ok(v.to_string().into_bytes()),
            TypedValue::Float(v) => Ok(format_float(*v).into_bytes()),
            TypedValue::IntList(vs) => {
                Ok(format_list(vs.iter().map(|v| v.to_string())).into_bytes())
            }
            TypedValue::FloatList(vs) => {
                Ok(format_list(vs.iter().map(|v| format_float(*v))).into_bytes())
            }
            TypedValue::Map(map) => Ok(serde_json::to_vec(map)?),
        }
    }

    /// Decode payload bytes according to their declared tag.
    pub fn from_payload(data_type: DataType, payload: &[u8]) -> Result<Self> {
        match data_type {
            DataType::String => Ok(TypedValue::Str(std::str::from_utf8(payload)?.to_owned())),
            DataType::Int => parse_int(payload_text(payload)?).map(TypedValue::Int),
            DataType::Float => parse_float(payload_text(payload)?).map(TypedValue::Float),
            DataType::IntList => {
                parse_list(payload_text(payload)?, data_type, parse_int).map(TypedValue::IntList)
            }
            DataType::FloatList => {
                parse_list(payload_text(payload)?, data_type, parse_float)
                    .map(TypedValue::FloatList)
            }
            DataType::HashMap => match serde_json::from_slice::<Value>(payload)? {
                Value::Object(map) => Ok(TypedValue::Map(map)),
                other => Err(WireError::Format {
                    data_type: data_type.name(),
                    detail: format!("expected a JSON object, got {other}"),
                }),
            },
        }
    }
}

fn payload_text(payload: &[u8]) -> Result<&str> {
    Ok(std::str::from_utf8(payload)?)
}

fn parse_int(text: &str) -> Result<i32> {
    text.trim().parse().map_err(|_| WireError::Format {
        data_type: DataType::Int.name(),
        detail: format!("not a decimal integer: {text:?}"),
    })
}

fn parse_float(text: &str) -> Result<f64> {
    text.trim().parse().map_err(|_| WireError::Format {
        data_type: DataType::Float.name(),
        detail: format!("not a decimal float: {text:?}"),
    })
}

/// Strip the enclosing brackets, split on commas, and parse each trimmed
/// element. An empty interior decodes to an empty sequence.
fn parse_list<T>(text: &str, data_type: DataType, elem: fn(&str) -> Result<T>) -> Result<Vec<T>> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| WireError::Format {
            data_type: data_type.name(),
            detail: format!("missing enclosing brackets: {text:?}"),
        })?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner.split(',').map(|e| elem(e.trim())).collect()
}

// Above this magnitude integral floats stay in `Display` exponent form
// instead of a forced-decimal expansion hundreds of digits long.
const FORCED_DECIMAL_LIMIT: f64 = 1e16;

fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        if v.abs() < FORCED_DECIMAL_LIMIT {
            format!("{v:.1}")
        } else {
            format!("{v:e}")
        }
    } else {
        format!("{v}")
    }
}

fn format_list<I: Iterator<Item = String>>(items: I) -> String {
    let mut out = String::from("[");
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&item);
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn roundtrip(value: TypedValue) {
        let payload = value.to_payload().unwrap();
        let decoded = TypedValue::from_payload(value.data_type(), &payload).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn string_roundtrip() {
        roundtrip(TypedValue::Str("hello".to_string()));
        roundtrip(TypedValue::Str(String::new()));
        // Embedded delimiters must not confuse anything: strings are raw.
        roundtrip(TypedValue::Str("[1, 2], {\"a\": 3}".to_string()));
    }

    #[test]
    fn int_roundtrip() {
        roundtrip(TypedValue::Int(0));
        roundtrip(TypedValue::Int(-42));
        roundtrip(TypedValue::Int(i32::MAX));
        roundtrip(TypedValue::Int(i32::MIN));
    }

    #[test]
    fn float_roundtrip() {
        roundtrip(TypedValue::Float(0.0));
        roundtrip(TypedValue::Float(-2.5));
        roundtrip(TypedValue::Float(1.0e-7));
        roundtrip(TypedValue::Float(f64::INFINITY));
    }

    #[test]
    fn list_roundtrip() {
        roundtrip(TypedValue::IntList(vec![1, 2, 3]));
        roundtrip(TypedValue::IntList(vec![-1, 0, 1]));
        roundtrip(TypedValue::IntList(Vec::new()));
        roundtrip(TypedValue::FloatList(vec![1.5, -0.25, 3.0]));
        roundtrip(TypedValue::FloatList(Vec::new()));
    }

    #[test]
    fn map_roundtrip() {
        let map = match json!({"z": 1.25, "name": "sensor, [a]", "ok": true, "nested": {"n": [1, 2]}})
        {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        roundtrip(TypedValue::Map(map));
    }

    #[test]
    fn canonical_wire_text_is_pinned() {
        assert_eq!(TypedValue::Int(17).to_payload().unwrap(), b"17");
        assert_eq!(TypedValue::Float(2.0).to_payload().unwrap(), b"2.0");
        assert_eq!(TypedValue::Float(1.5).to_payload().unwrap(), b"1.5");
        assert_eq!(TypedValue::Float(-0.0).to_payload().unwrap(), b"-0.0");
        assert_eq!(
            TypedValue::IntList(vec![1, 2, 3]).to_payload().unwrap(),
            b"[1, 2, 3]"
        );
        assert_eq!(TypedValue::IntList(Vec::new()).to_payload().unwrap(), b"[]");
        assert_eq!(
            TypedValue::FloatList(vec![1.0, 2.5]).to_payload().unwrap(),
            b"[1.0, 2.5]"
        );

        let map = match json!({"a": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(TypedValue::Map(map).to_payload().unwrap(), br#"{"a":1}"#);
    }

    #[test]
    fn large_integral_floats_use_exponent_form() {
        assert_eq!(TypedValue::Float(1e300).to_payload().unwrap(), b"1e300");
        assert_eq!(TypedValue::Float(-1e16).to_payload().unwrap(), b"-1e16");
        // Just under the threshold the forced decimal digit still applies.
        assert_eq!(
            TypedValue::Float(1e15).to_payload().unwrap(),
            b"1000000000000000.0"
        );
        roundtrip(TypedValue::Float(1e300));
        roundtrip(TypedValue::Float(1.5e300));
    }

    #[test]
    fn scientific_notation_parses() {
        let decoded = TypedValue::from_payload(DataType::Float, b"1e3").unwrap();
        assert_eq!(decoded, TypedValue::Float(1000.0));
    }

    #[test]
    fn empty_list_decodes_empty() {
        let decoded = TypedValue::from_payload(DataType::IntList, b"[]").unwrap();
        assert_eq!(decoded, TypedValue::IntList(Vec::new()));
        let decoded = TypedValue::from_payload(DataType::FloatList, b"[ ]").unwrap();
        assert_eq!(decoded, TypedValue::FloatList(Vec::new()));
    }

    #[test]
    fn list_elements_are_trimmed() {
        let decoded = TypedValue::from_payload(DataType::IntList, b"[ 1 ,2,  3 ]").unwrap();
        assert_eq!(decoded, TypedValue::IntList(vec![1, 2, 3]));
    }

    #[test]
    fn malformed_int_rejected() {
        let err = TypedValue::from_payload(DataType::Int, b"not-a-number").unwrap_err();
        assert!(matches!(err, WireError::Format { .. }));
    }

    #[test]
    fn malformed_float_rejected() {
        let err = TypedValue::from_payload(DataType::Float, b"1.2.3").unwrap_err();
        assert!(matches!(err, WireError::Format { .. }));
    }

    #[test]
    fn malformed_list_element_rejected() {
        let err = TypedValue::from_payload(DataType::IntList, b"[1, x, 3]").unwrap_err();
        assert!(matches!(err, WireError::Format { .. }));
    }

    #[test]
    fn list_without_brackets_rejected() {
        let err = TypedValue::from_payload(DataType::IntList, b"1, 2, 3").unwrap_err();
        assert!(matches!(err, WireError::Format { .. }));
    }

    #[test]
    fn non_object_map_rejected() {
        let err = TypedValue::from_payload(DataType::HashMap, b"[1, 2]").unwrap_err();
        assert!(matches!(err, WireError::Format { .. }));

        let err = TypedValue::from_payload(DataType::HashMap, b"{not-json").unwrap_err();
        assert!(matches!(err, WireError::Json(_)));
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = TypedValue::from_payload(DataType::String, &[0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, WireError::Utf8(_)));
    }
}
