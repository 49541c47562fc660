/// Conversion from DynamoDB attribute values to plain JSON.
use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Number, Value};

use crate::records::{PeekError, Record};

/// Convert a whole item into a [`Record`].
///
/// # Errors
///
/// Returns `PeekError::Unmarshal` if any attribute cannot be represented.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, PeekError> {
    item.iter()
        .map(|(name, value)| {
            attribute_to_json(value)
                .map(|json| (name.clone(), json))
                .map_err(|e| PeekError::Unmarshal(format!("attribute '{name}': {e}")))
        })
        .collect()
}

/// Convert one attribute value.
///
/// # Errors
///
/// Returns a description of the offending value.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, String> {
    Ok(match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(encode_blob(blob)),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| attribute_to_json(v).map(|json| (k.clone(), json)))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::L(list) => Value::Array(
            list.iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(set) => {
            Value::Array(set.iter().map(|b| Value::String(encode_blob(b))).collect())
        }
        other => return Err(format!("unsupported attribute type {other:?}")),
    })
}

/// Extract a string attribute, if present and of type S.
#[must_use]
pub fn string_attribute<'a>(
    item: &'a HashMap<String, AttributeValue>,
    name: &str,
) -> Option<&'a str> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Some(s),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Result<Number, String> {
    serde_json::from_str::<Number>(raw.trim()).map_err(|_| format!("invalid number '{raw}'"))
}

fn encode_blob(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}
