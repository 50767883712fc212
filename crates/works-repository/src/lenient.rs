//! Lenient reading of request bodies
//!
//! Admin forms post whatever the browser produced: numbers for budgets,
//! booleans from checkboxes, `null` for cleared inputs. Scalars are coerced
//! to their string form. Arrays and objects are rejected for string fields.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Top-level body fields, looked up by camelCase key
///
/// `E` is the error type of the deserializer the body came from.
pub(crate) struct Fields<E> {
    map: Map<String, Value>,
    _error: PhantomData<fn() -> E>,
}

impl<E: de::Error> Fields<E> {
    fn new(map: Map<String, Value>) -> Self {
        Self {
            map,
            _error: PhantomData,
        }
    }

    /// Any JSON value; a non-object body carries no fields
    pub(crate) fn any<'de, D>(deserializer: D) -> Result<Self, E>
    where
        D: Deserializer<'de, Error = E>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => Self::new(map),
            _ => Self::new(Map::new()),
        })
    }

    /// JSON object only
    pub(crate) fn object<'de, D>(deserializer: D) -> Result<Self, E>
    where
        D: Deserializer<'de, Error = E>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(E::invalid_type(unexpected(&other), &"a JSON object")),
        }
    }

    /// Create field: absent and falsy values (`null`, `false`, `0`, `""`)
    /// are `None`, everything else is coerced
    pub(crate) fn truthy(&self, key: &str) -> Result<Option<String>, E> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) if is_falsy(value) => Ok(None),
            Some(value) => scalar(key, value),
        }
    }

    /// Patch field: absent is `None`, `null` is `Some(None)`
    pub(crate) fn patch(&self, key: &str) -> Result<Option<Option<String>>, E> {
        self.map.get(key).map(|value| scalar(key, value)).transpose()
    }

    /// Image list: arrays are coerced element-wise, anything else is `None`
    pub(crate) fn list(&self, key: &str) -> Result<Option<Vec<String>>, E> {
        match self.map.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Null => Ok("null".to_string()),
                    other => scalar(key, other).map(Option::unwrap_or_default),
                })
                .collect::<Result<Vec<_>, E>>()
                .map(Some),
            _ => Ok(None),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn scalar<E: de::Error>(key: &str, value: &Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(E::custom(format!(
            "{key}: expected a string, number or boolean"
        ))),
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}
