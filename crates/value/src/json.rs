//! Bridge between [`Value`] graphs and `serde_json` documents.

use serde_json::{Map, Number, Value as Json};

use crate::error::ValueError;
use crate::value::{Array, Object, Value};

/// Largest integer an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(arr) => Value::Array(arr.iter().map(Value::from).collect::<Array>()),
            Json::Object(obj) => Value::Object(
                obj.iter()
                    .map(|(key, val)| (key.clone(), Value::from(val)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from(&json)
    }
}

impl Value {
    /// Export this value as a JSON document.
    ///
    /// `Undefined` object entries are dropped and `Undefined` array items
    /// become `null`, like `JSON.stringify`. Buffers become arrays of byte
    /// values. Shared (non-cyclic) substructure is written out once per
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Fails on a cycle, on functions and opaque values, and on `NaN` or
    /// infinite numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use zutil_value::Value;
    ///
    /// let value = Value::from(json!({"a": [1, 2.5, "x"]}));
    /// assert_eq!(value.to_json().unwrap(), json!({"a": [1, 2.5, "x"]}));
    /// ```
    pub fn to_json(&self) -> Result<Json, ValueError> {
        let mut path = Vec::new();
        to_json_inner(self, &mut path)
    }
}

fn to_json_inner(value: &Value, path: &mut Vec<usize>) -> Result<Json, ValueError> {
    match value {
        Value::Undefined | Value::Null => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(*b)),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => Ok(Json::String(s.clone())),
        Value::Bytes(bytes) => Ok(Json::Array(
            bytes.as_slice().iter().map(|b| Json::from(*b)).collect(),
        )),
        Value::Array(arr) => {
            enter(arr.id(), path)?;
            let mut items = Vec::with_capacity(arr.len());
            for item in arr.borrow().iter() {
                items.push(to_json_inner(item, path)?);
            }
            path.pop();
            Ok(Json::Array(items))
        }
        Value::Object(obj) => {
            enter(obj.id(), path)?;
            let mut map = Map::new();
            for (key, item) in obj.borrow().iter() {
                if item.is_undefined() {
                    continue;
                }
                map.insert(key.clone(), to_json_inner(item, path)?);
            }
            path.pop();
            Ok(Json::Object(map))
        }
        Value::Function(_) | Value::Opaque(_) => Err(ValueError::Unsupported(value.kind())),
    }
}

fn enter(id: usize, path: &mut Vec<usize>) -> Result<(), ValueError> {
    if path.contains(&id) {
        return Err(ValueError::Circular);
    }
    path.push(id);
    Ok(())
}

fn number_to_json(n: f64) -> Result<Json, ValueError> {
    if !n.is_finite() {
        return Err(ValueError::NonFiniteNumber(n));
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Ok(Json::from(n as i64));
    }
    Number::from_f64(n)
        .map(Json::Number)
        .ok_or(ValueError::NonFiniteNumber(n))
}
