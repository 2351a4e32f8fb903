use std::collections::HashSet;

use crate::value::Value;

/// Performs a deep structural equality check between two value graphs.
///
/// - Scalars compare by value; `NaN` equals `NaN`
/// - Buffers compare by content
/// - Functions and opaque values compare by identity
/// - Arrays compare element by element, objects key by key (order ignored)
///
/// Cyclic graphs are supported: a pair of containers that is already being
/// compared further up the walk is assumed equal, so two graphs with the
/// same cycle shape compare equal.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use zutil_value::{deep_equal, Value};
///
/// let a = Value::from(json!({"foo": [1, 2, 3]}));
/// let b = Value::from(json!({"foo": [1, 2, 3]}));
/// let c = Value::from(json!({"foo": [1, 2, 4]}));
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut active = HashSet::new();
    equal_inner(a, b, &mut active)
}

fn equal_inner(a: &Value, b: &Value, active: &mut HashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bytes(a), Value::Bytes(b)) => a.as_slice() == b.as_slice(),
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),

        // Arrays
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            if arr_a.ptr_eq(arr_b) {
                return true;
            }
            let pair = (arr_a.id(), arr_b.id());
            if !active.insert(pair) {
                return true;
            }
            let items_a = arr_a.borrow();
            let items_b = arr_b.borrow();
            let equal = items_a.len() == items_b.len()
                && items_a
                    .iter()
                    .zip(items_b.iter())
                    .all(|(item_a, item_b)| equal_inner(item_a, item_b, active));
            active.remove(&pair);
            equal
        }

        // Objects
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.ptr_eq(obj_b) {
                return true;
            }
            let pair = (obj_a.id(), obj_b.id());
            if !active.insert(pair) {
                return true;
            }
            let map_a = obj_a.borrow();
            let map_b = obj_b.borrow();
            let equal = map_a.len() == map_b.len()
                && map_a.iter().all(|(key, val_a)| match map_b.get(key) {
                    Some(val_b) => equal_inner(val_a, val_b, active),
                    None => false,
                });
            active.remove(&pair);
            equal
        }

        // Different kinds are never equal
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}
