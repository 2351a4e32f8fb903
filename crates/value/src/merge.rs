use std::collections::HashSet;

use crate::keys::is_danger_key;
use crate::value::{Array, Object, Value};

/// Deep-merges `sources` into `target`, in argument order, and returns the
/// target handle.
///
/// Per source:
/// - a source that is the target itself is skipped
/// - if target and source are of different kinds, the target wins and
///   nothing is written
/// - array into array appends every source item (concatenation)
/// - object into object, for every source key:
///   - `__proto__` and `constructor` are skipped
///   - a key missing from the target (or holding `Undefined`) is set
///   - a key whose source value is an array or object is merged
///     recursively into the existing target value, so the same rules
///     apply one level down
///   - anything else overwrites the target key
///
/// Scalar targets cannot be changed in place, so merging into them is a
/// no-op. Values written into the target are shared with the source, not
/// copied; use [`deep_clone`](crate::deep_clone) first when that matters.
///
/// A cyclic source terminates: a (target, source) pair that comes back
/// while it is still being merged is skipped.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use zutil_value::{merge, Value};
///
/// let target = Value::from(json!({"a": {"x": 1}, "list": [1]}));
/// let source = Value::from(json!({"a": {"y": 2}, "list": [2, 3]}));
///
/// merge(&target, &[source]);
/// assert_eq!(target, Value::from(json!({"a": {"x": 1, "y": 2}, "list": [1, 2, 3]})));
/// ```
pub fn merge(target: &Value, sources: &[Value]) -> Value {
    let mut active = HashSet::new();
    for source in sources {
        merge_one(target, source, &mut active);
    }
    target.clone()
}

fn merge_one(to: &Value, from: &Value, active: &mut HashSet<(usize, usize)>) {
    match (to, from) {
        (Value::Array(to), Value::Array(from)) => merge_array(to, from),
        (Value::Object(to), Value::Object(from)) => merge_object(to, from, active),
        // Kind mismatch or scalars: target wins.
        _ => {}
    }
}

fn merge_array(to: &Array, from: &Array) {
    if to.ptr_eq(from) {
        return;
    }
    to.extend(from.to_vec());
}

fn merge_object(to: &Object, from: &Object, active: &mut HashSet<(usize, usize)>) {
    if to.ptr_eq(from) {
        return;
    }
    let pair = (to.id(), from.id());
    if !active.insert(pair) {
        return;
    }
    for (key, from_item) in from.entries() {
        if is_danger_key(&key) {
            continue;
        }
        match to.get(&key) {
            Some(to_item) if !to_item.is_undefined() && from_item.is_composite() => {
                merge_one(&to_item, &from_item, active);
            }
            _ => {
                to.insert(key, from_item);
            }
        }
    }
    active.remove(&pair);
}

/// Shallow-assigns the own keys of every object source onto an object
/// target (`Object.assign`), skipping `__proto__` and `constructor`.
///
/// Non-object targets and sources are left alone.
///
/// ```
/// use serde_json::json;
/// use zutil_value::{extend, Value};
///
/// let target = Value::from(json!({"a": {"x": 1}}));
/// extend(&target, &[Value::from(json!({"a": {"y": 2}, "b": 3}))]);
/// assert_eq!(target, Value::from(json!({"a": {"y": 2}, "b": 3})));
/// ```
pub fn extend(target: &Value, sources: &[Value]) -> Value {
    if let Value::Object(to) = target {
        for source in sources {
            let Value::Object(from) = source else {
                continue;
            };
            if to.ptr_eq(from) {
                continue;
            }
            for (key, value) in from.entries() {
                if !is_danger_key(&key) {
                    to.insert(key, value);
                }
            }
        }
    }
    target.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_merge_scalar_right_bias() {
        let target = v(json!({"a": 1}));
        merge(&target, &[v(json!({"a": 2}))]);
        assert_eq!(target, v(json!({"a": 2})));
    }

    #[test]
    fn test_merge_returns_target_handle() {
        let target = v(json!({"a": 1}));
        let result = merge(&target, &[v(json!({"b": 2}))]);
        assert!(result.same_ref(&target));
    }

    #[test]
    fn test_merge_nested_objects() {
        let target = v(json!({"a": {"x": 1}}));
        merge(&target, &[v(json!({"a": {"y": 2}}))]);
        assert_eq!(target, v(json!({"a": {"x": 1, "y": 2}})));
    }

    #[test]
    fn test_merge_nested_arrays_concatenate() {
        let target = v(json!({"a": [1]}));
        merge(&target, &[v(json!({"a": [2, 3]}))]);
        assert_eq!(target, v(json!({"a": [1, 2, 3]})));
    }

    #[test]
    fn test_merge_top_level_arrays() {
        let target = v(json!([1, 2]));
        merge(&target, &[v(json!([2, 3])), v(json!([4]))]);
        assert_eq!(target, v(json!([1, 2, 2, 3, 4])));
    }

    #[test]
    fn test_merge_kind_mismatch_keeps_target() {
        let target = v(json!({"a": 1}));
        merge(&target, &[v(json!({"a": {"x": 1}}))]);
        assert_eq!(target, v(json!({"a": 1})));

        let target = v(json!({"a": {"x": 1}}));
        merge(&target, &[v(json!({"a": [1]}))]);
        assert_eq!(target, v(json!({"a": {"x": 1}})));

        let target = v(json!({"a": 1}));
        merge(&target, &[v(json!([1, 2]))]);
        assert_eq!(target, v(json!({"a": 1})));
    }

    #[test]
    fn test_merge_scalar_source_overwrites_composite() {
        let target = v(json!({"a": {"x": 1}}));
        merge(&target, &[v(json!({"a": null}))]);
        assert_eq!(target, v(json!({"a": null})));
    }

    #[test]
    fn test_merge_sets_missing_and_undefined_keys() {
        let target = Value::object([("u", Value::Undefined)]);
        merge(&target, &[v(json!({"u": {"x": 1}, "n": [1]}))]);
        assert_eq!(target, v(json!({"u": {"x": 1}, "n": [1]})));
    }

    #[test]
    fn test_merge_multiple_sources_in_order() {
        let target = v(json!({"a": 1, "b": {"c": 1}}));
        merge(
            &target,
            &[v(json!({"a": 2, "b": {"d": 2}})), v(json!({"a": 3, "b": {"c": 3}}))],
        );
        assert_eq!(target, v(json!({"a": 3, "b": {"c": 3, "d": 2}})));
    }

    #[test]
    fn test_merge_self_is_noop() {
        let target = v(json!({"a": [1], "b": {"c": 1}}));
        merge(&target, &[target.clone()]);
        assert_eq!(target, v(json!({"a": [1], "b": {"c": 1}})));

        let arr = v(json!([1, 2]));
        merge(&arr, &[arr.clone()]);
        assert_eq!(arr, v(json!([1, 2])));
    }

    #[test]
    fn test_merge_no_sources() {
        let target = v(json!({"a": 1}));
        merge(&target, &[]);
        assert_eq!(target, v(json!({"a": 1})));
    }

    #[test]
    fn test_merge_into_scalar_is_noop() {
        let target = Value::from(1);
        let result = merge(&target, &[Value::from(2)]);
        assert_eq!(result, Value::from(1));
    }

    #[test]
    fn test_merge_skips_danger_keys() {
        let target = v(json!({}));
        let attacker = v(json!({
            "__proto__": {"polluted": true},
            "constructor": {"prototype": 1},
            "ok": 1
        }));
        merge(&target, &[attacker]);
        assert_eq!(target, v(json!({"ok": 1})));
    }

    #[test]
    fn test_merge_shares_inserted_values() {
        let target = v(json!({}));
        let nested = v(json!({"x": 1}));
        merge(&target, &[Value::object([("n", nested.clone())])]);
        let inserted = target.as_object().unwrap().get("n").unwrap();
        assert!(inserted.same_ref(&nested));
    }

    #[test]
    fn test_merge_cyclic_source_terminates() {
        let source = Object::new();
        source.insert("x", 1);
        source.insert("self", source.clone());
        let target = v(json!({"self": {}}));

        merge(&target, &[Value::Object(source.clone())]);

        let obj = target.as_object().unwrap();
        assert_eq!(obj.get("x").unwrap().as_f64(), Some(1.0));
        let inner = obj.get("self").unwrap();
        assert_eq!(inner.as_object().unwrap().get("x").unwrap().as_f64(), Some(1.0));

        source.remove("self");
        inner.as_object().unwrap().remove("self");
    }

    #[test]
    fn test_merge_cycle_on_both_sides_terminates() {
        let target = Object::new();
        target.insert("self", target.clone());
        let source = Object::new();
        source.insert("self", source.clone());
        source.insert("y", 2);

        merge(&Value::Object(target.clone()), &[Value::Object(source.clone())]);

        assert_eq!(target.get("y").unwrap().as_f64(), Some(2.0));
        assert!(target.get("self").unwrap().as_object().unwrap().ptr_eq(&target));

        target.remove("self");
        source.remove("self");
    }

    #[test]
    fn test_extend_is_shallow() {
        let target = v(json!({"a": {"x": 1}, "keep": true}));
        let result = extend(&target, &[v(json!({"a": {"y": 2}})), v(json!({"b": 1}))]);
        assert!(result.same_ref(&target));
        assert_eq!(target, v(json!({"a": {"y": 2}, "keep": true, "b": 1})));
    }

    #[test]
    fn test_extend_ignores_non_objects() {
        let target = v(json!({"a": 1}));
        extend(&target, &[Value::from(5), v(json!([1])), v(json!({"__proto__": 1}))]);
        assert_eq!(target, v(json!({"a": 1})));

        let arr = v(json!([1]));
        extend(&arr, &[v(json!({"a": 1}))]);
        assert_eq!(arr, v(json!([1])));
    }
}
