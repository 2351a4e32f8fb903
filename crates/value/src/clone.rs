use std::collections::HashMap;

use crate::keys::is_danger_key;
use crate::value::{Array, Object, Value};

/// Creates a deep clone of a value graph.
///
/// Every `Array` and `Object` reachable from `value` is copied into a new
/// container, so mutating the clone never affects the original and vice
/// versa. All other values (scalars, functions, buffers, opaque host
/// objects) are copied as-is; for the reference-bearing ones that means a
/// new handle to the same data.
///
/// Object keys named `__proto__` or `constructor` are not copied, the
/// same keys [`merge`](crate::merge) refuses to write.
///
/// Cycles and shared substructure are preserved: each source container is
/// registered in a per-call visited map *before* its children are cloned,
/// and any later encounter is answered from that map.
///
/// # Examples
///
/// ```
/// use zutil_value::{deep_clone, Object, Value};
///
/// let obj = Object::new();
/// obj.insert("self", obj.clone());
///
/// let copy = deep_clone(&Value::Object(obj.clone()));
/// let copy = copy.as_object().unwrap();
///
/// assert!(!copy.ptr_eq(&obj));
/// assert!(copy.get("self").unwrap().as_object().unwrap().ptr_eq(copy));
/// # obj.remove("self");
/// # copy.remove("self");
/// ```
pub fn deep_clone(value: &Value) -> Value {
    let mut visited = HashMap::new();
    clone_inner(value, &mut visited)
}

fn clone_inner(value: &Value, visited: &mut HashMap<usize, Value>) -> Value {
    match value {
        Value::Array(arr) => {
            if let Some(done) = visited.get(&arr.id()) {
                return done.clone();
            }
            let result = Array::new();
            visited.insert(arr.id(), Value::Array(result.clone()));
            for item in arr.borrow().iter() {
                let copy = clone_inner(item, visited);
                result.push(copy);
            }
            Value::Array(result)
        }
        Value::Object(obj) => {
            if let Some(done) = visited.get(&obj.id()) {
                return done.clone();
            }
            let result = Object::new();
            visited.insert(obj.id(), Value::Object(result.clone()));
            for (key, item) in obj.borrow().iter() {
                if is_danger_key(key) {
                    continue;
                }
                let copy = clone_inner(item, visited);
                result.insert(key.clone(), copy);
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}
