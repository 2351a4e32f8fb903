use crate::value::{Object, Value};

/// Keys that are never read from or written to by [`merge`](crate::merge),
/// [`extend`](crate::extend) or [`safe_get`].
pub const DANGER_KEYS: [&str; 2] = ["__proto__", "constructor"];

pub fn is_danger_key(key: &str) -> bool {
    DANGER_KEYS.contains(&key)
}

/// Read a property, refusing the [`DANGER_KEYS`].
///
/// # Examples
///
/// ```
/// use zutil_value::{safe_get, Object};
///
/// let obj = Object::new();
/// obj.insert("name", "zutil");
/// obj.insert("constructor", "evil");
///
/// assert_eq!(safe_get(&obj, "name").unwrap().as_str(), Some("zutil"));
/// assert!(safe_get(&obj, "constructor").is_none());
/// ```
pub fn safe_get(obj: &Object, key: &str) -> Option<Value> {
    if is_danger_key(key) {
        return None;
    }
    obj.get(key)
}

/// Check if a value is an object with an own property under `key`.
///
/// Returns false if the value is not an object.
pub fn has_own_property(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(obj) => obj.contains_key(key),
        _ => false,
    }
}

/// Check if a value has no own properties.
///
/// Non-objects are considered "empty" in terms of properties.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj.is_empty(),
        _ => true,
    }
}

/// Returns a new object with keys renamed according to `rules`.
///
/// Each rule is `(from, to)`. Keys without a rule are kept. When two keys
/// end up with the same name, the one visited later wins. Values are shared
/// with the input, not copied.
///
/// ```
/// use serde_json::json;
/// use zutil_value::{replace_keys, Value};
///
/// let value = Value::from(json!({"id": 1, "title": "x"}));
/// let renamed = replace_keys(value.as_object().unwrap(), &[("title", "name")]);
/// assert_eq!(Value::Object(renamed), Value::from(json!({"id": 1, "name": "x"})));
/// ```
pub fn replace_keys(obj: &Object, rules: &[(&str, &str)]) -> Object {
    let result = Object::new();
    for (key, value) in obj.borrow().iter() {
        let renamed = rules
            .iter()
            .find(|(from, _)| *from == key.as_str())
            .map_or(key.as_str(), |(_, to)| *to);
        result.insert(renamed, value.clone());
    }
    result
}

#[derive(Clone, Copy)]
enum Filter {
    Keep,
    Remove,
}

fn filter_keys(obj: &Object, keys: &[&str], filter: Filter) -> Object {
    let result = Object::new();
    for (key, value) in obj.borrow().iter() {
        let listed = keys.contains(&key.as_str());
        let retain = match filter {
            Filter::Keep => listed,
            Filter::Remove => !listed,
        };
        if retain {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}

/// Returns a new object holding only the listed keys.
pub fn keep_keys(obj: &Object, keys: &[&str]) -> Object {
    filter_keys(obj, keys, Filter::Keep)
}

/// Returns a new object without the listed keys.
pub fn remove_keys(obj: &Object, keys: &[&str]) -> Object {
    filter_keys(obj, keys, Filter::Remove)
}
