use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::kind::{classify, Kind};

/// A dynamically typed value.
///
/// Scalars are held by value. `Array` and `Object` are shared, mutable
/// reference handles: cloning a `Value` that holds one of them produces a
/// second handle to the same container, the way assignment works in
/// JavaScript. This is what lets a graph of values contain cycles.
///
/// # Examples
///
/// ```
/// use zutil_value::{Object, Value};
///
/// let obj = Object::new();
/// obj.insert("answer", 42);
///
/// let alias = Value::Object(obj.clone());
/// obj.insert("more", true);
///
/// assert_eq!(alias.as_object().unwrap().len(), 2);
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Object),
    Function(Function),
    Bytes(Bytes),
    Opaque(Opaque),
}

impl Value {
    /// Build an array value from a list of items.
    pub fn array<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().collect())
    }

    /// Build an object value from key/value pairs.
    pub fn object<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(entries.into_iter().collect())
    }

    /// Classify this value. See [`classify`].
    pub fn kind(&self) -> Kind {
        classify(self)
    }

    /// True for `Array` and `Object`, the only kinds that clone and merge
    /// recurse into.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Identity of the shared allocation behind a reference-bearing value.
    ///
    /// Returns `None` for scalars.
    pub fn id(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.id()),
            Value::Object(obj) => Some(obj.id()),
            Value::Function(func) => Some(func.id()),
            Value::Bytes(bytes) => Some(bytes.id()),
            Value::Opaque(opaque) => Some(opaque.id()),
            _ => None,
        }
    }

    /// Strict (`===`) equality: reference identity for handles, value
    /// equality for scalars. `NaN` is not equal to itself.
    ///
    /// ```
    /// use zutil_value::{Array, Value};
    ///
    /// let arr = Array::new();
    /// let a = Value::Array(arr.clone());
    /// let b = Value::Array(arr);
    /// assert!(a.same_ref(&b));
    /// assert!(!a.same_ref(&Value::Array(Array::new())));
    /// ```
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => match (self.id(), other.id()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

/// A shared, mutable, ordered sequence of values.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    /// Stable identity of this array for as long as any handle is alive.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Get a handle to the item at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Set the item at `index`, padding with `Undefined` when `index` is
    /// past the end.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut items = self.0.borrow_mut();
        if index >= items.len() {
            items.resize(index + 1, Value::Undefined);
        }
        items[index] = value.into();
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn extend<I: IntoIterator<Item = Value>>(&self, items: I) {
        self.0.borrow_mut().extend(items);
    }

    /// Snapshot of the item handles.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().map(Into::into).collect())
    }
}

/// A shared, mutable mapping from string keys to values.
///
/// Insertion order is kept for iteration and display; it does not take part
/// in equality.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<IndexMap<String, Value>>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: IndexMap<String, Value>) -> Self {
        Self(Rc::new(RefCell::new(map)))
    }

    /// Stable identity of this object for as long as any handle is alive.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Get a handle to the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Snapshot of the entries, so the object can be mutated while the
    /// result is walked.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn borrow(&self) -> Ref<'_, IndexMap<String, Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, IndexMap<String, Value>> {
        self.0.borrow_mut()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

type NativeFn = dyn Fn(&[Value]) -> Value;

/// An opaque callable. Never recursed into; copied by handle.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl Function {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.func) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        self.id() == other.id()
    }
}

/// An immutable byte buffer.
#[derive(Clone)]
pub struct Bytes(Rc<[u8]>);

impl Bytes {
    pub fn new(data: &[u8]) -> Self {
        Self(Rc::from(data))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Bytes) -> bool {
        self.id() == other.id()
    }
}

/// Any other host object (a date, a compiled pattern, a native handle).
///
/// The type name is what [`Kind::name`] reports for it.
#[derive(Clone)]
pub struct Opaque {
    name: &'static str,
    inner: Rc<dyn Any>,
}

impl Opaque {
    pub fn new<T: Any>(name: &'static str, value: T) -> Self {
        Self {
            name,
            inner: Rc::new(value),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        self.id() == other.id()
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from_vec(items))
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Opaque> for Value {
    fn from(opaque: Opaque) -> Self {
        Value::Opaque(opaque)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// Debug output, safe on cyclic graphs.

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut path = Vec::new();
        write_debug(self, f, &mut path)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Array(self.clone()), f)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Object(self.clone()), f)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name)
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Buffer {:02x?}>", self.as_slice())
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

fn write_debug(value: &Value, f: &mut fmt::Formatter<'_>, path: &mut Vec<usize>) -> fmt::Result {
    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => write!(f, "{}", n),
        Value::String(s) => write!(f, "{:?}", s),
        Value::Function(func) => write!(f, "{:?}", func),
        Value::Bytes(bytes) => write!(f, "{:?}", bytes),
        Value::Opaque(opaque) => write!(f, "{:?}", opaque),
        Value::Array(arr) => {
            if path.contains(&arr.id()) {
                return f.write_str("[Circular]");
            }
            path.push(arr.id());
            f.write_str("[")?;
            for (i, item) in arr.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_debug(item, f, path)?;
            }
            path.pop();
            f.write_str("]")
        }
        Value::Object(obj) => {
            if path.contains(&obj.id()) {
                return f.write_str("[Circular]");
            }
            path.push(obj.id());
            f.write_str("{")?;
            for (i, (key, item)) in obj.borrow().iter().enumerate() {
                f.write_str(if i > 0 { ", " } else { " " })?;
                write!(f, "{}: ", key)?;
                write_debug(item, f, path)?;
            }
            if !obj.is_empty() {
                f.write_str(" ")?;
            }
            path.pop();
            f.write_str("}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_share_storage() {
        let arr = Array::new();
        let alias = arr.clone();
        alias.push(1);
        assert_eq!(arr.len(), 1);
        assert!(arr.ptr_eq(&alias));
        assert_eq!(arr.id(), alias.id());
    }

    #[test]
    fn test_array_set_pads_with_undefined() {
        let arr = Array::new();
        arr.set(2, "x");
        assert_eq!(arr.len(), 3);
        assert!(arr.get(0).unwrap().is_undefined());
        assert_eq!(arr.get(2).unwrap().as_str(), Some("x"));
    }

    #[test]
    fn test_object_insert_remove() {
        let obj = Object::new();
        obj.insert("a", 1);
        obj.insert("b", 2);
        assert_eq!(obj.keys(), vec!["a".to_string(), "b".to_string()]);
        assert!(obj.remove("a").is_some());
        assert!(!obj.contains_key("a"));
        assert_eq!(obj.len(), 1);
    }

    #[test]
    fn test_same_ref() {
        let obj = Object::new();
        let a = Value::Object(obj.clone());
        assert!(a.same_ref(&Value::Object(obj)));
        assert!(!a.same_ref(&Value::Object(Object::new())));
        assert!(Value::from(1).same_ref(&Value::from(1)));
        assert!(!Value::Number(f64::NAN).same_ref(&Value::Number(f64::NAN)));
        assert!(!Value::Null.same_ref(&Value::Undefined));
    }

    #[test]
    fn test_function_call() {
        let double = Function::new("double", |args| {
            Value::Number(args.first().and_then(Value::as_f64).unwrap_or(0.0) * 2.0)
        });
        assert_eq!(double.call(&[Value::from(21)]).as_f64(), Some(42.0));
        assert_eq!(double.name(), "double");
        assert!(double.ptr_eq(&double.clone()));
    }

    #[test]
    fn test_opaque_downcast() {
        let opaque = Opaque::new("Date", 1_578_000_000_u64);
        assert_eq!(opaque.name(), "Date");
        assert_eq!(opaque.downcast_ref::<u64>(), Some(&1_578_000_000));
        assert!(opaque.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_debug_nested() {
        let value = Value::object([("a", Value::from(1)), ("b", Value::array([true, false]))]);
        assert_eq!(format!("{:?}", value), "{ a: 1, b: [true, false] }");
        assert_eq!(format!("{:?}", Value::object(Vec::<(String, Value)>::new())), "{}");
    }

    #[test]
    fn test_debug_cycle() {
        let obj = Object::new();
        obj.insert("self", obj.clone());
        assert_eq!(format!("{:?}", obj), "{ self: [Circular] }");
        obj.remove("self");
    }

    #[test]
    fn test_debug_shared_is_not_circular() {
        let shared = Value::array([1]);
        let value = Value::array([shared.clone(), shared]);
        assert_eq!(format!("{:?}", value), "[[1], [1]]");
    }
}
