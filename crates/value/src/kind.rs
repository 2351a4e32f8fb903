use std::fmt;

use crate::value::Value;

/// Closed classification of a [`Value`]'s shape.
///
/// Only [`Kind::Object`] and [`Kind::Array`] are containers that clone and
/// merge recurse into; every other kind is an atomic leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Null,
    Boolean,
    /// A finite number with no fractional part.
    Integer,
    /// A finite number with a fractional part.
    Float,
    /// `NaN` or an infinity.
    Number,
    String,
    Array,
    Object,
    Function,
    Buffer,
    /// Any other host object, tagged with its type name.
    Opaque(&'static str),
}

impl Kind {
    /// The type tag for this kind, e.g. `"Object"` or `"Integer"`.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Undefined => "Undefined",
            Kind::Null => "Null",
            Kind::Boolean => "Boolean",
            Kind::Integer => "Integer",
            Kind::Float => "Float",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Object => "Object",
            Kind::Function => "Function",
            Kind::Buffer => "Buffer",
            Kind::Opaque(name) => *name,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a value.
///
/// Pure and total: every value maps to exactly one kind.
///
/// # Examples
///
/// ```
/// use zutil_value::{classify, Kind, Value};
///
/// assert_eq!(classify(&Value::from(3)), Kind::Integer);
/// assert_eq!(classify(&Value::from(3.5)), Kind::Float);
/// assert_eq!(classify(&Value::Number(f64::NAN)), Kind::Number);
/// assert_eq!(classify(&Value::array([1, 2])), Kind::Array);
/// ```
pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Undefined => Kind::Undefined,
        Value::Null => Kind::Null,
        Value::Bool(_) => Kind::Boolean,
        Value::Number(n) if !n.is_finite() => Kind::Number,
        Value::Number(n) if n.fract() == 0.0 => Kind::Integer,
        Value::Number(_) => Kind::Float,
        Value::String(_) => Kind::String,
        Value::Array(_) => Kind::Array,
        Value::Object(_) => Kind::Object,
        Value::Function(_) => Kind::Function,
        Value::Bytes(_) => Kind::Buffer,
        Value::Opaque(opaque) => Kind::Opaque(opaque.name()),
    }
}

/// Type tag of a value. Shorthand for `classify(value).name()`.
pub fn type_name(value: &Value) -> &'static str {
    classify(value).name()
}

/// True for plain key/value objects.
pub fn is_object(value: &Value) -> bool {
    classify(value) == Kind::Object
}

pub fn is_array(value: &Value) -> bool {
    classify(value) == Kind::Array
}

pub fn is_composite(value: &Value) -> bool {
    classify(value).is_composite()
}

pub fn is_undefined(value: &Value) -> bool {
    classify(value) == Kind::Undefined
}

pub fn is_null(value: &Value) -> bool {
    classify(value) == Kind::Null
}

/// True for `Undefined` and `Null`.
pub fn is_nil(value: &Value) -> bool {
    is_undefined(value) || is_null(value)
}

pub fn is_function(value: &Value) -> bool {
    classify(value) == Kind::Function
}

pub fn is_buffer(value: &Value) -> bool {
    classify(value) == Kind::Buffer
}
