//! zutil-value - dynamic value graphs and the object utilities built on them
//!
//! A [`Value`] is a JavaScript-shaped dynamic value whose arrays and objects
//! are shared, mutable handles, so a graph may contain shared substructure
//! and cycles. On top of it this crate provides:
//!
//! - [`classify`]: a closed [`Kind`] for every value
//! - [`deep_clone`]: independent deep copies that keep cycle structure
//! - [`merge`] / [`extend`]: deep and shallow merging with a guard against
//!   the `__proto__` / `constructor` keys
//! - key helpers ([`replace_keys`], [`keep_keys`], [`remove_keys`], [`safe_get`])
//! - [`deep_equal`] and a bridge to `serde_json`
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use zutil_value::{deep_clone, merge, Value};
//!
//! let defaults = Value::from(json!({"retry": {"count": 3}, "tags": ["a"]}));
//! let config = deep_clone(&defaults);
//! merge(&config, &[Value::from(json!({"retry": {"delay": 10}, "tags": ["b"]}))]);
//!
//! let expected = json!({"retry": {"count": 3, "delay": 10}, "tags": ["a", "b"]});
//! assert_eq!(config.to_json().unwrap(), expected);
//! assert_eq!(defaults.to_json().unwrap(), json!({"retry": {"count": 3}, "tags": ["a"]}));
//! ```
//!
//! Values are built on `Rc`, so a graph belongs to one thread. A cycle keeps
//! its containers alive until one of its edges is removed.

pub mod clone;
pub mod equal;
pub mod error;
pub mod json;
pub mod keys;
pub mod kind;
pub mod merge;
pub mod value;

// Re-exports for convenience
pub use clone::deep_clone;
pub use equal::deep_equal;
pub use error::ValueError;
pub use keys::{
    has_own_property, is_danger_key, is_empty, keep_keys, remove_keys, replace_keys, safe_get,
    DANGER_KEYS,
};
pub use kind::{
    classify, is_array, is_buffer, is_composite, is_function, is_nil, is_null, is_object,
    is_undefined, type_name, Kind,
};
pub use merge::{extend, merge};
pub use value::{Array, Bytes, Function, Object, Opaque, Value};
