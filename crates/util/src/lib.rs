//! zutil - grab-bag helpers over plain Rust data and [`zutil_value::Value`] graphs
//!
//! The object utilities (classification, deep clone, merge, key helpers)
//! live in `zutil-value` and are re-exported here. This crate adds:
//!
//! - [`array`]: set operations, flattening, shuffling and sampling
//! - [`string`]: camelCase / dash-case conversion
//! - [`number`]: truncation, byte-size text, currency grouping, aggregates
//! - [`reg_exp`]: named validation patterns
//! - [`html`]: regex extraction of tags, attributes and text from HTML strings
//! - [`function`]: clock-driven throttle and debounce

pub mod array;
pub mod function;
pub mod html;
pub mod number;
pub mod reg_exp;
pub mod string;

// Re-exports for convenience
pub use array::{
    count_by_item, deep_flatten, flatten, index_of_all, intersection, intersection_all, sample,
    sample_with, shuffle, shuffle_with, union, unique,
};
pub use function::{Debounce, DebounceOptions, Throttle, ThrottleOptions};
pub use html::{
    escape_html, get_attr_from_html, get_pure_text_from_html, get_tags_from_html, HtmlError,
    VOID_TAGS,
};
pub use number::{
    average, bytes_to_text, max, min, sort_asc, sort_desc, sum, to_currency, to_fixed,
};
pub use reg_exp::{is_reg_exp, PatternName, RegExpError};
pub use string::{camelize, dasherize};

pub use zutil_value::{
    classify, deep_clone, deep_equal, extend, has_own_property, is_array, is_buffer,
    is_composite, is_empty, is_function, is_nil, is_null, is_object, is_undefined, keep_keys,
    merge, remove_keys, replace_keys, safe_get, type_name, Array, Bytes, Function, Kind, Object,
    Opaque, Value, ValueError,
};
pub use zutil_value as value;
