//! Array helpers: set operations, flattening, shuffling and lookups.

use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;
use zutil_value::Value;

/// Remove duplicates, keeping the first occurrence of each item.
///
/// ```
/// use zutil::array::unique;
///
/// assert_eq!(unique(&[1, 2, 1, 3, 2]), vec![1, 2, 3]);
/// ```
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Items of `b` that also occur in `a`, in `b`'s order.
pub fn intersection<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let set: HashSet<&T> = a.iter().collect();
    b.iter().filter(|item| set.contains(item)).cloned().collect()
}

/// Intersection of every list, in the order of the first one.
///
/// ```
/// use zutil::array::intersection_all;
///
/// let a = [3, 1, 2, 4];
/// let b = [1, 2, 3];
/// let c = [2, 3, 9];
/// assert_eq!(intersection_all(&[&a[..], &b[..], &c[..]]), vec![3, 2]);
/// ```
pub fn intersection_all<T: Eq + Hash + Clone>(lists: &[&[T]]) -> Vec<T> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    rest.iter()
        .fold(first.to_vec(), |acc, list| intersection(list, &acc))
}

/// Union of every list: the unique items of their concatenation.
pub fn union<T: Eq + Hash + Clone>(lists: &[&[T]]) -> Vec<T> {
    let all: Vec<T> = lists.iter().flat_map(|list| list.iter().cloned()).collect();
    unique(&all)
}

/// Flatten nested arrays up to `depth` levels. A depth below 1 counts as 1.
///
/// ```
/// use serde_json::json;
/// use zutil::array::flatten;
/// use zutil_value::Value;
///
/// let nested = Value::from(json!([1, [2, [3, [4]]]]));
/// let items = nested.as_array().unwrap().to_vec();
///
/// assert_eq!(Value::from(flatten(&items, 1)), Value::from(json!([1, 2, [3, [4]]])));
/// assert_eq!(Value::from(flatten(&items, 2)), Value::from(json!([1, 2, 3, [4]])));
/// ```
pub fn flatten(items: &[Value], depth: usize) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, depth.max(1), &mut out);
    out
}

fn flatten_into(items: &[Value], depth: usize, out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(arr) if depth > 0 => flatten_into(&arr.to_vec(), depth - 1, out),
            other => out.push(other.clone()),
        }
    }
}

/// Flatten nested arrays at every level.
///
/// An array that contains itself (directly or further down) is not
/// expanded a second time on the same path; that occurrence is dropped.
pub fn deep_flatten(items: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    let mut path = Vec::new();
    deep_flatten_into(items, &mut path, &mut out);
    out
}

fn deep_flatten_into(items: &[Value], path: &mut Vec<usize>, out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(arr) => {
                if path.contains(&arr.id()) {
                    continue;
                }
                path.push(arr.id());
                deep_flatten_into(&arr.to_vec(), path, out);
                path.pop();
            }
            other => out.push(other.clone()),
        }
    }
}

/// A shuffled copy of `items`, using the thread-local RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// A shuffled copy of `items` (Fisher-Yates, from the back).
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut list = items.to_vec();
    let mut len = list.len();
    while len > 1 {
        let i = rng.gen_range(0..len);
        len -= 1;
        list.swap(len, i);
    }
    list
}

/// `size` items picked at random, without repetition. Clamped to the input
/// length.
pub fn sample<T: Clone>(items: &[T], size: usize) -> Vec<T> {
    sample_with(items, size, &mut rand::thread_rng())
}

pub fn sample_with<T: Clone, R: Rng + ?Sized>(items: &[T], size: usize, rng: &mut R) -> Vec<T> {
    let mut list = shuffle_with(items, rng);
    list.truncate(size);
    list
}

/// Every index at which `item` occurs.
pub fn index_of_all<T: PartialEq>(items: &[T], item: &T) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, candidate)| *candidate == item)
        .map(|(index, _)| index)
        .collect()
}

/// Number of occurrences of `item`.
pub fn count_by_item<T: PartialEq>(items: &[T], item: &T) -> usize {
    items.iter().filter(|candidate| *candidate == item).count()
}
