//! Block ordering.
//!
//! Comparators follow the usual convention: `Greater` places the left block
//! after the right one.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::value::{Record, Value};

/// Caller-supplied block comparator.
pub type Comparator = Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>;

fn type_name(record: &Record) -> Option<String> {
    let value = record.get("type")?;
    let name = match value {
        Value::Record(_) => value.get("raw").and_then(Value::as_str),
        other => other.as_str(),
    }?;
    Some(name.to_lowercase())
}

fn name_len(record: &Record) -> usize {
    record
        .get("name")
        .and_then(Value::as_str)
        .map(|name| name.chars().count())
        .unwrap_or(0)
}

fn truthy(record: &Record, key: &str) -> bool {
    record.get(key).is_some_and(Value::is_truthy)
}

/// Score of the default heuristic: how strongly `b` pushes `a` after it.
///
/// One point each when `b` has a namespace, is a class, has a constructor,
/// is private, is a function, or has a longer name than `a`.
pub fn heuristic_delta(a: &Record, b: &Record) -> i32 {
    let b_type = type_name(b);
    [
        truthy(b, "namespace"),
        b_type.as_deref() == Some("class"),
        b.contains_key("constructor"),
        b.contains_key("private"),
        b_type.as_deref() == Some("function"),
        name_len(b) > name_len(a),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count() as i32
}

/// The default comparator. Not transitive; only use it with [`stable_sort`].
pub fn heuristic(a: &Record, b: &Record) -> Ordering {
    heuristic_delta(a, b).cmp(&0)
}

fn weight(record: &Record) -> u8 {
    let kind = type_name(record);
    [
        truthy(record, "namespace"),
        kind.as_deref() == Some("class"),
        record.contains_key("constructor"),
        record.contains_key("private"),
        kind.as_deref() == Some("function"),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count() as u8
}

/// Total order over the same signals as [`heuristic`]: lighter blocks first,
/// then shorter names.
pub fn by_weight(a: &Record, b: &Record) -> Ordering {
    weight(a)
        .cmp(&weight(b))
        .then_with(|| name_len(a).cmp(&name_len(b)))
}

/// Stable insertion sort that tolerates comparators without a total order.
///
/// Only adjacent elements are ever compared and swapped, so equal elements
/// keep their relative order and the sort always terminates.
pub fn stable_sort<T>(items: &mut [T], compare: impl Fn(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
