//! Tree-level operations on parsed documents.
//!
//! These are total functions over possibly-missing data: traversal yields
//! `None` for anything absent, and the write path creates whatever structure
//! it needs. The write path is object-biased: a numeric segment only indexes
//! a slot that is genuinely an array; every other slot is coerced to an
//! object keyed by the stringified index. `get_at_path` and the text scanner
//! honor the same convention so reads and writes agree.

use crate::{Path, Seg};
use serde_json::{Map, Value};

/// Traverse a document by path.
///
/// Short-circuits to `None` as soon as a segment cannot be followed; never
/// fails. Numeric segments read arrays by position and objects by
/// stringified key.
pub fn get_at_path<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = root;
    for seg in path.iter() {
        current = match (seg, current) {
            (Seg::Key(key), Value::Object(map)) => map.get(key)?,
            (Seg::Index(idx), Value::Array(items)) => items.get(*idx)?,
            (Seg::Index(idx), Value::Object(map)) => map.get(&idx.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set a value at a path, creating intermediate containers as needed.
///
/// Infallible by construction: missing intermediates become objects, an
/// in-bounds index writes into the existing array, an out-of-bounds index
/// pads the array with `null`, and any other slot hit by a numeric segment
/// is coerced to an object with the index as its key.
pub fn set_at_path(root: &mut Value, path: &Path, value: Value) {
    set_segments(root, path.segments(), value);
}

fn set_segments(current: &mut Value, segments: &[Seg], value: Value) {
    match segments {
        [] => *current = value,
        [seg, rest @ ..] => {
            if let (Seg::Index(idx), Value::Array(items)) = (seg, &mut *current) {
                if *idx >= items.len() {
                    items.resize(*idx + 1, Value::Null);
                }
                if rest.is_empty() {
                    items[*idx] = value;
                } else {
                    set_segments(&mut items[*idx], rest, value);
                }
                return;
            }

            let key = match seg {
                Seg::Key(k) => k.clone(),
                Seg::Index(i) => i.to_string(),
            };
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            if let Value::Object(map) = current {
                if rest.is_empty() {
                    map.insert(key, value);
                } else {
                    set_segments(map.entry(key).or_insert(Value::Null), rest, value);
                }
            }
        }
    }
}

/// Combine an existing value with an edited one, one level deep.
///
/// Only when both are objects does a merge happen: all existing fields,
/// overlaid by the edited fields (edited wins on collision). In every other
/// case the edited value is returned verbatim.
pub fn shallow_merge(existing: Option<&Value>, edited: &Value) -> Value {
    match (existing, edited) {
        (Some(Value::Object(base)), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (k, v) in overlay {
                merged.insert(k.clone(), v.clone());
            }
            Value::Object(merged)
        }
        _ => edited.clone(),
    }
}
