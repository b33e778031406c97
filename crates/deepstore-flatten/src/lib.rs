//! Pure structural transforms for nested JSON values.
//!
//! This crate implements the flattening convention used by the deepstore
//! Document Adapter: a nested object is turned into a map from delimited
//! path strings to leaf values, and back. It holds no state and performs
//! no I/O, so it can be tested in isolation from the storage logic.
//!
//! # Flattening rules
//!
//! - Non-empty objects recurse: each entry contributes its key as a path
//!   segment, joined with the configured delimiter.
//! - Arrays are leaves. Their elements are never split into individual
//!   entries, so object keys that happen to look numeric can never be
//!   confused with array indices on the way back.
//! - Empty objects and empty arrays are leaves as well.
//! - Scalars (strings, numbers, booleans, null) are leaves.
//!
//! `unflatten` is the inverse for any map produced by `flatten`. It only
//! ever rebuilds objects; arrays come back intact as stored leaves.

use serde_json::{Map, Value};

/// Flatten a nested value into a map from delimited path to leaf value.
///
/// Only non-empty objects produce paths. Anything else (arrays, scalars,
/// empty objects) flattens to zero entries at the top level, because there
/// is no path to attach the value to.
pub fn flatten(value: &Value, delimiter: &str) -> Map<String, Value> {
    let mut out = Map::new();
    if let Value::Object(map) = value {
        for (key, child) in map {
            flatten_into(&mut out, key.clone(), child, delimiter);
        }
    }
    out
}

fn flatten_into(out: &mut Map<String, Value>, path: String, value: &Value, delimiter: &str) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(out, format!("{path}{delimiter}{key}"), child, delimiter);
            }
        }
        leaf => {
            out.insert(path, leaf.clone());
        }
    }
}

/// Rebuild a nested object from a flat path-to-leaf map.
///
/// Returns the top-level object map. Path segments are split on the
/// delimiter. If two paths disagree about whether a segment is a leaf or
/// an interior node, the later entry wins and the earlier leaf is
/// discarded.
pub fn unflatten(flat: &Map<String, Value>, delimiter: &str) -> Map<String, Value> {
    let mut root = Map::new();
    for (path, leaf) in flat {
        let mut cursor = &mut root;
        let mut segments = path.split(delimiter).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                cursor.insert(segment.to_string(), leaf.clone());
            } else {
                let slot = cursor
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                cursor = slot
                    .as_object_mut()
                    .expect("interior node was just made an object");
            }
        }
    }
    root
}

/// Deep-merge `patch` into `base`.
///
/// Object keys are unioned. Where both sides hold objects the merge
/// recurses; everywhere else the patch side wins wholesale, discarding
/// whatever sub-structure the base had at that position.
pub fn deep_merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(slot) if slot.is_object() && patch_value.is_object() => {
                        deep_merge(slot, patch_value);
                    }
                    _ => {
                        base_map.insert(key, patch_value);
                    }
                }
            }
        }
        (slot, patch) => *slot = patch,
    }
}
