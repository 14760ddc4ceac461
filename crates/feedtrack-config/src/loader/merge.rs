//! JSON merge helpers for layered configuration.

use serde_json::{Map, Value};

/// Deep-merge `overlay` into `base`. Objects merge key by key; any other
/// value replaces what was there.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    if let (Value::Object(base_map), Value::Object(overlay_map)) = (&mut *base, overlay) {
        for (key, value) in overlay_map {
            match base_map.get_mut(key) {
                Some(existing) => merge_json_values(existing, value),
                None => {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
        return;
    }
    *base = overlay.clone();
}

/// Deep-merge `overlay` into `base`, skipping any leaf that is pinned by the
/// requirements layer.
pub(super) fn merge_json_with_constraints(
    base: &mut Value,
    overlay: &Value,
    constraints: Option<&Value>,
) {
    let Some(constraints) = constraints else {
        merge_json_values(base, overlay);
        return;
    };
    let (Value::Object(locked), Value::Object(overlay_map)) = (constraints, overlay) else {
        // A non-object constraint pins the whole subtree.
        return;
    };
    if !base.is_object() {
        *base = Value::Object(Map::new());
    }
    let Value::Object(base_map) = base else {
        return;
    };
    for (key, value) in overlay_map {
        match locked.get(key) {
            None => match base_map.get_mut(key) {
                Some(existing) => merge_json_values(existing, value),
                None => {
                    base_map.insert(key.clone(), value.clone());
                }
            },
            Some(nested @ Value::Object(_)) => {
                let entry = base_map
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                merge_json_with_constraints(entry, value, Some(nested));
            }
            Some(_) => {}
        }
    }
}
