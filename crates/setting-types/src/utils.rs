//! Dotted-path helpers over JSON value trees

use serde_json::Value;

/// Look up a dot-separated path inside a JSON value
///
/// Objects are traversed by key, arrays by decimal index. An empty path
/// returns the value itself; any missing segment yields `None`.
///
/// # Examples
/// - `data_get({"a": {"b": 1}}, "a.b")` → `1`
/// - `data_get({"a": [10, 20]}, "a.1")` → `20`
/// - `data_get({"a": 1}, "a.b")` → `None`
pub fn data_get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
	if path.is_empty() {
		return Some(value);
	}
	path.split('.').try_fold(value, |current, segment| match current {
		Value::Object(map) => map.get(segment),
		Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
		_ => None,
	})
}

/// Merge `overlay` into `base`, overlay values winning
///
/// Objects merge key by key and arrays index by index, recursively. Any
/// other combination replaces the base value outright.
pub fn replace_recursive(base: &mut Value, overlay: Value) {
	match (base, overlay) {
		(Value::Object(base), Value::Object(overlay)) => {
			for (key, value) in overlay {
				match base.get_mut(&key) {
					Some(slot) => replace_recursive(slot, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(Value::Array(base), Value::Array(overlay)) => {
			for (idx, value) in overlay.into_iter().enumerate() {
				match base.get_mut(idx) {
					Some(slot) => replace_recursive(slot, value),
					None => base.push(value),
				}
			}
		}
		(base, overlay) => *base = overlay,
	}
}


// vim: ts=4
