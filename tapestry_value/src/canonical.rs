use std::cell::RefCell;
use std::rc::Rc;

use crate::Value;

/// Per-node substitution hook applied before structural descent.
///
/// Receives the object key the value sits under (`None` for array elements
/// and the root) and the value itself, and returns the value to canonicalize
/// in its place.
pub type Replacer = fn(Option<&str>, &Value) -> Value;

/// Canonicalize a value: sort object keys, resolve shared/external nodes, and
/// break reference cycles structurally.
pub fn canonicalize(value: &Value) -> Value {
    canonicalize_with(value, None, None)
}

/// Canonicalize with an explicit replacer and/or a substitution for
/// [`Value::Undefined`].
///
/// When `replacer` is given it is the only substitution applied; otherwise
/// `undefined_replacement` stands in for every `Undefined` encountered.
pub fn canonicalize_with(
    value: &Value,
    replacer: Option<Replacer>,
    undefined_replacement: Option<&Value>,
) -> Value {
    let mut ancestors = Vec::new();
    canonicalize_node(value, None, replacer, undefined_replacement, &mut ancestors)
}

/// One in-progress shared node on the current descent path. A revisit of the
/// same pointer means a cycle; the partial result built so far is substituted.
struct Ancestor {
    ptr: *const RefCell<Value>,
    partial: Value,
}

fn canonicalize_node(
    value: &Value,
    key: Option<&str>,
    replacer: Option<Replacer>,
    undefined_replacement: Option<&Value>,
    ancestors: &mut Vec<Ancestor>,
) -> Value {
    let substituted = substitute(value, key, replacer, undefined_replacement);
    let value = substituted.as_ref().unwrap_or(value);
    descend(value, replacer, undefined_replacement, ancestors)
}

fn substitute(
    value: &Value,
    key: Option<&str>,
    replacer: Option<Replacer>,
    undefined_replacement: Option<&Value>,
) -> Option<Value> {
    if let Some(replacer) = replacer {
        return Some(replacer(key, value));
    }
    if matches!(value, Value::Undefined) {
        return undefined_replacement.cloned();
    }
    None
}

fn descend(
    value: &Value,
    replacer: Option<Replacer>,
    undefined_replacement: Option<&Value>,
    ancestors: &mut Vec<Ancestor>,
) -> Value {
    match value {
        Value::Shared(cell) => {
            let ptr = Rc::as_ptr(cell);
            if let Some(ancestor) = ancestors.iter().find(|ancestor| ancestor.ptr == ptr) {
                return ancestor.partial.clone();
            }

            let slot = ancestors.len();
            let inner = cell.borrow();
            ancestors.push(Ancestor {
                ptr,
                partial: empty_shape(&inner),
            });

            let result = match &*inner {
                Value::Array(items) => {
                    for item in items {
                        let child = canonicalize_node(
                            item,
                            None,
                            replacer,
                            undefined_replacement,
                            ancestors,
                        );
                        if let Value::Array(partial) = &mut ancestors[slot].partial {
                            partial.push(child);
                        }
                    }
                    ancestors[slot].partial.clone()
                }
                Value::Object(entries) => {
                    for (key, value) in sorted_entries(entries) {
                        let child = canonicalize_node(
                            value,
                            Some(key),
                            replacer,
                            undefined_replacement,
                            ancestors,
                        );
                        if let Value::Object(partial) = &mut ancestors[slot].partial {
                            partial.push((key.to_string(), child));
                        }
                    }
                    ancestors[slot].partial.clone()
                }
                other => descend(other, replacer, undefined_replacement, ancestors),
            };

            ancestors.truncate(slot);
            result
        }
        // Conversion first, then canonicalize its output in place; the
        // replacer is not reapplied to the converted value.
        Value::External(ext) => descend(
            &ext.to_canonical(),
            replacer,
            undefined_replacement,
            ancestors,
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| {
                    canonicalize_node(item, None, replacer, undefined_replacement, ancestors)
                })
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            sorted_entries(entries)
                .into_iter()
                .map(|(key, value)| {
                    let child = canonicalize_node(
                        value,
                        Some(key),
                        replacer,
                        undefined_replacement,
                        ancestors,
                    );
                    (key.to_string(), child)
                })
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

fn sorted_entries(entries: &[(String, Value)]) -> Vec<(&str, &Value)> {
    let mut sorted = entries
        .iter()
        .map(|(key, value)| (key.as_str(), value))
        .collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
}

fn empty_shape(value: &Value) -> Value {
    match value {
        Value::Array(_) => Value::Array(Vec::new()),
        Value::Object(_) => Value::Object(Vec::new()),
        _ => Value::Null,
    }
}
