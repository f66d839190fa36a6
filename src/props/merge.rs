//! Props merging for spread and mixin composition.
//!
//! Generated render code combines static and dynamic prop sets (spread props,
//! inherited attrs) by handing all of them to [`merge_props`] in order.

use std::rc::Rc;

use crate::props::normalize::{normalize_class, normalize_style};
use crate::props::value::{PropValue, PropsMap};

// =============================================================================
// Merge
// =============================================================================

/// Merge property mappings left to right into one caller-owned mapping.
///
/// Later arguments take precedence key by key, with three exceptions:
/// - `class` values are collected across all arguments and normalized once,
///   in argument order.
/// - `style` values are collected and shallow-merged the same way.
/// - Event-handler-like and hook-like keys (prefix `on` or `vnode`)
///   accumulate into a flat list instead of overwriting, skipping absent
///   values and duplicates of an already-merged handler.
///
/// Empty-string keys are dropped. The result is always a fresh plain
/// mapping, never aliased with any input.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use spark_vdom::{merge_props, PropValue, PropsMap};
///
/// let base = Rc::new(PropsMap::from([("class", "a".into()), ("id", "x".into())]));
/// let extra = Rc::new(PropsMap::from([("class", "b".into()), ("id", "y".into())]));
///
/// let merged = merge_props(&[base, extra]);
/// assert_eq!(merged.get("class").and_then(|v| v.as_str()), Some("a b"));
/// assert_eq!(merged.get("id").and_then(|v| v.as_str()), Some("y"));
/// ```
pub fn merge_props(sources: &[Rc<PropsMap>]) -> PropsMap {
    let mut merged = PropsMap::new();
    let mut class_values: Vec<PropValue> = Vec::new();
    let mut style_values: Vec<PropValue> = Vec::new();

    for source in sources {
        for (key, value) in source.iter() {
            if key.is_empty() {
                continue;
            }
            match key.as_str() {
                // Raw value holds the entry's position; the normalized
                // result replaces it after all sources are seen.
                "class" => {
                    merged.insert("class", value.clone());
                    class_values.push(value.clone());
                }
                "style" => {
                    merged.insert("style", value.clone());
                    style_values.push(value.clone());
                }
                key if is_handler_key(key) => {
                    accumulate_handler(&mut merged, key, value);
                }
                key => {
                    merged.insert(key, value.clone());
                }
            }
        }
    }

    if !class_values.is_empty() {
        let normalized = normalize_class(&PropValue::List(class_values));
        merged.insert("class", PropValue::Str(normalized));
    }
    if !style_values.is_empty() {
        if let Some(style) = normalize_style(&PropValue::List(style_values)) {
            merged.insert("style", style);
        }
    }

    merged
}

/// Event-handler-like (`onClick`) and lifecycle-hook-like (`vnodeMounted`)
/// keys accumulate instead of overwriting.
#[inline]
fn is_handler_key(key: &str) -> bool {
    key.starts_with("on") || key.starts_with("vnode")
}

fn accumulate_handler(merged: &mut PropsMap, key: &str, incoming: &PropValue) {
    if matches!(incoming, PropValue::Null) {
        return;
    }
    let updated = match merged.get(key) {
        None => incoming.clone(),
        Some(existing) if existing == incoming => return,
        Some(existing) => {
            let mut list = match existing {
                PropValue::List(items) => items.clone(),
                single => vec![single.clone()],
            };
            append_flat(&mut list, incoming);
            PropValue::List(list)
        }
    };
    merged.insert(key, updated);
}

/// Append a value into a handler list, flattening nested lists and skipping
/// handlers already present.
fn append_flat(list: &mut Vec<PropValue>, incoming: &PropValue) {
    match incoming {
        PropValue::List(items) => {
            for item in items {
                append_flat(list, item);
            }
        }
        single => {
            if !list.contains(single) {
                list.push(single.clone());
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
