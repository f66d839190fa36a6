//! Class and style normalization.
//!
//! Render code produces `class` and `style` in flexible shapes (string, list,
//! keyed mapping, nested combinations). The reconciler wants exactly one
//! canonical shape per prop: a single token string for `class`, a flat
//! mapping for `style`. These functions are total: unrecognized shapes
//! degrade to an empty or pass-through result instead of failing.

use std::rc::Rc;

use crate::props::value::{PropValue, PropsMap};

// =============================================================================
// Class
// =============================================================================

/// Normalize a class value into a single token string.
///
/// - String: split into tokens.
/// - List: each element normalized recursively, empty results dropped.
/// - Mapping: keys whose value is truthy become tokens.
/// - Anything else: empty string.
///
/// The result has no leading or trailing whitespace and exactly one space
/// between tokens, so the function is idempotent on its own output.
///
/// # Examples
///
/// ```
/// use spark_vdom::{normalize_class, PropValue, PropsMap};
///
/// let value = PropValue::List(vec![
///     "a".into(),
///     PropsMap::from([("b", true.into()), ("c", false.into())]).into(),
///     "d".into(),
/// ]);
/// assert_eq!(normalize_class(&value), "a b d");
///
/// assert_eq!(normalize_class(&"  x   y ".into()), "x y");
/// assert_eq!(normalize_class(&PropValue::Null), "");
/// ```
pub fn normalize_class(value: &PropValue) -> String {
    let mut tokens: Vec<String> = Vec::new();
    collect_class_tokens(value, &mut tokens);
    tokens.join(" ")
}

fn collect_class_tokens(value: &PropValue, tokens: &mut Vec<String>) {
    match value {
        PropValue::Str(s) => {
            tokens.extend(s.split_whitespace().map(str::to_string));
        }
        PropValue::List(items) => {
            for item in items {
                collect_class_tokens(item, tokens);
            }
        }
        PropValue::Map(map) => {
            for (name, condition) in map.iter() {
                if condition.is_truthy() {
                    tokens.extend(name.split_whitespace().map(str::to_string));
                }
            }
        }
        _ => {}
    }
}

// =============================================================================
// Style
// =============================================================================

/// Normalize a style value into a flat mapping.
///
/// - List: shallow-merges each element's normalized form left to right,
///   later entries winning per key. String elements are parsed as inline
///   style text first.
/// - Mapping: returned as-is.
/// - Anything else: `None`. The caller leaves the raw value untouched,
///   which keeps already-serialized style text working.
///
/// # Examples
///
/// ```
/// use spark_vdom::{normalize_style, PropValue, PropsMap};
///
/// let styles = PropValue::List(vec![
///     PropsMap::from([("color", "red".into())]).into(),
///     PropsMap::from([("color", "blue".into()), ("size", "1".into())]).into(),
/// ]);
/// let merged = normalize_style(&styles).unwrap();
/// match merged {
///     PropValue::Map(map) => {
///         assert_eq!(map.get("color").and_then(|v| v.as_str()), Some("blue"));
///         assert_eq!(map.get("size").and_then(|v| v.as_str()), Some("1"));
///     }
///     _ => unreachable!(),
/// }
///
/// // Pre-serialized text passes through unhandled.
/// assert!(normalize_style(&"color: red".into()).is_none());
/// ```
pub fn normalize_style(value: &PropValue) -> Option<PropValue> {
    match value {
        PropValue::List(items) => {
            let mut merged = PropsMap::new();
            for item in items {
                merge_style_into(item, &mut merged);
            }
            Some(PropValue::Map(Rc::new(merged)))
        }
        PropValue::Map(_) => Some(value.clone()),
        _ => None,
    }
}

fn merge_style_into(item: &PropValue, merged: &mut PropsMap) {
    match item {
        PropValue::Str(s) => {
            for (name, value) in parse_string_style(s).iter() {
                merged.insert(name.clone(), value.clone());
            }
        }
        PropValue::Map(map) => {
            for (name, value) in map.iter() {
                merged.insert(name.clone(), value.clone());
            }
        }
        PropValue::List(items) => {
            for nested in items {
                merge_style_into(nested, merged);
            }
        }
        _ => {}
    }
}

/// Parse inline style text (`name: value; name: value`) into a mapping.
///
/// Declarations without both a name and a value are dropped.
///
/// # Examples
///
/// ```
/// use spark_vdom::parse_string_style;
///
/// let map = parse_string_style("color: red; width: 10");
/// assert_eq!(map.get("color").and_then(|v| v.as_str()), Some("red"));
/// assert_eq!(map.get("width").and_then(|v| v.as_str()), Some("10"));
/// assert_eq!(map.len(), 2);
/// ```
pub fn parse_string_style(css: &str) -> PropsMap {
    let mut map = PropsMap::new();
    for declaration in css.split(';') {
        if let Some((name, value)) = declaration.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if !name.is_empty() && !value.is_empty() {
                map.insert(name, value);
            }
        }
    }
    map
}

// =============================================================================
// Tests
// =============================================================================
