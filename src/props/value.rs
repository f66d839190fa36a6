//! Property values - the dynamic value model for vnode props.
//!
//! Render code hands the factory loosely shaped data: strings, numbers,
//! nested lists and mappings, event handlers. [`PropValue`] is that shape,
//! [`PropsMap`] is an insertion-ordered mapping of prop names to values.
//!
//! # Ownership
//!
//! A [`PropsMap`] carries an [`Origin`] marker telling the factory who owns
//! it. Mappings owned by the reactivity layer (`Reactive`) or by a component's
//! setup state (`SetupState`) must never be mutated in place; the factory
//! shallow-copies them before normalizing class/style. A fresh copy is always
//! `Plain`.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

// =============================================================================
// Event Handler
// =============================================================================

/// An event handler stored in props.
///
/// The runtime only stores and accumulates handlers; invoking them is the
/// reconciler's job once the node is mounted. Equality is pointer identity,
/// which is what handler deduplication in [`merge_props`](crate::merge_props)
/// relies on.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&PropValue)>);

impl EventHandler {
    /// Wrap a closure as a handler.
    pub fn new(f: impl Fn(&PropValue) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler with an event payload.
    pub fn call(&self, event: &PropValue) {
        (self.0)(event)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler")
    }
}

// =============================================================================
// Prop Value
// =============================================================================

/// A single property value.
///
/// Models the flexible shapes render code produces: `class` may be a string,
/// a list, or a keyed mapping; `style` may be a mapping or a list of
/// mappings; event props hold handlers or handler lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Num(f64),
    Str(String),
    List(Vec<PropValue>),
    Map(Rc<PropsMap>),
    Handler(EventHandler),
}

impl PropValue {
    /// Truthiness as render code understands it: absent, false, zero and
    /// the empty string are falsy, everything else is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Null => false,
            PropValue::Bool(b) => *b,
            PropValue::Int(i) => *i != 0,
            PropValue::Num(n) => *n != 0.0 && !n.is_nan(),
            PropValue::Str(s) => !s.is_empty(),
            PropValue::List(_) | PropValue::Map(_) | PropValue::Handler(_) => true,
        }
    }

    /// Borrow the string content, if this is a string value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value as i64)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Num(value)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(value: Vec<PropValue>) -> Self {
        PropValue::List(value)
    }
}

impl From<PropsMap> for PropValue {
    fn from(value: PropsMap) -> Self {
        PropValue::Map(Rc::new(value))
    }
}

impl From<Rc<PropsMap>> for PropValue {
    fn from(value: Rc<PropsMap>) -> Self {
        PropValue::Map(value)
    }
}

impl From<EventHandler> for PropValue {
    fn from(value: EventHandler) -> Self {
        PropValue::Handler(value)
    }
}

// =============================================================================
// Origin
// =============================================================================

/// Who owns a [`PropsMap`].
///
/// Stands in for the reactivity layer's "is this a tracked reactive object"
/// and "is this a setup-state proxy" queries. The factory consults it to
/// decide whether a mapping must be copied before mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Caller-built literal. Safe to mutate through copy-on-write.
    #[default]
    Plain,
    /// Live state owned by the reactivity layer.
    Reactive,
    /// A component's internal setup-state mapping.
    SetupState,
}

// =============================================================================
// Props Map
// =============================================================================

/// An insertion-ordered mapping of prop names to values.
///
/// Order matters: class/style merging and prop diffing both walk entries in
/// the order render code supplied them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropsMap {
    entries: IndexMap<String, PropValue>,
    origin: Origin,
}

impl PropsMap {
    /// Create an empty caller-owned mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with an explicit origin.
    pub fn with_origin(origin: Origin) -> Self {
        Self {
            entries: IndexMap::new(),
            origin,
        }
    }

    /// The ownership marker for this mapping.
    #[inline]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Check if this mapping is caller-owned and safe to mutate.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.origin == Origin::Plain
    }

    /// Check if this mapping is owned by the reactivity layer.
    #[inline]
    pub fn is_reactive(&self) -> bool {
        self.origin == Origin::Reactive
    }

    /// Check if this mapping is a component's setup-state mapping.
    #[inline]
    pub fn is_setup_state(&self) -> bool {
        self.origin == Origin::SetupState
    }

    /// Copy the top-level entries into a fresh caller-owned mapping.
    ///
    /// Nested mappings stay shared; only the outer shell is new. This is the
    /// copy the factory takes before mutating class/style on a mapping it
    /// does not own.
    pub fn shallow_copy(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            origin: Origin::Plain,
        }
    }

    /// Insert or replace a prop. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a prop by name.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    /// Check if a prop is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of props.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no props.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.entries.iter()
    }

    /// Iterate prop names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

impl<const N: usize> From<[(&str, PropValue); N]> for PropsMap {
    fn from(entries: [(&str, PropValue); N]) -> Self {
        let mut map = Self::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }
}

// =============================================================================
// Key
// =============================================================================

/// Stable identity hint for list diffing, lifted from `props["key"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

// =============================================================================
// Display Coercion
// =============================================================================

/// Coerce a value to the string shown in text children.
///
/// Strings pass through, absent values and handlers render as nothing,
/// numbers and booleans use their natural form, lists and mappings get a
/// compact JSON rendering.
///
/// # Examples
///
/// ```
/// use spark_vdom::{to_display_string, PropValue};
///
/// assert_eq!(to_display_string(&PropValue::Null), "");
/// assert_eq!(to_display_string(&"hi".into()), "hi");
/// assert_eq!(to_display_string(&42.into()), "42");
///
/// let list = PropValue::List(vec![1.into(), "a".into()]);
/// assert_eq!(to_display_string(&list), r#"[1,"a"]"#);
/// ```
pub fn to_display_string(value: &PropValue) -> String {
    match value {
        PropValue::Null | PropValue::Handler(_) => String::new(),
        PropValue::Str(s) => s.clone(),
        PropValue::Bool(b) => b.to_string(),
        PropValue::Int(i) => i.to_string(),
        PropValue::Num(n) => n.to_string(),
        PropValue::List(_) | PropValue::Map(_) => {
            let mut out = String::new();
            push_json(value, &mut out);
            out
        }
    }
}

/// Compact JSON rendering for container values. Handlers degrade to null,
/// matching how they disappear from serialized output.
fn push_json(value: &PropValue, out: &mut String) {
    match value {
        PropValue::Null | PropValue::Handler(_) => out.push_str("null"),
        PropValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        PropValue::Int(i) => out.push_str(&i.to_string()),
        PropValue::Num(n) => out.push_str(&n.to_string()),
        PropValue::Str(s) => push_json_string(s, out),
        PropValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_json(item, out);
            }
            out.push(']');
        }
        PropValue::Map(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_json_string(key, out);
                out.push(':');
                push_json(item, out);
            }
            out.push('}');
        }
    }
}

fn push_json_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

// =============================================================================
// Tests
// =============================================================================
