//! VNode type vocabulary - node kinds, children shapes, slots.
//!
//! The `type` a render call passes in is one of a closed set of cases, so the
//! shape-flag classification in the factory is an exhaustive match instead of
//! runtime value sniffing. The reserved markers (Fragment, Text, Empty,
//! Portal) are opaque identities the reconciler switches on.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::props::PropsMap;
use crate::vnode::node::VNodeRef;

// =============================================================================
// Component Definitions
// =============================================================================

/// Render function for functional components and component definitions.
///
/// Stored by this crate, invoked by the reconciler once an instance exists.
pub type RenderFn = Rc<dyn Fn(Option<Rc<PropsMap>>) -> VNodeChild>;

/// A stateful component definition.
///
/// The runtime treats this as an opaque identity; only the reconciler reads
/// through it when mounting an instance.
#[derive(Default)]
pub struct ComponentDef {
    /// Display name for devtools and diagnostics.
    pub name: Option<String>,
    /// Render function invoked per instance.
    pub render: Option<RenderFn>,
}

impl ComponentDef {
    /// Create a definition with just a display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            render: None,
        }
    }
}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// VNode Type
// =============================================================================

/// What a vnode describes.
#[derive(Clone)]
pub enum VNodeType {
    /// Host element, identified by tag name.
    Element(String),
    /// Stateful component backed by a definition.
    Component(Rc<ComponentDef>),
    /// Functional component: a bare render function.
    FunctionalComponent(RenderFn),
    /// Marker: grouping container with no element of its own.
    Fragment,
    /// Marker: raw text node.
    Text,
    /// Marker: placeholder that renders nothing but holds a position.
    Empty,
    /// Marker: subtree rendered at a different mount point.
    Portal,
}

impl VNodeType {
    /// Create an element type from a tag name.
    pub fn element(tag: impl Into<String>) -> Self {
        VNodeType::Element(tag.into())
    }

    /// Check if this is one of the reserved marker identities.
    #[inline]
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            VNodeType::Fragment | VNodeType::Text | VNodeType::Empty | VNodeType::Portal
        )
    }
}

impl fmt::Debug for VNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VNodeType::Element(tag) => write!(f, "Element({tag:?})"),
            VNodeType::Component(def) => write!(f, "Component({:?})", def.name),
            VNodeType::FunctionalComponent(_) => f.write_str("FunctionalComponent"),
            VNodeType::Fragment => f.write_str("Fragment"),
            VNodeType::Text => f.write_str("Text"),
            VNodeType::Empty => f.write_str("Empty"),
            VNodeType::Portal => f.write_str("Portal"),
        }
    }
}

impl From<&str> for VNodeType {
    fn from(tag: &str) -> Self {
        VNodeType::Element(tag.to_string())
    }
}

impl From<Rc<ComponentDef>> for VNodeType {
    fn from(def: Rc<ComponentDef>) -> Self {
        VNodeType::Component(def)
    }
}

// =============================================================================
// Slots
// =============================================================================

/// A named slot: a deferred child producer the reconciler calls on demand.
pub type SlotFn = Rc<dyn Fn() -> Vec<VNodeChild>>;

/// Named slots in declaration order.
#[derive(Clone, Default)]
pub struct SlotsMap {
    slots: IndexMap<String, SlotFn>,
}

impl SlotsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, slot: SlotFn) {
        self.slots.insert(name.into(), slot);
    }

    pub fn get(&self, name: &str) -> Option<&SlotFn> {
        self.slots.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.slots.keys()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for SlotsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotsMap")
            .field("names", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Children
// =============================================================================

/// Normalized children as stored on a vnode.
///
/// The runtime shape always agrees with the children bit in the vnode's
/// shape flag: `Text` with TEXT_CHILDREN, `Nodes` with ARRAY_CHILDREN,
/// `Slots` with SLOTS_CHILDREN, `None` with no bit.
#[derive(Debug, Clone, Default)]
pub enum Children {
    #[default]
    None,
    Text(String),
    Nodes(Vec<VNodeChild>),
    Slots(SlotsMap),
}

/// One child as produced by render code, before vnode coercion.
///
/// `normalize_vnode` turns any of these into a well-formed vnode: `Null`
/// becomes an Empty placeholder, `Nodes` becomes a Fragment, text stays
/// text, and an already-built vnode passes through (cloned if mounted).
#[derive(Debug, Clone)]
pub enum VNodeChild {
    Null,
    Text(String),
    Node(VNodeRef),
    Nodes(Vec<VNodeChild>),
}

impl From<&str> for VNodeChild {
    fn from(value: &str) -> Self {
        VNodeChild::Text(value.to_string())
    }
}

impl From<String> for VNodeChild {
    fn from(value: String) -> Self {
        VNodeChild::Text(value)
    }
}

impl From<i64> for VNodeChild {
    fn from(value: i64) -> Self {
        VNodeChild::Text(value.to_string())
    }
}

impl From<f64> for VNodeChild {
    fn from(value: f64) -> Self {
        VNodeChild::Text(value.to_string())
    }
}

// A boolean child is a collapsed conditional branch: it renders nothing.
impl From<bool> for VNodeChild {
    fn from(_: bool) -> Self {
        VNodeChild::Null
    }
}

impl From<VNodeRef> for VNodeChild {
    fn from(value: VNodeRef) -> Self {
        VNodeChild::Node(value)
    }
}

impl From<Vec<VNodeChild>> for VNodeChild {
    fn from(value: Vec<VNodeChild>) -> Self {
        VNodeChild::Nodes(value)
    }
}

// =============================================================================
// Raw Children
// =============================================================================

/// Children as handed to the factory, before normalization.
///
/// A bare slot function is legal here; normalization wraps it into a
/// single-entry `default` slots mapping.
#[derive(Clone, Default)]
pub enum RawChildren {
    #[default]
    None,
    Text(String),
    Nodes(Vec<VNodeChild>),
    Slot(SlotFn),
    Slots(SlotsMap),
}

impl RawChildren {
    /// Wrap a closure as a bare default slot.
    pub fn slot(f: impl Fn() -> Vec<VNodeChild> + 'static) -> Self {
        RawChildren::Slot(Rc::new(f))
    }
}

impl fmt::Debug for RawChildren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawChildren::None => f.write_str("None"),
            RawChildren::Text(s) => write!(f, "Text({s:?})"),
            RawChildren::Nodes(nodes) => write!(f, "Nodes({nodes:?})"),
            RawChildren::Slot(_) => f.write_str("Slot"),
            RawChildren::Slots(slots) => write!(f, "Slots({slots:?})"),
        }
    }
}

impl From<&str> for RawChildren {
    fn from(value: &str) -> Self {
        RawChildren::Text(value.to_string())
    }
}

impl From<String> for RawChildren {
    fn from(value: String) -> Self {
        RawChildren::Text(value)
    }
}

impl From<Vec<VNodeChild>> for RawChildren {
    fn from(value: Vec<VNodeChild>) -> Self {
        RawChildren::Nodes(value)
    }
}

impl From<VNodeRef> for RawChildren {
    fn from(value: VNodeRef) -> Self {
        RawChildren::Nodes(vec![VNodeChild::Node(value)])
    }
}

impl From<SlotsMap> for RawChildren {
    fn from(value: SlotsMap) -> Self {
        RawChildren::Slots(value)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_coercions() {
        assert!(matches!(VNodeChild::from("hi"), VNodeChild::Text(s) if s == "hi"));
        assert!(matches!(VNodeChild::from(7i64), VNodeChild::Text(s) if s == "7"));
        assert!(matches!(VNodeChild::from(false), VNodeChild::Null));
        assert!(matches!(VNodeChild::from(true), VNodeChild::Null));
    }

    #[test]
    fn test_slots_map_preserves_order() {
        let mut slots = SlotsMap::new();
        slots.insert("footer", Rc::new(Vec::new) as SlotFn);
        slots.insert("default", Rc::new(Vec::new) as SlotFn);

        let names: Vec<&String> = slots.names().collect();
        assert_eq!(names, ["footer", "default"]);
        assert!(slots.get("default").is_some());
        assert!(slots.get("header").is_none());
    }

    #[test]
    fn test_markers() {
        assert!(VNodeType::Fragment.is_marker());
        assert!(VNodeType::Empty.is_marker());
        assert!(!VNodeType::element("box").is_marker());
        assert!(!VNodeType::Component(Rc::new(ComponentDef::named("App"))).is_marker());
    }
}
