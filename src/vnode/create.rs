//! VNode factory - where every vnode is born.
//!
//! [`create_vnode`] is the single construction path for render code, the
//! convenience creators, the block tracker, and the child normalizer. It
//! owns the creation-time invariants: props are never mutated unless this
//! crate exclusively owns them, class/style land in canonical form, the
//! shape flag is classified exactly once, and patch-relevant nodes register
//! with the currently open block.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::block;
use crate::flags::{PatchFlags, ShapeFlags};
use crate::props::{normalize_class, normalize_style, Key, PropValue, PropsMap};
use crate::vnode::node::{VNode, VNodeRef};
use crate::vnode::normalize::normalize_children;
use crate::vnode::types::{RawChildren, VNodeType};

// =============================================================================
// Factory
// =============================================================================

/// Create a vnode.
///
/// # Arguments
/// * `vtype` - Element tag, component, or reserved marker.
/// * `props` - Optional property mapping. Copied first if owned by the
///   reactivity layer or a component's setup state.
/// * `patch_flag` - Compiler hints for what can change on update.
/// * `dynamic_props` - Prop keys known to be dynamic, when PROPS is set.
///
/// # Returns
/// The new vnode. If tracking is enabled and the node is patch-relevant
/// (non-zero patch flag, or a component of either kind), it has been
/// registered with the innermost open block.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spark_vdom::{create_vnode, PatchFlags, PropsMap, RawChildren, ShapeFlags, VNodeType};
///
/// let props = Rc::new(PropsMap::from([("class", "btn primary".into())]));
/// let vnode = create_vnode(
///     VNodeType::element("button"),
///     Some(props),
///     RawChildren::Text("Save".into()),
///     PatchFlags::TEXT,
///     None,
/// );
/// assert!(vnode.shape_flag.contains(ShapeFlags::ELEMENT | ShapeFlags::TEXT_CHILDREN));
/// ```
pub fn create_vnode(
    vtype: VNodeType,
    props: Option<Rc<PropsMap>>,
    children: RawChildren,
    patch_flag: PatchFlags,
    dynamic_props: Option<Vec<String>>,
) -> VNodeRef {
    // 1. GUARD PROPS - shallow-copy unless exclusively owned
    let mut props = guard_reactive_props(props);

    // 2. NORMALIZE CLASS/STYLE - canonical forms, written back in place
    if let Some(map) = props.as_mut() {
        // When the compiler marked class as tracked-dynamic it already
        // guarantees a plain string, so normalization is skipped.
        if !patch_flag.contains(PatchFlags::CLASS) {
            if let Some(class) = map.get("class") {
                let normalized = normalize_class(class);
                Rc::make_mut(map).insert("class", PropValue::Str(normalized));
            }
        }
        if let Some(style) = map.get("style").cloned() {
            // A reactive style mapping gets its own shell before the
            // normalized form is stored back.
            let style = match style {
                PropValue::Map(inner) if !inner.is_plain() => {
                    PropValue::Map(Rc::new(inner.shallow_copy()))
                }
                other => other,
            };
            if let Some(normalized) = normalize_style(&style) {
                Rc::make_mut(map).insert("style", normalized);
            }
        }
    }

    // 3. LIFT KEY/REF - identity hints move out of props
    let key = props.as_ref().and_then(|map| match map.get("key") {
        Some(PropValue::Int(i)) => Some(Key::Int(*i)),
        Some(PropValue::Str(s)) => Some(Key::Str(s.clone())),
        _ => None,
    });
    let node_ref = props.as_ref().and_then(|map| match map.get("ref") {
        Some(PropValue::Str(s)) => Some(s.clone()),
        _ => None,
    });

    // 4. CLASSIFY SHAPE - markers carry no node-kind bit
    let mut shape_flag = match &vtype {
        VNodeType::Element(_) => ShapeFlags::ELEMENT,
        VNodeType::Component(_) => ShapeFlags::STATEFUL_COMPONENT,
        VNodeType::FunctionalComponent(_) => ShapeFlags::FUNCTIONAL_COMPONENT,
        VNodeType::Fragment | VNodeType::Text | VNodeType::Empty | VNodeType::Portal => {
            ShapeFlags::NONE
        }
    };

    // 5. NORMALIZE CHILDREN - fold the children bit in
    let (children, children_flag) = normalize_children(children);
    shape_flag |= children_flag;

    // 6. ASSEMBLE
    let vnode = Rc::new(VNode {
        vtype,
        props,
        key,
        node_ref,
        children,
        shape_flag,
        patch_flag,
        dynamic_props,
        dynamic_children: RefCell::new(None),
        el: Cell::new(None),
        anchor: Cell::new(None),
        target: Cell::new(None),
        component: Cell::new(None),
        app_context: Cell::new(None),
    });

    // 7. TRACK - register with the open block. Components register even
    //    with a zero patch flag: the reconciler visits every component
    //    vnode on every pass to decide whether to re-render and to carry
    //    its instance binding forward.
    if patch_flag.is_dynamic() || shape_flag.is_component() {
        block::track_vnode(&vnode);
    }

    vnode
}

/// Shallow-copy a props mapping unless the caller exclusively owns it.
///
/// The factory mutates `class` and `style` in place; a mapping owned by the
/// reactivity layer or by a component's setup state must keep its identity,
/// so the copy happens before any mutation. Plain mappings pass through.
pub fn guard_reactive_props(props: Option<Rc<PropsMap>>) -> Option<Rc<PropsMap>> {
    match props {
        Some(map) if !map.is_plain() => Some(Rc::new(map.shallow_copy())),
        other => other,
    }
}

// =============================================================================
// Convenience Creators
// =============================================================================

/// Create a Text vnode with the given content.
pub fn create_text_vnode(text: impl Into<String>, patch_flag: PatchFlags) -> VNodeRef {
    create_vnode(
        VNodeType::Text,
        None,
        RawChildren::Text(text.into()),
        patch_flag,
        None,
    )
}

/// Create an Empty vnode: renders nothing, occupies a position.
pub fn create_empty_vnode() -> VNodeRef {
    create_vnode(
        VNodeType::Empty,
        None,
        RawChildren::None,
        PatchFlags::NONE,
        None,
    )
}

/// Create a fully static element vnode. Shorthand used by generated code
/// for plain elements with no compiler hints.
pub fn create_element_vnode(
    tag: impl Into<String>,
    props: Option<Rc<PropsMap>>,
    children: RawChildren,
) -> VNodeRef {
    create_vnode(
        VNodeType::Element(tag.into()),
        props,
        children,
        PatchFlags::NONE,
        None,
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::Origin;
    use crate::vnode::types::{Children, ComponentDef};

    #[test]
    fn test_element_shape_classification() {
        let vnode = create_vnode(
            VNodeType::element("box"),
            None,
            RawChildren::Text("hi".into()),
            PatchFlags::NONE,
            None,
        );
        assert!(vnode.shape_flag.contains(ShapeFlags::ELEMENT));
        assert!(vnode.shape_flag.contains(ShapeFlags::TEXT_CHILDREN));
        assert!(!vnode.shape_flag.is_component());
    }

    #[test]
    fn test_component_shape_classification() {
        let stateful = create_vnode(
            VNodeType::Component(Rc::new(ComponentDef::named("App"))),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        assert!(stateful.shape_flag.contains(ShapeFlags::STATEFUL_COMPONENT));

        let functional = create_vnode(
            VNodeType::FunctionalComponent(Rc::new(|_| "out".into())),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        assert!(functional
            .shape_flag
            .contains(ShapeFlags::FUNCTIONAL_COMPONENT));
    }

    #[test]
    fn test_marker_has_no_node_kind_bit() {
        let fragment = create_vnode(
            VNodeType::Fragment,
            None,
            RawChildren::Nodes(Vec::new()),
            PatchFlags::NONE,
            None,
        );
        assert!(!fragment.shape_flag.contains(ShapeFlags::ELEMENT));
        assert!(!fragment.shape_flag.is_component());
        assert!(fragment.shape_flag.contains(ShapeFlags::ARRAY_CHILDREN));
    }

    #[test]
    fn test_class_normalized_at_creation() {
        let props = Rc::new(PropsMap::from([(
            "class",
            PropValue::List(vec![
                "a".into(),
                PropsMap::from([("b", true.into()), ("c", false.into())]).into(),
            ]),
        )]));
        let vnode = create_vnode(
            VNodeType::element("box"),
            Some(props),
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        let stored = vnode.props.as_ref().expect("props kept");
        assert_eq!(stored.get("class").and_then(|v| v.as_str()), Some("a b"));
    }

    #[test]
    fn test_class_skipped_when_compiler_tracked() {
        let props = Rc::new(PropsMap::from([("class", "already  plain".into())]));
        let vnode = create_vnode(
            VNodeType::element("box"),
            Some(props.clone()),
            RawChildren::None,
            PatchFlags::CLASS,
            None,
        );
        let stored = vnode.props.as_ref().expect("props kept");
        assert_eq!(
            stored.get("class").and_then(|v| v.as_str()),
            Some("already  plain"),
            "value stored untouched"
        );
        assert!(
            Rc::ptr_eq(stored, &props),
            "no copy happens when nothing is normalized"
        );
    }

    #[test]
    fn test_style_normalized_at_creation() {
        let props = Rc::new(PropsMap::from([(
            "style",
            PropValue::List(vec![
                PropsMap::from([("color", "red".into())]).into(),
                PropsMap::from([("color", "blue".into())]).into(),
            ]),
        )]));
        let vnode = create_vnode(
            VNodeType::element("box"),
            Some(props),
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        let stored = vnode.props.as_ref().expect("props kept");
        match stored.get("style") {
            Some(PropValue::Map(map)) => {
                assert_eq!(map.get("color").and_then(|v| v.as_str()), Some("blue"))
            }
            other => panic!("expected merged style map, got {other:?}"),
        }
    }

    #[test]
    fn test_string_style_passes_through() {
        let props = Rc::new(PropsMap::from([("style", "color: red".into())]));
        let vnode = create_vnode(
            VNodeType::element("box"),
            Some(props),
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        let stored = vnode.props.as_ref().expect("props kept");
        assert_eq!(
            stored.get("style").and_then(|v| v.as_str()),
            Some("color: red"),
            "pre-serialized style text stays as given"
        );
    }

    #[test]
    fn test_reactive_props_are_copied_before_mutation() {
        let mut source = PropsMap::with_origin(Origin::Reactive);
        source.insert("class", PropValue::List(vec!["a".into(), "b".into()]));
        let source = Rc::new(source);

        let vnode = create_vnode(
            VNodeType::element("box"),
            Some(source.clone()),
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );

        // The caller's mapping still holds the raw list.
        assert!(matches!(source.get("class"), Some(PropValue::List(_))));
        // The vnode holds a plain copy with the normalized string.
        let stored = vnode.props.as_ref().expect("props kept");
        assert!(!Rc::ptr_eq(stored, &source));
        assert!(stored.is_plain());
        assert_eq!(stored.get("class").and_then(|v| v.as_str()), Some("a b"));
    }

    #[test]
    fn test_reactive_style_map_is_copied() {
        let style = Rc::new({
            let mut map = PropsMap::with_origin(Origin::Reactive);
            map.insert("color", "red");
            map
        });
        let props = Rc::new(PropsMap::from([("style", style.clone().into())]));

        let vnode = create_vnode(
            VNodeType::element("box"),
            Some(props),
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        let stored = vnode.props.as_ref().expect("props kept");
        match stored.get("style") {
            Some(PropValue::Map(map)) => {
                assert!(!Rc::ptr_eq(map, &style), "reactive style got its own shell");
                assert!(map.is_plain());
                assert_eq!(map.get("color").and_then(|v| v.as_str()), Some("red"));
            }
            other => panic!("expected style map, got {other:?}"),
        }
    }

    #[test]
    fn test_key_and_ref_lifted() {
        let props = Rc::new(PropsMap::from([
            ("key", "row-3".into()),
            ("ref", "list".into()),
        ]));
        let vnode = create_vnode(
            VNodeType::element("box"),
            Some(props),
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        assert_eq!(vnode.key, Some(Key::Str("row-3".to_string())));
        assert_eq!(vnode.node_ref.as_deref(), Some("list"));

        let keyless = create_element_vnode("box", None, RawChildren::None);
        assert_eq!(keyless.key, None);
        assert_eq!(keyless.node_ref, None);
    }

    #[test]
    fn test_text_vnode_creator() {
        let vnode = create_text_vnode("hello", PatchFlags::TEXT);
        assert!(matches!(vnode.vtype, VNodeType::Text));
        assert!(matches!(&vnode.children, Children::Text(s) if s == "hello"));
        assert!(vnode.shape_flag.contains(ShapeFlags::TEXT_CHILDREN));
        assert_eq!(vnode.patch_flag, PatchFlags::TEXT);
    }

    #[test]
    fn test_empty_vnode_creator() {
        let vnode = create_empty_vnode();
        assert!(matches!(vnode.vtype, VNodeType::Empty));
        assert!(matches!(vnode.children, Children::None));
        assert_eq!(vnode.shape_flag, ShapeFlags::NONE);
        assert_eq!(vnode.patch_flag, PatchFlags::NONE);
    }
}
