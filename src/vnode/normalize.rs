//! Child normalization.
//!
//! Raw children arrive from generated render code in whatever shape was
//! cheapest to emit: a bare string, a node list, a slot closure. Before a
//! vnode is assembled they are folded into the canonical [`Children`]
//! storage, and the matching shape bit is reported so the factory can fold
//! it into the vnode's shape flag.
//!
//! [`normalize_vnode`] does the same for a single child position: whatever
//! a render function returned becomes a real vnode the reconciler can diff.

use crate::flags::{PatchFlags, ShapeFlags};
use crate::vnode::create::{create_empty_vnode, create_vnode};
use crate::vnode::node::{clone_vnode, VNodeRef};
use crate::vnode::types::{Children, RawChildren, SlotsMap, VNodeChild, VNodeType};

/// Fold raw children into canonical storage plus their shape contribution.
///
/// A single slot closure becomes a one-entry slots mapping under the
/// `"default"` name, so the component side only ever deals with named
/// slots.
pub fn normalize_children(children: RawChildren) -> (Children, ShapeFlags) {
    match children {
        RawChildren::None => (Children::None, ShapeFlags::NONE),
        RawChildren::Text(text) => (Children::Text(text), ShapeFlags::TEXT_CHILDREN),
        RawChildren::Nodes(nodes) => (Children::Nodes(nodes), ShapeFlags::ARRAY_CHILDREN),
        RawChildren::Slot(slot) => {
            let mut slots = SlotsMap::new();
            slots.insert("default", slot);
            (Children::Slots(slots), ShapeFlags::SLOTS_CHILDREN)
        }
        RawChildren::Slots(slots) => (Children::Slots(slots), ShapeFlags::SLOTS_CHILDREN),
    }
}

/// Normalize one child position into a vnode.
///
/// * `Null` becomes an Empty placeholder so the position survives diffing.
/// * `Text` becomes a Text vnode.
/// * `Nodes` gets wrapped in a Fragment; the list itself is not touched,
///   each entry is normalized later when the fragment's children are
///   walked.
/// * An existing vnode passes through untouched, unless it is already
///   mounted, in which case a fresh clone takes its place so the same
///   vnode never appears twice in a tree.
pub fn normalize_vnode(child: VNodeChild) -> VNodeRef {
    match child {
        VNodeChild::Null => create_empty_vnode(),
        VNodeChild::Text(text) => create_vnode(
            VNodeType::Text,
            None,
            RawChildren::Text(text),
            PatchFlags::NONE,
            None,
        ),
        VNodeChild::Nodes(nodes) => create_vnode(
            VNodeType::Fragment,
            None,
            RawChildren::Nodes(nodes),
            PatchFlags::NONE,
            None,
        ),
        VNodeChild::Node(vnode) => {
            if vnode.is_mounted() {
                clone_vnode(&vnode)
            } else {
                vnode
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostNode;
    use crate::vnode::create::create_element_vnode;
    use std::rc::Rc;

    #[test]
    fn test_text_children_fold() {
        let (children, flag) = normalize_children(RawChildren::Text("hi".into()));
        assert!(matches!(children, Children::Text(s) if s == "hi"));
        assert_eq!(flag, ShapeFlags::TEXT_CHILDREN);
    }

    #[test]
    fn test_single_slot_becomes_default() {
        let (children, flag) = normalize_children(RawChildren::slot(|| vec!["hi".into()]));
        match children {
            Children::Slots(slots) => {
                let names: Vec<&String> = slots.names().collect();
                assert_eq!(names, ["default"]);
                assert!(slots.get("default").is_some());
            }
            other => panic!("expected slots, got {other:?}"),
        }
        assert_eq!(flag, ShapeFlags::SLOTS_CHILDREN);
    }

    #[test]
    fn test_null_child_becomes_empty_vnode() {
        let vnode = normalize_vnode(VNodeChild::Null);
        assert!(matches!(vnode.vtype, VNodeType::Empty));
        assert!(matches!(vnode.children, Children::None));
    }

    #[test]
    fn test_text_child_becomes_text_vnode() {
        let vnode = normalize_vnode("count: 3".into());
        assert!(matches!(vnode.vtype, VNodeType::Text));
        assert!(matches!(&vnode.children, Children::Text(s) if s == "count: 3"));
    }

    #[test]
    fn test_node_list_wraps_in_fragment() {
        let a = create_element_vnode("box", None, RawChildren::None);
        let b = create_element_vnode("text", None, RawChildren::None);
        let vnode = normalize_vnode(VNodeChild::Nodes(vec![
            VNodeChild::Node(a.clone()),
            VNodeChild::Node(b.clone()),
        ]));
        assert!(matches!(vnode.vtype, VNodeType::Fragment));
        match &vnode.children {
            Children::Nodes(nodes) => {
                assert_eq!(nodes.len(), 2);
                assert!(
                    matches!(&nodes[0], VNodeChild::Node(n) if Rc::ptr_eq(n, &a)),
                    "list entries are carried over untouched"
                );
                assert!(matches!(&nodes[1], VNodeChild::Node(n) if Rc::ptr_eq(n, &b)));
            }
            other => panic!("expected node children, got {other:?}"),
        }
    }

    #[test]
    fn test_unmounted_vnode_passes_through() {
        let vnode = create_element_vnode("box", None, RawChildren::None);
        let normalized = normalize_vnode(VNodeChild::Node(vnode.clone()));
        assert!(Rc::ptr_eq(&normalized, &vnode));
    }

    #[test]
    fn test_mounted_vnode_is_cloned() {
        let vnode = create_element_vnode("box", None, RawChildren::None);
        vnode.el.set(Some(HostNode(7)));
        let normalized = normalize_vnode(VNodeChild::Node(vnode.clone()));
        assert!(!Rc::ptr_eq(&normalized, &vnode));
        assert_eq!(normalized.el.get(), None, "the clone starts unmounted");
        assert!(matches!(&normalized.vtype, VNodeType::Element(t) if t == "box"));
    }
}
