//! Block tracking - dynamic subtree collection.
//!
//! A block is a region of the tree whose node structure is stable between
//! renders, so the reconciler can skip the full tree walk and visit only
//! the nodes that can actually change. While a block is open, every
//! patch-relevant vnode the factory produces is collected into a flat
//! list; closing the block attaches that list to the block root as its
//! `dynamic_children`.
//!
//! # Pattern
//!
//! Generated render code brackets every structurally stable region:
//!
//! ```ignore
//! use spark_vdom::{open_block, create_block, create_vnode};
//!
//! open_block(false);
//! // ... create children; patch-relevant ones are collected ...
//! let root = create_block(vtype, props, children, patch_flag, None);
//! // root.dynamic_children now holds the collected list
//! ```
//!
//! Nesting is strictly stack-disciplined: a region's open/close pair must
//! fully bracket the opens and closes of any nested region. An unbalanced
//! caller corrupts the lists of unrelated blocks; `create_block` asserts
//! the stack is non-empty in debug builds, and [`reset_block_state`] is
//! the recovery hatch.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::flags::PatchFlags;
use crate::props::PropsMap;
use crate::vnode::{create_vnode, RawChildren, VNodeRef, VNodeType};

// =============================================================================
// Tracker State
// =============================================================================

thread_local! {
    /// Stack of open blocks. `Some` holds the collection list; `None` is
    /// the disabled marker pushed for fragment blocks, which are cheap to
    /// fully diff and intentionally collect nothing at their own level.
    static BLOCK_STACK: RefCell<Vec<Option<Vec<VNodeRef>>>> = RefCell::new(Vec::new());

    /// Global off-switch. While false, nothing registers anywhere.
    static TRACKING_ENABLED: Cell<bool> = const { Cell::new(true) };
}

// =============================================================================
// Block Protocol
// =============================================================================

/// Open a block. Must be called before building the children of the
/// region it scopes.
///
/// With `disable_tracking` the entry is a marker instead of a list:
/// children created inside are not collected at this level, though outer
/// blocks still see the eventual block root.
pub fn open_block(disable_tracking: bool) {
    BLOCK_STACK.with(|stack| {
        stack
            .borrow_mut()
            .push(if disable_tracking { None } else { Some(Vec::new()) });
    })
}

/// Register a patch-relevant vnode with the innermost open block.
///
/// No-op when tracking is globally off, when no block is open, or when
/// the innermost entry is the disabled marker.
pub(crate) fn track_vnode(vnode: &VNodeRef) {
    if !TRACKING_ENABLED.with(|flag| flag.get()) {
        return;
    }
    BLOCK_STACK.with(|stack| {
        if let Some(Some(list)) = stack.borrow_mut().last_mut() {
            list.push(vnode.clone());
        }
    })
}

/// Close the innermost block and create its root vnode.
///
/// The root is built with tracking suspended so it cannot register into
/// its own list. The popped list (or an empty one, for a disabled entry)
/// becomes the root's `dynamic_children`, and the root then registers
/// with the enclosing block: a block root is always a patch candidate,
/// whatever its own patch flag, because the reconciler recurses into its
/// collected list.
///
/// # Arguments
/// Same as [`create_vnode`].
pub fn create_block(
    vtype: VNodeType,
    props: Option<Rc<PropsMap>>,
    children: RawChildren,
    patch_flag: PatchFlags,
    dynamic_props: Option<Vec<String>>,
) -> VNodeRef {
    let was_enabled = TRACKING_ENABLED.with(|flag| flag.replace(false));
    let vnode = create_vnode(vtype, props, children, patch_flag, dynamic_props);
    TRACKING_ENABLED.with(|flag| flag.set(was_enabled));

    let collected = BLOCK_STACK.with(|stack| stack.borrow_mut().pop());
    debug_assert!(
        collected.is_some(),
        "create_block called without a matching open_block"
    );
    *vnode.dynamic_children.borrow_mut() = Some(collected.flatten().unwrap_or_default());

    track_vnode(&vnode);
    vnode
}

/// Turn registration on or off globally.
///
/// Generated code uses this to instantiate cached subtrees without
/// collecting them, re-enabling afterwards. [`create_block`] saves and
/// restores the flag around the root's own construction.
pub fn set_tracking(enabled: bool) {
    TRACKING_ENABLED.with(|flag| flag.set(enabled));
}

/// Number of currently open blocks. Zero after a balanced render pass.
pub fn open_block_count() -> usize {
    BLOCK_STACK.with(|stack| stack.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all tracker state (for testing, and for host-side recovery after
/// an unbalanced render pass).
pub fn reset_block_state() {
    BLOCK_STACK.with(|stack| stack.borrow_mut().clear());
    TRACKING_ENABLED.with(|flag| flag.set(true));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::ShapeFlags;
    use crate::vnode::{create_element_vnode, ComponentDef};

    fn dynamic_el(tag: &str) -> VNodeRef {
        create_vnode(
            VNodeType::element(tag),
            None,
            RawChildren::None,
            PatchFlags::TEXT,
            None,
        )
    }

    fn collected(vnode: &VNodeRef) -> Vec<VNodeRef> {
        vnode
            .dynamic_children
            .borrow()
            .clone()
            .expect("block root carries a dynamic children list")
    }

    #[test]
    fn test_open_close_balance() {
        reset_block_state();

        assert_eq!(open_block_count(), 0);
        open_block(false);
        assert_eq!(open_block_count(), 1);
        create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        assert_eq!(open_block_count(), 0);
    }

    #[test]
    fn test_block_collects_only_patch_relevant_children() {
        reset_block_state();

        open_block(false);
        let a = dynamic_el("text");
        let b = dynamic_el("box");
        let stat = create_element_vnode("box", None, RawChildren::None);
        let c = dynamic_el("input");
        let root = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );

        let list = collected(&root);
        assert_eq!(list.len(), 3, "the static child is not collected");
        assert!(Rc::ptr_eq(&list[0], &a), "creation order is preserved");
        assert!(Rc::ptr_eq(&list[1], &b));
        assert!(Rc::ptr_eq(&list[2], &c));
        assert!(!list.iter().any(|v| Rc::ptr_eq(v, &stat)));
    }

    #[test]
    fn test_component_collected_with_zero_patch_flag() {
        reset_block_state();

        open_block(false);
        let comp = create_vnode(
            VNodeType::Component(Rc::new(ComponentDef::named("Row"))),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        assert!(comp.shape_flag.contains(ShapeFlags::STATEFUL_COMPONENT));
        let root = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );

        let list = collected(&root);
        assert_eq!(list.len(), 1);
        assert!(Rc::ptr_eq(&list[0], &comp));
    }

    #[test]
    fn test_root_never_registers_into_its_own_list() {
        reset_block_state();

        open_block(false);
        let root = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::TEXT,
            None,
        );

        assert!(
            collected(&root).is_empty(),
            "a patch-flagged root must not appear in its own list"
        );
    }

    #[test]
    fn test_nested_blocks_register_inner_root_with_outer() {
        reset_block_state();

        open_block(false);
        let a1 = dynamic_el("text");

        open_block(false);
        let b1 = dynamic_el("text");
        let inner = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );

        let a2 = dynamic_el("input");
        let outer = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );

        let inner_list = collected(&inner);
        assert_eq!(inner_list.len(), 1);
        assert!(Rc::ptr_eq(&inner_list[0], &b1));

        let outer_list = collected(&outer);
        assert_eq!(outer_list.len(), 3);
        assert!(Rc::ptr_eq(&outer_list[0], &a1));
        assert!(
            Rc::ptr_eq(&outer_list[1], &inner),
            "the inner root lands in the outer list at its creation position"
        );
        assert!(Rc::ptr_eq(&outer_list[2], &a2));
    }

    #[test]
    fn test_disabled_block_collects_nothing_but_still_registers() {
        reset_block_state();

        open_block(false);

        open_block(true);
        dynamic_el("text");
        dynamic_el("box");
        let fragment = create_block(
            VNodeType::Fragment,
            None,
            RawChildren::Nodes(Vec::new()),
            PatchFlags::STABLE_FRAGMENT,
            None,
        );

        let outer = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );

        assert_eq!(
            collected(&fragment).len(),
            0,
            "a disabled block ends with an empty list, not an absent one"
        );
        let outer_list = collected(&outer);
        assert_eq!(outer_list.len(), 1);
        assert!(Rc::ptr_eq(&outer_list[0], &fragment));
    }

    #[test]
    fn test_set_tracking_suspends_registration() {
        reset_block_state();

        open_block(false);
        set_tracking(false);
        dynamic_el("text");
        let cached = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        set_tracking(true);

        open_block(false);
        let visible = dynamic_el("text");
        let root = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );

        // The suspended block closed without registering anywhere, and the
        // children created while suspended were never collected.
        assert!(collected(&cached).is_empty());
        let list = collected(&root);
        assert_eq!(list.len(), 1);
        assert!(Rc::ptr_eq(&list[0], &visible));
    }

    #[test]
    fn test_create_block_preserves_suspended_tracking() {
        reset_block_state();

        open_block(false);
        set_tracking(false);
        let root = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        assert!(collected(&root).is_empty());

        // The flag the caller set is still in force afterwards.
        open_block(false);
        dynamic_el("text");
        let second = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        assert!(collected(&second).is_empty());

        reset_block_state();
    }

    #[test]
    fn test_vnodes_outside_any_block_are_ignored() {
        reset_block_state();

        // No block open: creation succeeds and nothing is recorded.
        let vnode = dynamic_el("text");
        assert_eq!(vnode.patch_flag, PatchFlags::TEXT);
        assert_eq!(open_block_count(), 0);
    }

    #[test]
    fn test_reset_clears_unbalanced_state() {
        reset_block_state();

        open_block(false);
        open_block(false);
        set_tracking(false);
        assert_eq!(open_block_count(), 2);

        reset_block_state();
        assert_eq!(open_block_count(), 0);

        // Tracking is back on.
        open_block(false);
        let child = dynamic_el("text");
        let root = create_block(
            VNodeType::element("box"),
            None,
            RawChildren::None,
            PatchFlags::NONE,
            None,
        );
        let list = collected(&root);
        assert_eq!(list.len(), 1);
        assert!(Rc::ptr_eq(&list[0], &child));
    }
}
