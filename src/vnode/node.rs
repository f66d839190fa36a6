//! The VNode record.
//!
//! One vnode describes one UI node for one render pass. Data and
//! optimization fields are fixed at creation; the mount-lifecycle fields are
//! `Cell`s because the reconciler fills them in later through the shared
//! [`VNodeRef`] handle. `dynamic_children` is a `RefCell` because the block
//! tracker attaches the collected list right after the root is built.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::flags::{PatchFlags, ShapeFlags};
use crate::host::{AppContextId, HostNode, InstanceId};
use crate::props::{Key, PropsMap};
use crate::vnode::types::{Children, VNodeType};

// =============================================================================
// VNode
// =============================================================================

/// Shared handle to a vnode.
///
/// Vnodes are single-threaded and immutable apart from their lifecycle
/// cells, so a plain `Rc` is the ownership model: render output, block
/// lists, and the reconciler's previous tree all hold the same node.
pub type VNodeRef = Rc<VNode>;

/// Description of one UI node for one render pass.
pub struct VNode {
    /// What this node is: element tag, component, or a reserved marker.
    pub vtype: VNodeType,
    /// Props after class/style normalization, or absent.
    pub props: Option<Rc<PropsMap>>,
    /// Stable identity hint for list diffing, lifted from `props["key"]`.
    pub key: Option<Key>,
    /// Identity binding request, lifted from `props["ref"]`.
    pub node_ref: Option<String>,
    /// Normalized children.
    pub children: Children,
    /// Node kind + children kind bits. Set once at creation.
    pub shape_flag: ShapeFlags,
    /// Compiler hints for what can change on update.
    pub patch_flag: PatchFlags,
    /// Prop keys known to be dynamic, when PROPS is set.
    pub dynamic_props: Option<Vec<String>>,
    /// Flat list of patch-relevant descendants. `Some` only on block roots.
    pub dynamic_children: RefCell<Option<Vec<VNodeRef>>>,

    // Mount-lifecycle bindings. Always absent at creation; the reconciler
    // populates them during mount and patch.
    /// Bound display-surface node.
    pub el: Cell<Option<HostNode>>,
    /// Fragment anchor on the display surface.
    pub anchor: Cell<Option<HostNode>>,
    /// Portal mount target.
    pub target: Cell<Option<HostNode>>,
    /// Owning component instance.
    pub component: Cell<Option<InstanceId>>,
    /// Owning application context.
    pub app_context: Cell<Option<AppContextId>>,
}

impl VNode {
    /// Check if the reconciler has bound this vnode to the display surface.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.el.get().is_some()
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNode")
            .field("vtype", &self.vtype)
            .field("key", &self.key)
            .field("shape_flag", &self.shape_flag)
            .field("patch_flag", &self.patch_flag)
            .field("children", &self.children)
            .field("el", &self.el.get())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Cloning
// =============================================================================

/// Clone a vnode into an unmounted copy.
///
/// Data and optimization fields carry over verbatim: props by shared handle,
/// children, key, ref, flags, dynamic props, and the dynamic-children list.
/// The portal target and application context survive too. The bindings that
/// tie the original to the display surface (element, anchor, component
/// instance) reset to absent, so the reconciler treats the clone as never
/// mounted.
pub fn clone_vnode(vnode: &VNode) -> VNodeRef {
    Rc::new(VNode {
        vtype: vnode.vtype.clone(),
        props: vnode.props.clone(),
        key: vnode.key.clone(),
        node_ref: vnode.node_ref.clone(),
        children: vnode.children.clone(),
        shape_flag: vnode.shape_flag,
        patch_flag: vnode.patch_flag,
        dynamic_props: vnode.dynamic_props.clone(),
        dynamic_children: RefCell::new(vnode.dynamic_children.borrow().clone()),
        el: Cell::new(None),
        anchor: Cell::new(None),
        target: Cell::new(vnode.target.get()),
        component: Cell::new(None),
        app_context: Cell::new(vnode.app_context.get()),
    })
}

// =============================================================================
// Tests
// =============================================================================
