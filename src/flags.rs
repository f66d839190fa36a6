//! Flag encodings for vnodes.
//!
//! Two independent bitmask vocabularies flow through the whole runtime:
//! - [`ShapeFlags`] describes what a vnode *is* (node kind + children kind).
//! - [`PatchFlags`] describes what can *change* on update (compiler hints).
//!
//! Both are plain bitfields because categories legitimately co-occur on one
//! node and callers combine them freely with bitwise OR. The compiler emits
//! them; the reconciler switches on them; this crate only sets and reads them.

// =============================================================================
// Shape Flags
// =============================================================================

bitflags::bitflags! {
    /// What kind of node this is and what kind of children it carries.
    ///
    /// Exactly one of the node-kind bits (ELEMENT, STATEFUL_COMPONENT,
    /// FUNCTIONAL_COMPONENT) is set at creation, or none for the reserved
    /// marker types (Fragment, Text, Empty, Portal). At most one children
    /// bit is OR-ed in after children normalization.
    ///
    /// Combine with bitwise OR: `ShapeFlags::ELEMENT | ShapeFlags::TEXT_CHILDREN`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ShapeFlags: u16 {
        const NONE = 0;
        const ELEMENT = 1 << 0;
        const FUNCTIONAL_COMPONENT = 1 << 1;
        const STATEFUL_COMPONENT = 1 << 2;
        const TEXT_CHILDREN = 1 << 3;
        const ARRAY_CHILDREN = 1 << 4;
        const SLOTS_CHILDREN = 1 << 5;
        /// Reserved for fragment list diffing (keyed variant).
        const KEYED_FRAGMENT = 1 << 6;
        /// Reserved for fragment list diffing (unkeyed variant).
        const UNKEYED_FRAGMENT = 1 << 7;
        /// Either component kind. Derived mask, never set directly.
        const COMPONENT = Self::STATEFUL_COMPONENT.bits() | Self::FUNCTIONAL_COMPONENT.bits();
    }
}

impl ShapeFlags {
    /// Check if this vnode is a component (stateful or functional).
    #[inline]
    pub const fn is_component(&self) -> bool {
        self.intersects(Self::COMPONENT)
    }

    /// Check if this vnode is a host element.
    #[inline]
    pub const fn is_element(&self) -> bool {
        self.contains(Self::ELEMENT)
    }
}

// =============================================================================
// Patch Flags
// =============================================================================

bitflags::bitflags! {
    /// Which aspects of a vnode can change between renders.
    ///
    /// Emitted by the compiler when it can prove a binding is dynamic. A zero
    /// value means fully static: the reconciler may skip the node entirely
    /// unless it sits on a block's dynamic-children list for another reason.
    ///
    /// Flags combine additively within one node only, never across nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PatchFlags: u32 {
        const NONE = 0;
        /// Dynamic text content.
        const TEXT = 1 << 0;
        /// Dynamic class binding. The compiler guarantees the class prop
        /// is already a plain string when this is set.
        const CLASS = 1 << 1;
        /// Dynamic style binding.
        const STYLE = 1 << 2;
        /// Dynamic non-class/style props, listed in `dynamic_props`.
        const PROPS = 1 << 3;
        /// Props with dynamic keys. Every prop must be diffed.
        const FULL_PROPS = 1 << 4;
        /// Fragment whose children order never changes.
        const STABLE_FRAGMENT = 1 << 5;
        /// Fragment with keyed or partially keyed children.
        const KEYED_FRAGMENT = 1 << 6;
        /// Fragment with unkeyed children.
        const UNKEYED_FRAGMENT = 1 << 7;
        /// Node with directives or refs that need a patch visit even
        /// though no props changed.
        const NEED_PATCH = 1 << 8;
        /// Component with dynamic slot content.
        const DYNAMIC_SLOTS = 1 << 9;
        /// Optimization bailout: diff this subtree in full.
        const BAIL = 1 << 31;
    }
}

impl PatchFlags {
    /// Check if the reconciler must look at this node at all.
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        !self.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
