//! # spark-vdom
//!
//! Virtual node construction and dynamic subtree tracking for Spark renderers.
//!
//! ## Architecture
//!
//! Generated render code calls into two cooperating pieces:
//!
//! - the **vnode factory** ([`create_vnode`]) - the single construction
//!   path for every node. It guards reactive props, normalizes class and
//!   style into canonical form, lifts `key`/`ref` out of props, classifies
//!   the node kind into a shape bitmask, and folds children in.
//! - the **block tracker** ([`open_block`] / [`create_block`]) - a
//!   thread-local stack that collects the patch-relevant vnodes created
//!   inside each structurally stable region, so the reconciler can update
//!   a block by walking a flat list instead of the whole tree.
//!
//! Props travel as [`PropsMap`] values; [`merge_props`] combines mappings
//! the way generated code composes them (classes concatenated, styles
//! merged, handlers accumulated, everything else last-write-wins).
//!
//! ## Modules
//!
//! - [`flags`] - shape and patch bitmasks
//! - [`vnode`] - the [`VNode`] struct, factory, and child normalization
//! - [`block`] - open/close protocol and dynamic child collection
//! - [`props`] - property values, normalization, and merging
//! - [`host`] - opaque handles bound by the host reconciler

pub mod block;
pub mod flags;
pub mod host;
pub mod props;
pub mod vnode;

// Re-export commonly used items
pub use flags::{PatchFlags, ShapeFlags};

pub use host::{AppContextId, HostNode, InstanceId};

pub use props::{
    merge_props, normalize_class, normalize_style, parse_string_style, to_display_string,
    EventHandler, Key, Origin, PropValue, PropsMap,
};

pub use vnode::{
    clone_vnode, create_element_vnode, create_empty_vnode, create_text_vnode, create_vnode,
    guard_reactive_props, normalize_children, normalize_vnode, Children, ComponentDef,
    RawChildren, RenderFn, SlotFn, SlotsMap, VNode, VNodeChild, VNodeRef, VNodeType,
};

pub use block::{create_block, open_block, open_block_count, reset_block_state, set_tracking};
