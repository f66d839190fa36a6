//! VNode construction and normalization.
//!
//! The vnode is the unit of work for the whole renderer: generated render
//! code produces trees of them, the block tracker collects the dynamic
//! ones, and the reconciler diffs them. This module owns the vnode shape
//! itself plus every path that produces one.
//!
//! # Architecture
//!
//! - `types` - node kind, children storage, slot mappings
//! - `node` - the [`VNode`] struct and [`clone_vnode`]
//! - `create` - the [`create_vnode`] factory and convenience creators
//! - `normalize` - raw child folding and single-child normalization

mod create;
mod node;
mod normalize;
mod types;

pub use create::{
    create_element_vnode, create_empty_vnode, create_text_vnode, create_vnode,
    guard_reactive_props,
};
pub use node::{clone_vnode, VNode, VNodeRef};
pub use normalize::{normalize_children, normalize_vnode};
pub use types::{
    Children, ComponentDef, RawChildren, RenderFn, SlotFn, SlotsMap, VNodeChild, VNodeType,
};
