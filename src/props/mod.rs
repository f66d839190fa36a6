//! Property handling - the value model, normalization, and merging.
//!
//! This module provides everything props-related:
//! - [`PropValue`] / [`PropsMap`] - the dynamic value shapes render code produces
//! - [`normalize_class`] / [`normalize_style`] - canonical class/style forms
//! - [`merge_props`] - spread/mixin composition with handler accumulation
//!
//! # Ownership
//!
//! Mappings carry an [`Origin`] marker. The factory never mutates a mapping
//! whose origin is `Reactive` or `SetupState`; it shallow-copies first. See
//! [`guard_reactive_props`](crate::guard_reactive_props).

mod merge;
mod normalize;
mod value;

pub use merge::merge_props;
pub use normalize::{normalize_class, normalize_style, parse_string_style};
pub use value::{to_display_string, EventHandler, Key, Origin, PropValue, PropsMap};
