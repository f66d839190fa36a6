//! Opaque host-side handles.
//!
//! The reconciler binds these onto vnodes during mount and patch. This crate
//! stores and copies them but never dereferences them; they are plain indices
//! into whatever registries the host renderer keeps.

// =============================================================================
// Handles
// =============================================================================

/// A node on the real display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostNode(pub usize);

/// A mounted component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub usize);

/// The application context a subtree belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppContextId(pub usize);
