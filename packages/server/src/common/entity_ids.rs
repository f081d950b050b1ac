//! Typed ids for the persisted entities.

pub use super::id::Id;

/// Marker type for Resource entities (organization listings).
pub struct Resource;

/// Typed ID for Resource entities.
pub type ResourceId = Id<Resource>;
