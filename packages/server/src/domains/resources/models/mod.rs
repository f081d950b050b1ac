//! Resource domain models

pub mod resource;

pub use resource::{CreateResource, Resource, ResourceStatus};
