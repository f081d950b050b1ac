//! Resources domain - the directory of organizations
//!
//! Resources are read for the map and the API, and written once by the public
//! submission form or the seed CLI. There is no edit or delete path.

pub mod actions;
pub mod data;
pub mod edges;
pub mod models;

// Re-export models
pub use models::{CreateResource, Resource, ResourceStatus};

// Re-export data types (GraphQL types)
pub use data::{ResourceData, ResourceStatusData, SubmitResourceInput, SubmitResourceResult};

pub use actions::SubmissionError;
