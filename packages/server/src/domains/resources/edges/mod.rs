//! GraphQL edge resolvers for resources

pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
