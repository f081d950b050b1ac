//! GraphQL edge resolvers for the map

pub mod query;

pub use query::*;
