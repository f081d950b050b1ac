//! GraphQL data types for the contact form

use juniper::{GraphQLInputObject, GraphQLObject};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphQLInputObject)]
pub struct ContactMessageInput {
    #[graphql(default)]
    #[serde(default)]
    pub name: String,
    #[graphql(default)]
    #[serde(default)]
    pub email: String,
    #[graphql(default)]
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct ContactMessageResult {
    pub sent: bool,
    pub message: String,
}
