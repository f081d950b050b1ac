//! GraphQL data types for resources

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::resources::models::{Resource, ResourceStatus};

/// Resource status for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum ResourceStatusData {
    PendingReview,
    Published,
}

impl From<&str> for ResourceStatusData {
    fn from(s: &str) -> Self {
        match s.parse::<ResourceStatus>() {
            Ok(ResourceStatus::Published) => ResourceStatusData::Published,
            _ => ResourceStatusData::PendingReview,
        }
    }
}

/// GraphQL type for Resource
#[derive(Debug, Clone, GraphQLObject)]
pub struct ResourceData {
    pub id: Uuid,
    pub organization_name: String,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub extra_tags: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub locations: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ResourceStatusData,
    pub submitted_at: DateTime<Utc>,
}

impl From<Resource> for ResourceData {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id.into_uuid(),
            status: ResourceStatusData::from(r.status.as_str()),
            organization_name: r.organization_name,
            website_url: r.website_url,
            description: r.description,
            category: r.category,
            extra_tags: r.extra_tags,
            email: r.email,
            phone: r.phone,
            locations: r.locations,
            latitude: r.latitude,
            longitude: r.longitude,
            submitted_at: r.submitted_at,
        }
    }
}

/// Public "add your resource" form.
///
/// Fields default to empty so a missing field is reported by validation
/// rather than rejected by the schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, GraphQLInputObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResourceInput {
    #[graphql(default)]
    #[serde(default)]
    pub org_name: String,
    #[graphql(default)]
    #[serde(default)]
    pub url: String,
    /// One or more locations, separated by newlines or semicolons
    #[graphql(default)]
    #[serde(default)]
    pub location: String,
    #[graphql(default)]
    #[serde(default)]
    pub email: String,
    #[graphql(default)]
    #[serde(default)]
    pub phone: String,
    #[graphql(default)]
    #[serde(default)]
    pub category_tags: String,
    #[graphql(default)]
    #[serde(default)]
    pub extra_tags: String,
    #[graphql(default)]
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct SubmitResourceResult {
    pub resource_id: Uuid,
    /// Confirmation text to show the submitter
    pub message: String,
    /// Milliseconds before the confirmation hides itself
    pub dismiss_after_ms: i32,
}
