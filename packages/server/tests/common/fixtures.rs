//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use serde_json::{json, Value};
use server_core::domains::resources::models::{CreateResource, Resource, ResourceStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Organization name that won't collide with other tests sharing the database
pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4().simple())
}

/// Insert a published resource
pub async fn create_test_resource(
    pool: &PgPool,
    name: &str,
    category: Option<&str>,
    location: &str,
    coords: Option<(f64, f64)>,
) -> Result<Resource> {
    create_test_resource_with_status(pool, name, category, location, coords, ResourceStatus::Published)
        .await
}

pub async fn create_test_resource_with_status(
    pool: &PgPool,
    name: &str,
    category: Option<&str>,
    location: &str,
    coords: Option<(f64, f64)>,
    status: ResourceStatus,
) -> Result<Resource> {
    Resource::create(
        CreateResource {
            organization_name: name.to_string(),
            website_url: Some("https://example.org".to_string()),
            description: Some(format!("{} helps neighbors", name)),
            category: category.map(String::from),
            extra_tags: None,
            email: Some("info@example.org".to_string()),
            phone: Some("+16125550100".to_string()),
            locations: vec![location.to_string()],
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lng)| lng),
            status,
        },
        pool,
    )
    .await
}

/// A complete submission form, as GraphQL input JSON
pub fn submission_input(org_name: &str) -> Value {
    json!({
        "orgName": org_name,
        "url": "pantry.org",
        "location": "Minneapolis, MN",
        "email": "hello@pantry.org",
        "phone": "1234567890",
        "categoryTags": "Food",
        "extraTags": "groceries",
        "description": "Weekly food distribution"
    })
}
