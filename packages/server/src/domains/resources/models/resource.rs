//! Resource model - one organization's listing in the directory
//!
//! Resources are written once (by the public form or the seed CLI) and never
//! edited afterwards. Coordinates are optional; a resource without both
//! latitude and longitude is listed but never placed on the map.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::ResourceId;

/// Resource status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    PendingReview,
    Published,
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceStatus::PendingReview => write!(f, "pending_review"),
            ResourceStatus::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for ResourceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending_review" => Ok(ResourceStatus::PendingReview),
            "published" => Ok(ResourceStatus::Published),
            _ => Err(anyhow::anyhow!("Invalid resource status: {}", s)),
        }
    }
}

/// Resource - an organization offering support services
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    pub id: ResourceId,

    // Organization
    pub organization_name: String,
    pub website_url: Option<String>,
    pub description: Option<String>,

    // Classification
    pub category: Option<String>,
    pub extra_tags: Option<String>,

    // Contact
    pub email: Option<String>,
    pub phone: Option<String>,

    // Location
    pub locations: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Publication
    pub status: String,

    // Timestamps
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a resource
#[derive(Debug, Clone, PartialEq)]
pub struct CreateResource {
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
    pub status: ResourceStatus,
}

impl Resource {
    /// Parsed status; unknown values are treated as not yet reviewed.
    pub fn status(&self) -> ResourceStatus {
        self.status
            .parse()
            .unwrap_or(ResourceStatus::PendingReview)
    }

    pub fn is_published(&self) -> bool {
        self.status() == ResourceStatus::Published
    }

    /// Location label shown for this resource (first listed location)
    pub fn primary_location(&self) -> Option<&str> {
        self.locations.first().map(String::as_str)
    }

    /// Find resource by ID (optional)
    pub async fn find_by_id_optional(id: ResourceId, pool: &PgPool) -> Result<Option<Self>> {
        let resource = sqlx::query_as::<_, Self>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(resource)
    }

    /// Find a resource with an exact organization name listed at `location`
    pub async fn find_by_name_and_location(
        name: &str,
        location: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let resource = sqlx::query_as::<_, Self>(
            "SELECT * FROM resources
             WHERE organization_name = $1 AND $2 = ANY(locations)
             ORDER BY created_at ASC
             LIMIT 1",
        )
        .bind(name)
        .bind(location)
        .fetch_optional(pool)
        .await?;
        Ok(resource)
    }

    /// All resources in insertion order
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let resources = sqlx::query_as::<_, Self>(
            "SELECT * FROM resources ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(resources)
    }

    /// Resources with a given status, in insertion order
    pub async fn find_by_status(status: ResourceStatus, pool: &PgPool) -> Result<Vec<Self>> {
        let resources = sqlx::query_as::<_, Self>(
            "SELECT * FROM resources
             WHERE status = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(status.to_string())
        .fetch_all(pool)
        .await?;
        Ok(resources)
    }

    /// Create a new resource. `submitted_at` is set by the database clock.
    pub async fn create(input: CreateResource, pool: &PgPool) -> Result<Self> {
        let resource = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO resources (
                id, organization_name, website_url, description, category,
                extra_tags, email, phone, locations, latitude, longitude, status,
                submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
            RETURNING *
            "#,
        )
        .bind(ResourceId::new())
        .bind(&input.organization_name)
        .bind(&input.website_url)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.extra_tags)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.locations)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.status.to_string())
        .fetch_one(pool)
        .await?;
        Ok(resource)
    }

    /// Count all resources
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resources")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
