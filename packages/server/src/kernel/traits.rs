// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Validation, marker building and filtering are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseResourceStore, BaseGeocoder)

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::common::utils::GeocodedLocation;
use crate::common::ResourceId;
use crate::domains::resources::models::{CreateResource, Resource};

// =============================================================================
// Resource Store Trait (Infrastructure - document store read/write)
// =============================================================================

#[async_trait]
pub trait BaseResourceStore: Send + Sync {
    /// Read the whole collection (insertion order), optionally only published records
    async fn list_resources(&self, published_only: bool) -> Result<Vec<Resource>>;

    /// Read a single record
    async fn get_resource(&self, id: ResourceId) -> Result<Option<Resource>>;

    /// Insert one new record, returning it as stored
    async fn insert_resource(&self, input: CreateResource) -> Result<Resource>;
}

// =============================================================================
// Geocoder Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseGeocoder: Send + Sync {
    /// Resolve a free-text place to a coordinate. `Ok(None)` means "no match".
    async fn geocode(&self, location: &str) -> Result<Option<GeocodedLocation>>;
}

// =============================================================================
// Email Trait (Infrastructure - transactional email for the contact form)
// =============================================================================

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Send one templated email with the given template parameters
    async fn send_template(&self, params: BTreeMap<String, String>) -> Result<()>;
}
