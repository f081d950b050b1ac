//! Server dependencies (using traits for testability)
//!
//! This module provides the dependency container shared by GraphQL resolvers
//! and domain actions, plus the production adapters behind each trait.

use anyhow::Result;
use async_trait::async_trait;
use emailjs::EmailJsService;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::common::utils::{geocode_place, lookup_known_city, GeocodedLocation};
use crate::common::ResourceId;
use crate::domains::map::MapSettings;
use crate::domains::resources::models::{CreateResource, Resource, ResourceStatus};
use crate::kernel::{BaseEmailService, BaseGeocoder, BaseResourceStore};

// =============================================================================
// Postgres resource store (implements BaseResourceStore trait)
// =============================================================================

/// Resource store backed by the `resources` table
pub struct PostgresResourceStore {
    pool: PgPool,
}

impl PostgresResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseResourceStore for PostgresResourceStore {
    async fn list_resources(&self, published_only: bool) -> Result<Vec<Resource>> {
        if published_only {
            Resource::find_by_status(ResourceStatus::Published, &self.pool).await
        } else {
            Resource::find_all(&self.pool).await
        }
    }

    async fn get_resource(&self, id: ResourceId) -> Result<Option<Resource>> {
        Resource::find_by_id_optional(id, &self.pool).await
    }

    async fn insert_resource(&self, input: CreateResource) -> Result<Resource> {
        Resource::create(input, &self.pool).await
    }
}

// =============================================================================
// Geocoder (implements BaseGeocoder trait)
// =============================================================================

/// Built-in city table first, then Nominatim when remote lookups are enabled
pub struct CityTableGeocoder {
    remote_enabled: bool,
}

impl CityTableGeocoder {
    pub fn new(remote_enabled: bool) -> Self {
        Self { remote_enabled }
    }
}

#[async_trait]
impl BaseGeocoder for CityTableGeocoder {
    async fn geocode(&self, location: &str) -> Result<Option<GeocodedLocation>> {
        if let Some(known) = lookup_known_city(location) {
            debug!(location = %location, "Resolved location from city table");
            return Ok(Some(known));
        }

        if !self.remote_enabled {
            return Ok(None);
        }

        match geocode_place(location).await {
            Ok(found) => Ok(Some(found)),
            Err(e) => {
                warn!(location = %location, error = %e, "Remote geocoding found no match");
                Ok(None)
            }
        }
    }
}

// =============================================================================
// EmailJsService Adapter (implements BaseEmailService trait)
// =============================================================================

/// Wrapper around EmailJsService that implements BaseEmailService trait
pub struct EmailJsAdapter(pub Arc<EmailJsService>);

impl EmailJsAdapter {
    pub fn new(service: Arc<EmailJsService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseEmailService for EmailJsAdapter {
    async fn send_template(&self, params: BTreeMap<String, String>) -> Result<()> {
        self.0
            .send(params)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to domain actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub resource_store: Arc<dyn BaseResourceStore>,
    pub geocoder: Arc<dyn BaseGeocoder>,
    /// None when the contact relay is not configured
    pub email_service: Option<Arc<dyn BaseEmailService>>,
    pub published_only: bool,
    pub map_settings: MapSettings,
}

impl ServerDeps {
    pub fn new(
        resource_store: Arc<dyn BaseResourceStore>,
        geocoder: Arc<dyn BaseGeocoder>,
        email_service: Option<Arc<dyn BaseEmailService>>,
        published_only: bool,
        map_settings: MapSettings,
    ) -> Self {
        Self {
            resource_store,
            geocoder,
            email_service,
            published_only,
            map_settings,
        }
    }
}
