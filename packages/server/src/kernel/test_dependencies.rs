// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use super::{BaseEmailService, BaseGeocoder, BaseResourceStore, ServerDeps};
use crate::common::utils::GeocodedLocation;
use crate::common::ResourceId;
use crate::domains::map::MapSettings;
use crate::domains::resources::models::{CreateResource, Resource, ResourceStatus};

// =============================================================================
// Mock Resource Store
// =============================================================================

/// In-memory resource collection that records every write attempt
pub struct MockResourceStore {
    resources: Arc<Mutex<Vec<Resource>>>,
    insert_calls: Arc<Mutex<Vec<CreateResource>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockResourceStore {
    pub fn new() -> Self {
        Self {
            resources: Arc::new(Mutex::new(Vec::new())),
            insert_calls: Arc::new(Mutex::new(Vec::new())),
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Pre-seed the collection
    pub fn with_resources(self, resources: Vec<Resource>) -> Self {
        self.resources.lock().unwrap().extend(resources);
        self
    }

    /// Make every read fail (simulates an unreachable store)
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Every input passed to `insert_resource`, including failed attempts
    pub fn insert_calls(&self) -> Vec<CreateResource> {
        self.insert_calls.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<Resource> {
        self.resources.lock().unwrap().clone()
    }
}

impl Default for MockResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseResourceStore for MockResourceStore {
    async fn list_resources(&self, published_only: bool) -> Result<Vec<Resource>> {
        if self.fail_reads {
            anyhow::bail!("mock store: read failed");
        }
        let resources = self.resources.lock().unwrap();
        Ok(resources
            .iter()
            .filter(|r| !published_only || r.is_published())
            .cloned()
            .collect())
    }

    async fn get_resource(&self, id: ResourceId) -> Result<Option<Resource>> {
        if self.fail_reads {
            anyhow::bail!("mock store: read failed");
        }
        let resources = self.resources.lock().unwrap();
        Ok(resources.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_resource(&self, input: CreateResource) -> Result<Resource> {
        self.insert_calls.lock().unwrap().push(input.clone());
        if self.fail_writes {
            anyhow::bail!("mock store: write failed");
        }
        let resource = resource_from_input(input);
        self.resources.lock().unwrap().push(resource.clone());
        Ok(resource)
    }
}

/// Materialize a stored record the way the database would
pub fn resource_from_input(input: CreateResource) -> Resource {
    let now = Utc::now();
    Resource {
        id: ResourceId::new(),
        organization_name: input.organization_name,
        website_url: input.website_url,
        description: input.description,
        category: input.category,
        extra_tags: input.extra_tags,
        email: input.email,
        phone: input.phone,
        locations: input.locations,
        latitude: input.latitude,
        longitude: input.longitude,
        status: input.status.to_string(),
        submitted_at: now,
        created_at: now,
    }
}

/// Convenience builder for fixture resources
pub fn test_resource(
    name: &str,
    category: Option<&str>,
    location: &str,
    coords: Option<(f64, f64)>,
) -> Resource {
    resource_from_input(CreateResource {
        organization_name: name.to_string(),
        website_url: Some(format!(
            "https://{}.org",
            name.to_lowercase().replace(' ', "")
        )),
        description: Some(format!("{} serves the community", name)),
        category: category.map(String::from),
        extra_tags: None,
        email: Some("info@example.org".to_string()),
        phone: Some("+16125550100".to_string()),
        locations: vec![location.to_string()],
        latitude: coords.map(|(lat, _)| lat),
        longitude: coords.map(|(_, lng)| lng),
        status: ResourceStatus::Published,
    })
}

// =============================================================================
// Mock Geocoder
// =============================================================================

pub struct MockGeocoder {
    places: HashMap<String, GeocodedLocation>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self {
            places: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_place(mut self, location: &str, latitude: f64, longitude: f64) -> Self {
        self.places.insert(
            location.to_string(),
            GeocodedLocation {
                latitude,
                longitude,
                display_name: location.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseGeocoder for MockGeocoder {
    async fn geocode(&self, location: &str) -> Result<Option<GeocodedLocation>> {
        self.calls.lock().unwrap().push(location.to_string());
        Ok(self.places.get(location).cloned())
    }
}

// =============================================================================
// Mock Email Service
// =============================================================================

pub struct MockEmailService {
    sent: Arc<Mutex<Vec<BTreeMap<String, String>>>>,
    fail: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<BTreeMap<String, String>> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send_template(&self, params: BTreeMap<String, String>) -> Result<()> {
        if self.fail {
            anyhow::bail!("mock email: send failed");
        }
        self.sent.lock().unwrap().push(params);
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub resource_store: Arc<MockResourceStore>,
    pub geocoder: Arc<MockGeocoder>,
    pub email_service: Option<Arc<MockEmailService>>,
    pub published_only: bool,
    pub map_settings: MapSettings,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            resource_store: Arc::new(MockResourceStore::new()),
            geocoder: Arc::new(MockGeocoder::new()),
            email_service: Some(Arc::new(MockEmailService::new())),
            published_only: false,
            map_settings: MapSettings::default(),
        }
    }

    /// Set a mock resource store
    pub fn mock_store(mut self, store: MockResourceStore) -> Self {
        self.resource_store = Arc::new(store);
        self
    }

    /// Set a mock geocoder
    pub fn mock_geocoder(mut self, geocoder: MockGeocoder) -> Self {
        self.geocoder = Arc::new(geocoder);
        self
    }

    /// Set a mock email service
    pub fn mock_email(mut self, service: MockEmailService) -> Self {
        self.email_service = Some(Arc::new(service));
        self
    }

    /// Leave the contact relay unconfigured
    pub fn without_email(mut self) -> Self {
        self.email_service = None;
        self
    }

    pub fn published_only(mut self, published_only: bool) -> Self {
        self.published_only = published_only;
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_deps(self) -> ServerDeps {
        ServerDeps::new(
            self.resource_store,
            self.geocoder,
            self.email_service
                .map(|service| service as Arc<dyn BaseEmailService>),
            self.published_only,
            self.map_settings,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
