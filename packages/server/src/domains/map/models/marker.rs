//! Map markers derived from the resource list.
//!
//! Markers are never persisted. They are rebuilt from scratch on every load:
//! resources are grouped by coordinate rounded to [`MARKER_PRECISION`] decimal
//! places, so organizations at "the same" place share one pin.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::common::utils::{is_valid_coordinate, round_coords};
use crate::common::ResourceId;
use crate::domains::resources::models::Resource;

/// Decimal places kept when grouping coordinates (roughly 10 m).
pub const MARKER_PRECISION: u32 = 4;

/// Popup descriptions are cut to this many characters.
pub const SUMMARY_LENGTH: usize = 100;

/// Identity of a marker: the rounded coordinate as scaled integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerKey {
    lat_scaled: i64,
    lng_scaled: i64,
    precision: u32,
}

impl MarkerKey {
    pub fn new(latitude: f64, longitude: f64, precision: u32) -> Self {
        let factor = 10f64.powi(precision as i32);
        Self {
            lat_scaled: (latitude * factor).round() as i64,
            lng_scaled: (longitude * factor).round() as i64,
            precision,
        }
    }

    fn factor(&self) -> f64 {
        10f64.powi(self.precision as i32)
    }

    pub fn latitude(&self) -> f64 {
        self.lat_scaled as f64 / self.factor()
    }

    pub fn longitude(&self) -> f64 {
        self.lng_scaled as f64 / self.factor()
    }
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision as usize;
        write!(f, "{:.*},{:.*}", p, self.latitude(), p, self.longitude())
    }
}

/// An organization as shown inside a marker popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOrganization {
    pub id: ResourceId,
    pub name: String,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub locations: Vec<String>,
}

impl MarkerOrganization {
    /// Description shortened for the popup, with `...` when cut.
    pub fn summary(&self) -> Option<String> {
        let description = self.description.as_deref()?;
        if description.chars().count() <= SUMMARY_LENGTH {
            return Some(description.to_string());
        }
        let cut: String = description.chars().take(SUMMARY_LENGTH).collect();
        Some(format!("{}...", cut))
    }
}

impl From<&Resource> for MarkerOrganization {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.organization_name.clone(),
            website_url: resource.website_url.clone(),
            category: normalized_category(resource.category.as_deref()),
            description: resource.description.clone(),
            email: resource.email.clone(),
            phone: resource.phone.clone(),
            locations: resource.locations.clone(),
        }
    }
}

/// One pin on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub key: MarkerKey,
    pub latitude: f64,
    pub longitude: f64,
    /// Label of the first location seen at this coordinate
    pub name: String,
    /// Every distinct location label seen at this coordinate
    pub locations: Vec<String>,
    /// Organizations here, unique by name, in source order
    pub organizations: Vec<MarkerOrganization>,
    /// Categories of the listed organizations
    pub categories: BTreeSet<String>,
}

impl Marker {
    fn new(key: MarkerKey, name: String) -> Self {
        Self {
            key,
            latitude: key.latitude(),
            longitude: key.longitude(),
            name,
            locations: Vec::new(),
            organizations: Vec::new(),
            categories: BTreeSet::new(),
        }
    }

    pub fn has_organization(&self, name: &str) -> bool {
        self.organizations.iter().any(|org| org.name == name)
    }

    pub fn find_organization(&self, id: ResourceId) -> Option<&MarkerOrganization> {
        self.organizations.iter().find(|org| org.id == id)
    }

    /// True when `label` is the marker name or one of its location labels
    pub fn has_location(&self, label: &str) -> bool {
        self.name == label || self.locations.iter().any(|l| l == label)
    }

    fn add_location(&mut self, label: &str) {
        if !self.locations.iter().any(|l| l == label) {
            self.locations.push(label.to_string());
        }
    }
}

/// Build markers with the default precision.
pub fn build_markers(resources: &[Resource]) -> Vec<Marker> {
    build_markers_with_precision(resources, MARKER_PRECISION)
}

/// Group resources into markers keyed by coordinate rounded to `precision`.
///
/// Resources without a valid coordinate pair are skipped. Within a marker,
/// an organization whose name is already listed is not added again.
pub fn build_markers_with_precision(resources: &[Resource], precision: u32) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Vec::new();
    let mut index: HashMap<MarkerKey, usize> = HashMap::new();

    for resource in resources {
        if !is_valid_coordinate(resource.latitude, resource.longitude) {
            continue;
        }
        let (Some(lat), Some(lng)) = (resource.latitude, resource.longitude) else {
            continue;
        };

        let (lat, lng) = round_coords(lat, lng, precision);
        let key = MarkerKey::new(lat, lng, precision);

        let slot = *index.entry(key).or_insert_with(|| {
            let name = resource
                .primary_location()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(&resource.organization_name)
                .to_string();
            markers.push(Marker::new(key, name));
            markers.len() - 1
        });
        let marker = &mut markers[slot];

        for label in resource.locations.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
            marker.add_location(label);
        }

        if marker.has_organization(&resource.organization_name) {
            continue;
        }

        let organization = MarkerOrganization::from(resource);
        if let Some(category) = &organization.category {
            marker.categories.insert(category.clone());
        }
        marker.organizations.push(organization);
    }

    markers
}

fn normalized_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
}
