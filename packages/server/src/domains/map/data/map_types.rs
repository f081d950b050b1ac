//! GraphQL data types for the map

use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::map::filter::{FilterCriteria, FilteredView, OrganizationListing, Selection};
use crate::domains::map::models::{MapSettings, Marker, MarkerOrganization};

/// An organization inside a marker popup or the side list
#[derive(Debug, Clone, GraphQLObject)]
pub struct MapOrganizationData {
    pub id: Uuid,
    pub name: String,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Description cut for the popup
    pub summary: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub locations: Vec<String>,
}

impl From<&MarkerOrganization> for MapOrganizationData {
    fn from(org: &MarkerOrganization) -> Self {
        Self {
            id: org.id.into_uuid(),
            name: org.name.clone(),
            website_url: org.website_url.clone(),
            category: org.category.clone(),
            description: org.description.clone(),
            summary: org.summary(),
            email: org.email.clone(),
            phone: org.phone.clone(),
            locations: org.locations.clone(),
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct MapMarkerData {
    /// Rounded "lat,lng" identity of the marker
    pub key: String,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub locations: Vec<String>,
    pub categories: Vec<String>,
    pub organizations: Vec<MapOrganizationData>,
}

impl From<&Marker> for MapMarkerData {
    fn from(marker: &Marker) -> Self {
        Self {
            key: marker.key.to_string(),
            latitude: marker.latitude,
            longitude: marker.longitude,
            name: marker.name.clone(),
            locations: marker.locations.clone(),
            categories: marker.categories.iter().cloned().collect(),
            organizations: marker.organizations.iter().map(MapOrganizationData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct OrganizationListingData {
    pub organization: MapOrganizationData,
    pub marker_key: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&OrganizationListing> for OrganizationListingData {
    fn from(listing: &OrganizationListing) -> Self {
        Self {
            organization: MapOrganizationData::from(&listing.organization),
            marker_key: listing.marker_key.to_string(),
            location: listing.location.clone(),
            latitude: listing.latitude,
            longitude: listing.longitude,
        }
    }
}

/// Markers plus the flattened organization list for the current filter
#[derive(Debug, Clone, GraphQLObject)]
pub struct MapViewData {
    pub markers: Vec<MapMarkerData>,
    pub organizations: Vec<OrganizationListingData>,
    pub count: i32,
}

impl From<FilteredView> for MapViewData {
    fn from(view: FilteredView) -> Self {
        Self {
            markers: view.markers.iter().map(MapMarkerData::from).collect(),
            organizations: view
                .organizations
                .iter()
                .map(OrganizationListingData::from)
                .collect(),
            count: view.count as i32,
        }
    }
}

/// Filter arguments. Omitted or empty lists, or a list containing "All",
/// mean no restriction.
#[derive(Debug, Clone, Default, GraphQLInputObject)]
pub struct MapFilterInput {
    pub search: Option<String>,
    pub categories: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub sort_by_name: Option<bool>,
}

impl From<MapFilterInput> for FilterCriteria {
    fn from(input: MapFilterInput) -> Self {
        Self {
            search: input.search.unwrap_or_default(),
            categories: Selection::from_values(input.categories.unwrap_or_default()),
            locations: Selection::from_values(input.locations.unwrap_or_default()),
            sort_by_name: input.sort_by_name.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct MapFilterOptionsData {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct MapSettingsData {
    pub min_longitude: f64,
    pub min_latitude: f64,
    pub max_longitude: f64,
    pub max_latitude: f64,
    pub default_latitude: f64,
    pub default_longitude: f64,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Requested zoom after clamping
    pub zoom: f64,
    /// Marker circle radius at `zoom`
    pub marker_radius: f64,
}

impl MapSettingsData {
    pub fn at_zoom(settings: &MapSettings, zoom: Option<f64>) -> Self {
        let zoom = settings.clamp_zoom(zoom.unwrap_or(settings.default_zoom));
        Self {
            min_longitude: settings.bounds.min_lng,
            min_latitude: settings.bounds.min_lat,
            max_longitude: settings.bounds.max_lng,
            max_latitude: settings.bounds.max_lat,
            default_latitude: settings.default_center.latitude,
            default_longitude: settings.default_center.longitude,
            default_zoom: settings.default_zoom,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            zoom,
            marker_radius: settings.marker_radius(zoom),
        }
    }
}
