//! Map domain data types (GraphQL types)

pub mod map_types;

pub use map_types::{
    MapFilterInput, MapFilterOptionsData, MapMarkerData, MapOrganizationData, MapSettingsData,
    MapViewData, OrganizationListingData,
};
