//! Map domain - markers, filtering and view interaction
//!
//! Markers are derived from resources on every load and never stored.
//! The view machine models the client's selection/popup/modal flow so the
//! same rules can be shared and tested server-side.

pub mod actions;
pub mod data;
pub mod edges;
pub mod filter;
pub mod machines;
pub mod models;

pub use models::{
    build_markers, build_markers_with_precision, BoundingBox, GeoPoint, MapSettings, Marker,
    MarkerKey, MarkerOrganization, MarkerStyle, Viewport, MARKER_PRECISION,
};

pub use filter::{
    available_categories, available_locations, filter_markers, FilterCriteria, FilterPanel,
    FilteredView, OrganizationListing, Selection,
};

pub use machines::{MapViewEvent, MapViewMachine, MapViewState, Popup};

pub use data::{MapFilterInput, MapSettingsData, MapViewData};
