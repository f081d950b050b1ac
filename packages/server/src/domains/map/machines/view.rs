use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::ResourceId;
use crate::domains::map::models::{
    GeoPoint, MapSettings, Marker, MarkerKey, MarkerOrganization, Viewport,
};

/// What the map is currently showing on top of the base layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapViewState {
    Idle,
    /// Pointer or keyboard focus is on a marker
    MarkerSelected { key: MarkerKey },
    PopupOpen { key: MarkerKey },
    DetailModalOpen {
        key: MarkerKey,
        organization: ResourceId,
    },
}

impl MapViewState {
    pub fn marker_key(&self) -> Option<MarkerKey> {
        match self {
            MapViewState::Idle => None,
            MapViewState::MarkerSelected { key }
            | MapViewState::PopupOpen { key }
            | MapViewState::DetailModalOpen { key, .. } => Some(*key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapViewEvent {
    MarkerFocused(MarkerKey),
    MarkerClicked(MarkerKey),
    MapClicked,
    ViewDetails(ResourceId),
    Close,
    Pan { d_lng: f64, d_lat: f64 },
    Zoom { delta: f64 },
    ResetView,
    /// Marker set replaced after a reload or filter change
    SetMarkers(Vec<Marker>),
}

/// Popup contents anchored at a marker
#[derive(Debug, Clone, PartialEq)]
pub struct Popup<'a> {
    pub anchor: GeoPoint,
    pub title: &'a str,
    pub organizations: &'a [MarkerOrganization],
}

/// Interaction state for the map: selection, popup, detail modal and viewport.
///
/// Viewport changes never touch the selection. Selection events that name a
/// marker or organization that does not exist are ignored.
pub struct MapViewMachine {
    settings: MapSettings,
    markers: Vec<Marker>,
    state: MapViewState,
    viewport: Viewport,
}

impl MapViewMachine {
    pub fn new(settings: MapSettings, markers: Vec<Marker>) -> Self {
        Self {
            viewport: Viewport::initial(&settings),
            settings,
            markers,
            state: MapViewState::Idle,
        }
    }

    pub fn state(&self) -> MapViewState {
        self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn marker(&self, key: MarkerKey) -> Option<&Marker> {
        self.markers.iter().find(|m| m.key == key)
    }

    /// Apply one event. Returns true if the state or viewport changed.
    pub fn handle(&mut self, event: MapViewEvent) -> bool {
        let before = (self.state, self.viewport);

        match event {
            MapViewEvent::MarkerFocused(key) => {
                if self.marker(key).is_some()
                    && matches!(
                        self.state,
                        MapViewState::Idle | MapViewState::MarkerSelected { .. }
                    )
                {
                    self.state = MapViewState::MarkerSelected { key };
                }
            }
            MapViewEvent::MarkerClicked(key) => {
                // The modal covers the map, so marker clicks can't reach it
                if self.marker(key).is_some()
                    && !matches!(self.state, MapViewState::DetailModalOpen { .. })
                {
                    self.state = MapViewState::PopupOpen { key };
                }
            }
            MapViewEvent::MapClicked => {
                if !matches!(self.state, MapViewState::DetailModalOpen { .. }) {
                    self.state = MapViewState::Idle;
                }
            }
            MapViewEvent::ViewDetails(organization) => {
                if let MapViewState::PopupOpen { key } = self.state {
                    let listed = self
                        .marker(key)
                        .is_some_and(|m| m.find_organization(organization).is_some());
                    if listed {
                        self.state = MapViewState::DetailModalOpen { key, organization };
                    }
                }
            }
            MapViewEvent::Close => {
                self.state = MapViewState::Idle;
            }
            MapViewEvent::Pan { d_lng, d_lat } => {
                self.viewport.pan(d_lng, d_lat, &self.settings);
            }
            MapViewEvent::Zoom { delta } => {
                self.viewport.zoom_by(delta, &self.settings);
            }
            MapViewEvent::ResetView => {
                self.viewport = Viewport::initial(&self.settings);
            }
            MapViewEvent::SetMarkers(markers) => {
                self.set_markers(markers);
            }
        }

        let changed = before != (self.state, self.viewport);
        if changed {
            debug!(state = ?self.state, zoom = self.viewport.zoom, "Map view changed");
        }
        changed
    }

    /// Replace the marker set (after a reload or filter change).
    ///
    /// A selection pointing at a marker or organization that is gone falls
    /// back to idle.
    pub fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;

        let still_valid = match self.state {
            MapViewState::Idle => true,
            MapViewState::MarkerSelected { key } | MapViewState::PopupOpen { key } => {
                self.marker(key).is_some()
            }
            MapViewState::DetailModalOpen { key, organization } => self
                .marker(key)
                .is_some_and(|m| m.find_organization(organization).is_some()),
        };
        if !still_valid {
            self.state = MapViewState::Idle;
        }
    }

    /// The hovered or popup-anchoring marker is drawn highlighted
    pub fn is_highlighted(&self, key: MarkerKey) -> bool {
        match self.state {
            MapViewState::MarkerSelected { key: k } | MapViewState::PopupOpen { key: k } => {
                k == key
            }
            _ => false,
        }
    }

    /// Circle radius for markers at the current zoom
    pub fn marker_radius(&self) -> f64 {
        self.settings.marker_radius(self.viewport.zoom)
    }

    pub fn popup(&self) -> Option<Popup<'_>> {
        let MapViewState::PopupOpen { key } = self.state else {
            return None;
        };
        let marker = self.marker(key)?;
        Some(Popup {
            anchor: GeoPoint::new(marker.latitude, marker.longitude),
            title: &marker.name,
            organizations: &marker.organizations,
        })
    }

    pub fn detail(&self) -> Option<&MarkerOrganization> {
        let MapViewState::DetailModalOpen { key, organization } = self.state else {
            return None;
        };
        self.marker(key)?.find_organization(organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::map::models::build_markers;
    use crate::kernel::test_dependencies::test_resource;

    fn machine() -> MapViewMachine {
        let markers = build_markers(&[
            test_resource("Food Shelf", Some("Food"), "Minneapolis", Some((44.9778, -93.2650))),
            test_resource("Legal Aid", Some("Legal"), "Minneapolis", Some((44.9778, -93.2650))),
            test_resource("Chicago Clinic", None, "Chicago", Some((41.8781, -87.6298))),
        ]);
        MapViewMachine::new(MapSettings::default(), markers)
    }

    fn key(machine: &MapViewMachine, index: usize) -> MarkerKey {
        machine.markers()[index].key
    }

    #[test]
    fn hover_then_click_opens_popup() {
        let mut machine = machine();
        let minneapolis = key(&machine, 0);

        assert!(machine.handle(MapViewEvent::MarkerFocused(minneapolis)));
        assert!(machine.is_highlighted(minneapolis));

        machine.handle(MapViewEvent::MarkerClicked(minneapolis));
        assert_eq!(machine.state(), MapViewState::PopupOpen { key: minneapolis });

        let popup = machine.popup().unwrap();
        assert_eq!(popup.title, "Minneapolis");
        assert_eq!(popup.organizations.len(), 2);
        assert_eq!(popup.anchor, GeoPoint::new(44.9778, -93.265));
    }

    #[test]
    fn view_details_only_from_popup_with_listed_org() {
        let mut machine = machine();
        let minneapolis = key(&machine, 0);
        let legal_aid = machine.markers()[0].organizations[1].id;
        let clinic = machine.markers()[1].organizations[0].id;

        // no popup yet
        assert!(!machine.handle(MapViewEvent::ViewDetails(legal_aid)));

        machine.handle(MapViewEvent::MarkerClicked(minneapolis));
        // org belongs to another marker
        assert!(!machine.handle(MapViewEvent::ViewDetails(clinic)));

        machine.handle(MapViewEvent::ViewDetails(legal_aid));
        assert_eq!(machine.detail().unwrap().name, "Legal Aid");
        assert!(machine.popup().is_none());
    }

    #[test]
    fn close_returns_to_idle_from_any_state() {
        let mut machine = machine();
        let minneapolis = key(&machine, 0);
        let food_shelf = machine.markers()[0].organizations[0].id;

        machine.handle(MapViewEvent::MarkerClicked(minneapolis));
        machine.handle(MapViewEvent::ViewDetails(food_shelf));
        machine.handle(MapViewEvent::Close);
        assert_eq!(machine.state(), MapViewState::Idle);

        machine.handle(MapViewEvent::MarkerFocused(minneapolis));
        machine.handle(MapViewEvent::Close);
        assert_eq!(machine.state(), MapViewState::Idle);
    }

    #[test]
    fn map_click_clears_popup_but_not_modal() {
        let mut machine = machine();
        let minneapolis = key(&machine, 0);
        let food_shelf = machine.markers()[0].organizations[0].id;

        machine.handle(MapViewEvent::MarkerClicked(minneapolis));
        machine.handle(MapViewEvent::MapClicked);
        assert_eq!(machine.state(), MapViewState::Idle);

        machine.handle(MapViewEvent::MarkerClicked(minneapolis));
        machine.handle(MapViewEvent::ViewDetails(food_shelf));
        assert!(!machine.handle(MapViewEvent::MapClicked));
        assert!(machine.detail().is_some());
    }

    #[test]
    fn unknown_marker_is_ignored() {
        let mut machine = machine();
        let nowhere = MarkerKey::new(0.0, 0.0, 4);

        assert!(!machine.handle(MapViewEvent::MarkerClicked(nowhere)));
        assert_eq!(machine.state(), MapViewState::Idle);
    }

    #[test]
    fn viewport_changes_keep_selection() {
        let mut machine = machine();
        let chicago = key(&machine, 1);
        machine.handle(MapViewEvent::MarkerClicked(chicago));

        machine.handle(MapViewEvent::Zoom { delta: 2.0 });
        machine.handle(MapViewEvent::Pan { d_lng: 500.0, d_lat: -500.0 });

        assert_eq!(machine.state(), MapViewState::PopupOpen { key: chicago });
        assert_eq!(machine.viewport().zoom, 3.0);
        assert_eq!(machine.marker_radius(), 6.0);
        assert_eq!(machine.viewport().center, GeoPoint::new(24.0, -66.0));

        machine.handle(MapViewEvent::ResetView);
        assert_eq!(machine.viewport(), Viewport::initial(&MapSettings::default()));
    }

    #[test]
    fn replacing_markers_drops_stale_selection() {
        let mut machine = machine();
        let chicago = key(&machine, 1);
        machine.handle(MapViewEvent::MarkerClicked(chicago));

        let remaining = vec![machine.markers()[0].clone()];
        assert!(machine.handle(MapViewEvent::SetMarkers(remaining)));

        assert_eq!(machine.state(), MapViewState::Idle);
        assert!(machine.popup().is_none());
    }
}
