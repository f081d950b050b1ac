use serde::{Deserialize, Serialize};

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Region the viewport center may move within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// The continental United States
    pub fn continental_us() -> Self {
        Self {
            min_lng: -125.0,
            min_lat: 24.0,
            max_lng: -66.0,
            max_lat: 50.0,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lng..=self.max_lng).contains(&point.longitude)
    }

    pub fn clamp(&self, point: GeoPoint) -> GeoPoint {
        GeoPoint {
            latitude: point.latitude.clamp(self.min_lat, self.max_lat),
            longitude: point.longitude.clamp(self.min_lng, self.max_lng),
        }
    }
}

/// Marker circle sizing. Circles shrink as the map zooms in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub base_radius: f64,
    pub shrink_per_zoom: f64,
    pub min_radius: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            base_radius: 8.0,
            shrink_per_zoom: 1.0,
            min_radius: 2.0,
        }
    }
}

impl MarkerStyle {
    pub fn radius_at(&self, zoom: f64) -> f64 {
        (self.base_radius - self.shrink_per_zoom * (zoom - 1.0)).max(self.min_radius)
    }
}

/// Viewport limits and defaults for the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub bounds: BoundingBox,
    pub default_center: GeoPoint,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub marker_style: MarkerStyle,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::continental_us(),
            default_center: GeoPoint::new(39.8283, -98.5795),
            default_zoom: 1.0,
            min_zoom: 1.0,
            max_zoom: 8.0,
            marker_style: MarkerStyle::default(),
        }
    }
}

impl MapSettings {
    /// Never panics, even on an inverted range; the upper bound wins.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let zoom = if zoom.is_finite() { zoom } else { self.default_zoom };
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Marker radius at `zoom`, after clamping `zoom` into range
    pub fn marker_radius(&self, zoom: f64) -> f64 {
        self.marker_style.radius_at(self.clamp_zoom(zoom))
    }
}

/// Current center and zoom. Always within the settings' bounds and zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: f64,
}

impl Viewport {
    pub fn initial(settings: &MapSettings) -> Self {
        Self {
            center: settings.bounds.clamp(settings.default_center),
            zoom: settings.clamp_zoom(settings.default_zoom),
        }
    }

    pub fn pan(&mut self, d_lng: f64, d_lat: f64, settings: &MapSettings) {
        if !d_lng.is_finite() || !d_lat.is_finite() {
            return;
        }
        let moved = GeoPoint::new(self.center.latitude + d_lat, self.center.longitude + d_lng);
        self.center = settings.bounds.clamp(moved);
    }

    pub fn zoom_by(&mut self, delta: f64, settings: &MapSettings) {
        if !delta.is_finite() {
            return;
        }
        self.zoom = settings.clamp_zoom(self.zoom + delta);
    }
}
