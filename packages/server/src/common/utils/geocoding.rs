use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim API response for geocoding
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    lat: String,
    lon: String,
    display_name: String,
}

/// Geocoded location for a free-text place name
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

struct KnownCity {
    name: &'static str,
    state: &'static str,
    state_name: &'static str,
    longitude: f64,
    latitude: f64,
}

const fn city(
    name: &'static str,
    state: &'static str,
    state_name: &'static str,
    longitude: f64,
    latitude: f64,
) -> KnownCity {
    KnownCity {
        name,
        state,
        state_name,
        longitude,
        latitude,
    }
}

/// Cities the directory launched with.
///
/// Resolved locally so the most common submissions never need a network call.
const KNOWN_CITIES: &[KnownCity] = &[
    city("San Diego", "CA", "California", -117.1611, 32.7157),
    city("Los Angeles", "CA", "California", -118.2437, 34.0522),
    city("San Francisco", "CA", "California", -122.4194, 37.7749),
    city("New York", "NY", "New York", -74.0060, 40.7128),
    city("Chicago", "IL", "Illinois", -87.6298, 41.8781),
    city("Houston", "TX", "Texas", -95.3698, 29.7604),
    city("Phoenix", "AZ", "Arizona", -112.0740, 33.4484),
    city("Philadelphia", "PA", "Pennsylvania", -75.1652, 39.9526),
    city("San Antonio", "TX", "Texas", -98.4936, 29.4241),
    city("Dallas", "TX", "Texas", -96.7970, 32.7767),
    city("Austin", "TX", "Texas", -97.7431, 30.2672),
    city("Seattle", "WA", "Washington", -122.3321, 47.6062),
    city("Denver", "CO", "Colorado", -104.9903, 39.7392),
    city("Boston", "MA", "Massachusetts", -71.0589, 42.3601),
    city("Washington", "DC", "District of Columbia", -77.0369, 38.9072),
    city("Nashville", "TN", "Tennessee", -86.7816, 36.1627),
    city("Portland", "OR", "Oregon", -122.6765, 45.5155),
    city("Miami", "FL", "Florida", -80.1918, 25.7617),
    city("Atlanta", "GA", "Georgia", -84.3880, 33.7490),
    city("Minneapolis", "MN", "Minnesota", -93.2650, 44.9778),
];

impl KnownCity {
    /// `suffix` is the text after the city ("MN", "Minnesota 55401", "D.C.").
    fn state_matches(&self, suffix: &str) -> bool {
        let suffix: String = suffix.chars().filter(|c| *c != '.').collect();
        let suffix = suffix.trim();
        if suffix.is_empty() {
            return true;
        }
        if suffix.eq_ignore_ascii_case(self.state_name)
            || suffix
                .to_ascii_lowercase()
                .starts_with(&format!("{} ", self.state_name.to_ascii_lowercase()))
        {
            return true;
        }
        suffix
            .split_whitespace()
            .next()
            .is_some_and(|token| token.eq_ignore_ascii_case(self.state))
    }
}

/// Look up a city in the built-in table.
///
/// The city name matches case-insensitively. When a state follows the first
/// comma it must agree with the table entry, so `"Portland, ME"` is left to
/// the remote geocoder while `"chicago, IL"` and `"Chicago"` both resolve.
pub fn lookup_known_city(location: &str) -> Option<GeocodedLocation> {
    let mut parts = location.split(',');
    let city_name = parts.next()?.trim();
    let suffix = parts.next().unwrap_or("");

    KNOWN_CITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(city_name) && c.state_matches(suffix))
        .map(|c| GeocodedLocation {
            latitude: c.latitude,
            longitude: c.longitude,
            display_name: c.name.to_string(),
        })
}

/// Geocode a free-text place ("Minneapolis, MN", "123 Main St, Austin TX")
/// using Nominatim (OpenStreetMap). Returns the top hit.
#[instrument]
pub async fn geocode_place(query: &str) -> Result<GeocodedLocation> {
    let query = query.trim();
    if query.is_empty() {
        return Err(anyhow!("Cannot geocode an empty location"));
    }

    let url = format!(
        "{}?q={}&format=json&limit=1",
        NOMINATIM_SEARCH_URL,
        urlencoding::encode(query)
    );

    debug!("Geocoding location: {}", query);

    let client = reqwest::Client::new();
    let response: Vec<NominatimResponse> = client
        .get(&url)
        .header("User-Agent", "SafetyNet/1.0 (Community Resource Map)")
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, query = %query, "Geocoding API request failed");
            anyhow!("Geocoding API request failed: {}", e)
        })?
        .json()
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to parse geocoding response");
            anyhow!("Failed to parse geocoding response: {}", e)
        })?;

    let result = response.first().ok_or_else(|| {
        warn!(query = %query, "Location not found by geocoding API");
        anyhow!("Location not found: {}", query)
    })?;

    let latitude: f64 = result
        .lat
        .parse()
        .map_err(|e| anyhow!("Invalid latitude in response: {}", e))?;
    let longitude: f64 = result
        .lon
        .parse()
        .map_err(|e| anyhow!("Invalid longitude in response: {}", e))?;

    Ok(GeocodedLocation {
        latitude,
        longitude,
        display_name: result.display_name.clone(),
    })
}

/// Round a coordinate pair to `decimals` places.
///
/// 2 places is roughly 1 km, 4 places roughly 10 m.
pub fn round_coords(lat: f64, lng: f64, decimals: u32) -> (f64, f64) {
    let factor = 10f64.powi(decimals as i32);
    ((lat * factor).round() / factor, (lng * factor).round() / factor)
}

/// A coordinate is usable on the map only when both halves are present,
/// finite, and inside the WGS84 range.
pub fn is_valid_coordinate(lat: Option<f64>, lng: Option<f64>) -> bool {
    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            lat.is_finite()
                && lng.is_finite()
                && (-90.0..=90.0).contains(&lat)
                && (-180.0..=180.0).contains(&lng)
        }
        _ => false,
    }
}
