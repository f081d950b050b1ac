use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::map::{BoundingBox, MapSettings};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Only show resources flagged as published on the map
    pub resources_published_only: bool,
    /// Resolve submitted locations through Nominatim when the built-in
    /// city table has no match
    pub geocoding_enabled: bool,
    pub emailjs: Option<EmailJsConfig>,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub map: MapSettings,
}

/// Credentials for the contact form relay. All three are required.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let emailjs = match (
            env::var("EMAILJS_SERVICE_ID").ok(),
            env::var("EMAILJS_TEMPLATE_ID").ok(),
            env::var("EMAILJS_PUBLIC_KEY").ok(),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(EmailJsConfig {
                service_id,
                template_id,
                public_key,
            }),
            _ => None,
        };

        let defaults = MapSettings::default();
        let bounds = match env::var("MAP_BOUNDS").ok() {
            Some(raw) => parse_bounds(&raw).context("MAP_BOUNDS must be min_lng,min_lat,max_lng,max_lat")?,
            None => defaults.bounds,
        };

        let (min_zoom, max_zoom) = zoom_range(
            parse_f64_var("MAP_MIN_ZOOM", defaults.min_zoom)?,
            parse_f64_var("MAP_MAX_ZOOM", defaults.max_zoom)?,
        )
        .context("MAP_MIN_ZOOM and MAP_MAX_ZOOM must be finite with min <= max")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            resources_published_only: parse_bool_var("RESOURCES_PUBLISHED_ONLY", false)?,
            geocoding_enabled: parse_bool_var("GEOCODING_ENABLED", true)?,
            emailjs,
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            map: MapSettings {
                bounds,
                min_zoom,
                max_zoom,
                ..defaults
            },
        })
    }
}

fn parse_bool_var(key: &str, default: bool) -> Result<bool> {
    match env::var(key) {
        Ok(raw) => parse_bool(&raw).with_context(|| format!("{} must be true or false", key)),
        Err(_) => Ok(default),
    }
}

fn parse_f64_var(key: &str, default: f64) -> Result<f64> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number", key)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("invalid boolean: {}", other)),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bounds(raw: &str) -> Result<BoundingBox> {
    let parts = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [min_lng, min_lat, max_lng, max_lat] if min_lng < max_lng && min_lat < max_lat => {
            Ok(BoundingBox {
                min_lng: *min_lng,
                min_lat: *min_lat,
                max_lng: *max_lng,
                max_lat: *max_lat,
            })
        }
        _ => Err(anyhow::anyhow!("expected four ordered numbers, got {}", raw)),
    }
}

fn zoom_range(min_zoom: f64, max_zoom: f64) -> Result<(f64, f64)> {
    if !min_zoom.is_finite() || !max_zoom.is_finite() || min_zoom > max_zoom {
        return Err(anyhow::anyhow!(
            "invalid zoom range {} to {}",
            min_zoom,
            max_zoom
        ));
    }
    Ok((min_zoom, max_zoom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_booleans_loosely() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" 1 ").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn parses_origin_lists() {
        assert_eq!(
            parse_list("https://a.org, https://b.org,,"),
            vec!["https://a.org".to_string(), "https://b.org".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn parses_bounds() {
        let bounds = parse_bounds("-125,24,-66,50").unwrap();
        assert_eq!(bounds.min_lng, -125.0);
        assert_eq!(bounds.max_lat, 50.0);

        assert!(parse_bounds("-66,24,-125,50").is_err());
        assert!(parse_bounds("1,2,3").is_err());
        assert!(parse_bounds("a,b,c,d").is_err());
    }

    #[test]
    fn rejects_inverted_or_non_finite_zoom_range() {
        assert_eq!(zoom_range(1.0, 8.0).unwrap(), (1.0, 8.0));
        assert_eq!(zoom_range(3.0, 3.0).unwrap(), (3.0, 3.0));

        assert!(zoom_range(10.0, 2.0).is_err());
        assert!(zoom_range(f64::NAN, 8.0).is_err());
        assert!(zoom_range(1.0, f64::INFINITY).is_err());
        assert!(zoom_range("NaN".parse().unwrap(), 8.0).is_err());
    }
}
