//! Load organizations from a JSON seed file into the resources table.
//!
//! The file maps a location label ("City, ST") to the organizations there.
//! Organizations already stored under the same name and location are skipped.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use server_core::config::Config;
use server_core::domains::resources::actions::{normalize_phone, normalize_website_url};
use server_core::domains::resources::models::{CreateResource, Resource, ResourceStatus};
use server_core::kernel::{BaseGeocoder, CityTableGeocoder};
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "seed_resources")]
#[command(about = "Seed the resource directory from a JSON file")]
struct Cli {
    /// Seed file path
    #[arg(long, default_value = "data/resources_seed.json")]
    file: String,

    /// Store seeded resources as pending review instead of published
    #[arg(long)]
    pending: bool,

    /// Print what would be inserted without writing
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct SeedOrganization {
    #[serde(rename = "Organization Name ", alias = "Organization Name", default)]
    name: String,
    #[serde(rename = "Website URL", default)]
    website: Option<String>,
    #[serde(rename = "Description of Resources", default)]
    description: Option<String>,
    #[serde(rename = "Category of Resources ", alias = "Category of Resources", default)]
    category: Option<String>,
    #[serde(rename = "Email", default)]
    email: Option<String>,
    #[serde(rename = "Phone", default)]
    phone: Option<String>,
}

type SeedFile = BTreeMap<String, Vec<SeedOrganization>>;

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let raw = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read seed file {}", cli.file))?;
    let seed: SeedFile = serde_json::from_str(&raw).context("Failed to parse seed file")?;

    let geocoder = CityTableGeocoder::new(config.geocoding_enabled);
    let status = if cli.pending {
        ResourceStatus::PendingReview
    } else {
        ResourceStatus::Published
    };

    let mut created = 0;
    let mut skipped = 0;

    for (location, organizations) in seed {
        let location = location.trim().to_string();
        if location.is_empty() || organizations.is_empty() {
            continue;
        }

        let place = geocoder.geocode(&location).await?;
        if place.is_none() {
            warn!(location = %location, "No coordinates for location, resources won't be mapped");
        }

        for org in organizations {
            let name = org.name.trim().to_string();
            if name.is_empty() {
                warn!(location = %location, "Skipping unnamed organization");
                skipped += 1;
                continue;
            }

            if Resource::find_by_name_and_location(&name, &location, &pool)
                .await?
                .is_some()
            {
                info!(organization = %name, location = %location, "Already seeded, skipping");
                skipped += 1;
                continue;
            }

            let input = CreateResource {
                organization_name: name.clone(),
                website_url: non_blank(org.website).map(|u| normalize_website_url(&u)),
                description: non_blank(org.description),
                category: non_blank(org.category),
                extra_tags: None,
                email: non_blank(org.email),
                phone: non_blank(org.phone).map(|p| normalize_phone(&p)),
                locations: vec![location.clone()],
                latitude: place.as_ref().map(|p| p.latitude),
                longitude: place.as_ref().map(|p| p.longitude),
                status,
            };

            if cli.dry_run {
                info!(organization = %name, location = %location, "Would create resource");
            } else {
                let resource = Resource::create(input, &pool).await?;
                info!(resource_id = %resource.id, organization = %name, "Created resource");
            }
            created += 1;
        }
    }

    info!(created, skipped, dry_run = cli.dry_run, "Seeding complete");
    Ok(())
}
