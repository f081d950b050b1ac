//! Resource read actions

use anyhow::{Context, Result};
use tracing::info;

use crate::common::ResourceId;
use crate::domains::resources::models::Resource;
use crate::kernel::ServerDeps;

/// Whole collection in insertion order. Read failures are returned to the caller.
pub async fn list_resources(published_only: bool, deps: &ServerDeps) -> Result<Vec<Resource>> {
    info!(published_only, "Listing resources");

    deps.resource_store
        .list_resources(published_only)
        .await
        .context("Failed to read resources")
}

pub async fn get_resource(resource_id: &str, deps: &ServerDeps) -> Result<Option<Resource>> {
    let id = ResourceId::parse(resource_id).context("Invalid resource ID")?;

    info!(resource_id = %id, "Getting resource");

    let resource = deps.resource_store.get_resource(id).await?;
    // The published-only switch also hides unpublished records by id
    Ok(resource.filter(|r| !deps.published_only || r.is_published()))
}
