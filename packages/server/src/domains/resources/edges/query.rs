//! GraphQL query resolvers for resources

use juniper::{FieldError, FieldResult};
use tracing::{error, info};

use crate::domains::resources::actions;
use crate::domains::resources::data::ResourceData;
use crate::server::graphql::context::GraphQLContext;

/// List resources. The server's published-only setting can't be overridden.
pub async fn get_resources(
    ctx: &GraphQLContext,
    published_only: Option<bool>,
) -> FieldResult<Vec<ResourceData>> {
    let published_only = ctx.deps.published_only || published_only.unwrap_or(false);
    info!("get_resources query called: published_only={}", published_only);

    let resources = actions::list_resources(published_only, &ctx.deps)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list resources");
            FieldError::new("Failed to load resources", juniper::Value::null())
        })?;

    Ok(resources.into_iter().map(ResourceData::from).collect())
}

/// Get a single resource by ID
pub async fn get_resource(ctx: &GraphQLContext, id: String) -> FieldResult<Option<ResourceData>> {
    info!("get_resource query called: {}", id);

    let resource = actions::get_resource(&id, &ctx.deps).await?;
    Ok(resource.map(ResourceData::from))
}
