//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldResult, RootNode};

use crate::domains::contact::data::{ContactMessageInput, ContactMessageResult};
use crate::domains::contact::edges as contact_edges;
use crate::domains::map::data::{
    MapFilterInput, MapFilterOptionsData, MapSettingsData, MapViewData,
};
use crate::domains::map::edges as map_edges;
use crate::domains::resources::data::{ResourceData, SubmitResourceInput, SubmitResourceResult};
use crate::domains::resources::edges as resource_edges;

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Resource Queries
    // =========================================================================

    /// All resources in insertion order
    async fn resources(
        ctx: &GraphQLContext,
        published_only: Option<bool>,
    ) -> FieldResult<Vec<ResourceData>> {
        resource_edges::get_resources(ctx, published_only).await
    }

    /// A single resource, for the detail view
    async fn resource(ctx: &GraphQLContext, id: String) -> FieldResult<Option<ResourceData>> {
        resource_edges::get_resource(ctx, id).await
    }

    // =========================================================================
    // Map Queries
    // =========================================================================

    /// Markers and organization list after applying `filter`.
    ///
    /// An unreachable store yields an empty map, not an error.
    async fn map_markers(
        ctx: &GraphQLContext,
        filter: Option<MapFilterInput>,
    ) -> FieldResult<MapViewData> {
        map_edges::get_map_view(ctx, filter).await
    }

    /// Options for the category and location filters
    async fn map_filter_options(ctx: &GraphQLContext) -> FieldResult<MapFilterOptionsData> {
        map_edges::get_map_filter_options(ctx).await
    }

    /// Viewport limits, plus the marker radius at `zoom`
    fn map_settings(ctx: &GraphQLContext, zoom: Option<f64>) -> MapSettingsData {
        map_edges::get_map_settings(ctx, zoom)
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Submit a new resource from the public form
    async fn submit_resource(
        ctx: &GraphQLContext,
        input: SubmitResourceInput,
    ) -> FieldResult<SubmitResourceResult> {
        resource_edges::submit_resource(ctx, input).await
    }

    /// Relay a message from the contact form
    async fn send_contact_message(
        ctx: &GraphQLContext,
        input: ContactMessageInput,
    ) -> FieldResult<ContactMessageResult> {
        contact_edges::send_contact_message(ctx, input).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
