//! GraphQL query resolvers for the map

use juniper::FieldResult;
use tracing::info;

use crate::domains::map::actions;
use crate::domains::map::data::{
    MapFilterInput, MapFilterOptionsData, MapSettingsData, MapViewData,
};
use crate::domains::map::filter::FilterCriteria;
use crate::server::graphql::context::GraphQLContext;

pub async fn get_map_view(
    ctx: &GraphQLContext,
    filter: Option<MapFilterInput>,
) -> FieldResult<MapViewData> {
    let criteria = FilterCriteria::from(filter.unwrap_or_default());
    info!(search = %criteria.search, "map_view query called");

    let view = actions::get_map_view(&criteria, &ctx.deps).await;
    Ok(MapViewData::from(view))
}

pub async fn get_map_filter_options(ctx: &GraphQLContext) -> FieldResult<MapFilterOptionsData> {
    let (categories, locations) = actions::get_filter_options(&ctx.deps).await;
    Ok(MapFilterOptionsData {
        categories,
        locations,
    })
}

pub fn get_map_settings(ctx: &GraphQLContext, zoom: Option<f64>) -> MapSettingsData {
    MapSettingsData::at_zoom(&ctx.deps.map_settings, zoom)
}
