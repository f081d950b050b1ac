//! Map read actions
//!
//! Markers are rebuilt from the resource store on every call.

use tracing::{info, warn};

use crate::domains::map::filter::{
    available_categories, available_locations, filter_markers, FilterCriteria, FilteredView,
};
use crate::domains::map::models::{build_markers, Marker};
use crate::kernel::ServerDeps;

/// Load markers from the store.
///
/// A failed read is logged and yields an empty map rather than an error.
pub async fn load_markers(deps: &ServerDeps) -> Vec<Marker> {
    match deps.resource_store.list_resources(deps.published_only).await {
        Ok(resources) => {
            let markers = build_markers(&resources);
            info!(
                resources = resources.len(),
                markers = markers.len(),
                "Built map markers"
            );
            markers
        }
        Err(e) => {
            warn!(error = %e, "Failed to load resources for map, showing empty map");
            Vec::new()
        }
    }
}

pub async fn get_map_view(criteria: &FilterCriteria, deps: &ServerDeps) -> FilteredView {
    let markers = load_markers(deps).await;
    filter_markers(&markers, criteria)
}

/// Categories and location labels available to the filter controls
pub async fn get_filter_options(deps: &ServerDeps) -> (Vec<String>, Vec<String>) {
    let markers = load_markers(deps).await;
    (available_categories(&markers), available_locations(&markers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::map::filter::Selection;
    use crate::kernel::test_dependencies::{test_resource, MockResourceStore, TestDependencies};

    fn deps_with(store: MockResourceStore) -> ServerDeps {
        TestDependencies::new().mock_store(store).into_deps()
    }

    #[tokio::test]
    async fn read_failure_yields_empty_map() {
        let deps = deps_with(
            MockResourceStore::new()
                .with_resources(vec![test_resource("A", None, "Boston", Some((42.36, -71.06)))])
                .failing_reads(),
        );

        let view = get_map_view(&FilterCriteria::default(), &deps).await;

        assert!(view.markers.is_empty());
        assert_eq!(view.count, 0);
    }

    #[tokio::test]
    async fn filters_loaded_markers() {
        let deps = deps_with(MockResourceStore::new().with_resources(vec![
            test_resource("Food Shelf", Some("Food"), "Boston", Some((42.36, -71.06))),
            test_resource("Legal Aid", Some("Legal"), "Denver", Some((39.74, -104.99))),
        ]));
        let criteria = FilterCriteria {
            categories: Selection::from_values(["Legal"]),
            ..Default::default()
        };

        let view = get_map_view(&criteria, &deps).await;

        assert_eq!(view.count, 1);
        assert_eq!(view.markers[0].name, "Denver");

        let (categories, locations) = get_filter_options(&deps).await;
        assert_eq!(categories, vec!["Food", "Legal"]);
        assert_eq!(locations, vec!["Boston", "Denver"]);
    }
}
