//! Integration tests for the map queries.

mod common;

use crate::common::{json_vars, GraphQLClient};
use serde_json::{json, Value};
use server_core::kernel::test_dependencies::{test_resource, MockResourceStore};
use server_core::kernel::TestDependencies;

const MAP_MARKERS: &str = r#"
    query Markers($filter: MapFilterInput) {
        mapMarkers(filter: $filter) {
            count
            markers {
                key
                name
                latitude
                longitude
                categories
                organizations { name summary }
            }
            organizations {
                location
                markerKey
                organization { name category }
            }
        }
    }
"#;

fn client_with_directory() -> GraphQLClient {
    let mut unplaced = test_resource("Nowhere Help", Some("Food"), "Unknown", None);
    unplaced.description = Some("x".repeat(120));

    let store = MockResourceStore::new().with_resources(vec![
        test_resource("Food Shelf", Some("Food"), "Minneapolis", Some((44.97781, -93.26501))),
        test_resource("Legal Aid", Some("Legal"), "Minneapolis", Some((44.97779, -93.26499))),
        test_resource("Legal Aid", Some("Legal"), "Minneapolis", Some((44.9778, -93.265))),
        test_resource("Chicago Clinic", Some("Medical Resources"), "Chicago", Some((41.8781, -87.6298))),
        test_resource("Open Door", None, "Chicago", Some((41.8781, -87.6298))),
        unplaced,
    ]);

    GraphQLClient::with_test_deps(TestDependencies::new().mock_store(store))
}

async fn markers(client: &GraphQLClient, filter: Value) -> Value {
    client
        .query_with_vars(MAP_MARKERS, json_vars(json!({ "filter": filter })))
        .await["mapMarkers"]
        .clone()
}

#[tokio::test]
async fn resources_collapse_into_markers_by_rounded_coordinate() {
    let client = client_with_directory();

    let view = markers(&client, json!(null)).await;

    let all = view["markers"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["key"], "44.9778,-93.2650");
    assert_eq!(all[0]["name"], "Minneapolis");
    assert_eq!(all[0]["organizations"].as_array().unwrap().len(), 2);
    assert_eq!(all[0]["categories"], json!(["Food", "Legal"]));
    assert_eq!(all[1]["categories"], json!(["Medical Resources"]));
    assert_eq!(view["count"], 4);
}

#[tokio::test]
async fn category_filter_is_organization_granular() {
    let client = client_with_directory();

    let view = markers(&client, json!({ "categories": ["Medical Resources"] })).await;

    assert_eq!(view["count"], 1);
    let chicago = &view["markers"][0];
    assert_eq!(chicago["name"], "Chicago");
    assert_eq!(chicago["organizations"], json!([{ "name": "Chicago Clinic", "summary": "Chicago Clinic serves the community" }]));
}

#[tokio::test]
async fn all_sentinel_and_empty_lists_mean_no_restriction() {
    let client = client_with_directory();

    let unfiltered = markers(&client, json!(null)).await;
    let with_all = markers(&client, json!({ "categories": ["All"], "locations": [] })).await;

    assert_eq!(unfiltered, with_all);
}

#[tokio::test]
async fn search_and_location_filters_combine() {
    let client = client_with_directory();

    let view = markers(
        &client,
        json!({ "search": "LEGAL", "locations": ["Minneapolis", "Chicago"] }),
    )
    .await;
    assert_eq!(view["count"], 1);
    assert_eq!(view["organizations"][0]["organization"]["name"], "Legal Aid");
    assert_eq!(view["organizations"][0]["location"], "Minneapolis");
    assert_eq!(view["organizations"][0]["markerKey"], view["markers"][0]["key"]);

    let none = markers(&client, json!({ "search": "legal", "locations": ["Chicago"] })).await;
    assert_eq!(none["count"], 0);
    assert_eq!(none["markers"], json!([]));
}

#[tokio::test]
async fn sorted_organization_list() {
    let client = client_with_directory();

    let view = markers(&client, json!({ "sortByName": true })).await;

    let names: Vec<&str> = view["organizations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["organization"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Chicago Clinic", "Food Shelf", "Legal Aid", "Open Door"]);
}

#[tokio::test]
async fn unreachable_store_shows_an_empty_map() {
    let client = GraphQLClient::with_test_deps(
        TestDependencies::new().mock_store(MockResourceStore::new().failing_reads()),
    );

    let view = markers(&client, json!(null)).await;

    assert_eq!(view["count"], 0);
    assert_eq!(view["markers"], json!([]));

    let listing = client.execute("{ resources { organizationName } }").await;
    assert!(!listing.is_ok());
}

#[tokio::test]
async fn filter_options_list_categories_and_locations() {
    let client = client_with_directory();

    let data = client
        .query("{ mapFilterOptions { categories locations } }")
        .await;

    assert_eq!(
        data["mapFilterOptions"]["categories"],
        json!(["Food", "Legal", "Medical Resources"])
    );
    assert_eq!(data["mapFilterOptions"]["locations"], json!(["Chicago", "Minneapolis"]));
}

#[tokio::test]
async fn settings_report_clamped_zoom_and_radius() {
    let client = client_with_directory();

    let data = client
        .query("{ mapSettings(zoom: 12.0) { zoom maxZoom markerRadius minLongitude } }")
        .await;

    assert_eq!(data["mapSettings"]["zoom"], 8.0);
    assert_eq!(data["mapSettings"]["maxZoom"], 8.0);
    assert_eq!(data["mapSettings"]["markerRadius"], 2.0);
    assert_eq!(data["mapSettings"]["minLongitude"], -125.0);
}
