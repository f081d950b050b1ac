//! Resource submission action

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domains::resources::actions::validation::{
    normalize_phone, normalize_website_url, split_locations, validate_submission,
};
use crate::domains::resources::data::{SubmitResourceInput, SubmitResourceResult};
use crate::domains::resources::models::{CreateResource, ResourceStatus};
use crate::kernel::ServerDeps;

/// How long the client shows the success message
pub const SUCCESS_DISMISS_AFTER_MS: i32 = 3000;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Failed to save submission")]
    Store(#[source] anyhow::Error),
}

impl SubmissionError {
    /// Machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::MissingFields(_) => "MISSING_FIELDS",
            SubmissionError::InvalidEmail => "INVALID_EMAIL",
            SubmissionError::InvalidPhone => "INVALID_PHONE",
            SubmissionError::Store(_) => "STORE_ERROR",
        }
    }
}

pub fn success_message(organization_name: &str) -> String {
    format!("Form successfully submitted for \"{}\"", organization_name)
}

/// Validate, normalize and store a new resource.
///
/// Nothing is written when validation fails. The first location is geocoded
/// when possible; a geocoding miss stores the record without coordinates.
pub async fn submit_resource(
    input: SubmitResourceInput,
    deps: &ServerDeps,
) -> Result<SubmitResourceResult, SubmissionError> {
    validate_submission(&input)?;

    let organization_name = input.org_name.trim().to_string();
    let locations = split_locations(&input.location);

    let coordinates = match locations.first() {
        Some(first) => match deps.geocoder.geocode(first).await {
            Ok(Some(place)) => Some((place.latitude, place.longitude)),
            Ok(None) => {
                warn!(location = %first, "No coordinates found for submitted location");
                None
            }
            Err(e) => {
                warn!(location = %first, error = %e, "Geocoding failed for submitted location");
                None
            }
        },
        None => None,
    };

    let record = CreateResource {
        organization_name: organization_name.clone(),
        website_url: Some(normalize_website_url(&input.url)),
        description: Some(input.description.trim().to_string()),
        category: Some(input.category_tags.trim().to_string()),
        extra_tags: Some(input.extra_tags.trim().to_string()),
        email: Some(input.email.trim().to_string()),
        phone: Some(normalize_phone(&input.phone)),
        locations,
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, lng)| lng),
        status: ResourceStatus::PendingReview,
    };

    let resource = deps
        .resource_store
        .insert_resource(record)
        .await
        .map_err(|e| {
            error!(organization = %organization_name, error = %e, "Failed to store submission");
            SubmissionError::Store(e)
        })?;

    info!(resource_id = %resource.id, organization = %resource.organization_name, "Resource submitted");

    Ok(SubmitResourceResult {
        resource_id: resource.id.into_uuid(),
        message: success_message(&resource.organization_name),
        dismiss_after_ms: SUCCESS_DISMISS_AFTER_MS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockGeocoder, MockResourceStore, TestDependencies};

    fn input() -> SubmitResourceInput {
        SubmitResourceInput {
            org_name: " Neighborhood Pantry ".to_string(),
            url: "pantry.org".to_string(),
            location: "Minneapolis, MN; St. Paul, MN".to_string(),
            email: "hello@pantry.org".to_string(),
            phone: "1234567890".to_string(),
            category_tags: "Food".to_string(),
            extra_tags: "groceries".to_string(),
            description: "Weekly food distribution".to_string(),
        }
    }

    #[tokio::test]
    async fn stores_normalized_pending_record() {
        let test_deps = TestDependencies::new()
            .mock_geocoder(MockGeocoder::new().with_place("Minneapolis, MN", 44.9778, -93.265));
        let deps = test_deps.clone().into_deps();

        let result = submit_resource(input(), &deps).await.unwrap();

        assert_eq!(result.message, "Form successfully submitted for \"Neighborhood Pantry\"");
        assert_eq!(result.dismiss_after_ms, 3000);

        let calls = test_deps.resource_store.insert_calls();
        assert_eq!(calls.len(), 1);
        let stored = &calls[0];
        assert_eq!(stored.organization_name, "Neighborhood Pantry");
        assert_eq!(stored.phone.as_deref(), Some("+11234567890"));
        assert_eq!(stored.website_url.as_deref(), Some("https://pantry.org"));
        assert_eq!(stored.locations, vec!["Minneapolis, MN", "St. Paul, MN"]);
        assert_eq!(stored.latitude, Some(44.9778));
        assert_eq!(stored.status, ResourceStatus::PendingReview);
        assert_eq!(test_deps.geocoder.calls(), vec!["Minneapolis, MN"]);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_store() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.clone().into_deps();

        let bad = SubmitResourceInput {
            email: "nope".to_string(),
            ..input()
        };
        let err = submit_resource(bad, &deps).await.unwrap_err();

        assert!(matches!(err, SubmissionError::InvalidEmail));
        assert!(test_deps.resource_store.insert_calls().is_empty());
        assert!(test_deps.geocoder.calls().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_surfaced() {
        let test_deps =
            TestDependencies::new().mock_store(MockResourceStore::new().failing_writes());
        let deps = test_deps.clone().into_deps();

        let err = submit_resource(input(), &deps).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Store(_)));
        assert_eq!(err.code(), "STORE_ERROR");
        assert_eq!(test_deps.resource_store.insert_calls().len(), 1);
    }

    #[tokio::test]
    async fn geocoding_miss_stores_without_coordinates() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.clone().into_deps();

        submit_resource(input(), &deps).await.unwrap();

        let stored = &test_deps.resource_store.insert_calls()[0];
        assert!(stored.latitude.is_none());
        assert!(stored.longitude.is_none());
    }

    #[test]
    fn missing_fields_message_lists_them() {
        let err = SubmissionError::MissingFields(vec!["url".into(), "phone".into()]);
        assert_eq!(err.to_string(), "Please fill in all required fields: url, phone");
    }
}
