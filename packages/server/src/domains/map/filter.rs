//! Filtering of map markers by search text, category and location.
//!
//! Matching is per organization: a marker stays visible when its location is
//! selected and at least one of its organizations matches the search text and
//! category selection. Surviving markers only list the matching organizations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::models::{Marker, MarkerKey, MarkerOrganization};

/// Selection value meaning "no restriction"
pub const ALL: &str = "All";

/// A multi-select where "nothing selected" means everything passes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    /// Build from raw values. Empty input, or any value equal to `All`,
    /// selects everything.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = BTreeSet::new();
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            if value == ALL {
                return Selection::All;
            }
            selected.insert(value.to_string());
        }

        if selected.is_empty() {
            Selection::All
        } else {
            Selection::Only(selected)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values.contains(value),
        }
    }

    /// Flip one value in or out. Toggling `All` resets the selection, and
    /// removing the last value falls back to `All`.
    pub fn toggle(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() || value == ALL {
            *self = Selection::All;
            return;
        }

        match self {
            Selection::All => {
                *self = Selection::Only(BTreeSet::from([value.to_string()]));
            }
            Selection::Only(values) => {
                if !values.remove(value) {
                    values.insert(value.to_string());
                }
                if values.is_empty() {
                    *self = Selection::All;
                }
            }
        }
    }

    pub fn values(&self) -> Vec<String> {
        match self {
            Selection::All => Vec::new(),
            Selection::Only(values) => values.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub categories: Selection,
    pub locations: Selection,
    pub sort_by_name: bool,
}

impl FilterCriteria {
    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    fn organization_matches(&self, org: &MarkerOrganization, term: Option<&str>) -> bool {
        let category_ok = match &self.categories {
            Selection::All => true,
            Selection::Only(_) => org
                .category
                .as_deref()
                .is_some_and(|c| self.categories.contains(c)),
        };
        if !category_ok {
            return false;
        }

        let Some(term) = term else {
            return true;
        };
        let hit = |text: &str| text.to_lowercase().contains(term);
        hit(&org.name)
            || org.description.as_deref().is_some_and(hit)
            || org.locations.iter().any(|l| hit(l.as_str()))
    }

    fn location_matches(&self, marker: &Marker) -> bool {
        match &self.locations {
            Selection::All => true,
            Selection::Only(values) => values.iter().any(|v| marker.has_location(v)),
        }
    }
}

/// One row of the organization list shown beside the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationListing {
    pub organization: MarkerOrganization,
    pub marker_key: MarkerKey,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Markers and organizations that pass the current filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredView {
    pub markers: Vec<Marker>,
    pub organizations: Vec<OrganizationListing>,
    pub count: usize,
}

pub fn filter_markers(markers: &[Marker], criteria: &FilterCriteria) -> FilteredView {
    let term = criteria.search_term();

    let visible: Vec<Marker> = markers
        .iter()
        .filter(|marker| criteria.location_matches(marker))
        .filter_map(|marker| {
            let organizations: Vec<MarkerOrganization> = marker
                .organizations
                .iter()
                .filter(|org| criteria.organization_matches(org, term.as_deref()))
                .cloned()
                .collect();
            if organizations.is_empty() {
                return None;
            }
            let categories = organizations
                .iter()
                .filter_map(|org| org.category.clone())
                .collect();
            Some(Marker {
                organizations,
                categories,
                ..marker.clone()
            })
        })
        .collect();

    let mut organizations: Vec<OrganizationListing> = visible
        .iter()
        .flat_map(|marker| {
            marker.organizations.iter().map(move |org| OrganizationListing {
                organization: org.clone(),
                marker_key: marker.key,
                location: marker.name.clone(),
                latitude: marker.latitude,
                longitude: marker.longitude,
            })
        })
        .collect();

    if criteria.sort_by_name {
        organizations.sort_by(|a, b| {
            a.organization
                .name
                .to_lowercase()
                .cmp(&b.organization.name.to_lowercase())
        });
    }

    FilteredView {
        count: organizations.len(),
        markers: visible,
        organizations,
    }
}

/// Every category present on any marker, sorted
pub fn available_categories(markers: &[Marker]) -> Vec<String> {
    markers
        .iter()
        .flat_map(|m| m.categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every location label present on any marker, sorted
pub fn available_locations(markers: &[Marker]) -> Vec<String> {
    markers
        .iter()
        .flat_map(|m| std::iter::once(m.name.clone()).chain(m.locations.iter().cloned()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Filter controls with a staged ("pending") and an applied criteria set.
///
/// Search text applies immediately. Category, location and sort changes are
/// staged until [`FilterPanel::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPanel {
    pending: FilterCriteria,
    applied: FilterCriteria,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &FilterCriteria {
        &self.pending
    }

    pub fn applied(&self) -> &FilterCriteria {
        &self.applied
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.pending.search = text.clone();
        self.applied.search = text;
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.pending.categories.toggle(category);
    }

    pub fn toggle_location(&mut self, location: &str) {
        self.pending.locations.toggle(location);
    }

    pub fn set_sort_by_name(&mut self, sort: bool) {
        self.pending.sort_by_name = sort;
    }

    pub fn has_pending_changes(&self) -> bool {
        self.pending != self.applied
    }

    pub fn apply(&mut self) {
        self.applied = self.pending.clone();
    }

    pub fn clear_filters(&mut self) {
        self.pending = FilterCriteria::default();
        self.applied = FilterCriteria::default();
    }

    pub fn view(&self, markers: &[Marker]) -> FilteredView {
        filter_markers(markers, &self.applied)
    }
}
