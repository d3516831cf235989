use crate::error::AnalyticsError;
use core_types::{Listing, Location, PropertyType};
use dataset::Dataset;
use serde::Serialize;
use std::collections::BTreeSet;

/// The category values a user has chosen for each filterable field.
///
/// A listing passes when its location AND its property type are both selected.
/// An empty set on either field therefore selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    locations: BTreeSet<Location>,
    property_types: BTreeSet<PropertyType>,
}

impl FilterSelection {
    pub fn new(
        locations: impl IntoIterator<Item = Location>,
        property_types: impl IntoIterator<Item = PropertyType>,
    ) -> Self {
        Self {
            locations: locations.into_iter().collect(),
            property_types: property_types.into_iter().collect(),
        }
    }

    /// Every distinct value present in the dataset, which is the default selection.
    pub fn all(dataset: &Dataset) -> Self {
        Self::new(dataset.locations(), dataset.property_types())
    }

    /// Replaces the location selection.
    pub fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations = locations.into_iter().collect();
        self
    }

    /// Replaces the property type selection.
    pub fn with_property_types(
        mut self,
        property_types: impl IntoIterator<Item = PropertyType>,
    ) -> Self {
        self.property_types = property_types.into_iter().collect();
        self
    }

    pub fn locations(&self) -> &BTreeSet<Location> {
        &self.locations
    }

    pub fn property_types(&self) -> &BTreeSet<PropertyType> {
        &self.property_types
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.locations.contains(&listing.location())
            && self.property_types.contains(&listing.property_type())
    }

    /// Narrows the dataset to the matching listings, keeping dataset order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        let rows: Vec<&Listing> = dataset.iter().filter(|l| self.matches(l)).collect();

        tracing::debug!(
            locations = self.locations.len(),
            property_types = self.property_types.len(),
            matched = rows.len(),
            total = dataset.len(),
            "Applied filter selection."
        );

        FilteredView { rows }
    }

    /// Checks that every selected value is one of the dataset's filter options.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), AnalyticsError> {
        let locations = dataset.locations();
        if let Some(unknown) = self.locations.iter().find(|l| !locations.contains(l)) {
            return Err(AnalyticsError::UnknownOption {
                field: "location",
                value: unknown.to_string(),
            });
        }

        let property_types = dataset.property_types();
        if let Some(unknown) = self
            .property_types
            .iter()
            .find(|t| !property_types.contains(t))
        {
            return Err(AnalyticsError::UnknownOption {
                field: "property type",
                value: unknown.to_string(),
            });
        }

        Ok(())
    }
}

/// The listings that pass the current selection, borrowed from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Listing>,
}

impl<'a> FilteredView<'a> {
    pub fn rows(&self) -> &[&'a Listing] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ordered by listing date; rows sharing a date keep their dataset order.
    pub fn sorted_by_date(&self) -> Vec<&'a Listing> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|l| l.listing_date());
        rows
    }
}
