use crate::enums::{Location, PropertyType};
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::Serialize;

/// A single simulated property listing.
///
/// Fields are private so that the derived `price_per_sqft` can never drift from
/// the `price` and `size_sqft` it is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    listing_date: NaiveDate,
    property_type: PropertyType,
    location: Location,
    price: u32,
    size_sqft: u32,
    bedrooms: u8,
}

impl Listing {
    /// Creates a new listing, rejecting a zero floor area.
    pub fn new(
        listing_date: NaiveDate,
        property_type: PropertyType,
        location: Location,
        price: u32,
        size_sqft: u32,
        bedrooms: u8,
    ) -> Result<Self, CoreError> {
        if size_sqft == 0 {
            return Err(CoreError::InvalidInput(
                "size_sqft".to_string(),
                "floor area must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            listing_date,
            property_type,
            location,
            price,
            size_sqft,
            bedrooms,
        })
    }

    pub fn listing_date(&self) -> NaiveDate {
        self.listing_date
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn size_sqft(&self) -> u32 {
        self.size_sqft
    }

    pub fn bedrooms(&self) -> u8 {
        self.bedrooms
    }

    /// Asking price divided by floor area. `size_sqft` is non-zero by construction.
    pub fn price_per_sqft(&self) -> f64 {
        f64::from(self.price) / f64::from(self.size_sqft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn computes_price_per_sqft() {
        let listing = Listing::new(
            date(),
            PropertyType::Condo,
            Location::Penang,
            900_000,
            1_200,
            3,
        )
        .unwrap();
        assert!((listing.price_per_sqft() - 750.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_zero_size() {
        let err = Listing::new(date(), PropertyType::Landed, Location::Selangor, 500_000, 0, 2)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "size_sqft"));
    }
}
