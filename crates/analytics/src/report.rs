use crate::format::{decimal_to_whole, round_f64};
use crate::histogram::Histogram;
use chrono::NaiveDate;
use core_types::{Listing, Location, PropertyType};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything the presentation layer needs for one non-empty filtered view.
///
/// This struct is the final output of the `AggregateEngine`. Every field is a
/// pure function of the view it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub row_count: usize,
    pub kpis: Kpis,
    /// The filtered rows, oldest listing first.
    pub listings: Vec<ListingRow>,
    pub price_trend: Vec<TrendPoint>,
    /// Mean price per property type, highest first.
    pub price_by_type: Vec<GroupMean>,
    pub scatter: Vec<ScatterPoint>,
    pub heatmap: PivotTable,
    pub price_distribution: Histogram,
}

/// Headline averages over the filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub average_price: Decimal,
    pub average_size_sqft: f64,
    pub average_bedrooms: f64,
    pub average_price_per_sqft: f64,
}

impl Kpis {
    /// Average price rounded to whole currency units.
    pub fn average_price_display(&self) -> i64 {
        decimal_to_whole(self.average_price)
    }

    pub fn average_size_display(&self) -> i64 {
        round_f64(self.average_size_sqft, 0) as i64
    }

    /// Average bedrooms rounded to one decimal place.
    pub fn average_bedrooms_display(&self) -> f64 {
        round_f64(self.average_bedrooms, 1)
    }

    pub fn average_price_per_sqft_display(&self) -> i64 {
        round_f64(self.average_price_per_sqft, 0) as i64
    }
}

/// A row of the listing details table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRow {
    pub listing_date: NaiveDate,
    pub property_type: PropertyType,
    pub location: Location,
    pub price: u32,
    pub size_sqft: u32,
    pub bedrooms: u8,
    pub price_per_sqft: f64,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        Self {
            listing_date: listing.listing_date(),
            property_type: listing.property_type(),
            location: listing.location(),
            price: listing.price(),
            size_sqft: listing.size_sqft(),
            bedrooms: listing.bedrooms(),
            price_per_sqft: listing.price_per_sqft(),
        }
    }
}

/// One point of the price-over-time line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub price: u32,
}

/// Mean price of one property type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMean {
    pub property_type: PropertyType,
    pub mean_price: Decimal,
    pub count: usize,
}

/// One point of the size-vs-price scatter, grouped by property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScatterPoint {
    pub size_sqft: u32,
    pub price: u32,
    pub property_type: PropertyType,
}

/// Mean price by location (rows) and property type (columns).
///
/// Only categories present in the view appear as axes. A cell is `None` when
/// no listing has that combination; it is never reported as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    pub rows: Vec<Location>,
    pub columns: Vec<PropertyType>,
    /// `cells[row][column]`, rounded to whole currency units.
    pub cells: Vec<Vec<Option<Decimal>>>,
}

impl PivotTable {
    pub fn get(&self, location: Location, property_type: PropertyType) -> Option<Decimal> {
        let row = self.rows.iter().position(|l| *l == location)?;
        let column = self.columns.iter().position(|t| *t == property_type)?;
        self.cells[row][column]
    }

    /// Smallest and largest populated cell, used to shade the heatmap.
    pub fn value_range(&self) -> Option<(Decimal, Decimal)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |range, &value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}
