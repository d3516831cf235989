use crate::error::DatasetError;
use chrono::{Days, NaiveDate};
use configuration::DatasetSettings;
use core_types::{Listing, Location, PropertyType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::ops::Range;

/// Number of listings in every generated dataset.
pub const LISTING_COUNT: usize = 20;

pub const PRICE_RANGE: Range<u32> = 300_000..1_500_000;
pub const SIZE_SQFT_RANGE: Range<u32> = 600..3_500;
pub const BEDROOMS_RANGE: Range<u8> = 1..6;

/// The base table of listings. Generated once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    listings: Vec<Listing>,
}

impl Dataset {
    /// Wraps an existing set of listings, preserving their order.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Distinct locations present in the data, sorted.
    pub fn locations(&self) -> Vec<Location> {
        self.listings
            .iter()
            .map(Listing::location)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct property types present in the data, sorted.
    pub fn property_types(&self) -> Vec<PropertyType> {
        self.listings
            .iter()
            .map(Listing::property_type)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}

/// Draws a reproducible table of listings from a seeded RNG.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    settings: DatasetSettings,
}

impl DatasetGenerator {
    pub fn new(settings: DatasetSettings) -> Self {
        Self { settings }
    }

    /// Generates exactly `LISTING_COUNT` listings.
    ///
    /// Columns are drawn one after another (property types, locations, prices,
    /// sizes, bedrooms), each value independently and uniformly. The same seed
    /// always yields the same table.
    pub fn generate(&self) -> Result<Dataset, DatasetError> {
        let start = self.settings.start_date;
        let mut rng = StdRng::seed_from_u64(self.settings.seed);

        let dates = listing_dates(start, LISTING_COUNT)?;
        let property_types: Vec<PropertyType> = (0..LISTING_COUNT)
            .map(|_| {
                PropertyType::GENERATION_ORDER
                    [rng.gen_range(0..PropertyType::GENERATION_ORDER.len())]
            })
            .collect();
        let locations: Vec<Location> = (0..LISTING_COUNT)
            .map(|_| {
                Location::GENERATION_ORDER[rng.gen_range(0..Location::GENERATION_ORDER.len())]
            })
            .collect();
        let prices: Vec<u32> = (0..LISTING_COUNT).map(|_| rng.gen_range(PRICE_RANGE)).collect();
        let sizes: Vec<u32> = (0..LISTING_COUNT).map(|_| rng.gen_range(SIZE_SQFT_RANGE)).collect();
        let bedrooms: Vec<u8> = (0..LISTING_COUNT).map(|_| rng.gen_range(BEDROOMS_RANGE)).collect();

        let listings = (0..LISTING_COUNT)
            .map(|i| {
                Listing::new(
                    dates[i],
                    property_types[i],
                    locations[i],
                    prices[i],
                    sizes[i],
                    bedrooms[i],
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            seed = self.settings.seed,
            start = %start,
            rows = listings.len(),
            "Generated listing dataset."
        );

        Ok(Dataset::from_listings(listings))
    }
}

/// `count` consecutive calendar days beginning at `start`.
fn listing_dates(start: NaiveDate, count: usize) -> Result<Vec<NaiveDate>, DatasetError> {
    (0..count as u64)
        .map(|offset| {
            start
                .checked_add_days(Days::new(offset))
                .ok_or(DatasetError::DateOverflow(start))
        })
        .collect()
}
