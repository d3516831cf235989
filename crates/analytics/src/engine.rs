use crate::error::AnalyticsError;
use crate::format::round_currency;
use crate::histogram::Histogram;
use crate::report::{
    DashboardReport, GroupMean, Kpis, ListingRow, PivotTable, ScatterPoint, TrendPoint,
};
use crate::selection::FilteredView;
use configuration::DashboardSettings;
use core_types::{Listing, Location, PropertyType};
use itertools::Itertools;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A stateless calculator for the dashboard's aggregates.
#[derive(Debug, Clone)]
pub struct AggregateEngine {
    histogram_bins: usize,
    currency_symbol: String,
}

impl Default for AggregateEngine {
    fn default() -> Self {
        Self::new(&DashboardSettings::default())
    }
}

impl AggregateEngine {
    pub fn new(settings: &DashboardSettings) -> Self {
        Self {
            histogram_bins: settings.histogram_bins,
            currency_symbol: settings.currency_symbol.clone(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// The main entry point for computing the dashboard aggregates.
    ///
    /// # Arguments
    ///
    /// * `view` - The listings that passed the current filter selection.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DashboardReport`, or
    /// `AnalyticsError::EmptySelection` if the view has no rows.
    pub fn calculate(&self, view: &FilteredView<'_>) -> Result<DashboardReport, AnalyticsError> {
        if view.is_empty() {
            return Err(AnalyticsError::EmptySelection);
        }

        let prices: Vec<f64> = view.iter().map(|l| f64::from(l.price())).collect();
        let price_distribution =
            Histogram::compute(&prices, self.histogram_bins, &self.currency_symbol)?;

        let sorted = view.sorted_by_date();

        let report = DashboardReport {
            row_count: view.len(),
            kpis: self.calculate_kpis(view),
            listings: sorted.iter().map(|l| ListingRow::from(*l)).collect(),
            price_trend: sorted
                .iter()
                .map(|l| TrendPoint {
                    date: l.listing_date(),
                    price: l.price(),
                })
                .collect(),
            price_by_type: self.calculate_price_by_type(view),
            scatter: view
                .iter()
                .map(|l| ScatterPoint {
                    size_sqft: l.size_sqft(),
                    price: l.price(),
                    property_type: l.property_type(),
                })
                .collect(),
            heatmap: self.calculate_heatmap(view),
            price_distribution,
        };

        tracing::debug!(
            rows = report.row_count,
            groups = report.price_by_type.len(),
            "Calculated dashboard aggregates."
        );

        Ok(report)
    }

    /// Unweighted means of the four headline fields.
    fn calculate_kpis(&self, view: &FilteredView<'_>) -> Kpis {
        let count = view.len() as f64;
        let price_sum: Decimal = view.iter().map(|l| Decimal::from(l.price())).sum();
        let size_sum: f64 = view.iter().map(|l| f64::from(l.size_sqft())).sum();
        let bedroom_sum: f64 = view.iter().map(|l| f64::from(l.bedrooms())).sum();
        let ppsf_sum: f64 = view.iter().map(Listing::price_per_sqft).sum();

        Kpis {
            average_price: price_sum / Decimal::from(view.len()),
            average_size_sqft: size_sum / count,
            average_bedrooms: bedroom_sum / count,
            average_price_per_sqft: ppsf_sum / count,
        }
    }

    /// Mean price per property type, sorted descending by mean.
    ///
    /// Groups are formed in category order and the sort is stable, so tied
    /// means keep that order.
    fn calculate_price_by_type(&self, view: &FilteredView<'_>) -> Vec<GroupMean> {
        let mut totals: BTreeMap<PropertyType, (Decimal, usize)> = BTreeMap::new();
        for listing in view.iter() {
            let entry = totals
                .entry(listing.property_type())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += Decimal::from(listing.price());
            entry.1 += 1;
        }

        let mut groups: Vec<GroupMean> = totals
            .into_iter()
            .map(|(property_type, (sum, count))| GroupMean {
                property_type,
                mean_price: sum / Decimal::from(count),
                count,
            })
            .collect();
        groups.sort_by(|a, b| b.mean_price.cmp(&a.mean_price));
        groups
    }

    /// Location x property type table of mean prices.
    fn calculate_heatmap(&self, view: &FilteredView<'_>) -> PivotTable {
        let rows: Vec<Location> = view.iter().map(Listing::location).sorted().dedup().collect();
        let columns: Vec<PropertyType> = view
            .iter()
            .map(Listing::property_type)
            .sorted()
            .dedup()
            .collect();

        let mut totals: BTreeMap<(Location, PropertyType), (Decimal, usize)> = BTreeMap::new();
        for listing in view.iter() {
            let entry = totals
                .entry((listing.location(), listing.property_type()))
                .or_insert((Decimal::ZERO, 0));
            entry.0 += Decimal::from(listing.price());
            entry.1 += 1;
        }

        let cells = rows
            .iter()
            .map(|&location| {
                columns
                    .iter()
                    .map(|&property_type| {
                        totals
                            .get(&(location, property_type))
                            .map(|(sum, count)| round_currency(*sum / Decimal::from(*count)))
                    })
                    .collect()
            })
            .collect();

        PivotTable {
            rows,
            columns,
            cells,
        }
    }
}
